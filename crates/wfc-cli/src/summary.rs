use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{RunKind, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Data: {}", result.data_dir.display());
    println!("Output: {}", result.output.display());
    println!("Records found: {}", result.records_found);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for count in &result.tables {
        table.add_row(vec![
            Cell::new(count.table.trim_end_matches(".csv")),
            count_cell(count.rows),
            Cell::new(count.path.display()),
        ]);
    }
    println!("{table}");

    println!("{}", skipped_table(result));

    let stats = &result.stats;
    if !stats.errors.is_empty() {
        eprintln!("Errors:");
        for error in &stats.errors {
            eprintln!("- {error}");
        }
    }
    if !stats.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &stats.warnings {
            eprintln!("- {warning}");
        }
    }

    print_next_steps(result);
}

/// Per-kind counts of inputs left out of the tables.
fn skipped_table(result: &RunResult) -> Table {
    let stats = &result.stats;
    let mut skipped = Table::new();
    skipped.set_header(vec![header_cell("Skipped"), header_cell("Count")]);
    apply_summary_table_style(&mut skipped);
    align_column(&mut skipped, 1, CellAlignment::Right);
    skipped.add_row(vec![
        Cell::new("Records"),
        issue_cell(stats.records_failed, Color::Red),
    ]);
    if result.kind == RunKind::Extract {
        skipped.add_row(vec![
            Cell::new("Segments"),
            issue_cell(stats.segments_failed, Color::Yellow),
        ]);
        if result.skip_numerics {
            skipped.add_row(vec![Cell::new("Numerics files"), dim_cell("disabled")]);
        } else {
            skipped.add_row(vec![
                Cell::new("Numerics files"),
                issue_cell(stats.numerics_failed, Color::Yellow),
            ]);
        }
    }
    skipped
}

fn print_next_steps(result: &RunResult) {
    println!();
    println!("Next steps: load the tables into PostgreSQL, e.g.");
    for count in &result.tables {
        let table = count.table.trim_end_matches(".csv");
        println!(
            "  \\copy {table} FROM '{}' WITH (FORMAT csv, HEADER true, NULL '')",
            count.path.display()
        );
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(rows: usize) -> Cell {
    if rows > 0 {
        Cell::new(rows).add_attribute(Attribute::Bold)
    } else {
        dim_cell(rows)
    }
}

fn issue_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

use std::path::PathBuf;

use wfc_cli::pipeline::ExtractStats;
use wfc_output::TableCount;

/// Which command produced a run result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Extract,
    UpdateRecords,
}

#[derive(Debug)]
pub struct RunResult {
    pub kind: RunKind,
    pub data_dir: PathBuf,
    /// Output directory, or the records file for `update-records`.
    pub output: PathBuf,
    pub records_found: usize,
    pub skip_numerics: bool,
    pub tables: Vec<TableCount>,
    pub stats: ExtractStats,
}

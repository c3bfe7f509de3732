//! Record discovery for the group / subject / record hierarchy.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wfc_model::ScannedRecord;

use crate::error::{IngestError, Result};

/// Extension of WFDB header files.
pub const HEADER_EXTENSION: &str = "hea";

/// Prefix shared by group and subject directory names.
const DIRECTORY_PREFIX: &str = "p";

/// Returns the path of the header file `<dir>/<name>.hea`.
pub fn header_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{HEADER_EXTENSION}"))
}

/// Scans a data root for waveform records.
///
/// The layout is `<root>/p<group>/p<subject_id>/<record>/<record>.hea`.
/// Each level is sorted by name. Directories that do not follow the naming
/// pattern, and record directories without a self-named header, are skipped.
///
/// Returns [`IngestError::DirectoryNotFound`] before scanning if `root` is
/// not a directory.
pub fn scan_corpus(root: &Path) -> Result<Vec<ScannedRecord>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    info!(root = %root.display(), "scanning data directory");

    let mut records = Vec::new();

    for (group_name, group_dir) in sorted_subdirs(root)? {
        if !group_name.starts_with(DIRECTORY_PREFIX) {
            continue;
        }

        for (subject_name, subject_dir) in sorted_subdirs(&group_dir)? {
            let Some(subject_id) = parse_subject_id(&subject_name) else {
                debug!(dir = %subject_dir.display(), "skipping non-subject directory");
                continue;
            };

            for (record_name, record_dir) in sorted_subdirs(&subject_dir)? {
                if !header_path(&record_dir, &record_name).is_file() {
                    continue;
                }
                records.push(ScannedRecord {
                    relative_path: format!("{group_name}/{subject_name}/{record_name}"),
                    record_name,
                    subject_id,
                });
            }
        }
    }

    info!(count = records.len(), "found records");
    Ok(records)
}

/// Parses `p<digits>` into a subject id.
fn parse_subject_id(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(DIRECTORY_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Lists the subdirectories of `dir` with UTF-8 names, sorted by name.
fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs = Vec::new();

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip files
        if !path.is_dir() {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %path.display(), "skipping directory with non UTF-8 name");
            continue;
        };

        dirs.push((name, path));
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_record(root: &Path, group: &str, subject: &str, record: &str, with_header: bool) {
        let dir = root.join(group).join(subject).join(record);
        std::fs::create_dir_all(&dir).unwrap();
        if with_header {
            std::fs::write(header_path(&dir, record), "r 0\n").unwrap();
        }
    }

    #[test]
    fn test_scan_corpus_sorted_levels() {
        let dir = TempDir::new().unwrap();
        add_record(dir.path(), "p101", "p10100002", "90000002", true);
        add_record(dir.path(), "p100", "p10000032", "80000002", true);
        add_record(dir.path(), "p100", "p10000032", "80000001", true);
        add_record(dir.path(), "p100", "p10000001", "85000000", true);

        let records = scan_corpus(dir.path()).unwrap();
        let paths: Vec<&str> = records.iter().map(|r| r.relative_path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "p100/p10000001/85000000",
                "p100/p10000032/80000001",
                "p100/p10000032/80000002",
                "p101/p10100002/90000002",
            ]
        );
        assert_eq!(records[1].record_name, "80000001");
        assert_eq!(records[1].subject_id, 10000032);
    }

    #[test]
    fn test_scan_corpus_skips_unmatched_directories() {
        let dir = TempDir::new().unwrap();
        add_record(dir.path(), "p100", "p10000001", "80000001", true);
        // No self-named header
        add_record(dir.path(), "p100", "p10000001", "80000002", false);
        // Group without prefix
        add_record(dir.path(), "q100", "p10000001", "80000003", true);
        // Subject id not numeric
        add_record(dir.path(), "p100", "pxyz", "80000004", true);
        // Stray file at group level
        std::fs::write(dir.path().join("p100").join("RECORDS"), "").unwrap();

        let records = scan_corpus(dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "p100/p10000001/80000001");
    }

    #[test]
    fn test_scan_corpus_header_with_other_name_ignored() {
        let dir = TempDir::new().unwrap();
        let record_dir = dir.path().join("p100").join("p1").join("rec");
        std::fs::create_dir_all(&record_dir).unwrap();
        std::fs::write(record_dir.join("other.hea"), "other 0\n").unwrap();

        let records = scan_corpus(dir.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_scan_corpus_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = scan_corpus(&missing);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_parse_subject_id() {
        assert_eq!(parse_subject_id("p10014354"), Some(10014354));
        assert_eq!(parse_subject_id("p"), None);
        assert_eq!(parse_subject_id("x10014354"), None);
        assert_eq!(parse_subject_id("p12a"), None);
    }
}

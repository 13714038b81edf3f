//! Dataset files: atomic writing and loading

use crate::error::DatasetError;
use shortbench_batch::WorkResult;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// A loaded dataset: URLs and aliases paired by index
#[derive(Debug, Clone)]
pub struct Dataset {
    pub urls: Vec<String>,
    pub aliases: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Write the two dataset files from a completed batch
///
/// Each file is written to a temp file in the target directory and then
/// persisted over the destination, so a failed run never truncates or
/// clobbers a previous valid dataset.
pub fn write_dataset(
    urls_path: &Path,
    aliases_path: &Path,
    results: &[WorkResult<String, String>],
) -> Result<(), DatasetError> {
    let mut urls = String::new();
    let mut aliases = String::new();
    for result in results {
        urls.push_str(&result.input);
        urls.push('\n');
        aliases.push_str(&result.output);
        aliases.push('\n');
    }

    persist_atomically(urls_path, urls.as_bytes())?;
    persist_atomically(aliases_path, aliases.as_bytes())?;

    info!(
        entries = results.len(),
        urls_file = %urls_path.display(),
        aliases_file = %aliases_path.display(),
        "Dataset written"
    );
    Ok(())
}

fn persist_atomically(path: &Path, contents: &[u8]) -> Result<(), DatasetError> {
    // Temp file must live in the destination directory for rename to work
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.persist(path).map_err(|e| DatasetError::Io(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "File persisted");
    Ok(())
}

/// Load a previously generated dataset for replay
///
/// Blank lines are skipped. The two files must pair up line for line and
/// must not be empty.
pub fn load_dataset(urls_path: &Path, aliases_path: &Path) -> Result<Dataset, DatasetError> {
    let urls = read_lines(urls_path)?;
    let aliases = read_lines(aliases_path)?;

    if urls.is_empty() {
        return Err(DatasetError::Empty {
            path: urls_path.to_path_buf(),
        });
    }
    if urls.len() != aliases.len() {
        return Err(DatasetError::LineCountMismatch {
            urls: urls.len(),
            aliases: aliases.len(),
        });
    }

    debug!(entries = urls.len(), "Dataset loaded");
    Ok(Dataset { urls, aliases })
}

fn read_lines(path: &Path) -> Result<Vec<String>, DatasetError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize) -> WorkResult<String, String> {
        WorkResult {
            index,
            input: format!("https://example.com/{index}"),
            output: format!("alias{index}"),
        }
    }

    #[test]
    fn write_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let urls_path = dir.path().join("data_urls.txt");
        let aliases_path = dir.path().join("data_aliases.txt");

        let results: Vec<_> = (0..5).map(result).collect();
        write_dataset(&urls_path, &aliases_path, &results).unwrap();

        let dataset = load_dataset(&urls_path, &aliases_path).unwrap();
        assert_eq!(dataset.len(), 5);
        for i in 0..5 {
            assert_eq!(dataset.urls[i], format!("https://example.com/{i}"));
            assert_eq!(dataset.aliases[i], format!("alias{i}"));
        }
    }

    #[test]
    fn write_replaces_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let urls_path = dir.path().join("data_urls.txt");
        let aliases_path = dir.path().join("data_aliases.txt");

        write_dataset(&urls_path, &aliases_path, &[result(0), result(1)]).unwrap();
        write_dataset(&urls_path, &aliases_path, &[result(2)]).unwrap();

        let dataset = load_dataset(&urls_path, &aliases_path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.aliases[0], "alias2");
    }

    #[test]
    fn load_rejects_mismatched_files() {
        let dir = tempfile::tempdir().unwrap();
        let urls_path = dir.path().join("data_urls.txt");
        let aliases_path = dir.path().join("data_aliases.txt");
        std::fs::write(&urls_path, "https://example.com/a\nhttps://example.com/b\n").unwrap();
        std::fs::write(&aliases_path, "a1\n").unwrap();

        let err = load_dataset(&urls_path, &aliases_path).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LineCountMismatch { urls: 2, aliases: 1 }
        ));
    }

    #[test]
    fn load_rejects_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let urls_path = dir.path().join("data_urls.txt");
        let aliases_path = dir.path().join("data_aliases.txt");
        std::fs::write(&urls_path, "\n\n").unwrap();
        std::fs::write(&aliases_path, "").unwrap();

        assert!(matches!(
            load_dataset(&urls_path, &aliases_path).unwrap_err(),
            DatasetError::Empty { .. }
        ));
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let urls_path = dir.path().join("data_urls.txt");
        let aliases_path = dir.path().join("data_aliases.txt");
        std::fs::write(&urls_path, "https://example.com/a\n\nhttps://example.com/b\n").unwrap();
        std::fs::write(&aliases_path, "a1\na2\n\n").unwrap();

        let dataset = load_dataset(&urls_path, &aliases_path).unwrap();
        assert_eq!(dataset.len(), 2);
    }
}

//! Input discovery and filename labeling
//!
//! Result files are named `<location>_<network>.json`. Inputs are given as a
//! list of paths; directories are expanded to the `*.json` files directly
//! inside them.

use crate::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension that marks a speed-test result file
pub const RESULT_EXTENSION: &str = ".json";

/// The two labels carried in a result file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub location: String,
    pub network: String,
}

impl Labels {
    /// Split a file name such as `nyc_fiber.json` into its labels.
    ///
    /// Only the first two underscore-separated tokens are used; anything after
    /// the second token is ignored.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let stem = file_name.strip_suffix(RESULT_EXTENSION).unwrap_or(file_name);
        let mut tokens = stem.split('_');

        match (tokens.next(), tokens.next()) {
            (Some(location), Some(network)) => Ok(Self {
                location: location.to_string(),
                network: network.to_string(),
            }),
            _ => Err(AppError::naming_convention(file_name)),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AppError::naming_convention(path.display().to_string()))?;
        Self::from_file_name(file_name)
    }
}

/// Whether a directory entry name looks like a result file
fn is_result_file_name(name: &str) -> bool {
    name.ends_with(RESULT_EXTENSION) && !name.starts_with('.')
}

/// Result files directly inside `dir`, sorted by file name
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read directory {}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_result_file_name(name) && entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expand the given inputs into an ordered list of result files.
///
/// Files are kept in argument order; each directory contributes its result
/// files sorted by name.
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(AppError::io(format!("Input path does not exist: {}", path.display())));
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_labels_from_two_tokens() {
        let labels = Labels::from_file_name("nyc_fiber.json").unwrap();
        assert_eq!(labels.location, "nyc");
        assert_eq!(labels.network, "fiber");
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let labels = Labels::from_file_name("nyc_fiber_5g.json").unwrap();
        assert_eq!(labels.location, "nyc");
        assert_eq!(labels.network, "fiber");
    }

    #[test]
    fn test_single_token_is_a_naming_error() {
        let error = Labels::from_file_name("nyc.json").unwrap_err();
        assert!(matches!(error, AppError::NamingConvention(ref name) if name == "nyc.json"));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_empty_tokens_allowed() {
        let labels = Labels::from_file_name("nyc_.json").unwrap();
        assert_eq!(labels.location, "nyc");
        assert_eq!(labels.network, "");

        let labels = Labels::from_file_name("_wifi.json").unwrap();
        assert_eq!(labels.location, "");
        assert_eq!(labels.network, "wifi");
    }

    #[test]
    fn test_labels_from_path() {
        let labels = Labels::from_path(Path::new("/data/results/sf_wifi.json")).unwrap();
        assert_eq!(labels, Labels { location: "sf".into(), network: "wifi".into() });
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["sf_wifi.json", "nyc_fiber.json", "notes.txt", ".hidden_file.json", "la_lte.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested_dir.json")).unwrap();

        let files = scan_directory(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["la_lte.json", "nyc_fiber.json", "sf_wifi.json"]);
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let files = discover_inputs(&[dir.path().to_path_buf()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_mixed_inputs_keeps_argument_order() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("batch");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b_two.json"), "{}").unwrap();
        fs::write(sub.join("a_one.json"), "{}").unwrap();
        let single = dir.path().join("z_last.json");
        fs::write(&single, "{}").unwrap();

        let files = discover_inputs(&[single.clone(), sub.clone()]).unwrap();
        assert_eq!(files, vec![single, sub.join("a_one.json"), sub.join("b_two.json")]);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let error = discover_inputs(&[dir.path().join("absent")]).unwrap_err();
        assert_eq!(error.category(), "IO");
    }
}

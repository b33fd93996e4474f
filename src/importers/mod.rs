//! Import sources and the common importer contract

pub mod clickup;

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ImportResult;

/// Errors raised while acquiring rows from an export file.
///
/// These cover the file and CSV structure only. Malformed data inside
/// individual fields is never an error; the transform normalizes it to
/// absent values.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ImportError {
    #[error("export file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read export file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in export file: {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Common interface implemented by every import source
pub trait Importer {
    /// Display name shown in prompts and summaries
    fn name(&self) -> &'static str;

    /// Team name suggested to the downstream loader
    fn default_team_name(&self) -> &'static str;

    /// Read the export file and produce the normalized result
    fn import(&self) -> Result<ImportResult, ImportError>;
}

/// Registry of available import sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ClickUpCsv,
}

impl SourceKind {
    pub const ALL: &'static [SourceKind] = &[SourceKind::ClickUpCsv];

    /// Stable key used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::ClickUpCsv => "clickup-csv",
        }
    }

    /// Human-readable source name
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::ClickUpCsv => "ClickUp (CSV)",
        }
    }

    /// Construct the importer for this source over the given export file
    pub fn importer(&self, file_path: impl Into<PathBuf>) -> Box<dyn Importer> {
        match self {
            SourceKind::ClickUpCsv => Box::new(clickup::ClickUpCsvImporter::new(file_path)),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clickup-csv" | "clickup" => Ok(SourceKind::ClickUpCsv),
            _ => Err(format!(
                "Unsupported import source: '{}'. Supported: clickup-csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parse() {
        assert_eq!("clickup-csv".parse::<SourceKind>(), Ok(SourceKind::ClickUpCsv));
        assert_eq!("ClickUp".parse::<SourceKind>(), Ok(SourceKind::ClickUpCsv));
        assert!("jira".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_source_metadata() {
        let source = SourceKind::ClickUpCsv;
        assert_eq!(source.key(), "clickup-csv");
        assert_eq!(source.label(), "ClickUp (CSV)");
        let importer = source.importer("tasks.csv");
        assert_eq!(importer.name(), "ClickUp (CSV)");
        assert_eq!(importer.default_team_name(), "ClickUp");
    }
}

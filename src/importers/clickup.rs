//! ClickUp CSV export importer
//!
//! ClickUp exports tasks as CSV with loosely-typed cells: `Assignees` and
//! `Tags` hold JSON arrays serialized into the cell, dates are millisecond
//! epochs as text, and `Time Estimated` is a raw duration count. The
//! transform maps each task row onto one normalized issue and derives the
//! user and label entities along the way.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord};

use super::{ImportError, Importer};
use crate::model::{ImportResult, Issue, Label, Priority, User};
use crate::parse::{parse_int_prefix, parse_string_array};

/// Scale factor from ClickUp time estimates to the tracker's point range
const ESTIMATE_UNIT: i64 = 112_500;
/// Largest estimate value the tracker accepts
const MAX_ESTIMATE: i64 = 64;

/// One task row from the export, reduced to the fields the mapping reads.
///
/// The export carries more columns (Task ID, Due Date, Parent ID,
/// attachments, list/folder/space names, checklists, comments, time spent);
/// they have no counterpart in the target schema and are dropped at
/// acquisition. Absent columns read as empty strings.
#[derive(Debug, Clone, Default)]
pub struct TaskRow {
    pub task_name: String,
    pub task_content: String,
    pub status: String,
    pub assignees: String,
    pub tags: String,
    pub priority: String,
    pub date_created: String,
    pub start_date: String,
    pub time_estimated: String,
}

/// Importer for ClickUp CSV task exports
pub struct ClickUpCsvImporter {
    file_path: PathBuf,
}

impl ClickUpCsvImporter {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Read the export into owned task rows.
    ///
    /// Structural CSV problems are fatal here; per-field oddities are left
    /// for the transform to normalize.
    fn read_rows(&self) -> Result<Vec<TaskRow>, ImportError> {
        if !self.file_path.exists() {
            return Err(ImportError::FileNotFound(self.file_path.clone()));
        }

        let file = File::open(&self.file_path).map_err(|source| ImportError::Io {
            path: self.file_path.clone(),
            source,
        })?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = rdr
            .headers()
            .map_err(|source| ImportError::Csv {
                path: self.file_path.clone(),
                source,
            })?
            .clone();
        let header_map = build_header_map(&headers);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|source| ImportError::Csv {
                path: self.file_path.clone(),
                source,
            })?;
            rows.push(TaskRow {
                task_name: get_field(&record, &header_map, "task name"),
                task_content: get_field(&record, &header_map, "task content"),
                status: get_field(&record, &header_map, "status"),
                assignees: get_field(&record, &header_map, "assignees"),
                tags: get_field(&record, &header_map, "tags"),
                priority: get_field(&record, &header_map, "priority"),
                date_created: get_field(&record, &header_map, "date created"),
                start_date: get_field(&record, &header_map, "start date"),
                time_estimated: get_field(&record, &header_map, "time estimated"),
            });
        }

        Ok(rows)
    }
}

impl Importer for ClickUpCsvImporter {
    fn name(&self) -> &'static str {
        "ClickUp (CSV)"
    }

    fn default_team_name(&self) -> &'static str {
        "ClickUp"
    }

    fn import(&self) -> Result<ImportResult, ImportError> {
        let rows = self.read_rows()?;
        Ok(transform(&rows))
    }
}

/// Build a map from lowercased header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

/// Get a field value from a CSV record; absent columns read as empty.
///
/// Values are passed through verbatim, no trimming: descriptions and the
/// JSON-encoded cells must reach the transform untouched.
fn get_field(record: &StringRecord, header_map: &HashMap<String, usize>, field: &str) -> String {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .unwrap_or_default()
        .to_string()
}

/// Map task rows onto the normalized import result.
///
/// Two passes: user discovery over every row (assignees on rows that are
/// later skipped still become users), then issue mapping in row order. Never
/// fails; malformed per-row data falls back to empty/absent values.
pub fn transform(rows: &[TaskRow]) -> ImportResult {
    let mut result = ImportResult::default();

    // Rows whose Assignees cell does not decode contribute no users.
    let mut assignee_names = BTreeSet::new();
    for row in rows {
        if let Some(names) = parse_string_array(&row.assignees) {
            assignee_names.extend(names);
        }
    }
    for name in assignee_names {
        result.users.insert(name.clone(), User { name });
    }

    for row in rows {
        // A row without a task name carries no importable issue
        if row.task_name.is_empty() {
            continue;
        }

        let tags = parse_string_array(&row.tags).unwrap_or_default();

        // Primary assignee is the first listed name
        let assignee_id = parse_string_array(&row.assignees)
            .and_then(|names| names.into_iter().next())
            .unwrap_or_default();

        // ClickUp serializes an absent rich-text body as the literal "null"
        let description = if row.task_content == "null" {
            String::new()
        } else {
            row.task_content.clone()
        };

        result.issues.push(Issue {
            title: row.task_name.clone(),
            description,
            priority: Priority::from_code(&row.priority),
            status: row.status.clone(),
            assignee_id,
            created_at: parse_timestamp(&row.date_created),
            started_at: parse_timestamp(&row.start_date),
            estimate: parse_estimate(&row.time_estimated),
            labels: tags.clone(),
        });

        // First occurrence wins; record content is the same either way
        for tag in tags {
            if !tag.is_empty() && !result.labels.contains_key(&tag) {
                result.labels.insert(tag.clone(), Label { name: tag });
            }
        }
    }

    result
}

/// Millisecond epoch in a text field; empty or non-numeric reads as absent
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    let millis = parse_int_prefix(raw)?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Convert a raw time estimate onto the 0-64 point scale, rounding up
fn parse_estimate(raw: &str) -> Option<u8> {
    if raw.is_empty() {
        return None;
    }
    let value = parse_int_prefix(raw)?;
    let points = if value <= 0 {
        0
    } else {
        value.saturating_add(ESTIMATE_UNIT - 1) / ESTIMATE_UNIT
    };
    Some(points.min(MAX_ESTIMATE) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row(name: &str) -> TaskRow {
        TaskRow {
            task_name: name.to_string(),
            ..TaskRow::default()
        }
    }

    #[test]
    fn test_rows_without_task_name_are_skipped() {
        let rows = vec![row("First"), row(""), row("Second")];
        let result = transform(&rows);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].title, "First");
        assert_eq!(result.issues[1].title, "Second");
    }

    #[test]
    fn test_priority_mapping() {
        let mut rows = Vec::new();
        for code in ["1", "2", "3", "4", "", "7", "urgent"] {
            let mut r = row("Task");
            r.priority = code.to_string();
            rows.push(r);
        }
        let result = transform(&rows);
        let levels: Vec<u8> = result.issues.iter().map(|i| i.priority.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 0, 0, 0]);
    }

    #[test]
    fn test_primary_assignee_is_first_element() {
        let mut r = row("Task");
        r.assignees = r#"["alice","bob"]"#.to_string();
        let result = transform(&[r]);
        assert_eq!(result.issues[0].assignee_id, "alice");
    }

    #[test]
    fn test_assignee_falls_back_to_empty() {
        for assignees in ["[]", "[alice]", "not json", ""] {
            let mut r = row("Task");
            r.assignees = assignees.to_string();
            let result = transform(&[r]);
            assert_eq!(result.issues[0].assignee_id, "", "input: {:?}", assignees);
        }
    }

    #[test]
    fn test_users_collected_from_all_rows() {
        let mut named = row("Task");
        named.assignees = r#"["alice","bob"]"#.to_string();
        // Skipped for the issue list, but its assignee still becomes a user
        let mut unnamed = row("");
        unnamed.assignees = r#"["carol"]"#.to_string();
        let mut malformed = row("Other");
        malformed.assignees = "[broken".to_string();

        let result = transform(&[named, unnamed, malformed]);
        let users: Vec<&String> = result.users.keys().collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
        assert_eq!(result.users["alice"], User { name: "alice".to_string() });
    }

    #[test]
    fn test_users_deduplicated_across_rows() {
        let mut a = row("A");
        a.assignees = r#"["alice"]"#.to_string();
        let mut b = row("B");
        b.assignees = r#"["alice","bob"]"#.to_string();
        let result = transform(&[a, b]);
        assert_eq!(result.users.len(), 2);
    }

    #[test]
    fn test_labels_come_from_non_skipped_rows_only() {
        let mut kept = row("Task");
        kept.tags = r#"["auth","backend"]"#.to_string();
        let mut skipped = row("");
        skipped.tags = r#"["ops"]"#.to_string();
        let result = transform(&[kept, skipped]);
        let labels: Vec<&String> = result.labels.keys().collect();
        assert_eq!(labels, vec!["auth", "backend"]);
    }

    #[test]
    fn test_labels_deduplicated_and_empty_tags_dropped() {
        let mut a = row("A");
        a.tags = r#"["auth","","auth"]"#.to_string();
        let mut b = row("B");
        b.tags = r#"["auth","infra"]"#.to_string();
        let result = transform(&[a, b]);
        assert_eq!(result.labels.len(), 2);
        assert!(result.labels.contains_key("auth"));
        assert!(result.labels.contains_key("infra"));
        // The issue keeps its full decoded tag list, empty entries included
        assert_eq!(result.issues[0].labels, vec!["auth", "", "auth"]);
    }

    #[test]
    fn test_malformed_tags_read_as_no_labels() {
        let mut r = row("Task");
        r.tags = "not json".to_string();
        let result = transform(&[r]);
        assert!(result.issues[0].labels.is_empty());
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_estimate_conversion() {
        let cases = [
            ("225000", Some(2)),
            ("112500", Some(1)),
            ("112501", Some(2)),
            ("10000000", Some(64)),
            ("0", Some(0)),
            ("12h", Some(1)),
            ("abc", None),
            ("", None),
        ];
        for (raw, expected) in cases {
            let mut r = row("Task");
            r.time_estimated = raw.to_string();
            let result = transform(&[r]);
            assert_eq!(result.issues[0].estimate, expected, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_description_null_literal_normalized() {
        let mut a = row("A");
        a.task_content = "null".to_string();
        let mut b = row("B");
        b.task_content = "Some text".to_string();
        let result = transform(&[a, b]);
        assert_eq!(result.issues[0].description, "");
        assert_eq!(result.issues[1].description, "Some text");
    }

    #[test]
    fn test_dates_parsed_from_millisecond_epochs() {
        let mut r = row("Task");
        r.date_created = "1700000000000".to_string();
        r.start_date = "1700000100000".to_string();
        let result = transform(&[r]);
        let created = result.issues[0].created_at.unwrap();
        assert_eq!(created.timestamp_millis(), 1_700_000_000_000);
        let started = result.issues[0].started_at.unwrap();
        assert_eq!(started.timestamp_millis(), 1_700_000_100_000);
    }

    #[test]
    fn test_dates_absent_when_empty_or_non_numeric() {
        let mut r = row("Task");
        r.date_created = String::new();
        r.start_date = "yesterday".to_string();
        let result = transform(&[r]);
        assert!(result.issues[0].created_at.is_none());
        assert!(result.issues[0].started_at.is_none());
    }

    #[test]
    fn test_statuses_map_stays_empty() {
        let mut r = row("Task");
        r.status = "in progress".to_string();
        let result = transform(&[r]);
        assert_eq!(result.issues[0].status, "in progress");
        assert!(result.statuses.is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut r = row("Task");
        r.assignees = r#"["bob","alice"]"#.to_string();
        r.tags = r#"["b","a"]"#.to_string();
        r.priority = "2".to_string();
        r.time_estimated = "225000".to_string();
        let rows = vec![r, row("Other")];

        let first = serde_json::to_string(&transform(&rows)).unwrap();
        let second = serde_json::to_string(&transform(&rows)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_rows_matches_headers_case_insensitively() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Task ID,TASK NAME,Task Content,Status").unwrap();
        writeln!(file, "1,Fix login,Broken on mobile,open").unwrap();
        file.flush().unwrap();

        let importer = ClickUpCsvImporter::new(file.path());
        let result = importer.import().unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].title, "Fix login");
        assert_eq!(result.issues[0].description, "Broken on mobile");
        assert_eq!(result.issues[0].status, "open");
        // Columns absent from the export read as defaults
        assert_eq!(result.issues[0].assignee_id, "");
        assert!(result.issues[0].estimate.is_none());
    }

    #[test]
    fn test_import_missing_file() {
        let importer = ClickUpCsvImporter::new("/nonexistent/tasks.csv");
        assert!(matches!(
            importer.import(),
            Err(ImportError::FileNotFound(_))
        ));
    }
}

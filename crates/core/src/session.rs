//! In-memory conversation log.
//!
//! Every non-emergency query is appended together with its matches. The checker never reads
//! the log back; it exists so an outer layer can inspect or export the session.

use crate::matcher::MatchResult;
use crate::{IntakeError, IntakeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// One logged query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub raw_input: String,
    pub matches: Vec<MatchResult>,
}

/// Append-only log shared by concurrent callers.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: Mutex<Vec<QueryLogEntry>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query and the matches it produced.
    pub fn append(&self, raw_input: impl Into<String>, matches: Vec<MatchResult>) {
        let entry = QueryLogEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            raw_input: raw_input.into(),
            matches,
        };
        self.lock().push(entry);
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<QueryLogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Write the log as pretty-printed JSON to `path`, replacing any existing file.
    pub fn export_json(&self, path: &Path) -> IntakeResult<()> {
        let entries = self.entries();
        let json = serde_json::to_string_pretty(&entries).map_err(IntakeError::Serialization)?;
        std::fs::write(path, json).map_err(IntakeError::FileWrite)?;
        tracing::info!(
            entries = entries.len(),
            "exported session log to {}",
            path.display()
        );
        Ok(())
    }

    // Entries are pushed whole, so a panic elsewhere cannot leave a partial entry behind.
    fn lock(&self) -> MutexGuard<'_, Vec<QueryLogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ConditionId, SeverityTier};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn cold_match() -> MatchResult {
        MatchResult {
            condition_id: ConditionId::CommonCold,
            display_name: "Common Cold".into(),
            score: 4,
            matched_keywords: vec!["runny nose".into(), "sore throat".into()],
            severity: SeverityTier::Mild,
        }
    }

    #[test]
    fn appends_in_order() {
        let log = SessionLog::new();
        assert!(log.is_empty());

        log.append("runny nose and sore throat", vec![cold_match()]);
        log.append("i feel a bit off", Vec::new());

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].raw_input, "runny nose and sore throat");
        assert_eq!(entries[0].matches, vec![cold_match()]);
        assert!(entries[1].matches.is_empty());
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let log = Arc::new(SessionLog::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for n in 0..25 {
                        log.append(format!("worker {worker} query {n}"), Vec::new());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread");
        }
        assert_eq!(log.len(), 200);
    }

    #[test]
    fn exports_entries_as_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("session.json");

        let log = SessionLog::new();
        log.append("runny nose and sore throat", vec![cold_match()]);
        log.export_json(&path).expect("export");

        let contents = std::fs::read_to_string(&path).expect("read export");
        let parsed: Vec<QueryLogEntry> = serde_json::from_str(&contents).expect("parse export");
        assert_eq!(parsed, log.entries());
        assert!(contents.contains("\"condition_id\": \"common_cold\""));
        assert!(contents.contains("\"severity\": \"mild\""));
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing").join("session.json");

        let err = SessionLog::new()
            .export_json(&path)
            .expect_err("parent directory does not exist");
        assert!(matches!(err, IntakeError::FileWrite(_)));
    }
}

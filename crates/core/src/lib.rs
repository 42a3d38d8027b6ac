//! # Symptom Core
//!
//! Rule-based symptom intake for the symptom checker.
//!
//! This crate contains the decision logic only:
//! - Emergency phrase detection
//! - Condition matching over a fixed catalog, with a dedicated headache path
//! - Composition of the emergency, single-condition, differential and general-advice reports
//! - An in-memory session log
//!
//! **No adapter concerns**: input length validation, environment handling, terminals and
//! servers belong in `symptom-types`, `symptom-cli` and the `symptom-run` binary.

pub mod catalog;
pub mod composer;
pub mod config;
pub mod constants;
pub mod emergency;
pub mod error;
pub mod matcher;
pub mod session;

pub use catalog::{Catalog, ConditionId, ConditionRecord, SeverityTier};
pub use config::CoreConfig;
pub use constants::SAFETY_DISCLAIMER;
pub use error::{IntakeError, IntakeResult};
pub use matcher::MatchResult;
pub use session::{QueryLogEntry, SessionLog};

use std::sync::Arc;

/// Entry point for answering symptom queries.
///
/// Holds the catalog and configuration resolved at startup and the session log for this
/// process. Safe to share between threads behind an `Arc`.
#[derive(Debug)]
pub struct SymptomChecker {
    cfg: CoreConfig,
    catalog: Arc<Catalog>,
    session: SessionLog,
}

impl SymptomChecker {
    /// Creates a new checker over `catalog`.
    pub fn new(cfg: CoreConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            cfg,
            catalog,
            session: SessionLog::new(),
        }
    }

    /// Creates a new checker over [`Catalog::standard`].
    pub fn with_standard_catalog(cfg: CoreConfig) -> Self {
        Self::new(cfg, Arc::new(Catalog::standard()))
    }

    /// Answer one symptom description.
    ///
    /// Emergency phrases short-circuit to the emergency template without matching or logging.
    /// Otherwise the query and its matches are appended to the session log and the matching
    /// report is rendered. The same input always yields the same report.
    ///
    /// Callers are expected to trim and bound the input first (see `symptom_types::IntakeText`);
    /// oversized input still works but produces long echoes.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownCondition`] only when the catalog is missing a condition
    /// the matcher or composer needs. The standard catalog never fails.
    pub fn process_query(&self, user_input: &str) -> IntakeResult<String> {
        let text = user_input.trim().to_lowercase();

        let emergencies = emergency::detect_emergencies(&text);
        if !emergencies.is_empty() {
            return composer::compose_response(&self.catalog, &self.cfg, &[], &emergencies, &text);
        }

        let matches = matcher::match_conditions(&self.catalog, &text)?;
        self.session.append(text.clone(), matches.clone());

        composer::compose_response(&self.catalog, &self.cfg, &matches, &[], &text)
    }

    /// Ranked matches for `user_input`, without emergency screening or logging.
    pub fn matches(&self, user_input: &str) -> IntakeResult<Vec<MatchResult>> {
        matcher::match_conditions(&self.catalog, user_input)
    }

    /// Emergency phrases present in `user_input`.
    pub fn emergencies(&self, user_input: &str) -> Vec<&'static str> {
        emergency::detect_emergencies(user_input)
    }

    /// The single-condition report for `id`.
    pub fn condition_report(&self, id: ConditionId) -> IntakeResult<String> {
        composer::render_condition_report(&self.catalog, &self.cfg, id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn session(&self) -> &SessionLog {
        &self.session
    }
}

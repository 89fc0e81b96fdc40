//! Per-entry outcomes of the lenient synchronization passes.

use std::fmt;

use formbind_core::BindError;

/// The outcome of synchronizing one binding or source entry.
#[derive(Debug)]
pub struct EntryOutcome {
    /// The widget name.
    pub widget: String,
    /// The bound property, or `None` for a data-source entry.
    pub property: Option<&'static str>,
    /// What happened.
    pub result: Result<(), BindError>,
}

impl EntryOutcome {
    /// Returns `true` if the entry was applied.
    pub const fn is_applied(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure, if the entry was skipped.
    pub const fn error(&self) -> Option<&BindError> {
        match &self.result {
            Ok(()) => None,
            Err(e) => Some(e),
        }
    }
}

/// Everything a lenient pass did, in processing order.
///
/// Lenient passes never fail; callers that care inspect the report.
///
/// # Examples
///
/// ```
/// use formbind_binder::SyncReport;
/// use formbind_core::BindError;
///
/// let mut report = SyncReport::new();
/// report.record("nameTextBox", Some("name"), Ok(()));
/// report.record("slider", Some("volume"), Err(BindError::UnregisteredCategory("Slider".into())));
/// assert_eq!(report.applied(), 1);
/// assert_eq!(report.failures().count(), 1);
/// assert!(!report.is_clean());
/// assert_eq!(report.to_string(), "1 applied, 1 failed");
/// ```
#[derive(Debug, Default)]
pub struct SyncReport {
    outcomes: Vec<EntryOutcome>,
}

impl SyncReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one entry.
    pub fn record(
        &mut self,
        widget: impl Into<String>,
        property: Option<&'static str>,
        result: Result<(), BindError>,
    ) {
        self.outcomes.push(EntryOutcome {
            widget: widget.into(),
            property,
            result,
        });
    }

    /// Appends all outcomes of `other`.
    pub fn merge(&mut self, other: Self) {
        self.outcomes.extend(other.outcomes);
    }

    /// All outcomes in processing order.
    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    /// The number of applied entries.
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// The skipped entries.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }

    /// Returns `true` if every entry was applied.
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(EntryOutcome::is_applied)
    }

    /// Returns `true` if any failure points at a missing strategy rather
    /// than a bad value.
    pub fn has_unrecoverable(&self) -> bool {
        self.failures()
            .filter_map(EntryOutcome::error)
            .any(|e| !e.is_recoverable())
    }

    /// The number of entries processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if nothing was processed.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let applied = self.applied();
        write!(f, "{applied} applied, {} failed", self.len() - applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = SyncReport::new();
        assert!(report.is_clean());
        assert!(report.is_empty());
        assert!(!report.has_unrecoverable());
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = SyncReport::new();
        first.record("a", None, Ok(()));
        let mut second = SyncReport::new();
        second.record("b", Some("b"), Err(BindError::mismatch(&1, "Date")));
        first.merge(second);
        let widgets: Vec<&str> = first.outcomes().iter().map(|o| o.widget.as_str()).collect();
        assert_eq!(widgets, vec!["a", "b"]);
        assert_eq!(first.len(), 2);
        assert!(!first.has_unrecoverable());
    }

    #[test]
    fn test_unrecoverable_detected() {
        let mut report = SyncReport::new();
        report.record("w", Some("p"), Err(BindError::UnregisteredCategory("X".into())));
        assert!(report.has_unrecoverable());
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.property, Some("p"));
        assert!(failure.error().is_some());
    }
}

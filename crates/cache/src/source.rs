use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use exn::ResultExt;
use jotunn_extract::models::RecordKind;
use time::UtcDateTime;
use url::Url;

use crate::error::{ErrorKind, Result};

/// Where the records of one kind are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub kind: RecordKind,
    pub url: Url,
}
impl Source {
    pub fn new(kind: RecordKind, url: &str) -> Result<Self> {
        let url = Url::parse(url).or_raise(|| ErrorKind::InvalidSource(url.to_string()))?;
        Ok(Self { kind, url })
    }
}

/// Refresh bookkeeping for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceState {
    /// Validation token (ETag) from the last page actually downloaded.
    pub token: Option<String>,
    /// Last time the source answered, with a page or "not modified".
    pub checked_at: Option<UtcDateTime>,
}

/// What happened to one source during a refresh round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// A new page was downloaded and replaced the kind's records.
    Fetched { records: usize },
    /// The origin confirmed the page is unchanged; records carried over.
    Unchanged,
    /// The fetch failed; records carried over.
    Failed,
}
impl Display for SourceOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SourceOutcome::Fetched { records } => write!(f, "fetched {records} records"),
            SourceOutcome::Unchanged => write!(f, "unchanged"),
            SourceOutcome::Failed => write!(f, "failed, kept previous records"),
        }
    }
}

/// Summary of one refresh round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub started_at: UtcDateTime,
    pub outcomes: BTreeMap<RecordKind, SourceOutcome>,
}
impl RefreshReport {
    pub(crate) fn new(started_at: UtcDateTime) -> Self {
        Self {
            started_at,
            outcomes: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, kind: RecordKind, outcome: SourceOutcome) {
        self.outcomes.insert(kind, outcome);
    }

    pub fn outcome(&self, kind: RecordKind) -> Option<SourceOutcome> {
        self.outcomes.get(&kind).copied()
    }

    pub fn fetched(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::Fetched { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SourceOutcome::Failed))
    }

    /// `true` if at least one source answered (with a page or "not modified").
    pub fn any_succeeded(&self) -> bool {
        self.fetched() + self.unchanged() > 0
    }

    fn count(&self, predicate: impl Fn(&SourceOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|outcome| predicate(outcome)).count()
    }
}
impl Display for RefreshReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, (kind, outcome)) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{kind}: {outcome}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rejects_invalid_urls() {
        let err = Source::new(RecordKind::Item, "item-list.html").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidSource("item-list.html".to_string()));
        assert!(Source::new(RecordKind::Item, "https://example.org/item-list.html").is_ok());
    }

    #[test]
    fn test_report_counts() {
        let mut report = RefreshReport::new(UtcDateTime::now());
        assert!(!report.any_succeeded());
        report.record(RecordKind::Item, SourceOutcome::Fetched { records: 3 });
        report.record(RecordKind::Recipe, SourceOutcome::Unchanged);
        report.record(RecordKind::Prefab, SourceOutcome::Failed);
        assert_eq!((report.fetched(), report.unchanged(), report.failed()), (1, 1, 1));
        assert!(report.any_succeeded());
        assert_eq!(report.outcome(RecordKind::Piece), None);
        assert_eq!(report.to_string(), "item: fetched 3 records\nrecipe: unchanged\nprefab: failed, kept previous records");
    }
}

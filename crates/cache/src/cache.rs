use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use exn::ResultExt;
use futures::future::join_all;
use jotunn_extract::models::RecordKind;
use jotunn_extract::{Extractor, Records};
use jotunn_fetch::{FetchOutcome, Fetcher, FetcherHandle};
use time::UtcDateTime;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::snapshot::{Snapshot, SnapshotBuilder};
use crate::source::{RefreshReport, Source, SourceOutcome, SourceState};

/// Shared handle to the cached documentation lists.
///
/// Cloning is cheap; every clone observes the same snapshot and shares the
/// same refresh serialization.
#[derive(Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: FetcherHandle,
    sources: Vec<Source>,
    expiry: Duration,
    snapshot: RwLock<Arc<Snapshot>>,
    // Held for the whole of a refresh round: at most one round is ever in flight.
    states: Mutex<BTreeMap<RecordKind, SourceState>>,
}

enum Retrieved {
    Unchanged,
    Fetched { records: Records, token: Option<String> },
}

impl Cache {
    /// A cache over `sources` that considers its data fresh for `expiry`
    /// after the last round where any source answered.
    pub fn new(fetcher: FetcherHandle, sources: impl IntoIterator<Item = Source>, expiry: Duration) -> Self {
        let sources: Vec<Source> = sources.into_iter().collect();
        let states = sources.iter().map(|source| (source.kind, SourceState::default())).collect();
        Self {
            inner: Arc::new(Inner {
                fetcher,
                sources,
                expiry,
                snapshot: RwLock::new(Arc::new(Snapshot::empty())),
                states: Mutex::new(states),
            }),
        }
    }

    /// The currently installed snapshot. Never blocks on a refresh round.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// `true` if the snapshot has data and the last successful round is
    /// younger than the expiry window.
    pub fn is_fresh(&self) -> bool {
        let snapshot = self.snapshot();
        snapshot.has_data()
            && snapshot
                .refreshed_at()
                .is_some_and(|at| (UtcDateTime::now() - at).unsigned_abs() < self.inner.expiry)
    }

    /// Runs a refresh round unless the snapshot is still fresh.
    ///
    /// Callers arriving while a round is in flight wait for it and then
    /// observe its result instead of starting another one. Returns `None`
    /// when no round was needed.
    pub async fn ensure_fresh(&self) -> Option<RefreshReport> {
        if self.is_fresh() {
            return None;
        }
        let mut states = self.inner.states.lock().await;
        if self.is_fresh() {
            tracing::debug!("Snapshot refreshed while waiting, skipping round");
            return None;
        }
        Some(self.run_round(&mut states).await)
    }

    /// Runs a refresh round regardless of freshness.
    pub async fn refresh(&self) -> RefreshReport {
        let mut states = self.inner.states.lock().await;
        self.run_round(&mut states).await
    }

    /// Per-source tokens and last successful check times.
    pub async fn source_states(&self) -> BTreeMap<RecordKind, SourceState> {
        self.inner.states.lock().await.clone()
    }

    #[instrument(skip_all, fields(sources = self.inner.sources.len()))]
    async fn run_round(&self, states: &mut BTreeMap<RecordKind, SourceState>) -> RefreshReport {
        let mut report = RefreshReport::new(UtcDateTime::now());
        let fetcher = self.inner.fetcher.as_ref();
        let fetches = self.inner.sources.iter().map(|source| {
            let token = states.get(&source.kind).and_then(|state| state.token.clone());
            async move { (source.kind, fetch_source(fetcher, source, token.as_deref()).await) }
        });
        let results = join_all(fetches).await;

        let checked_at = UtcDateTime::now();
        let mut builder = SnapshotBuilder::from_previous(&self.snapshot());
        for (kind, result) in results {
            let state = states.entry(kind).or_default();
            let outcome = match result {
                Ok(Retrieved::Unchanged) => {
                    state.checked_at = Some(checked_at);
                    SourceOutcome::Unchanged
                },
                Ok(Retrieved::Fetched { records, token }) => {
                    let count = records.len();
                    builder.replace(records);
                    state.token = token;
                    state.checked_at = Some(checked_at);
                    SourceOutcome::Fetched { records: count }
                },
                Err(err) => {
                    tracing::warn!(%kind, error = ?err, "Source unavailable, keeping previous records");
                    SourceOutcome::Failed
                },
            };
            report.record(kind, outcome);
        }
        if report.any_succeeded() {
            builder.refreshed_at(checked_at);
        }
        *self.inner.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(builder.build());

        tracing::info!(
            fetched = report.fetched(),
            unchanged = report.unchanged(),
            failed = report.failed(),
            "Refresh round complete"
        );
        report
    }
}

impl Debug for Cache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Cache")
            .field("sources", &self.inner.sources)
            .field("expiry", &self.inner.expiry)
            .finish_non_exhaustive()
    }
}

async fn fetch_source(fetcher: &(dyn Fetcher + Send + Sync), source: &Source, token: Option<&str>) -> Result<Retrieved> {
    let outcome = fetcher
        .fetch(&source.url, token)
        .await
        .or_raise(|| ErrorKind::Fetch(source.kind))?;
    // Parsed documents are not `Send`; only build one after the last await.
    Ok(match outcome {
        FetchOutcome::Unchanged => Retrieved::Unchanged,
        FetchOutcome::Fetched(page) => {
            let records = Extractor::from_document(page.document()).extract(source.kind);
            Retrieved::Fetched {
                records,
                token: page.token,
            }
        },
    })
}

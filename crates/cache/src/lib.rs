//! In-memory, periodically refreshed index of the Jotunn documentation
//! object lists.
//!
//! A [`Cache`] owns the current [`Snapshot`] of every record kind. Refresh
//! rounds fetch all sources concurrently, keep the previous records of any
//! source that fails or reports "not modified", and swap in a new snapshot
//! atomically. Queries run against whichever snapshot was current when
//! they started and never wait on a round in flight.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use jotunn_cache::{Cache, Source};
//! use jotunn_extract::models::RecordKind;
//! use jotunn_fetch::HttpFetcher;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fetcher = Arc::new(HttpFetcher::new().unwrap());
//! let source = Source::new(RecordKind::Item, "https://example.org/item-list.html").unwrap();
//! let cache = Cache::new(fetcher, [source], Duration::from_secs(24 * 60 * 60));
//! cache.ensure_fresh().await;
//! for item in cache.snapshot().find_items("wood", 10) {
//!     println!("{item}");
//! }
//! # }
//! ```

mod cache;
pub mod error;
mod query;
mod refresher;
mod snapshot;
mod source;

pub use crate::cache::Cache;
pub use crate::query::{DEFAULT_SUGGESTIONS, MAX_RESULTS, clamp, rank};
pub use crate::refresher::{MIN_REFRESH_INTERVAL, Refresher};
pub use crate::snapshot::Snapshot;
pub use crate::source::{RefreshReport, Source, SourceOutcome, SourceState};

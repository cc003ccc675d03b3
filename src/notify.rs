//! Process-wide error surface.
//!
//! Failures that escape every store's call chain land here instead of
//! crashing the process: panics via the installed hook, and detached task
//! failures via [`spawn_watched`]. The record has overwrite semantics --
//! each new error replaces the previous one, there is no queue.

use std::future::Future;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::error;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub message: String,
    /// Location or backtrace text when the source provides one.
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}

static LAST_ERROR: Mutex<Option<ErrorRecord>> = Mutex::new(None);

fn slot() -> std::sync::MutexGuard<'static, Option<ErrorRecord>> {
    LAST_ERROR.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Records an error, replacing whatever was there before.
pub fn record(message: impl Into<String>, detail: Option<String>) {
    let record = ErrorRecord {
        message: message.into(),
        detail,
        timestamp: Utc::now(),
    };
    error!("unhandled failure: {}", record.message);
    *slot() = Some(record);
}

/// Most recent error, if any. The record stays in place for later readers.
pub fn last() -> Option<ErrorRecord> {
    slot().clone()
}

/// Removes and returns the current record, e.g. after the interface layer
/// has displayed it.
pub fn take() -> Option<ErrorRecord> {
    slot().take()
}

pub fn clear() {
    *slot() = None;
}

/// Forwards panics into the error surface. The previous hook still runs,
/// so default stderr reporting is preserved.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        let detail = info.location().map(|l| l.to_string());
        record(message, detail);
        previous(info);
    }));
}

/// Spawns a detached task whose failure is reported here rather than
/// silently dropped -- the analogue of an unhandled rejection at the
/// process boundary.
pub fn spawn_watched<F>(label: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match future.await {
            Ok(()) => {}
            Err(e) => record(format!("{label}: {e}"), None),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the record is process-global, parallel tests would
    // race on it.
    #[tokio::test]
    async fn overwrite_semantics_and_watched_tasks() {
        clear();
        record("first", None);
        record("second", Some("here".into()));
        let current = last().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.detail.as_deref(), Some("here"));
        assert_eq!(take().unwrap().message, "second");
        assert!(last().is_none());

        spawn_watched("sync", async { Err(anyhow::anyhow!("backend gone")) })
            .await
            .unwrap();
        assert_eq!(last().unwrap().message, "sync: backend gone");
        clear();
    }
}

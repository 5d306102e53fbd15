//! services/app/src/stores/mod.rs
//!
//! Entity stores: client-side caches that serialize every mutation through
//! the backend ports and reconcile confirmed state back into the cache. Each
//! store is the sole writer of its cache; readers receive cloned snapshots
//! and re-render on replacement rather than mutating in place.

pub mod expenses;
pub mod habits;
pub mod notifications;
pub mod tasks;

pub use expenses::ExpenseStore;
pub use habits::HabitStore;
pub use notifications::NotificationStore;
pub use tasks::TaskStore;

use daykeep_core::ports::BackendError;

/// Reduces a backend failure to one display string: the structured message
/// when the backend sent one, else the error's own text, else `fallback`.
pub(crate) fn error_message(err: &BackendError, fallback: &str) -> String {
    let message = match err {
        BackendError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

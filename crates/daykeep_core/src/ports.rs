//! crates/daykeep_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete HTTP backend it is synchronized against.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Expense, ExpenseInput, ExpensePatch, ExpenseSummary, Habit, HabitCompletion, HabitInput,
    HabitPatch, Task, TaskInput, TaskPatch,
};
use crate::events::SuggestionEvent;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all backend operations.
///
/// The adapter reduces whatever the transport produced into one of these
/// variants, so the stores never inspect response objects structurally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a structured `{ "message": ... }` payload.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A non-success response without a usable message body.
    #[error("request failed with status {0}")]
    Status(u16),
    /// The request never completed, or the payload could not be decoded.
    #[error("{0}")]
    Transport(String),
}

/// A convenience type alias for `Result<T, BackendError>`.
pub type BackendResult<T> = Result<T, BackendError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The state a completion toggle left the habit in, as reported by the backend.
/// The backend owns the flip decision; the client only learns which way it went.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub completion: Option<HabitCompletion>,
}

#[async_trait]
pub trait HabitBackend: Send + Sync {
    /// Lists every habit, nested completions included.
    async fn list_habits(&self) -> BackendResult<Vec<Habit>>;

    /// Fetches one habit with its full completion history.
    async fn get_habit(&self, habit_id: &str) -> BackendResult<Habit>;

    async fn create_habit(&self, input: &HabitInput) -> BackendResult<Habit>;

    /// Applies a partial edit. The response is not guaranteed to carry
    /// completions; callers must reconcile against their cached copy.
    async fn update_habit(&self, habit_id: &str, patch: &HabitPatch) -> BackendResult<Habit>;

    async fn delete_habit(&self, habit_id: &str) -> BackendResult<()>;

    /// Creates or removes the completion for `date`, whichever applies.
    async fn toggle_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> BackendResult<ToggleOutcome>;
}

#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn list_tasks(&self) -> BackendResult<Vec<Task>>;

    async fn create_task(&self, input: &TaskInput) -> BackendResult<Task>;

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> BackendResult<Task>;

    async fn delete_task(&self, task_id: &str) -> BackendResult<()>;
}

#[async_trait]
pub trait ExpenseBackend: Send + Sync {
    async fn list_expenses(&self) -> BackendResult<Vec<Expense>>;

    async fn create_expense(&self, input: &ExpenseInput) -> BackendResult<Expense>;

    async fn update_expense(&self, expense_id: &str, patch: &ExpensePatch)
        -> BackendResult<Expense>;

    async fn delete_expense(&self, expense_id: &str) -> BackendResult<()>;

    /// Per-category totals plus a grand total.
    async fn expense_summary(&self) -> BackendResult<ExpenseSummary>;
}

/// Receives suggestion events raised by the stores.
pub trait SuggestionSink: Send + Sync {
    fn notify(&self, event: SuggestionEvent);
}

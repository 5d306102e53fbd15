pub mod domain;
pub mod events;
pub mod ports;
pub mod streak;

pub use domain::{
    Currency, Expense, ExpenseCategory, ExpenseInput, ExpensePatch, ExpenseSummary,
    ExpenseSummaryItem, Frequency, Habit, HabitCompletion, HabitInput, HabitPatch, Task,
    TaskCategory, TaskInput, TaskPatch, ValidationError,
};
pub use events::{SuggestionEvent, SuggestionKind, SuggestionTrigger};
pub use ports::{
    BackendError, BackendResult, ExpenseBackend, HabitBackend, SuggestionSink, TaskBackend,
    ToggleOutcome,
};

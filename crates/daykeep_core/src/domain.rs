//! crates/daykeep_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, NaiveDate, Utc};

//=========================================================================================
// Input Validation
//=========================================================================================

/// Rejections raised before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

//=========================================================================================
// Habits
//=========================================================================================

/// How often a habit is meant to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn from_string(value: &str) -> Result<Self, ValidationError> {
        match value.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(ValidationError::UnknownFrequency(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record that a habit was performed on one calendar day.
///
/// `habit_id` is a back-reference only; the owning [`Habit`] carries its
/// completions as a value collection.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A recurring activity tracked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub goal: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub completions: Vec<HabitCompletion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a habit. Built through [`HabitInput::new`] so a blank
/// name never reaches the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitInput {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub goal: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl HabitInput {
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty("habit name"));
        }
        Ok(Self {
            name,
            description: None,
            frequency,
            goal: None,
            color: None,
            icon: None,
        })
    }
}

/// A partial edit; fields left as `None` are untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub goal: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

//=========================================================================================
// Tasks
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    Work,
    Personal,
    Study,
    Errands,
    Other,
}

impl TaskCategory {
    /// Maps a wire value onto the known categories. Empty or unrecognized
    /// values come back as `None` and the task is treated as uncategorized.
    pub fn from_string(value: &str) -> Option<Self> {
        match value {
            "Work" => Some(TaskCategory::Work),
            "Personal" => Some(TaskCategory::Personal),
            "Study" => Some(TaskCategory::Study),
            "Errands" => Some(TaskCategory::Errands),
            "Other" => Some(TaskCategory::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "Work",
            TaskCategory::Personal => "Personal",
            TaskCategory::Study => "Study",
            TaskCategory::Errands => "Errands",
            TaskCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A one-off to-do item with an optional deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<TaskCategory>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<TaskCategory>,
}

impl TaskInput {
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::Empty("task title"));
        }
        Ok(Self {
            title,
            description: None,
            deadline: None,
            category: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<TaskCategory>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// The payload a completion toggle sends: just the flipped flag.
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }
}

//=========================================================================================
// Expenses
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Bills,
    Entertainment,
    Health,
    Shopping,
    Education,
    Gifts,
    Other,
}

impl ExpenseCategory {
    pub fn from_string(value: &str) -> Option<Self> {
        match value {
            "Food" => Some(ExpenseCategory::Food),
            "Transport" => Some(ExpenseCategory::Transport),
            "Bills" => Some(ExpenseCategory::Bills),
            "Entertainment" => Some(ExpenseCategory::Entertainment),
            "Health" => Some(ExpenseCategory::Health),
            "Shopping" => Some(ExpenseCategory::Shopping),
            "Education" => Some(ExpenseCategory::Education),
            "Gifts" => Some(ExpenseCategory::Gifts),
            "Other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Gifts => "Gifts",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display currency for amounts and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Php,
    Usd,
}

impl Currency {
    pub fn from_string(value: &str) -> Result<Self, ValidationError> {
        match value.to_uppercase().as_str() {
            "PHP" => Ok(Currency::Php),
            "USD" => Ok(Currency::Usd),
            _ => Err(ValidationError::UnknownCurrency(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Php => "PHP",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Php => "\u{20b1}",
            Currency::Usd => "$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single spend on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl ExpenseInput {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::Empty("expense description"));
        }
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(Self {
            description,
            amount,
            category,
            date,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<NaiveDate>,
}

/// Per-category totals as reported by the backend. Categories stay raw
/// strings here because the summary endpoint may aggregate values the
/// client's category set does not know about.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummaryItem {
    pub category: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub items: Vec<ExpenseSummaryItem>,
    pub grand_total: f64,
}

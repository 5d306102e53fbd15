//! Shared test doubles: in-memory backends that honor the REST contract's
//! semantics (including the toggle flip and completion-less update
//! responses), plus a sink that records every suggestion event.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use daykeep_core::domain::{
    Expense, ExpenseCategory, ExpenseInput, ExpensePatch, ExpenseSummary, ExpenseSummaryItem,
    Frequency, Habit, HabitCompletion, HabitInput, HabitPatch, Task, TaskInput, TaskPatch,
};
use daykeep_core::events::SuggestionEvent;
use daykeep_core::ports::{
    BackendError, BackendResult, ExpenseBackend, HabitBackend, SuggestionSink, TaskBackend,
    ToggleOutcome,
};
use tokio::sync::Notify;
use uuid::Uuid;

//=========================================================================================
// Builders
//=========================================================================================

pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// A deterministic timestamp `minutes` after a fixed base instant.
pub fn stamp(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn habit_named(
    id: &str,
    name: &str,
    frequency: Frequency,
    days: &[NaiveDate],
    created_at: DateTime<Utc>,
) -> Habit {
    Habit {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        frequency,
        goal: None,
        color: None,
        icon: None,
        completions: days
            .iter()
            .map(|&date| HabitCompletion {
                id: Uuid::new_v4().to_string(),
                habit_id: id.to_string(),
                date,
                notes: None,
                created_at,
            })
            .collect(),
        created_at,
        updated_at: created_at,
    }
}

pub fn task_named(id: &str, title: &str, created_at: DateTime<Utc>) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        deadline: None,
        category: None,
        is_completed: false,
        created_at,
        updated_at: created_at,
    }
}

pub fn expense_on(
    id: &str,
    description: &str,
    amount: f64,
    category: ExpenseCategory,
    date: NaiveDate,
) -> Expense {
    Expense {
        id: id.to_string(),
        description: description.to_string(),
        amount,
        category,
        date,
        created_at: stamp(0),
        updated_at: stamp(0),
    }
}

//=========================================================================================
// Recording Sink
//=========================================================================================

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SuggestionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SuggestionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SuggestionSink for RecordingSink {
    fn notify(&self, event: SuggestionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

//=========================================================================================
// Habit Backend Double
//=========================================================================================

#[derive(Default)]
pub struct MockHabitBackend {
    pub habits: Mutex<Vec<Habit>>,
    failure: Mutex<Option<BackendError>>,
    pub get_calls: AtomicUsize,
    pub toggle_calls: AtomicUsize,
    toggle_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockHabitBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_habits(habits: Vec<Habit>) -> Arc<Self> {
        let backend = Self::default();
        *backend.habits.lock().unwrap() = habits;
        Arc::new(backend)
    }

    /// Makes every subsequent call fail with `err` until `succeed` is called.
    pub fn fail_with(&self, err: BackendError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Parks every toggle on the notify until the test releases it.
    pub fn hold_toggles(&self, gate: Arc<Notify>) {
        *self.toggle_gate.lock().unwrap() = Some(gate);
    }

    fn check_failure(&self) -> BackendResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HabitBackend for MockHabitBackend {
    async fn list_habits(&self) -> BackendResult<Vec<Habit>> {
        self.check_failure()?;
        Ok(self.habits.lock().unwrap().clone())
    }

    async fn get_habit(&self, habit_id: &str) -> BackendResult<Habit> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.habits
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == habit_id)
            .cloned()
            .ok_or(BackendError::Status(404))
    }

    async fn create_habit(&self, input: &HabitInput) -> BackendResult<Habit> {
        self.check_failure()?;
        let now = Utc::now();
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            description: input.description.clone(),
            frequency: input.frequency,
            goal: input.goal.clone(),
            color: input.color.clone(),
            icon: input.icon.clone(),
            completions: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.habits.lock().unwrap().insert(0, habit.clone());
        Ok(habit)
    }

    async fn update_habit(&self, habit_id: &str, patch: &HabitPatch) -> BackendResult<Habit> {
        self.check_failure()?;
        let mut habits = self.habits.lock().unwrap();
        let habit = habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or(BackendError::Status(404))?;
        if let Some(name) = &patch.name {
            habit.name = name.clone();
        }
        if let Some(description) = &patch.description {
            habit.description = Some(description.clone());
        }
        if let Some(frequency) = patch.frequency {
            habit.frequency = frequency;
        }
        if let Some(goal) = &patch.goal {
            habit.goal = Some(goal.clone());
        }
        if let Some(color) = &patch.color {
            habit.color = Some(color.clone());
        }
        if let Some(icon) = &patch.icon {
            habit.icon = Some(icon.clone());
        }
        habit.updated_at = Utc::now();
        // Field edits come back without the completion history, matching the
        // real backend's update responses.
        let mut response = habit.clone();
        response.completions = Vec::new();
        Ok(response)
    }

    async fn delete_habit(&self, habit_id: &str) -> BackendResult<()> {
        self.check_failure()?;
        let mut habits = self.habits.lock().unwrap();
        let before = habits.len();
        habits.retain(|h| h.id != habit_id);
        if habits.len() == before {
            return Err(BackendError::Status(404));
        }
        Ok(())
    }

    async fn toggle_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> BackendResult<ToggleOutcome> {
        let gate = self.toggle_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut habits = self.habits.lock().unwrap();
        let habit = habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or(BackendError::Status(404))?;
        if habit.completions.iter().any(|c| c.date == date) {
            habit.completions.retain(|c| c.date != date);
            Ok(ToggleOutcome {
                habit_id: habit_id.to_string(),
                date,
                completed: false,
                completion: None,
            })
        } else {
            let completion = HabitCompletion {
                id: Uuid::new_v4().to_string(),
                habit_id: habit_id.to_string(),
                date,
                notes: notes.map(|n| n.to_string()),
                created_at: Utc::now(),
            };
            habit.completions.push(completion.clone());
            Ok(ToggleOutcome {
                habit_id: habit_id.to_string(),
                date,
                completed: true,
                completion: Some(completion),
            })
        }
    }
}

//=========================================================================================
// Task Backend Double
//=========================================================================================

#[derive(Default)]
pub struct MockTaskBackend {
    pub tasks: Mutex<Vec<Task>>,
    failure: Mutex<Option<BackendError>>,
}

impl MockTaskBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Arc<Self> {
        let backend = Self::default();
        *backend.tasks.lock().unwrap() = tasks;
        Arc::new(backend)
    }

    pub fn fail_with(&self, err: BackendError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    fn check_failure(&self) -> BackendResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TaskBackend for MockTaskBackend {
    async fn list_tasks(&self) -> BackendResult<Vec<Task>> {
        self.check_failure()?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, input: &TaskInput) -> BackendResult<Task> {
        self.check_failure()?;
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: input.title.clone(),
            description: input.description.clone(),
            deadline: input.deadline,
            category: input.category,
            is_completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.lock().unwrap().insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> BackendResult<Task> {
        self.check_failure()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(BackendError::Status(404))?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(category) = patch.category {
            task.category = Some(category);
        }
        if let Some(is_completed) = patch.is_completed {
            task.is_completed = is_completed;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> BackendResult<()> {
        self.check_failure()?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Err(BackendError::Status(404));
        }
        Ok(())
    }
}

//=========================================================================================
// Expense Backend Double
//=========================================================================================

#[derive(Default)]
pub struct MockExpenseBackend {
    pub expenses: Mutex<Vec<Expense>>,
    failure: Mutex<Option<BackendError>>,
    summary_failure: Mutex<Option<BackendError>>,
    pub summary_calls: AtomicUsize,
}

impl MockExpenseBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_expenses(expenses: Vec<Expense>) -> Arc<Self> {
        let backend = Self::default();
        *backend.expenses.lock().unwrap() = expenses;
        Arc::new(backend)
    }

    pub fn fail_with(&self, err: BackendError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn fail_summary_with(&self, err: BackendError) {
        *self.summary_failure.lock().unwrap() = Some(err);
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
        *self.summary_failure.lock().unwrap() = None;
    }

    fn check_failure(&self) -> BackendResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExpenseBackend for MockExpenseBackend {
    async fn list_expenses(&self) -> BackendResult<Vec<Expense>> {
        self.check_failure()?;
        Ok(self.expenses.lock().unwrap().clone())
    }

    async fn create_expense(&self, input: &ExpenseInput) -> BackendResult<Expense> {
        self.check_failure()?;
        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            description: input.description.clone(),
            amount: input.amount,
            category: input.category,
            date: input.date,
            created_at: now,
            updated_at: now,
        };
        self.expenses.lock().unwrap().insert(0, expense.clone());
        Ok(expense)
    }

    async fn update_expense(
        &self,
        expense_id: &str,
        patch: &ExpensePatch,
    ) -> BackendResult<Expense> {
        self.check_failure()?;
        let mut expenses = self.expenses.lock().unwrap();
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or(BackendError::Status(404))?;
        if let Some(description) = &patch.description {
            expense.description = description.clone();
        }
        if let Some(amount) = patch.amount {
            expense.amount = amount;
        }
        if let Some(category) = patch.category {
            expense.category = category;
        }
        if let Some(date) = patch.date {
            expense.date = date;
        }
        expense.updated_at = Utc::now();
        Ok(expense.clone())
    }

    async fn delete_expense(&self, expense_id: &str) -> BackendResult<()> {
        self.check_failure()?;
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Err(BackendError::Status(404));
        }
        Ok(())
    }

    async fn expense_summary(&self) -> BackendResult<ExpenseSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.summary_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.check_failure()?;
        let expenses = self.expenses.lock().unwrap();
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for expense in expenses.iter() {
            *totals.entry(expense.category.as_str().to_string()).or_insert(0.0) += expense.amount;
        }
        let grand_total = totals.values().sum();
        Ok(ExpenseSummary {
            items: totals
                .into_iter()
                .map(|(category, total_amount)| ExpenseSummaryItem {
                    category,
                    total_amount,
                })
                .collect(),
            grand_total,
        })
    }
}

//! services/app/src/stores/expenses.rs
//!
//! The expense entity store. Beyond the usual cache discipline it refreshes
//! the per-category summary after every mutation and raises spending
//! insights: every addition, high single amounts, and repeated same-day
//! spending in one category.

use std::sync::{Arc, RwLock};

use daykeep_core::domain::{Currency, Expense, ExpenseInput, ExpensePatch, ExpenseSummary};
use daykeep_core::events::{SuggestionEvent, SuggestionTrigger};
use daykeep_core::ports::{ExpenseBackend, SuggestionSink};
use tracing::{debug, warn};

use super::error_message;

const PHP_HIGH_EXPENSE_THRESHOLD: f64 = 20_000.0;
const USD_HIGH_EXPENSE_THRESHOLD: f64 = 400.0;
const REPEATED_EXPENSE_COUNT_THRESHOLD: usize = 3;

pub struct ExpenseStore {
    backend: Arc<dyn ExpenseBackend>,
    sink: Arc<dyn SuggestionSink>,
    expenses: RwLock<Vec<Expense>>,
    summary: RwLock<Option<ExpenseSummary>>,
    error: RwLock<Option<String>>,
    is_loading: RwLock<bool>,
    preferred_currency: RwLock<Currency>,
}

impl ExpenseStore {
    pub fn new(
        backend: Arc<dyn ExpenseBackend>,
        sink: Arc<dyn SuggestionSink>,
        preferred_currency: Currency,
    ) -> Self {
        Self {
            backend,
            sink,
            expenses: RwLock::new(Vec::new()),
            summary: RwLock::new(None),
            error: RwLock::new(None),
            is_loading: RwLock::new(false),
            preferred_currency: RwLock::new(preferred_currency),
        }
    }

    //=====================================================================================
    // Snapshot Accessors
    //=====================================================================================

    pub fn expenses(&self) -> Vec<Expense> {
        self.expenses.read().expect("expense cache poisoned").clone()
    }

    pub fn summary(&self) -> Option<ExpenseSummary> {
        self.summary.read().expect("summary slot poisoned").clone()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().expect("error slot poisoned").clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.is_loading.read().expect("loading flag poisoned")
    }

    pub fn preferred_currency(&self) -> Currency {
        *self
            .preferred_currency
            .read()
            .expect("currency slot poisoned")
    }

    pub fn set_preferred_currency(&self, currency: Currency) {
        *self
            .preferred_currency
            .write()
            .expect("currency slot poisoned") = currency;
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    //=====================================================================================
    // Operations
    //=====================================================================================

    /// Replaces the cache with the backend's list, most recent day first,
    /// then refreshes the summary.
    pub async fn fetch_all(&self) {
        self.set_loading(true);
        self.set_error(None);
        match self.backend.list_expenses().await {
            Ok(mut expenses) => {
                sort_by_date_desc(&mut expenses);
                *self.expenses.write().expect("expense cache poisoned") = expenses;
                self.set_loading(false);
                self.fetch_summary().await;
            }
            Err(err) => {
                let message = error_message(&err, "Failed to fetch expenses.");
                warn!(error = %message, "expense list fetch failed");
                self.expenses
                    .write()
                    .expect("expense cache poisoned")
                    .clear();
                self.set_error(Some(message));
                self.set_loading(false);
            }
        }
    }

    pub async fn add(&self, input: ExpenseInput) -> Option<Expense> {
        match self.backend.create_expense(&input).await {
            Ok(expense) => {
                debug!(expense_id = %expense.id, "expense created");
                let same_day_category_count = {
                    let mut expenses = self.expenses.write().expect("expense cache poisoned");
                    expenses.insert(0, expense.clone());
                    sort_by_date_desc(&mut expenses);
                    expenses
                        .iter()
                        .filter(|e| e.date == expense.date && e.category == expense.category)
                        .count()
                };
                self.fetch_summary().await;

                let currency = self.preferred_currency();
                self.sink
                    .notify(SuggestionEvent::new(SuggestionTrigger::ExpenseAdded {
                        item_name: expense.description.clone(),
                        amount: expense.amount,
                        category: expense.category,
                        currency,
                    }));

                if expense.amount > high_expense_threshold(currency) {
                    self.sink
                        .notify(SuggestionEvent::new(SuggestionTrigger::HighExpense {
                            item_name: expense.description.clone(),
                            amount: expense.amount,
                            category: expense.category,
                            currency,
                        }));
                }

                if same_day_category_count >= REPEATED_EXPENSE_COUNT_THRESHOLD {
                    self.sink
                        .notify(SuggestionEvent::new(SuggestionTrigger::RepeatedCategory {
                            category: expense.category,
                            count: same_day_category_count,
                        }));
                }

                Some(expense)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to add expense.")));
                None
            }
        }
    }

    pub async fn update(&self, expense_id: &str, patch: ExpensePatch) -> Option<Expense> {
        match self.backend.update_expense(expense_id, &patch).await {
            Ok(expense) => {
                {
                    let mut expenses = self.expenses.write().expect("expense cache poisoned");
                    if let Some(existing) = expenses.iter_mut().find(|e| e.id == expense_id) {
                        *existing = expense.clone();
                    } else {
                        expenses.push(expense.clone());
                    }
                    sort_by_date_desc(&mut expenses);
                }
                self.fetch_summary().await;
                Some(expense)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to update expense.")));
                None
            }
        }
    }

    pub async fn delete(&self, expense_id: &str) -> bool {
        match self.backend.delete_expense(expense_id).await {
            Ok(()) => {
                self.expenses
                    .write()
                    .expect("expense cache poisoned")
                    .retain(|e| e.id != expense_id);
                self.fetch_summary().await;
                true
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to delete expense.")));
                false
            }
        }
    }

    pub async fn fetch_summary(&self) {
        match self.backend.expense_summary().await {
            Ok(summary) => {
                *self.summary.write().expect("summary slot poisoned") = Some(summary);
                self.set_error(None);
            }
            Err(err) => {
                let message = error_message(&err, "Failed to fetch expense summary.");
                warn!(error = %message, "expense summary fetch failed");
                *self.summary.write().expect("summary slot poisoned") = None;
                self.set_error(Some(message));
            }
        }
    }

    fn set_error(&self, value: Option<String>) {
        *self.error.write().expect("error slot poisoned") = value;
    }

    fn set_loading(&self, value: bool) {
        *self.is_loading.write().expect("loading flag poisoned") = value;
    }
}

fn high_expense_threshold(currency: Currency) -> f64 {
    match currency {
        Currency::Php => PHP_HIGH_EXPENSE_THRESHOLD,
        Currency::Usd => USD_HIGH_EXPENSE_THRESHOLD,
    }
}

fn sort_by_date_desc(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

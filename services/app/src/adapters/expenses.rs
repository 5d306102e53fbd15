//! services/app/src/adapters/expenses.rs
//!
//! Concrete implementation of the `ExpenseBackend` port over the REST
//! contract, including the summary endpoint whose amounts arrive as numbers
//! or decimal strings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daykeep_core::domain::{
    Expense, ExpenseCategory, ExpenseInput, ExpensePatch, ExpenseSummary, ExpenseSummaryItem,
};
use daykeep_core::ports::{BackendResult, ExpenseBackend};
use serde::{Deserialize, Serialize};

use super::client::{parse_day, ApiClient, NumberOrString};

/// An adapter that implements the `ExpenseBackend` port over HTTP.
#[derive(Clone)]
pub struct ExpenseApi {
    api: ApiClient,
}

impl ExpenseApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseRecord {
    id: String,
    description: String,
    amount: NumberOrString,
    #[serde(default)]
    category: Option<String>,
    date: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExpenseRecord {
    fn to_domain(self) -> BackendResult<Expense> {
        let amount = self.amount.parse()?;
        let date = parse_day(&self.date)?;
        // Anything the category set does not know lands in Other.
        let category = self
            .category
            .as_deref()
            .and_then(ExpenseCategory::from_string)
            .unwrap_or(ExpenseCategory::Other);
        Ok(Expense {
            id: self.id,
            description: self.description,
            amount,
            category,
            date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Deserialize)]
struct ExpensesResponse {
    expenses: Vec<ExpenseRecord>,
}

#[derive(Deserialize)]
struct SingleExpenseResponse {
    expense: ExpenseRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryItemRecord {
    category: String,
    total_amount: NumberOrString,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    summary: Vec<SummaryItemRecord>,
    grand_total: NumberOrString,
}

#[derive(Serialize)]
struct ExpenseInputBody<'a> {
    description: &'a str,
    amount: f64,
    category: &'static str,
    date: String,
}

impl<'a> ExpenseInputBody<'a> {
    fn from_domain(input: &'a ExpenseInput) -> Self {
        Self {
            description: &input.description,
            amount: input.amount,
            category: input.category.as_str(),
            date: input.date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Serialize)]
struct ExpensePatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

impl<'a> ExpensePatchBody<'a> {
    fn from_domain(patch: &'a ExpensePatch) -> Self {
        Self {
            description: patch.description.as_deref(),
            amount: patch.amount,
            category: patch.category.map(|c| c.as_str()),
            date: patch.date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

//=========================================================================================
// `ExpenseBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl ExpenseBackend for ExpenseApi {
    async fn list_expenses(&self) -> BackendResult<Vec<Expense>> {
        let response: ExpensesResponse = self.api.get("/expenses").await?;
        response
            .expenses
            .into_iter()
            .map(|r| r.to_domain())
            .collect()
    }

    async fn create_expense(&self, input: &ExpenseInput) -> BackendResult<Expense> {
        let response: SingleExpenseResponse = self
            .api
            .post("/expenses", &ExpenseInputBody::from_domain(input))
            .await?;
        response.expense.to_domain()
    }

    async fn update_expense(
        &self,
        expense_id: &str,
        patch: &ExpensePatch,
    ) -> BackendResult<Expense> {
        let response: SingleExpenseResponse = self
            .api
            .put(
                &format!("/expenses/{expense_id}"),
                &ExpensePatchBody::from_domain(patch),
            )
            .await?;
        response.expense.to_domain()
    }

    async fn delete_expense(&self, expense_id: &str) -> BackendResult<()> {
        self.api.delete(&format!("/expenses/{expense_id}")).await
    }

    async fn expense_summary(&self) -> BackendResult<ExpenseSummary> {
        let response: SummaryResponse = self.api.get("/expenses/summary").await?;
        let items = response
            .summary
            .into_iter()
            .map(|item| {
                Ok(ExpenseSummaryItem {
                    total_amount: item.total_amount.parse()?,
                    category: item.category,
                })
            })
            .collect::<BackendResult<Vec<_>>>()?;
        Ok(ExpenseSummary {
            items,
            grand_total: response.grand_total.parse()?,
        })
    }
}

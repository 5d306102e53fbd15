//! services/app/src/adapters/habits.rs
//!
//! This module contains the habit adapter, which is the concrete implementation
//! of the `HabitBackend` port from the `core` crate. It speaks the REST
//! contract and maps wire records onto domain values.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use daykeep_core::domain::{Frequency, Habit, HabitCompletion, HabitInput, HabitPatch};
use daykeep_core::ports::{BackendError, BackendResult, HabitBackend, ToggleOutcome};
use serde::{Deserialize, Serialize};

use super::client::{parse_day, ApiClient};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `HabitBackend` port over HTTP.
#[derive(Clone)]
pub struct HabitApi {
    api: ApiClient,
}

impl HabitApi {
    /// Creates a new `HabitApi`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRecord {
    id: String,
    habit_id: String,
    date: String,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl CompletionRecord {
    fn to_domain(self) -> BackendResult<HabitCompletion> {
        let date = parse_day(&self.date)?;
        Ok(HabitCompletion {
            id: self.id,
            habit_id: self.habit_id,
            date,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    frequency: String,
    #[serde(default)]
    goal: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    // Absent on some responses; absent means empty.
    #[serde(default)]
    completions: Vec<CompletionRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HabitRecord {
    fn to_domain(self) -> BackendResult<Habit> {
        let frequency = Frequency::from_string(&self.frequency)
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let completions = self
            .completions
            .into_iter()
            .map(|c| c.to_domain())
            .collect::<BackendResult<Vec<_>>>()?;
        Ok(Habit {
            id: self.id,
            name: self.name,
            description: self.description,
            frequency,
            goal: self.goal,
            color: self.color,
            icon: self.icon,
            completions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Deserialize)]
struct HabitsResponse {
    habits: Vec<HabitRecord>,
}

#[derive(Deserialize)]
struct SingleHabitResponse {
    habit: HabitRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResponse {
    habit_id: String,
    date: String,
    completed: bool,
    #[serde(default)]
    completion: Option<CompletionRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitInputBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    frequency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
}

impl<'a> HabitInputBody<'a> {
    fn from_domain(input: &'a HabitInput) -> Self {
        Self {
            name: &input.name,
            description: input.description.as_deref(),
            frequency: input.frequency.as_str(),
            goal: input.goal.as_deref(),
            color: input.color.as_deref(),
            icon: input.icon.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
}

impl<'a> HabitPatchBody<'a> {
    fn from_domain(patch: &'a HabitPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            frequency: patch.frequency.map(|f| f.as_str()),
            goal: patch.goal.as_deref(),
            color: patch.color.as_deref(),
            icon: patch.icon.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

//=========================================================================================
// `HabitBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl HabitBackend for HabitApi {
    async fn list_habits(&self) -> BackendResult<Vec<Habit>> {
        let response: HabitsResponse = self.api.get("/habits").await?;
        response.habits.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn get_habit(&self, habit_id: &str) -> BackendResult<Habit> {
        let response: SingleHabitResponse = self.api.get(&format!("/habits/{habit_id}")).await?;
        response.habit.to_domain()
    }

    async fn create_habit(&self, input: &HabitInput) -> BackendResult<Habit> {
        let response: SingleHabitResponse = self
            .api
            .post("/habits", &HabitInputBody::from_domain(input))
            .await?;
        // A freshly created habit has no completions, whatever the response says.
        let mut habit = response.habit.to_domain()?;
        habit.completions.clear();
        Ok(habit)
    }

    async fn update_habit(&self, habit_id: &str, patch: &HabitPatch) -> BackendResult<Habit> {
        let response: SingleHabitResponse = self
            .api
            .put(
                &format!("/habits/{habit_id}"),
                &HabitPatchBody::from_domain(patch),
            )
            .await?;
        response.habit.to_domain()
    }

    async fn delete_habit(&self, habit_id: &str) -> BackendResult<()> {
        self.api.delete(&format!("/habits/{habit_id}")).await
    }

    async fn toggle_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> BackendResult<ToggleOutcome> {
        let body = CompletionBody {
            date: date.format("%Y-%m-%d").to_string(),
            notes,
        };
        let response: ToggleResponse = self
            .api
            .post(&format!("/habits/{habit_id}/completions"), &body)
            .await?;
        let completion = response.completion.map(|c| c.to_domain()).transpose()?;
        Ok(ToggleOutcome {
            habit_id: response.habit_id,
            date: parse_day(&response.date)?,
            completed: response.completed,
            completion,
        })
    }
}

//! services/app/src/state.rs
//!
//! Defines the application's shared state: the composition root that wires
//! configuration, the HTTP adapters, and the entity stores together. The
//! rendering layer receives this object; nothing here is a global.

use std::sync::Arc;

use daykeep_core::ports::{BackendError, SuggestionSink};

use crate::adapters::{ApiClient, ExpenseApi, HabitApi, TaskApi};
use crate::config::Config;
use crate::stores::{ExpenseStore, HabitStore, NotificationStore, TaskStore};

/// The shared application state, created once at startup and handed to
/// whatever rendering layer sits on top.
pub struct AppState {
    pub config: Arc<Config>,
    pub notifications: Arc<NotificationStore>,
    pub habits: HabitStore,
    pub tasks: TaskStore,
    pub expenses: ExpenseStore,
}

impl AppState {
    /// Wires the full dependency graph against the configured backend.
    pub fn from_config(config: Config) -> Result<Self, BackendError> {
        let api = ApiClient::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.request_timeout,
        )?;

        let notifications = Arc::new(NotificationStore::new());
        let sink: Arc<dyn SuggestionSink> = notifications.clone();

        let habits = HabitStore::new(Arc::new(HabitApi::new(api.clone())), sink.clone());
        let tasks = TaskStore::new(Arc::new(TaskApi::new(api.clone())), sink.clone());
        let expenses = ExpenseStore::new(
            Arc::new(ExpenseApi::new(api)),
            sink,
            config.preferred_currency,
        );

        Ok(Self {
            config: Arc::new(config),
            notifications,
            habits,
            tasks,
            expenses,
        })
    }
}

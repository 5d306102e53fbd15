//! services/app/src/stores/habits.rs
//!
//! The habit entity store: a client-side cache of habits whose mutations are
//! serialized through the `HabitBackend` port. The cache is never treated as
//! authoritative beyond the current session; every confirmed mutation
//! replaces the cached entity, and toggles re-fetch the habit before any
//! streak is computed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{Local, NaiveDate};
use daykeep_core::domain::{Habit, HabitInput, HabitPatch};
use daykeep_core::events::{SuggestionEvent, SuggestionTrigger};
use daykeep_core::ports::{HabitBackend, SuggestionSink};
use daykeep_core::streak;
use tracing::{debug, warn};

use super::error_message;

pub struct HabitStore {
    backend: Arc<dyn HabitBackend>,
    sink: Arc<dyn SuggestionSink>,
    habits: RwLock<Vec<Habit>>,
    error: RwLock<Option<String>>,
    is_loading: RwLock<bool>,
    /// Toggle requests currently in flight, keyed by habit and day. A second
    /// toggle for a key already present is dropped instead of racing the
    /// first; distinct keys never block each other.
    in_flight: Mutex<HashSet<(String, NaiveDate)>>,
}

impl HabitStore {
    pub fn new(backend: Arc<dyn HabitBackend>, sink: Arc<dyn SuggestionSink>) -> Self {
        Self {
            backend,
            sink,
            habits: RwLock::new(Vec::new()),
            error: RwLock::new(None),
            is_loading: RwLock::new(false),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    //=====================================================================================
    // Snapshot Accessors
    //=====================================================================================

    pub fn habits(&self) -> Vec<Habit> {
        self.habits.read().expect("habit cache poisoned").clone()
    }

    pub fn habit(&self, habit_id: &str) -> Option<Habit> {
        self.habits
            .read()
            .expect("habit cache poisoned")
            .iter()
            .find(|h| h.id == habit_id)
            .cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().expect("error slot poisoned").clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.is_loading.read().expect("loading flag poisoned")
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    //=====================================================================================
    // Operations
    //=====================================================================================

    /// Replaces the whole cache with the backend's habit list, newest first.
    /// On failure the cache is cleared and the failure message recorded.
    pub async fn fetch_all(&self) {
        self.set_loading(true);
        self.set_error(None);
        match self.backend.list_habits().await {
            Ok(mut habits) => {
                sort_by_created_desc(&mut habits);
                *self.habits.write().expect("habit cache poisoned") = habits;
                self.set_loading(false);
            }
            Err(err) => {
                let message = error_message(&err, "Failed to fetch habits.");
                warn!(error = %message, "habit list fetch failed");
                self.habits.write().expect("habit cache poisoned").clear();
                self.set_error(Some(message));
                self.set_loading(false);
            }
        }
    }

    pub async fn add(&self, input: HabitInput) -> Option<Habit> {
        match self.backend.create_habit(&input).await {
            Ok(habit) => {
                debug!(habit_id = %habit.id, "habit created");
                {
                    let mut habits = self.habits.write().expect("habit cache poisoned");
                    habits.insert(0, habit.clone());
                    sort_by_created_desc(&mut habits);
                }
                self.sink
                    .notify(SuggestionEvent::new(SuggestionTrigger::HabitCreated {
                        item_name: habit.name.clone(),
                    }));
                Some(habit)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to add habit.")));
                None
            }
        }
    }

    /// Applies a partial edit. Update responses are not trusted to carry
    /// completions, so the cached history is kept and a follow-up fetch of
    /// the single habit reconciles the entry.
    pub async fn update(&self, habit_id: &str, patch: HabitPatch) -> Option<Habit> {
        match self.backend.update_habit(habit_id, &patch).await {
            Ok(updated) => {
                {
                    let mut habits = self.habits.write().expect("habit cache poisoned");
                    if let Some(existing) = habits.iter_mut().find(|h| h.id == habit_id) {
                        let completions = existing.completions.clone();
                        *existing = Habit {
                            completions,
                            ..updated
                        };
                    } else {
                        habits.push(updated);
                    }
                    sort_by_created_desc(&mut habits);
                }
                self.refresh_habit(habit_id).await;
                self.habit(habit_id)
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to update habit.")));
                None
            }
        }
    }

    pub async fn delete(&self, habit_id: &str) -> bool {
        match self.backend.delete_habit(habit_id).await {
            Ok(()) => {
                self.habits
                    .write()
                    .expect("habit cache poisoned")
                    .retain(|h| h.id != habit_id);
                true
            }
            Err(err) => {
                self.set_error(Some(error_message(&err, "Failed to delete habit.")));
                false
            }
        }
    }

    /// Flips the completion for `date` and reports the resulting state, or
    /// `None` on failure, or when an identical toggle is already in flight.
    pub async fn toggle_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Option<bool> {
        let key = (habit_id.to_string(), date);
        {
            let mut in_flight = self.in_flight.lock().expect("in-flight set poisoned");
            if !in_flight.insert(key.clone()) {
                debug!(habit_id, %date, "toggle already in flight, dropping duplicate");
                return None;
            }
        }
        let result = self.toggle_completion_inner(habit_id, date, notes).await;
        self.in_flight
            .lock()
            .expect("in-flight set poisoned")
            .remove(&key);
        result
    }

    async fn toggle_completion_inner(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Option<bool> {
        let outcome = match self.backend.toggle_completion(habit_id, date, notes).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.set_error(Some(error_message(
                    &err,
                    "Failed to toggle habit completion.",
                )));
                return None;
            }
        };

        // Toggle responses can be partial; only a fresh fetch is trusted.
        self.refresh_habit(habit_id).await;

        if outcome.completed {
            if let Some(habit) = self.habit(habit_id) {
                let today = Local::now().date_naive();
                let current = streak::current_streak(&habit, today);
                if current > 0 && streak::is_milestone(current) {
                    self.sink
                        .notify(SuggestionEvent::new(SuggestionTrigger::StreakMilestone {
                            item_name: habit.name.clone(),
                            streak_length: current,
                        }));
                }
            }
        }
        Some(outcome.completed)
    }

    /// Re-fetches one habit with its completions and replaces the cached
    /// entry wholesale.
    pub async fn refresh_habit(&self, habit_id: &str) {
        match self.backend.get_habit(habit_id).await {
            Ok(fresh) => {
                let mut habits = self.habits.write().expect("habit cache poisoned");
                if let Some(existing) = habits.iter_mut().find(|h| h.id == habit_id) {
                    *existing = fresh;
                } else {
                    habits.push(fresh);
                }
                sort_by_created_desc(&mut habits);
                drop(habits);
                self.set_error(None);
            }
            Err(err) => {
                let message = error_message(
                    &err,
                    &format!("Failed to fetch details for habit {habit_id}."),
                );
                warn!(habit_id, error = %message, "habit refresh failed");
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

fn sort_by_created_desc(habits: &mut [Habit]) {
    habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

//! Profile & log store.
//!
//! Owns the single user profile and the per-date logs. Every mutation
//! completes in memory and then overwrites the affected storage key. A failed
//! write is logged and leaves the in-memory state as mutated.

use crate::models::{
    DailyLog, EntryId, LogPatch, Logs, Meal, NewMeal, NewWorkout, UserProfile, Workout,
};
use crate::storage::{LOGS_KEY, PROFILE_KEY, Storage, load_value, persist_value};
use chrono::NaiveDate;
use tracing::{debug, error, info};

pub struct Store<S: Storage> {
    storage: S,
    profile: Option<UserProfile>,
    logs: Logs,
    next_id: u64,
}

impl<S: Storage> Store<S> {
    /// Loads profile and logs from `storage`, defaulting anything missing or
    /// unreadable.
    pub fn load(storage: S) -> Self {
        let profile = load_value::<_, Option<UserProfile>>(&storage, PROFILE_KEY).flatten();
        let mut logs: Logs = load_value(&storage, LOGS_KEY).unwrap_or_default();
        for (date, log) in logs.iter_mut() {
            log.date = *date;
        }
        let next_id = max_entry_id(&logs).map_or(1, |id| id.0 + 1);

        debug!(
            has_profile = profile.is_some(),
            log_count = logs.len(),
            "store loaded"
        );

        Self {
            storage,
            profile,
            logs,
            next_id,
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn logs(&self) -> &Logs {
        &self.logs
    }

    pub fn log(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(&date)
    }

    /// The log for `date`, or an empty skeleton if nothing was recorded.
    pub fn log_or_empty(&self, date: NaiveDate) -> DailyLog {
        self.log(date)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(date))
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        info!(name = %profile.name, "profile set");
        self.profile = Some(profile);
        self.persist_profile();
    }

    pub fn update_log(&mut self, date: NaiveDate, patch: LogPatch) -> DailyLog {
        let entry = self.entry(date);
        if let Some(weight) = patch.weight {
            entry.weight = Some(weight);
        }
        if let Some(water) = patch.water {
            entry.water = water;
        }
        let updated = entry.clone();

        debug!(%date, ?patch, "log updated");
        self.persist_logs();
        updated
    }

    /// Adds `delta_ml` to the day's water, clamping the total at zero.
    pub fn add_water(&mut self, date: NaiveDate, delta_ml: i64) -> DailyLog {
        let current = self.log(date).map_or(0, |log| log.water);
        let water = i64::from(current)
            .saturating_add(delta_ml)
            .clamp(0, i64::from(u32::MAX)) as u32;
        self.update_log(date, LogPatch::water(water))
    }

    /// Records the day's weight and carries it into the profile's current
    /// weight.
    pub fn log_weight(&mut self, date: NaiveDate, weight: f64) -> DailyLog {
        let updated = self.update_log(date, LogPatch::weight(weight));
        if let Some(profile) = self.profile.as_mut() {
            profile.current_weight = weight;
            self.persist_profile();
        }
        updated
    }

    pub fn add_meal(&mut self, date: NaiveDate, meal: NewMeal) -> Meal {
        let id = self.next_entry_id();
        let meal = Meal {
            id,
            name: meal.name,
            calories: meal.calories,
            kind: meal.kind,
        };

        let entry = self.entry(date);
        entry.calories += u64::from(meal.calories);
        entry.meals.push(meal.clone());

        debug!(%date, %id, calories = meal.calories, "meal added");
        self.persist_logs();
        meal
    }

    pub fn add_workout(&mut self, date: NaiveDate, workout: NewWorkout) -> Workout {
        let id = self.next_entry_id();
        let workout = Workout {
            id,
            name: workout.name,
            duration: workout.duration,
            kind: workout.kind,
        };

        let entry = self.entry(date);
        entry.exercise += u64::from(workout.duration);
        entry.workouts.push(workout.clone());

        debug!(%date, %id, duration = workout.duration, "workout added");
        self.persist_logs();
        workout
    }

    /// Drops the profile and every log, in memory and in storage.
    ///
    /// The id counter keeps counting so ids handed out before the reset are
    /// never issued again.
    pub fn reset(&mut self) {
        self.profile = None;
        self.logs.clear();

        for key in [PROFILE_KEY, LOGS_KEY] {
            if let Err(err) = self.storage.remove(key) {
                error!(key, "failed to erase stored value: {err}");
            }
        }
        info!("store reset");
    }

    fn entry(&mut self, date: NaiveDate) -> &mut DailyLog {
        self.logs
            .entry(date)
            .or_insert_with(|| DailyLog::empty(date))
    }

    fn next_entry_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn persist_profile(&mut self) {
        let result = match &self.profile {
            Some(profile) => persist_value(&mut self.storage, PROFILE_KEY, profile),
            None => self.storage.remove(PROFILE_KEY),
        };
        if let Err(err) = result {
            error!("failed to persist profile: {err}");
        }
    }

    fn persist_logs(&mut self) {
        if let Err(err) = persist_value(&mut self.storage, LOGS_KEY, &self.logs) {
            error!("failed to persist logs: {err}");
        }
    }
}

fn max_entry_id(logs: &Logs) -> Option<EntryId> {
    logs.values()
        .flat_map(|log| {
            log.meals
                .iter()
                .map(|meal| meal.id)
                .chain(log.workouts.iter().map(|workout| workout.id))
        })
        .max()
}

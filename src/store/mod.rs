//! Task store
//!
//! Owns the authoritative task list, mirrors it to a `Storage` backend after
//! every mutation, and answers expiry questions relative to an injected
//! `Clock`.

mod migrate;
mod seed;

pub(crate) use migrate::{SCHEMA_VERSION, upgrade};
pub(crate) use seed::seed_tasks;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand_pcg::Pcg32;

use crate::clock::Clock;
use crate::consts::{TASKS_KEY, TASKS_SCHEMA_KEY};
use crate::core::{ExpiryStatus, NewTask, Task, TaskView};
use crate::error::{AppError, MigrateError};
use crate::storage::Storage;
use crate::utils::parse_instant;

/// How the collection came to be after `load`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    /// Nothing stored yet, seed tasks written
    Seeded,
    /// Stored tasks read and upgraded to the current schema
    Loaded,
    /// Stored data was unreadable and replaced with the seed tasks
    Reseeded,
}

pub(crate) struct TaskStore<S: Storage, C: Clock> {
    storage: S,
    clock: C,
    rng: Pcg32,
    tasks: Vec<Task>,
}

impl<S: Storage, C: Clock> TaskStore<S, C> {
    /// Open the store, reading and upgrading whatever `storage` holds.
    ///
    /// Corrupt stored data never surfaces as an error: the seed set replaces
    /// it. Only backend I/O failures are returned.
    pub(crate) fn load(storage: S, clock: C, rng: Pcg32) -> Result<(Self, LoadOutcome), AppError> {
        let mut store = Self {
            storage,
            clock,
            rng,
            tasks: Vec::new(),
        };
        let outcome = store.reload()?;
        Ok((store, outcome))
    }

    fn reload(&mut self) -> Result<LoadOutcome, AppError> {
        let Some(raw) = self.storage.get(TASKS_KEY)? else {
            self.tasks = seed_tasks();
            self.persist()?;
            tracing::info!(count = self.tasks.len(), "no stored tasks, seeded examples");
            return Ok(LoadOutcome::Seeded);
        };

        let from = self
            .storage
            .get(TASKS_SCHEMA_KEY)?
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);

        match self.decode(&raw, from) {
            Ok(tasks) => {
                self.tasks = tasks;
                self.persist()?;
                tracing::debug!(count = self.tasks.len(), from, "loaded stored tasks");
                Ok(LoadOutcome::Loaded)
            }
            Err(err) => {
                tracing::warn!("stored tasks unreadable ({err}), restoring example tasks");
                self.tasks = seed_tasks();
                self.persist()?;
                Ok(LoadOutcome::Reseeded)
            }
        }
    }

    fn decode(&mut self, raw: &str, from: u32) -> Result<Vec<Task>, MigrateError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| MigrateError::Malformed(e.to_string()))?;
        match upgrade(value.clone(), from, &mut self.rng) {
            // A record written by an older client under a current marker still
            // gets the full upgrade before we give up on it
            Err(MigrateError::Schema { .. }) if from > 0 => upgrade(value, 0, &mut self.rng),
            result => result,
        }
    }

    /// Write the full collection and its schema version
    fn persist(&mut self) -> Result<(), AppError> {
        let json = serde_json::to_string(&self.tasks)?;
        self.storage.set(TASKS_KEY, &json)?;
        self.storage
            .set(TASKS_SCHEMA_KEY, &SCHEMA_VERSION.to_string())?;
        Ok(())
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Backend handle, for preferences stored beside the tasks
    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Millisecond timestamp id, bumped until unused
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = millis.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    /// Append a task, assigning its id and creation time
    pub(crate) fn add(&mut self, new: NewTask) -> Result<Task, AppError> {
        let now = self.clock.now();
        let id = self.next_id(now);
        let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let task = new.into_task(id, created_at);

        self.tasks.push(task.clone());
        self.persist()?;
        tracing::debug!(id = %task.id, "added task");
        Ok(task)
    }

    /// Remove the task with `id`; returns whether one was removed
    pub(crate) fn delete(&mut self, id: &str) -> Result<bool, AppError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        self.persist()?;
        tracing::debug!(id, removed, "delete task");
        Ok(removed)
    }

    /// Expiry falls before `days` days from now
    ///
    /// A window past the representable calendar holds every expiry when it
    /// points forward and none when it points back.
    pub(crate) fn is_expiring_soon(&self, expiry_date: Option<&str>, days: i64) -> bool {
        let Some(expiry) = expiry_date.and_then(parse_instant) else {
            return false;
        };
        match Duration::try_days(days).and_then(|d| self.clock.now().checked_add_signed(d)) {
            Some(deadline) => expiry < deadline,
            None => days > 0,
        }
    }

    /// Expiry falls before now
    pub(crate) fn is_expired(&self, expiry_date: Option<&str>) -> bool {
        let Some(expiry) = expiry_date.and_then(parse_instant) else {
            return false;
        };
        expiry < self.clock.now()
    }

    /// Whole days from now until expiry, truncated toward zero; negative once past
    pub(crate) fn days_until_expiry(&self, expiry_date: Option<&str>) -> Option<i64> {
        let expiry = expiry_date.and_then(parse_instant)?;
        Some((expiry - self.clock.now()).num_days())
    }

    /// Annotate `task` with its expiry standing, using `days` as the warning window
    pub(crate) fn view<'t>(&self, task: &'t Task, days: i64) -> TaskView<'t> {
        let expiry = task.expiry_date.as_deref();
        let days_until_expiry = self.days_until_expiry(expiry);
        let status = if days_until_expiry.is_none() {
            ExpiryStatus::Unknown
        } else if self.is_expired(expiry) {
            ExpiryStatus::Expired
        } else if self.is_expiring_soon(expiry, days) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Ok
        };
        TaskView {
            task,
            days_until_expiry,
            status,
        }
    }

    pub(crate) fn expiring_items(&self, days: i64) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.is_expiring_soon(t.expiry_date.as_deref(), days))
            .collect()
    }

    pub(crate) fn expired_items(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.is_expired(t.expiry_date.as_deref()))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn into_storage(self) -> S {
        self.storage
    }
}

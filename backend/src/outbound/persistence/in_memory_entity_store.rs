//! In-memory `EntityStore` adapter with optional JSON snapshot durability.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{EntityStore, EntityStoreError, StoreLifecycle};
use crate::domain::{
    Exercise, ExerciseDraft, ExerciseFilter, ExerciseId, ExerciseQuery, User, UserId, Username,
};

use super::snapshot_file::{Snapshot, SnapshotFile};

/// Entity store keeping users and exercises in insertion order.
///
/// The store serves operations only between [`StoreLifecycle::connect`] and
/// [`StoreLifecycle::close`]. When built with [`Self::with_snapshot`] the
/// contents survive restarts: they are loaded on connect and written back on
/// close.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::ports::{EntityStore, StoreLifecycle};
/// use exercise_tracker::domain::Username;
/// use exercise_tracker::outbound::persistence::InMemoryEntityStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryEntityStore::new();
/// store.connect().await.expect("connect");
/// let username = Username::new("alice").expect("username");
/// let user = store.create_user(&username).await.expect("create");
/// assert_eq!(store.list_users().await.expect("list"), vec![user]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    state: RwLock<Snapshot>,
    connected: AtomicBool,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryEntityStore {
    /// Create a volatile store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store persisted to the JSON file at `path`.
    pub fn with_snapshot(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: Some(SnapshotFile::new(path)),
            ..Self::default()
        }
    }

    fn ensure_connected(&self) -> Result<(), EntityStoreError> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(EntityStoreError::connection("entity store is not connected"))
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>, EntityStoreError> {
        self.ensure_connected()?;
        self.state
            .read()
            .map_err(|_| EntityStoreError::query("entity store state lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, EntityStoreError> {
        self.ensure_connected()?;
        self.state
            .write()
            .map_err(|_| EntityStoreError::query("entity store state lock poisoned"))
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn create_user(&self, username: &Username) -> Result<User, EntityStoreError> {
        let mut state = self.write()?;
        let user = User::new(UserId::random(), username.clone());
        state.users.push(user.clone());
        Ok(user)
    }

    async fn create_exercise(&self, draft: &ExerciseDraft) -> Result<Exercise, EntityStoreError> {
        let mut state = self.write()?;
        let exercise = Exercise::from_draft(ExerciseId::random(), draft.clone());
        state.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, EntityStoreError> {
        let state = self.read()?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, EntityStoreError> {
        Ok(self.read()?.users.clone())
    }

    async fn find_exercises(
        &self,
        query: &ExerciseQuery,
    ) -> Result<Vec<Exercise>, EntityStoreError> {
        let state = self.read()?;
        let cap = query.limit.map_or(usize::MAX, |limit| limit.get());
        Ok(state
            .exercises
            .iter()
            .filter(|exercise| query.filter.matches(exercise))
            .take(cap)
            .cloned()
            .collect())
    }

    async fn count_exercises(&self, filter: &ExerciseFilter) -> Result<u64, EntityStoreError> {
        let state = self.read()?;
        let count = state
            .exercises
            .iter()
            .filter(|exercise| filter.matches(exercise))
            .count();
        u64::try_from(count)
            .map_err(|_| EntityStoreError::query("exercise count exceeds u64 range"))
    }
}

#[async_trait]
impl StoreLifecycle for InMemoryEntityStore {
    async fn connect(&self) -> Result<(), EntityStoreError> {
        if self.connected.load(Ordering::Acquire) {
            return Ok(());
        }
        if let Some(file) = &self.snapshot {
            let loaded = file.load()?;
            info!(
                path = %file.path().display(),
                users = loaded.users.len(),
                exercises = loaded.exercises.len(),
                "loaded entity store snapshot"
            );
            let mut state = self
                .state
                .write()
                .map_err(|_| EntityStoreError::connection("entity store state lock poisoned"))?;
            *state = loaded;
        }
        self.connected.store(true, Ordering::Release);
        debug!("entity store connected");
        Ok(())
    }

    async fn close(&self) -> Result<(), EntityStoreError> {
        if !self.connected.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(file) = &self.snapshot {
            let state = self
                .state
                .read()
                .map_err(|_| EntityStoreError::query("entity store state lock poisoned"))?;
            file.save(&state)?;
            info!(path = %file.path().display(), "saved entity store snapshot");
        }
        debug!("entity store closed");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "in_memory_entity_store_tests.rs"]
mod tests;

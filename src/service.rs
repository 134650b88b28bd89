//! Mutation coordination between the entity cache and the remote service.
//!
//! One user intent becomes exactly one network round trip. The cache is
//! reconciled only from the server's returned entity, after the
//! response arrives; a failed request leaves the cache untouched so the
//! caller can tell nothing happened. There is no automatic retry; a
//! retry is a fresh call.

use crate::api::TaskApi;
use crate::error::{ApiError, ApiResult};
use crate::store::{SubtaskMutation, TaskMutation, TaskStore};
use crate::types::{
    CreateMainTask, CreateSubtask, MainTask, Subtask, UpdateMainTask, UpdateSubtask,
};
use tracing::{error, info, warn};

/// Coordinates task and subtask mutations against one service instance.
///
/// The service owns the store; mutations take `&mut self`, so within
/// one service instance they are naturally serialized in call order and
/// the cache always reflects the last applied response.
pub struct TaskService<A: TaskApi> {
    api: A,
    store: TaskStore,
}

impl<A: TaskApi> TaskService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: TaskStore::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The transport this service talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current task collection snapshot, newest first.
    pub fn tasks(&self) -> &[MainTask] {
        self.store.tasks()
    }

    /// Scoped subtask collection snapshot.
    pub fn subtasks(&self) -> &[Subtask] {
        self.store.subtasks()
    }

    /// Fetch the full task collection and replace the cache wholesale.
    ///
    /// Failure is logged and swallowed: the cache keeps its previous
    /// value (or stays empty on first load) and the loading flag is
    /// cleared on every path, so callers render a stale or empty list
    /// rather than spin forever. Mutations do not get this treatment;
    /// they always propagate their errors.
    pub async fn load(&mut self) {
        self.store.set_loading(true);
        match self.api.list_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks fetched");
                self.store.apply(TaskMutation::Loaded(tasks));
            }
            Err(err) => error!(%err, "failed to fetch tasks"),
        }
        self.store.set_loading(false);
    }

    /// Create a task. Requires a non-empty title; validation failures
    /// never reach the network.
    pub async fn create_task(&mut self, input: CreateMainTask) -> ApiResult<MainTask> {
        if input.title.trim().is_empty() {
            return Err(ApiError::missing_field("title"));
        }
        let created = self.api.create_task(&input).await?;
        info!(id = created.id, "task created");
        self.store.apply(TaskMutation::Created(created.clone()));
        Ok(created)
    }

    /// Send a partial update. The server's full representation replaces
    /// the cache entry with no field merge, so fields the response
    /// omits are dropped from the cache too.
    pub async fn update_task(&mut self, id: i64, input: UpdateMainTask) -> ApiResult<MainTask> {
        let updated = self.api.update_task(id, &input).await?;
        info!(id, "task updated");
        self.store.apply(TaskMutation::Updated(updated.clone()));
        Ok(updated)
    }

    /// Flip the done flag. The request is always issued, even when the
    /// cached entity already holds the requested value; repeated calls
    /// converge to the same state.
    pub async fn toggle_task_done(&mut self, id: i64, done: bool) -> ApiResult<MainTask> {
        self.update_task(id, UpdateMainTask::set_done(done)).await
    }

    pub async fn delete_task(&mut self, id: i64) -> ApiResult<()> {
        self.api.delete_task(id).await?;
        info!(id, "task deleted");
        self.store.apply(TaskMutation::Deleted(id));
        Ok(())
    }

    /// Fetch the subtask list of one task, replacing the scoped subtask
    /// cache. Same swallow-and-log policy as [`load`](Self::load).
    pub async fn load_subtasks(&mut self, main_task_id: i64) {
        self.store.set_loading(true);
        match self.api.list_subtasks(main_task_id).await {
            Ok(subtasks) => {
                info!(main_task_id, count = subtasks.len(), "subtasks fetched");
                self.store.apply_subtask(SubtaskMutation::Loaded {
                    main_task_id,
                    subtasks,
                });
            }
            Err(err) => error!(%err, main_task_id, "failed to fetch subtasks"),
        }
        self.store.set_loading(false);
    }

    /// Create a subtask under a task. Title and both range dates are
    /// required.
    pub async fn create_subtask(
        &mut self,
        main_task_id: i64,
        input: CreateSubtask,
    ) -> ApiResult<Subtask> {
        if input.title.trim().is_empty() {
            return Err(ApiError::missing_field("title"));
        }
        if input.start.trim().is_empty() {
            return Err(ApiError::missing_field("startSubtask"));
        }
        if input.finish.trim().is_empty() {
            return Err(ApiError::missing_field("finishSubtask"));
        }
        if !self.store.tasks().is_empty() && self.store.get(main_task_id).is_none() {
            // The parent may have been deleted underneath us; the service
            // decides whether the create still succeeds.
            warn!(main_task_id, "creating subtask for a task not in the cache");
        }
        let created = self.api.create_subtask(main_task_id, &input).await?;
        info!(id = created.id, main_task_id, "subtask created");
        self.store.apply_subtask(SubtaskMutation::Created(created.clone()));
        Ok(created)
    }

    pub async fn update_subtask(&mut self, id: i64, input: UpdateSubtask) -> ApiResult<Subtask> {
        let updated = self.api.update_subtask(id, &input).await?;
        info!(id, "subtask updated");
        self.store.apply_subtask(SubtaskMutation::Updated(updated.clone()));
        Ok(updated)
    }

    /// Subtask counterpart of [`toggle_task_done`](Self::toggle_task_done).
    pub async fn toggle_subtask_done(&mut self, id: i64, done: bool) -> ApiResult<Subtask> {
        self.update_subtask(id, UpdateSubtask::set_done(done)).await
    }

    pub async fn delete_subtask(&mut self, id: i64) -> ApiResult<()> {
        self.api.delete_subtask(id).await?;
        info!(id, "subtask deleted");
        self.store.apply_subtask(SubtaskMutation::Deleted(id));
        Ok(())
    }
}

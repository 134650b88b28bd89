//! Transport seam for the AtlasTask REST service.

mod http;

pub use http::HttpTaskApi;

use crate::error::ApiResult;
use crate::types::{
    CreateMainTask, CreateSubtask, MainTask, Subtask, UpdateMainTask, UpdateSubtask,
};
use async_trait::async_trait;

/// The REST operations the service exposes.
///
/// The synchronization layer only ever talks to this trait, so tests
/// can substitute an in-memory fake for the real HTTP transport.
#[async_trait]
pub trait TaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<MainTask>>;
    async fn create_task(&self, input: &CreateMainTask) -> ApiResult<MainTask>;
    async fn update_task(&self, id: i64, input: &UpdateMainTask) -> ApiResult<MainTask>;
    async fn delete_task(&self, id: i64) -> ApiResult<()>;

    async fn list_subtasks(&self, main_task_id: i64) -> ApiResult<Vec<Subtask>>;
    async fn create_subtask(&self, main_task_id: i64, input: &CreateSubtask)
    -> ApiResult<Subtask>;
    async fn update_subtask(&self, id: i64, input: &UpdateSubtask) -> ApiResult<Subtask>;
    async fn delete_subtask(&self, id: i64) -> ApiResult<()>;
}

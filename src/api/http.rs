//! reqwest-backed implementation of [`TaskApi`].

use super::TaskApi;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    CreateMainTask, CreateSubtask, MainTask, Subtask, UpdateMainTask, UpdateSubtask,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP transport to one AtlasTask service instance.
///
/// One shared connection-pooled client; every request carries the
/// configured timeout. Requests run to completion or failure, no
/// automatic retry.
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

/// Pass 2xx responses through; turn anything else into `RequestFailed`
/// carrying the status and the raw body text for diagnostics.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::request_failed(status.as_u16(), body))
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<MainTask>> {
        debug!("GET /api/main-tasks");
        let response = self
            .client
            .get(self.url("/api/main-tasks"))
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn create_task(&self, input: &CreateMainTask) -> ApiResult<MainTask> {
        debug!(title = %input.title, "POST /api/main-tasks");
        let response = self
            .client
            .post(self.url("/api/main-tasks"))
            .json(input)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn update_task(&self, id: i64, input: &UpdateMainTask) -> ApiResult<MainTask> {
        debug!(id, "PUT /api/main-tasks/{id}");
        let response = self
            .client
            .put(self.url(&format!("/api/main-tasks/{id}")))
            .json(input)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn delete_task(&self, id: i64) -> ApiResult<()> {
        debug!(id, "DELETE /api/main-tasks/{id}");
        let response = self
            .client
            .delete(self.url(&format!("/api/main-tasks/{id}")))
            .send()
            .await
            .map_err(ApiError::Network)?;
        // 2xx is all that matters; the body is ignored.
        check_status(response).await?;
        Ok(())
    }

    async fn list_subtasks(&self, main_task_id: i64) -> ApiResult<Vec<Subtask>> {
        debug!(main_task_id, "GET /api/main-tasks/{main_task_id}/subtasks");
        let response = self
            .client
            .get(self.url(&format!("/api/main-tasks/{main_task_id}/subtasks")))
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn create_subtask(
        &self,
        main_task_id: i64,
        input: &CreateSubtask,
    ) -> ApiResult<Subtask> {
        debug!(main_task_id, title = %input.title, "POST /api/main-tasks/{main_task_id}/subtasks");
        let response = self
            .client
            .post(self.url(&format!("/api/main-tasks/{main_task_id}/subtasks")))
            .json(input)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn update_subtask(&self, id: i64, input: &UpdateSubtask) -> ApiResult<Subtask> {
        debug!(id, "PUT /api/subtasks/{id}");
        let response = self
            .client
            .put(self.url(&format!("/api/subtasks/{id}")))
            .json(input)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    async fn delete_subtask(&self, id: i64) -> ApiResult<()> {
        debug!(id, "DELETE /api/subtasks/{id}");
        let response = self
            .client
            .delete(self.url(&format!("/api/subtasks/{id}")))
            .send()
            .await
            .map_err(ApiError::Network)?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let api = HttpTaskApi::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.url("/api/main-tasks"), "http://localhost:8080/api/main-tasks");
    }
}

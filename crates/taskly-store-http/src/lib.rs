//! REST-backed record store for Taskly.
//!
//! Speaks JSON to the backend's `/tasks` and `/users` collections. When the
//! backend is unreachable and the fallback is enabled, the read paths and
//! task creation transparently serve the documented local substitute data.
//! Mutating calls never fall back: their failures must propagate so the
//! caller can discard the optimistic commit.

/// Error types.
pub mod error;
/// Local substitute data.
pub mod mock;

pub use error::StoreError;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use taskly_core::id::{TaskId, UserId};
use taskly_core::{Task, TaskDraft, User};
use time::OffsetDateTime;
use tracing::{debug, warn};
use url::Url;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Connection settings for the HTTP store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the backend.
    pub base_url: Url,
    /// Serve the local substitute data when the backend is unreachable.
    pub mock_fallback: bool,
}

impl StoreConfig {
    /// Parse and validate the base URL.
    ///
    /// # Errors
    /// Returns an error when `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str, mock_fallback: bool) -> StoreResult<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            mock_fallback,
        })
    }
}

/// Record store speaking JSON REST to the Taskly backend.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    config: StoreConfig,
}

impl HttpStore {
    /// Create a store over a fresh client.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch every task.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request, unless it is
    /// unreachable and the fallback is enabled.
    pub async fn get_tasks(&self) -> StoreResult<Vec<Task>> {
        match self.get_json(&["tasks"]).await {
            Err(err) if self.fallback_applies(&err) => {
                warn!(error = %err, "backend unreachable, serving local task set");
                Ok(mock::sample_tasks())
            }
            other => other,
        }
    }

    /// Fetch a single task.
    ///
    /// # Errors
    /// Returns an error when the task is missing or the backend rejects the
    /// request. No fallback.
    pub async fn get_task(&self, id: TaskId) -> StoreResult<Task> {
        self.get_json(&["tasks", &id.to_string()]).await
    }

    /// Fetch every user.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request, unless it is
    /// unreachable and the fallback is enabled.
    pub async fn get_users(&self) -> StoreResult<Vec<User>> {
        match self.get_json(&["users"]).await {
            Err(err) if self.fallback_applies(&err) => {
                warn!(error = %err, "backend unreachable, serving local user set");
                Ok(mock::sample_users())
            }
            other => other,
        }
    }

    /// Create a task from a draft; the backend assigns the identifier.
    ///
    /// When the backend is unreachable and the fallback is enabled, the
    /// record is materialized locally with a timestamp-derived identifier,
    /// mirroring the development backend's id scheme.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request.
    pub async fn create_task(&self, draft: &TaskDraft) -> StoreResult<Task> {
        let url = self.endpoint(&["tasks"])?;
        debug!(%url, "POST task");
        let result = async {
            let response = self.client.post(url.clone()).json(draft).send().await?;
            Self::decode(&url, response).await
        }
        .await;

        match result {
            Err(err) if self.fallback_applies(&err) => {
                warn!(error = %err, "backend unreachable, creating task locally");
                Ok(draft.clone().into_task(local_task_id()))
            }
            other => other,
        }
    }

    /// Replace the stored task (full-replace semantics) and return the
    /// stored record.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request. No fallback.
    pub async fn update_task(&self, id: TaskId, task: &Task) -> StoreResult<Task> {
        let url = self.endpoint(&["tasks", &id.to_string()])?;
        debug!(%url, "PUT task");
        let response = self.client.put(url.clone()).json(task).send().await?;
        Self::decode(&url, response).await
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request. No fallback.
    pub async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        self.delete(&["tasks", &id.to_string()]).await
    }

    /// Delete a user account.
    ///
    /// # Errors
    /// Returns an error when the backend rejects the request. No fallback.
    pub async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.delete(&["users", &id.to_string()]).await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> StoreResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(&url, response).await
    }

    async fn delete(&self, segments: &[&str]) -> StoreResult<()> {
        let url = self.endpoint(segments)?;
        debug!(%url, "DELETE");
        let response = self.client.delete(url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Status {
                status,
                endpoint: url.to_string(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> StoreResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status,
                endpoint: url.to_string(),
            });
        }
        Ok(response.json().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| StoreError::BaseUrl)?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn fallback_applies(&self, err: &StoreError) -> bool {
        self.config.mock_fallback && err.is_unreachable()
    }
}

/// Timestamp-derived identifier for locally created records, the same shape
/// the development backend mints.
fn local_task_id() -> TaskId {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    TaskId(i64::try_from(millis).unwrap_or_default())
}

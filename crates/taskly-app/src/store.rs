//! Async record-store seam between the controllers and the transport.

use anyhow::Error;
use taskly_core::id::{TaskId, UserId};
use taskly_core::{Task, TaskDraft, User};
use taskly_store_http::{HttpStore, StoreError};

/// Async CRUD surface over the task and user collections.
///
/// Mirrors the REST backend's contract: `update_task` has full-replace
/// semantics and returns the stored record. Implemented by [`HttpStore`]
/// for production and by in-memory mocks in controller tests.
#[allow(async_fn_in_trait)]
pub trait RecordStore: Send + Sync {
    /// Error type bubbled up from the backing transport.
    type Error: Into<Error> + Send;

    /// Fetch every task.
    ///
    /// # Errors
    /// Returns a store-specific error when the fetch fails.
    async fn get_tasks(&self) -> Result<Vec<Task>, Self::Error>;

    /// Fetch every user.
    ///
    /// # Errors
    /// Returns a store-specific error when the fetch fails.
    async fn get_users(&self) -> Result<Vec<User>, Self::Error>;

    /// Fetch a single task.
    ///
    /// # Errors
    /// Returns a store-specific error when the task cannot be read.
    async fn get_task(&self, id: TaskId) -> Result<Task, Self::Error>;

    /// Create a task from a draft; the store assigns the identifier.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting the record fails.
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Self::Error>;

    /// Replace the stored task and return the stored record.
    ///
    /// # Errors
    /// Returns a store-specific error when the update is rejected.
    async fn update_task(&self, id: TaskId, task: &Task) -> Result<Task, Self::Error>;

    /// Delete a task.
    ///
    /// # Errors
    /// Returns a store-specific error when the deletion is rejected.
    async fn delete_task(&self, id: TaskId) -> Result<(), Self::Error>;

    /// Delete a user account.
    ///
    /// # Errors
    /// Returns a store-specific error when the deletion is rejected.
    async fn delete_user(&self, id: UserId) -> Result<(), Self::Error>;
}

impl RecordStore for HttpStore {
    type Error = StoreError;

    async fn get_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        Self::get_tasks(self).await
    }

    async fn get_users(&self) -> Result<Vec<User>, Self::Error> {
        Self::get_users(self).await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, Self::Error> {
        Self::get_task(self, id).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Self::Error> {
        Self::create_task(self, draft).await
    }

    async fn update_task(&self, id: TaskId, task: &Task) -> Result<Task, Self::Error> {
        Self::update_task(self, id, task).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete_task(self, id).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Self::Error> {
        Self::delete_user(self, id).await
    }
}

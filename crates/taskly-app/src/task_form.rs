//! Validation and submission for the task create/edit form.

use anyhow::Result;
use thiserror::Error;

use taskly_core::id::{TaskId, UserId};
use taskly_core::{Role, Task, TaskDraft, User};

use crate::store::RecordStore;

/// First validation failure for a draft, with the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The title is blank.
    #[error("Введите название задачи")]
    TitleRequired,
    /// No due date was picked.
    #[error("Выберите дату выполнения")]
    DueDateRequired,
    /// No assignee was picked.
    #[error("Выберите исполнителя")]
    AssigneeRequired,
}

/// Validate a draft before submission. Checks run in form order and the
/// first failure wins, matching how the form surfaces them one at a time.
///
/// # Errors
/// Returns the first failed check.
pub fn validate(draft: &TaskDraft) -> Result<(), DraftError> {
    if draft.title.trim().is_empty() {
        return Err(DraftError::TitleRequired);
    }
    if draft.due_date.as_deref().is_none_or(str::is_empty) {
        return Err(DraftError::DueDateRequired);
    }
    if draft.assigned_to.is_none() {
        return Err(DraftError::AssigneeRequired);
    }
    Ok(())
}

/// Users offered in the assignee selector: regular accounts only.
#[must_use]
pub fn assignee_candidates(users: &[User]) -> Vec<&User> {
    users
        .iter()
        .filter(|user| user.role == Role::User)
        .collect()
}

/// Preselected assignee for a fresh draft: the first regular account.
#[must_use]
pub fn default_assignee(users: &[User]) -> Option<UserId> {
    assignee_candidates(users).first().map(|user| user.id)
}

/// Validate and submit a draft: create when `id` is `None`, full-replace
/// update otherwise. Returns the stored record.
///
/// # Errors
/// Returns the first validation failure, or the store's rejection wrapped
/// in the form's user-facing message.
pub async fn submit<S: RecordStore>(
    store: &S,
    id: Option<TaskId>,
    draft: &TaskDraft,
) -> Result<Task> {
    validate(draft)?;
    let result = match id {
        None => store.create_task(draft).await,
        Some(id) => {
            let task = draft.clone().into_task(id);
            store.update_task(id, &task).await
        }
    };
    result.map_err(|err| {
        let err: anyhow::Error = err.into();
        err.context("Ошибка сохранения задачи")
    })
}

//! Admin user directory: list accounts and delete them, with guards.

use anyhow::{Context, Result, ensure};
use thiserror::Error;
use tracing::error;

use taskly_core::User;
use taskly_core::id::UserId;

use crate::prompt::ConfirmPrompt;
use crate::session::Session;
use crate::store::RecordStore;

/// The bootstrap account that must always survive.
const PRIMARY_ADMIN: &str = "admin";

/// Deletion refused before anything reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeleteGuard {
    /// The session tried to delete its own account.
    #[error("Вы не можете удалить свой собственный аккаунт!")]
    OwnAccount,
    /// The target is the primary administrator.
    #[error("Нельзя удалить основного администратора!")]
    PrimaryAdmin,
}

/// What a confirmed user deletion ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveUserOutcome {
    /// The user declined the confirmation prompt; nothing was sent.
    Cancelled,
    /// The store accepted the deletion and local state dropped the account.
    Removed,
}

/// View-local state for the user administration screen.
pub struct UserAdmin<S> {
    store: S,
    session: Session,
    users: Vec<User>,
    loading: bool,
}

impl<S: RecordStore> UserAdmin<S> {
    /// Create a directory controller for the given session.
    #[must_use]
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            users: Vec::new(),
            loading: true,
        }
    }

    /// Fetch the user list.
    ///
    /// # Errors
    /// Returns an error with the screen's message when the fetch fails; the
    /// directory then shows an empty loaded state.
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.store.get_users().await;
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                Ok(())
            }
            Err(err) => {
                let err: anyhow::Error = err.into();
                error!(error = %err, "failed to load users");
                self.users = Vec::new();
                Err(err.context("Не удалось загрузить пользователей"))
            }
        }
    }

    /// Whether the initial load is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// All loaded accounts.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Delete an account after the guards and an explicit confirmation.
    ///
    /// Refused outright for the session's own account and for the primary
    /// administrator. The account leaves local state only once the store
    /// accepted the deletion.
    ///
    /// # Errors
    /// Returns an error when the session lacks the manage-users capability,
    /// a guard refuses the target, or the store rejects the deletion.
    pub async fn remove_user(
        &mut self,
        id: UserId,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<RemoveUserOutcome> {
        ensure!(
            self.session.capabilities().manage_users,
            "deleting accounts requires the manage-users capability"
        );
        let username = self
            .users
            .iter()
            .find(|user| user.id == id)
            .map(|user| user.username.clone())
            .context("user is not loaded")?;

        if self.session.is_own_account(id) {
            return Err(DeleteGuard::OwnAccount.into());
        }
        if username == PRIMARY_ADMIN {
            return Err(DeleteGuard::PrimaryAdmin.into());
        }
        if !prompt.confirm(&format!(
            "Вы уверены, что хотите удалить пользователя {username}?"
        )) {
            return Ok(RemoveUserOutcome::Cancelled);
        }

        match self.store.delete_user(id).await {
            Ok(()) => {
                self.users.retain(|user| user.id != id);
                Ok(RemoveUserOutcome::Removed)
            }
            Err(err) => {
                let err: anyhow::Error = err.into();
                Err(err.context("Ошибка при удалении пользователя"))
            }
        }
    }
}

use taskly_core::User;
use taskly_core::id::UserId;
use taskly_core::permissions::Capabilities;

/// The authenticated user for the lifetime of a mounted view.
///
/// Injected into controllers at construction instead of being read from a
/// shared ambient storage, so every capability decision is traceable to an
/// explicit value.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    capabilities: Capabilities,
}

impl Session {
    /// Open a session for the given user; capabilities are fixed here.
    #[must_use]
    pub fn new(user: User) -> Self {
        let capabilities = Capabilities::for_role(&user.role);
        Self { user, capabilities }
    }

    /// The session's user record.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Capability set of the session's role.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether `id` refers to the session's own account.
    #[must_use]
    pub fn is_own_account(&self, id: UserId) -> bool {
        self.user.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskly_core::Role;
    use taskly_core::id::UserId;

    fn user(role: Role) -> User {
        User {
            id: UserId(1),
            first_name: "Алексей".into(),
            last_name: "Иванов".into(),
            username: "admin".into(),
            role,
            created_at: String::new(),
        }
    }

    #[test]
    fn capabilities_are_fixed_at_construction() {
        let session = Session::new(user(Role::Admin));
        assert!(session.capabilities().manage_users);

        let session = Session::new(user(Role::User));
        assert!(!session.capabilities().manage_users);
    }

    #[test]
    fn own_account_check_compares_ids() {
        let session = Session::new(user(Role::Admin));
        assert!(session.is_own_account(UserId(1)));
        assert!(!session.is_own_account(UserId(2)));
    }
}

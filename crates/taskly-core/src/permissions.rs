use crate::Role;

/// What a role may do in the task views.
///
/// Role-based branching is decided here once and consumed by the filter and
/// the controllers, instead of comparing role literals at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// See every task rather than only one's own assignments.
    pub view_all_tasks: bool,
    /// Create, edit and delete tasks.
    pub manage_tasks: bool,
    /// Administer user accounts.
    pub manage_users: bool,
    /// Export the visible list as CSV.
    pub export_csv: bool,
}

impl Capabilities {
    /// Capability set granted to the given role. Unrecognized roles get the
    /// regular-user set.
    #[must_use]
    pub const fn for_role(role: &Role) -> Self {
        let admin = role.is_admin();
        Self {
            view_all_tasks: admin,
            manage_tasks: admin,
            manage_users: admin,
            export_csv: admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_gets_the_full_set() {
        let caps = Capabilities::for_role(&Role::Admin);
        assert!(caps.view_all_tasks);
        assert!(caps.manage_tasks);
        assert!(caps.manage_users);
        assert!(caps.export_csv);
    }

    #[test]
    fn regular_and_unknown_roles_are_scoped_to_their_own_tasks() {
        for role in [Role::User, Role::Other("moderator".into())] {
            let caps = Capabilities::for_role(&role);
            assert!(!caps.view_all_tasks);
            assert!(!caps.manage_tasks);
            assert!(!caps.manage_users);
            assert!(!caps.export_csv);
        }
    }
}

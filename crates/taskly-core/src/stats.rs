use time::Date;

use crate::{Priority, Task, User, parse_due_date};

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// All loaded tasks.
    pub total_tasks: usize,
    /// Tasks with the completion flag set.
    pub completed_tasks: usize,
    /// Tasks still open.
    pub pending_tasks: usize,
    /// Open or closed tasks marked high priority.
    pub high_priority_tasks: usize,
    /// All loaded users.
    pub total_users: usize,
    /// Users with the admin role.
    pub admin_users: usize,
    /// Everyone else.
    pub regular_users: usize,
}

impl DashboardStats {
    /// Aggregate over the loaded record sets.
    #[must_use]
    pub fn collect(tasks: &[Task], users: &[User]) -> Self {
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let high_priority_tasks = tasks
            .iter()
            .filter(|t| t.priority == Priority::High)
            .count();
        let admin_users = users.iter().filter(|u| u.role.is_admin()).count();
        Self {
            total_tasks: tasks.len(),
            completed_tasks,
            pending_tasks: tasks.len() - completed_tasks,
            high_priority_tasks,
            total_users: users.len(),
            admin_users,
            regular_users: users.len() - admin_users,
        }
    }

    /// Completed share in whole percent, `None` when there are no tasks.
    #[must_use]
    pub fn completion_percent(&self) -> Option<u32> {
        if self.total_tasks == 0 {
            return None;
        }
        let total = u32::try_from(self.total_tasks).unwrap_or(u32::MAX);
        let completed = u32::try_from(self.completed_tasks).unwrap_or(u32::MAX);
        Some((completed * 100 + total / 2) / total)
    }
}

/// Whether a task is overdue relative to `today`: incomplete, dated, and due
/// strictly before today. Comparison is at date precision.
#[must_use]
pub fn is_overdue(task: &Task, today: Date) -> bool {
    if task.completed {
        return false;
    }
    task.due_date
        .as_deref()
        .and_then(parse_due_date)
        .is_some_and(|due| due < today)
}

/// Count of overdue tasks, surfaced as the header badge.
#[must_use]
pub fn overdue_count(tasks: &[Task], today: Date) -> usize {
    tasks.iter().filter(|task| is_overdue(task, today)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::id::{TaskId, UserId};
    use time::macros::date;

    fn task(id: i64, completed: bool, priority: Priority) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            due_date: None,
            priority,
            assigned_to: UserId(1),
            completed,
        }
    }

    fn user(id: i64, role: Role) -> User {
        User {
            id: UserId(id),
            first_name: String::new(),
            last_name: String::new(),
            username: format!("user{id}"),
            role,
            created_at: String::new(),
        }
    }

    #[test]
    fn collect_counts_tasks_and_users() {
        let tasks = vec![
            task(1, true, Priority::High),
            task(2, false, Priority::High),
            task(3, false, Priority::Low),
        ];
        let users = vec![user(1, Role::Admin), user(2, Role::User), user(3, Role::User)];

        let stats = DashboardStats::collect(&tasks, &users);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.pending_tasks, 2);
        assert_eq!(stats.high_priority_tasks, 2);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.admin_users, 1);
        assert_eq!(stats.regular_users, 2);
    }

    #[test]
    fn completion_percent_rounds_and_handles_empty() {
        let stats = DashboardStats {
            total_tasks: 3,
            completed_tasks: 1,
            ..DashboardStats::default()
        };
        assert_eq!(stats.completion_percent(), Some(33));
        assert_eq!(DashboardStats::default().completion_percent(), None);
    }

    #[test]
    fn overdue_requires_an_open_task_dated_strictly_before_today() {
        let today = date!(2024 - 02 - 01);

        let mut due_yesterday = task(1, false, Priority::Medium);
        due_yesterday.due_date = Some("2024-01-31".into());
        assert!(is_overdue(&due_yesterday, today));

        let mut due_today = task(2, false, Priority::Medium);
        due_today.due_date = Some("2024-02-01".into());
        assert!(!is_overdue(&due_today, today));

        let mut done_late = task(3, true, Priority::Medium);
        done_late.due_date = Some("2023-12-01".into());
        assert!(!is_overdue(&done_late, today));

        let undated = task(4, false, Priority::Medium);
        assert!(!is_overdue(&undated, today));

        let mut garbage = task(5, false, Priority::Medium);
        garbage.due_date = Some("someday".into());
        assert!(!is_overdue(&garbage, today));

        let tasks = vec![due_yesterday, due_today, done_late, undated, garbage];
        assert_eq!(overdue_count(&tasks, today), 1);
    }
}

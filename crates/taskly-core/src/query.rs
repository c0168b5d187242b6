use crate::permissions::Capabilities;
use crate::{Priority, Task, User};

/// Priority facet of the list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    /// Every priority passes.
    #[default]
    All,
    /// Only tasks with exactly this priority pass.
    Only(Priority),
}

/// Status facet of the list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every task passes.
    #[default]
    All,
    /// Only completed tasks pass.
    Completed,
    /// Only incomplete tasks pass.
    Active,
}

/// Active search and filter selections for the task list.
///
/// The default query (empty search, both facets at `All`) passes every task
/// the viewer is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    /// Case-insensitive substring matched against task titles.
    pub search: String,
    /// Priority facet.
    pub priority: PriorityFilter,
    /// Status facet.
    pub status: StatusFilter,
}

impl TaskQuery {
    /// Whether the task passes all three predicates (ANDed).
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_priority(task) && self.matches_status(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        task.title
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    fn matches_priority(&self, task: &Task) -> bool {
        match &self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == *priority,
        }
    }

    const fn matches_status(&self, task: &Task) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Active => !task.completed,
        }
    }
}

/// Reduce `tasks` to the subset visible to `viewer` under `query`.
///
/// The role partition applies first and is not viewer-configurable: a viewer
/// whose capabilities include view-all sees every task, anyone else only the
/// tasks assigned to them. Input order is preserved.
#[must_use]
pub fn filter(tasks: &[Task], viewer: &User, query: &TaskQuery) -> Vec<Task> {
    let caps = Capabilities::for_role(&viewer.role);
    tasks
        .iter()
        .filter(|task| caps.view_all_tasks || task.assigned_to == viewer.id)
        .filter(|task| query.matches(task))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::id::{TaskId, UserId};

    fn task(id: i64, title: &str, assigned_to: i64) -> Task {
        Task {
            id: TaskId(id),
            title: title.into(),
            due_date: None,
            priority: Priority::Medium,
            assigned_to: UserId(assigned_to),
            completed: false,
        }
    }

    fn viewer(id: i64, role: Role) -> User {
        User {
            id: UserId(id),
            first_name: "Мария".into(),
            last_name: "Петрова".into(),
            username: "user1".into(),
            role,
            created_at: String::new(),
        }
    }

    #[test]
    fn regular_viewer_sees_only_own_assignments() {
        let tasks = vec![task(1, "Task 1", 2), task(2, "Task 2", 3), task(3, "Task 3", 2)];
        let visible = filter(&tasks, &viewer(2, Role::User), &TaskQuery::default());
        assert!(visible.iter().all(|t| t.assigned_to == UserId(2)));
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn admin_viewer_sees_everything_under_the_default_query() {
        let tasks = vec![task(1, "Task 1", 2), task(2, "Task 2", 3)];
        let visible = filter(&tasks, &viewer(1, Role::Admin), &TaskQuery::default());
        assert_eq!(visible, tasks);
    }

    #[test]
    fn search_is_a_case_insensitive_substring_match() {
        let tasks = vec![task(1, "Task 1", 2), task(2, "Task 2", 2)];
        let query = TaskQuery {
            search: "task 2".into(),
            ..TaskQuery::default()
        };
        let visible = filter(&tasks, &viewer(2, Role::User), &query);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Task 2");
    }

    #[test]
    fn empty_search_matches_a_task_without_a_title() {
        let untitled = Task {
            title: String::new(),
            ..task(1, "", 2)
        };
        assert!(TaskQuery::default().matches(&untitled));

        let query = TaskQuery {
            search: "отчет".into(),
            ..TaskQuery::default()
        };
        assert!(!query.matches(&untitled));
    }

    #[test]
    fn priority_facet_requires_an_exact_match() {
        let mut urgent = task(1, "Подготовить отчет", 2);
        urgent.priority = Priority::High;
        let routine = task(2, "Проверить почту", 2);

        let query = TaskQuery {
            priority: PriorityFilter::Only(Priority::High),
            ..TaskQuery::default()
        };
        assert!(query.matches(&urgent));
        assert!(!query.matches(&routine));
    }

    #[test]
    fn status_facet_splits_active_from_completed() {
        let mut done = task(1, "Подготовить отчет", 2);
        done.completed = true;
        let open = task(2, "Проверить почту", 2);

        let completed = TaskQuery {
            status: StatusFilter::Completed,
            ..TaskQuery::default()
        };
        let active = TaskQuery {
            status: StatusFilter::Active,
            ..TaskQuery::default()
        };
        assert!(completed.matches(&done) && !completed.matches(&open));
        assert!(active.matches(&open) && !active.matches(&done));
    }

    #[test]
    fn predicates_are_anded() {
        let mut done_urgent = task(1, "Отчет за квартал", 2);
        done_urgent.priority = Priority::High;
        done_urgent.completed = true;

        let query = TaskQuery {
            search: "отчет".into(),
            priority: PriorityFilter::Only(Priority::High),
            status: StatusFilter::Active,
        };
        assert!(!query.matches(&done_urgent), "status facet must veto the match");
    }
}

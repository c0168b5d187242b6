use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{Task, parse_due_date};

/// Sort key selectable in the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by due date.
    #[default]
    Date,
    /// Descending by priority rank.
    Priority,
    /// Ascending by title.
    Title,
    /// Active tasks before completed ones.
    Status,
}

/// Return a freshly ordered copy of `tasks`; the input is never mutated.
///
/// Every key uses a stable sort, so ties keep their input order. That is
/// load-bearing for the `status` key, where whole runs of tasks compare
/// equal.
#[must_use]
pub fn sorted(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut out = tasks.to_vec();
    match key {
        SortKey::Date => out.sort_by_key(|task| due_date_or_epoch(task.due_date.as_deref())),
        SortKey::Priority => out.sort_by_key(|task| Reverse(task.priority.rank())),
        SortKey::Title => out.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::Status => out.sort_by_key(|task| task.completed),
    }
    out
}

/// Missing and unparsable due dates collapse to the epoch and therefore sort
/// first under the ascending date key. Intentional: the behavior predates
/// this implementation and downstream views rely on it.
fn due_date_or_epoch(raw: Option<&str>) -> Date {
    raw.and_then(parse_due_date).unwrap_or(date!(1970 - 01 - 01))
}

/// Locale-leaning title comparison: case folds first, raw byte order breaks
/// exact-fold ties so the result stays deterministic.
fn compare_titles(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Priority;
    use crate::id::{TaskId, UserId};

    fn task(id: i64, title: &str) -> Task {
        Task {
            id: TaskId(id),
            title: title.into(),
            due_date: None,
            priority: Priority::Medium,
            assigned_to: UserId(1),
            completed: false,
        }
    }

    fn with_due(mut t: Task, due: &str) -> Task {
        t.due_date = Some(due.into());
        t
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn date_key_sorts_ascending() {
        let tasks = vec![
            with_due(task(1, "late"), "2024-03-01"),
            with_due(task(2, "early"), "2024-01-05"),
            with_due(task(3, "middle"), "2024-02-10"),
        ];
        assert_eq!(titles(&sorted(&tasks, SortKey::Date)), vec!["early", "middle", "late"]);
    }

    #[test]
    fn missing_and_invalid_dates_sort_first_as_epoch() {
        let tasks = vec![
            with_due(task(1, "dated"), "2024-01-05"),
            task(2, "undated"),
            with_due(task(3, "garbage"), "someday"),
        ];
        let ordered = sorted(&tasks, SortKey::Date);
        assert_eq!(titles(&ordered), vec!["undated", "garbage", "dated"]);
    }

    #[test]
    fn priority_key_sorts_descending_with_unknown_last() {
        let mut low = task(1, "low");
        low.priority = Priority::Low;
        let mut high = task(2, "high");
        high.priority = Priority::High;
        let mut odd = task(3, "odd");
        odd.priority = Priority::Other("urgent".into());
        let medium = task(4, "medium");

        let ordered = sorted(&[low, high, odd, medium], SortKey::Priority);
        assert_eq!(titles(&ordered), vec!["high", "medium", "low", "odd"]);
    }

    #[test]
    fn title_key_is_case_insensitive_and_handles_cyrillic() {
        let tasks = vec![
            task(1, "проверить почту"),
            task(2, "Встретить гостей"),
            task(3, "Архивировать логи"),
        ];
        let ordered = sorted(&tasks, SortKey::Title);
        assert_eq!(
            titles(&ordered),
            vec!["Архивировать логи", "Встретить гостей", "проверить почту"]
        );
    }

    #[test]
    fn status_key_puts_active_first_and_is_stable() {
        let mut a = task(1, "a");
        a.completed = true;
        let b = task(2, "b");
        let mut c = task(3, "c");
        c.completed = true;
        let d = task(4, "d");

        let ordered = sorted(&[a, b, c, d], SortKey::Status);
        assert_eq!(titles(&ordered), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn sorting_is_idempotent_for_every_key() {
        let tasks = vec![
            with_due(task(1, "Отчет"), "2024-02-01"),
            task(2, "почта"),
            with_due(task(3, "Встреча"), "2024-01-15"),
        ];
        for key in [SortKey::Date, SortKey::Priority, SortKey::Title, SortKey::Status] {
            let once = sorted(&tasks, key);
            let twice = sorted(&once, key);
            assert_eq!(titles(&once), titles(&twice));
        }
    }

    #[test]
    fn input_order_is_never_mutated() {
        let tasks = vec![
            with_due(task(1, "late"), "2024-03-01"),
            with_due(task(2, "early"), "2024-01-05"),
        ];
        let snapshot = tasks.clone();
        let _ = sorted(&tasks, SortKey::Date);
        assert_eq!(tasks, snapshot);
    }
}

use time::Date;

use crate::id::UserId;
use crate::{ISO_DATE, Task, User, labels};

/// Fixed header row; column order mirrors the list view.
pub const HEADER: &str = "Название,Дата выполнения,Приоритет,Исполнитель,Статус";

/// Render tasks as CSV text.
///
/// Row order follows input order; the caller is expected to have filtered
/// and sorted already. Titles are quoted with embedded quotes doubled.
/// Assignee names have commas stripped rather than being quoted, matching
/// the files consumers of this export already parse. An empty input yields
/// a header-only document. Lines are joined with `\n`.
#[must_use]
pub fn render<'a, F>(tasks: &[Task], mut lookup: F) -> String
where
    F: FnMut(UserId) -> Option<&'a User>,
{
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(HEADER.to_owned());
    for task in tasks {
        let title = format!("\"{}\"", task.title.replace('"', "\"\""));
        let due = task.due_date.as_deref().unwrap_or_default();
        let priority = labels::priority(&task.priority);
        let assignee = labels::display_name(lookup(task.assigned_to)).replace(',', "");
        let status = labels::status(task.completed);
        lines.push(format!("{title},{due},{priority},{assignee},{status}"));
    }
    lines.join("\n")
}

/// File name offered for the downloadable artifact: `tasks_<ISO date>.csv`.
#[must_use]
pub fn file_name(exported_on: Date) -> String {
    let stamp = exported_on
        .format(ISO_DATE)
        .unwrap_or_else(|_| exported_on.to_string());
    format!("tasks_{stamp}.csv")
}

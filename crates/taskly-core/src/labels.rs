use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{Priority, Role, User, parse_due_date};

/// Display label for an assignee that is absent from the loaded user set.
pub const UNKNOWN_ASSIGNEE: &str = "Неизвестный";

/// Due-date placeholder when a task has no due date.
pub const NO_DUE_DATE: &str = "Не указана";

const RU_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day].[month].[year]");

/// Localized priority label; unrecognized priorities render their raw value.
#[must_use]
pub fn priority(priority: &Priority) -> &str {
    match priority {
        Priority::High => "Высокий",
        Priority::Medium => "Средний",
        Priority::Low => "Низкий",
        Priority::Other(raw) => raw,
    }
}

/// Localized completion status label.
#[must_use]
pub const fn status(completed: bool) -> &'static str {
    if completed { "Выполнена" } else { "В работе" }
}

/// Localized role label; unrecognized roles render their raw value.
#[must_use]
pub fn role(role: &Role) -> &str {
    match role {
        Role::Admin => "Администратор",
        Role::User => "Пользователь",
        Role::Other(raw) => raw,
    }
}

/// Assignee display name, falling back to [`UNKNOWN_ASSIGNEE`] when the
/// referenced user is absent from the loaded set.
#[must_use]
pub fn display_name(user: Option<&User>) -> String {
    user.map_or_else(
        || UNKNOWN_ASSIGNEE.to_owned(),
        |user| format!("{} {}", user.first_name, user.last_name),
    )
}

/// Due date for display: `dd.mm.yyyy` when parsable, the raw string when not,
/// [`NO_DUE_DATE`] when absent.
#[must_use]
pub fn due_date(raw: Option<&str>) -> String {
    raw.map_or_else(
        || NO_DUE_DATE.to_owned(),
        |raw| {
            parse_due_date(raw)
                .and_then(|date| date.format(RU_DATE).ok())
                .unwrap_or_else(|| raw.to_owned())
        },
    )
}

/// Avatar initials, `??` when either name part is empty.
#[must_use]
pub fn initials(first_name: &str, last_name: &str) -> String {
    match (first_name.chars().next(), last_name.chars().next()) {
        (Some(f), Some(l)) => format!("{}{}", f.to_uppercase(), l.to_uppercase()),
        _ => "??".to_owned(),
    }
}

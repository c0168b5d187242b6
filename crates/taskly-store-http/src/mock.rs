//! Local substitute data served when the backend is unreachable.
//!
//! Mirrors the seed data the development backend ships with, so the app
//! stays demonstrable without a server.

use taskly_core::id::{TaskId, UserId};
use taskly_core::{Priority, Role, Task, User};

/// Tasks served in place of `GET /tasks`.
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId(1),
            title: "Подготовить отчет".into(),
            due_date: Some("2024-01-20".into()),
            priority: Priority::High,
            assigned_to: UserId(2),
            completed: false,
        },
        Task {
            id: TaskId(2),
            title: "Проверить почту".into(),
            due_date: Some("2024-01-15".into()),
            priority: Priority::Medium,
            assigned_to: UserId(3),
            completed: true,
        },
    ]
}

/// Users served in place of `GET /users`.
#[must_use]
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            username: "admin".into(),
            first_name: "Алексей".into(),
            last_name: "Иванов".into(),
            role: Role::Admin,
            created_at: "2024-01-01T00:00:00.000Z".into(),
        },
        User {
            id: UserId(2),
            username: "user1".into(),
            first_name: "Мария".into(),
            last_name: "Петрова".into(),
            role: Role::User,
            created_at: "2024-01-01T00:00:00.000Z".into(),
        },
        User {
            id: UserId(3),
            username: "user2".into(),
            first_name: "Иван".into(),
            last_name: "Сидоров".into(),
            role: Role::User,
            created_at: "2024-01-01T00:00:00.000Z".into(),
        },
    ]
}

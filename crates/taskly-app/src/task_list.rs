//! The task-list controller: owns the view-local state and coordinates the
//! load → filter → sort → render → mutate cycle.

use std::collections::HashSet;

use anyhow::{Context, Result, ensure};
use time::Date;
use tracing::error;

use taskly_core::id::{TaskId, UserId};
use taskly_core::query::{PriorityFilter, StatusFilter, TaskQuery};
use taskly_core::sort::SortKey;
use taskly_core::stats::DashboardStats;
use taskly_core::{Task, User, csv, labels, query, sort, stats};

use crate::prompt::ConfirmPrompt;
use crate::session::Session;
use crate::store::RecordStore;

/// What a confirmed deletion ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The user declined the confirmation prompt; nothing was sent.
    Cancelled,
    /// The store accepted the deletion and local state dropped the record.
    Removed,
}

/// Downloadable CSV export, produced in memory. Writing it anywhere is the
/// hosting shell's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    /// Suggested file name, `tasks_<ISO date>.csv`.
    pub file_name: String,
    /// UTF-8 CSV text.
    pub contents: String,
}

/// View-local state for the task list.
///
/// Holds transient read-mostly copies of the store's records; mutations are
/// two-phase: issue the request, await the result, then commit into local
/// state or leave it untouched. State dies with the controller instance.
pub struct TaskList<S> {
    store: S,
    session: Session,
    tasks: Vec<Task>,
    users: Vec<User>,
    query: TaskQuery,
    sort: SortKey,
    loading: bool,
    selected: Option<TaskId>,
    busy: HashSet<TaskId>,
}

impl<S: RecordStore> TaskList<S> {
    /// Create a controller for the given session. Call [`Self::load`] before
    /// rendering.
    #[must_use]
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            tasks: Vec::new(),
            users: Vec::new(),
            query: TaskQuery::default(),
            sort: SortKey::default(),
            loading: true,
            selected: None,
            busy: HashSet::new(),
        }
    }

    /// Fetch tasks and users concurrently and replace local state.
    ///
    /// The two fetches have no ordering dependency but both must land before
    /// the list renders. A failure of either is logged and leaves the view
    /// in the loaded-with-empty-lists state; retry happens by remounting.
    pub async fn load(&mut self) {
        self.loading = true;
        let (tasks, users) = tokio::join!(self.store.get_tasks(), self.store.get_users());
        match (tasks, users) {
            (Ok(tasks), Ok(users)) => {
                self.tasks = tasks;
                self.users = users;
            }
            (tasks, users) => {
                if let Err(err) = tasks {
                    let err: anyhow::Error = err.into();
                    error!(error = %err, "failed to load tasks");
                }
                if let Err(err) = users {
                    let err: anyhow::Error = err.into();
                    error!(error = %err, "failed to load users");
                }
                self.tasks = Vec::new();
                self.users = Vec::new();
            }
        }
        self.loading = false;
    }

    /// Whether the initial load is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The session this view was mounted for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// All loaded tasks, unfiltered.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All loaded users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The render-ready list: role partition and query filter, then sort.
    /// Recomputed from scratch on every call so it can never go stale.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        sort::sorted(
            &query::filter(&self.tasks, self.session.user(), &self.query),
            self.sort,
        )
    }

    /// Active query selections.
    #[must_use]
    pub const fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Active sort key.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Update the search term.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Update the priority facet.
    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.query.priority = priority;
    }

    /// Update the status facet.
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    /// Update the sort key.
    pub const fn set_sort_key(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Restore the default selections: empty search, both facets at `all`,
    /// date sort. A pure state reset, no network call.
    pub fn reset_filters(&mut self) {
        self.query = TaskQuery::default();
        self.sort = SortKey::default();
    }

    /// Select a task for the detail view, or clear the selection.
    pub fn select(&mut self, id: Option<TaskId>) {
        self.selected = id.filter(|id| self.tasks.iter().any(|task| task.id == *id));
    }

    /// The task currently opened in the detail view.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected
            .and_then(|id| self.tasks.iter().find(|task| task.id == id))
    }

    /// Whether a mutation for this task is in flight. Shells use this to
    /// disable the triggering control; it is a UX guard, not a lock.
    #[must_use]
    pub fn is_busy(&self, id: TaskId) -> bool {
        self.busy.contains(&id)
    }

    /// Assignee display name for the task card, with the unknown fallback.
    #[must_use]
    pub fn user_name(&self, id: UserId) -> String {
        labels::display_name(self.users.iter().find(|user| user.id == id))
    }

    /// Two-phase optimistic toggle: send the flipped record, commit the
    /// store's response into local state only once it was accepted.
    ///
    /// # Errors
    /// Returns an error when the task is not loaded, a mutation for it is
    /// already in flight, or the store rejects the update. Local state is
    /// left untouched in every failure case.
    pub async fn toggle_complete(&mut self, id: TaskId) -> Result<()> {
        let toggled = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(Task::toggled)
            .context("task is not loaded")?;
        self.begin_mutation(id)?;
        let result = self.store.update_task(id, &toggled).await;
        self.busy.remove(&id);
        match result {
            Ok(stored) => {
                if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) {
                    *slot = stored;
                }
                Ok(())
            }
            Err(err) => {
                let err: anyhow::Error = err.into();
                Err(err.context("Не удалось обновить статус задачи"))
            }
        }
    }

    /// Delete a task after explicit confirmation.
    ///
    /// # Errors
    /// Returns an error when the session lacks the manage-tasks capability,
    /// a mutation for the task is already in flight, or the store rejects
    /// the deletion. The record stays in local state unless the store
    /// accepted.
    pub async fn remove(&mut self, id: TaskId, prompt: &dyn ConfirmPrompt) -> Result<RemoveOutcome> {
        ensure!(
            self.session.capabilities().manage_tasks,
            "removing tasks requires the manage-tasks capability"
        );
        if !prompt.confirm("Вы уверены, что хотите удалить эту задачу?") {
            return Ok(RemoveOutcome::Cancelled);
        }
        self.begin_mutation(id)?;
        let result = self.store.delete_task(id).await;
        self.busy.remove(&id);
        match result {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                Ok(RemoveOutcome::Removed)
            }
            Err(err) => {
                let err: anyhow::Error = err.into();
                Err(err.context("Не удалось удалить задачу"))
            }
        }
    }

    /// CSV artifact of the currently visible list, named for the export
    /// date.
    ///
    /// # Errors
    /// Returns an error when the session lacks the export capability.
    pub fn export_csv(&self, exported_on: Date) -> Result<CsvArtifact> {
        ensure!(
            self.session.capabilities().export_csv,
            "CSV export requires the export capability"
        );
        let visible = self.visible_tasks();
        let contents = csv::render(&visible, |id| self.users.iter().find(|user| user.id == id));
        Ok(CsvArtifact {
            file_name: csv::file_name(exported_on),
            contents,
        })
    }

    /// Dashboard aggregates over the loaded records.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::collect(&self.tasks, &self.users)
    }

    /// Overdue badge count relative to `today`.
    #[must_use]
    pub fn overdue_count(&self, today: Date) -> usize {
        stats::overdue_count(&self.tasks, today)
    }

    fn begin_mutation(&mut self, id: TaskId) -> Result<()> {
        ensure!(
            self.busy.insert(id),
            "a mutation for task {id} is already in flight"
        );
        Ok(())
    }
}

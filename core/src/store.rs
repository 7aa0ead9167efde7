//! In-memory todo list state with optimistic updates.
//!
//! # Design
//! `TodoStore` never performs I/O. Every mutating operation is split the same
//! way `TodoClient` splits requests:
//!
//! - `begin_*` applies the optimistic local change (placeholder item, pending
//!   flag) and returns what the host must send, or nothing when there is
//!   nothing to send.
//! - `finish_*` takes the outcome of that call and applies either the
//!   confirmed change or the rollback, always looked up by item id. Several
//!   calls may be in flight at once and may finish in any order; each finish
//!   only touches its own item.
//!
//! Errors are kept as a single banner. Each new error bumps a generation
//! counter so a host-side auto-clear timer can tell whether the banner it was
//! started for is still the one on screen.

use tracing::{debug, warn};

use crate::error::{ApiError, StoreError};
use crate::filter::Filter;
use crate::types::{Todo, TodoItem, TodoPatch};

/// The error currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorBanner {
    pub error: StoreError,
    pub generation: u64,
}

/// A partial update the host should send for `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub id: i64,
    pub patch: TodoPatch,
}

/// What committing an inline edit turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitAction {
    /// The title was blank: delete the item, then call `finish_delete`.
    Delete(i64),
    /// Send the update, then call `finish_commit`.
    Update(PendingUpdate),
    /// Unknown id, or a call for it is already in flight; nothing to send.
    Nothing,
}

/// Owned view of the state handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// `None` until the initial load succeeds.
    pub todos: Option<Vec<TodoItem>>,
    /// `todos` with the active filter applied.
    pub visible: Vec<TodoItem>,
    pub temp_todo: Option<TodoItem>,
    pub draft: String,
    pub input_disabled: bool,
    pub focus_epoch: u64,
    pub filter: Filter,
    pub error: Option<String>,
    pub active_count: usize,
    pub completed_count: usize,
    pub all_completed: bool,
}

#[derive(Debug, Clone)]
pub struct TodoStore {
    user_id: i64,
    todos: Option<Vec<TodoItem>>,
    temp_todo: Option<TodoItem>,
    draft: String,
    input_disabled: bool,
    focus_epoch: u64,
    filter: Filter,
    error: Option<ErrorBanner>,
    error_generation: u64,
}

impl TodoStore {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            todos: None,
            temp_todo: None,
            draft: String::new(),
            input_disabled: false,
            focus_epoch: 0,
            filter: Filter::All,
            error: None,
            error_generation: 0,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn todos(&self) -> Option<&[TodoItem]> {
        self.todos.as_deref()
    }

    pub fn item(&self, id: i64) -> Option<&TodoItem> {
        self.todos.as_ref()?.iter().find(|t| t.id == id)
    }

    pub fn temp_todo(&self) -> Option<&TodoItem> {
        self.temp_todo.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn input_disabled(&self) -> bool {
        self.input_disabled
    }

    /// Bumped every time the new-item input should take focus.
    pub fn focus_epoch(&self) -> u64 {
        self.focus_epoch
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn error(&self) -> Option<ErrorBanner> {
        self.error
    }

    pub fn error_generation(&self) -> u64 {
        self.error_generation
    }

    pub fn visible_todos(&self) -> Vec<&TodoItem> {
        self.items().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.items().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items().filter(|t| t.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.items().any(|t| t.completed)
    }

    /// True when the list is non-empty and every item is completed.
    pub fn all_completed(&self) -> bool {
        let mut items = self.items().peekable();
        items.peek().is_some() && items.all(|t| t.completed)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            todos: self.todos.clone(),
            visible: self.visible_todos().into_iter().cloned().collect(),
            temp_todo: self.temp_todo.clone(),
            draft: self.draft.clone(),
            input_disabled: self.input_disabled,
            focus_epoch: self.focus_epoch,
            filter: self.filter,
            error: self.error.map(|b| b.error.to_string()),
            active_count: self.active_count(),
            completed_count: self.completed_count(),
            all_completed: self.all_completed(),
        }
    }

    // -----------------------------------------------------------------------
    // Local-only state
    // -----------------------------------------------------------------------

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Replace the banner and return the generation the auto-clear timer
    /// should be started for.
    pub fn set_error(&mut self, error: StoreError) -> u64 {
        self.error_generation += 1;
        self.error = Some(ErrorBanner {
            error,
            generation: self.error_generation,
        });
        self.request_focus();
        self.error_generation
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Clear the banner if it is still the one set at `generation`.
    pub fn expire_error(&mut self, generation: u64) -> bool {
        match self.error {
            Some(banner) if banner.generation == generation => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    pub fn finish_load(&mut self, result: Result<Vec<Todo>, ApiError>) {
        match result {
            Ok(todos) => {
                debug!(count = todos.len(), "todos loaded");
                self.todos = Some(todos.into_iter().map(TodoItem::from).collect());
                self.request_focus();
            }
            Err(e) => {
                warn!(error = %e, "loading todos failed");
                self.set_error(StoreError::Load);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    /// Validate `title` and show the placeholder. Returns the trimmed title
    /// to create. Only one create may be in flight; a second attempt is
    /// refused without touching the banner.
    pub fn begin_add(&mut self, title: &str) -> Result<String, StoreError> {
        if self.input_disabled || self.temp_todo.is_some() {
            return Err(StoreError::AddInFlight);
        }
        let title = title.trim();
        if title.is_empty() {
            self.set_error(StoreError::EmptyTitle);
            return Err(StoreError::EmptyTitle);
        }
        let title = title.to_string();
        self.temp_todo = Some(TodoItem::placeholder(self.user_id, title.clone()));
        self.input_disabled = true;
        Ok(title)
    }

    pub fn finish_add(&mut self, result: Result<Todo, ApiError>) {
        self.temp_todo = None;
        self.input_disabled = false;
        match result {
            Ok(todo) => {
                debug!(id = todo.id, "todo created");
                self.todos.get_or_insert_with(Vec::new).push(TodoItem::from(todo));
                self.draft.clear();
            }
            Err(e) => {
                warn!(error = %e, "creating todo failed");
                self.set_error(StoreError::Add);
            }
        }
        self.request_focus();
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Mark `id` pending. Returns false when there is no such item or a call
    /// for it is already in flight.
    pub fn begin_delete(&mut self, id: i64) -> bool {
        match self.idle_item_mut(id) {
            Some(item) => {
                item.is_pending = true;
                true
            }
            None => false,
        }
    }

    pub fn finish_delete(&mut self, id: i64, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                debug!(id, "todo deleted");
                if let Some(todos) = self.todos.as_mut() {
                    todos.retain(|t| t.id != id);
                }
                self.request_focus();
            }
            Err(e) => {
                warn!(id, error = %e, "deleting todo failed");
                self.update_item(id, |t| t.is_pending = false);
                self.set_error(StoreError::Delete);
            }
        }
    }

    /// Mark every completed, idle item pending and return their ids.
    pub fn begin_clear_completed(&mut self) -> Vec<i64> {
        let Some(todos) = self.todos.as_mut() else {
            return Vec::new();
        };
        todos
            .iter_mut()
            .filter(|t| t.completed && !t.is_pending)
            .map(|t| {
                t.is_pending = true;
                t.id
            })
            .collect()
    }

    /// Remove exactly the items whose delete succeeded.
    pub fn finish_clear_completed<I>(&mut self, outcomes: I)
    where
        I: IntoIterator<Item = (i64, Result<(), ApiError>)>,
    {
        let mut deleted = Vec::new();
        let mut failed = 0usize;
        for (id, result) in outcomes {
            match result {
                Ok(()) => deleted.push(id),
                Err(e) => {
                    warn!(id, error = %e, "deleting completed todo failed");
                    self.update_item(id, |t| t.is_pending = false);
                    failed += 1;
                }
            }
        }
        debug!(deleted = deleted.len(), failed, "clear completed finished");
        if let Some(todos) = self.todos.as_mut() {
            todos.retain(|t| !deleted.contains(&t.id));
        }
        if failed > 0 {
            self.set_error(StoreError::Delete);
        } else {
            self.request_focus();
        }
    }

    // -----------------------------------------------------------------------
    // Toggle
    // -----------------------------------------------------------------------

    pub fn begin_toggle(&mut self, id: i64) -> Option<PendingUpdate> {
        let item = self.idle_item_mut(id)?;
        item.is_pending = true;
        Some(PendingUpdate {
            id,
            patch: TodoPatch::completed(!item.completed),
        })
    }

    /// Set every item completed, or every item active when all already are.
    /// Items with a call already in flight are left alone.
    pub fn begin_toggle_all(&mut self) -> Vec<PendingUpdate> {
        let target = !self.all_completed();
        let Some(todos) = self.todos.as_mut() else {
            return Vec::new();
        };
        todos
            .iter_mut()
            .filter(|t| !t.is_pending)
            .map(|t| {
                t.is_pending = true;
                PendingUpdate {
                    id: t.id,
                    patch: TodoPatch::completed(target),
                }
            })
            .collect()
    }

    /// Reconcile one completed-flag update from `begin_toggle` or
    /// `begin_toggle_all`.
    pub fn finish_toggle(&mut self, update: &PendingUpdate, result: Result<Todo, ApiError>) {
        let id = update.id;
        match result {
            Ok(_) => {
                let completed = update.patch.completed;
                self.update_item(id, |t| {
                    if let Some(completed) = completed {
                        t.completed = completed;
                    }
                    t.is_pending = false;
                });
            }
            Err(e) => {
                warn!(id, error = %e, "updating todo failed");
                self.update_item(id, |t| t.is_pending = false);
                self.set_error(StoreError::Update);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Inline edit
    // -----------------------------------------------------------------------

    /// Enter edit mode for `id`. Returns the title to restore on cancel.
    pub fn begin_edit(&mut self, id: i64) -> Option<String> {
        let mut rollback = None;
        self.update_item(id, |t| {
            t.is_editing = true;
            rollback = Some(t.title.clone());
        });
        rollback
    }

    pub fn change_title(&mut self, id: i64, value: impl Into<String>) {
        let value = value.into();
        self.update_item(id, |t| t.title = value);
    }

    pub fn begin_commit(&mut self, id: i64) -> CommitAction {
        let Some(item) = self.item(id).filter(|t| !t.is_pending) else {
            return CommitAction::Nothing;
        };
        let title = item.title.trim().to_string();
        let completed = item.completed;
        if title.is_empty() {
            self.begin_delete(id);
            return CommitAction::Delete(id);
        }
        self.update_item(id, |t| {
            t.title = title.clone();
            t.is_pending = true;
        });
        CommitAction::Update(PendingUpdate {
            id,
            patch: TodoPatch {
                completed: Some(completed),
                ..TodoPatch::title(title)
            },
        })
    }

    pub fn finish_commit(&mut self, id: i64, result: Result<Todo, ApiError>) {
        match result {
            Ok(todo) => {
                self.update_item(id, |t| *t = TodoItem::from(todo));
            }
            Err(e) => {
                warn!(id, error = %e, "saving title failed");
                self.update_item(id, |t| t.is_pending = false);
                self.set_error(StoreError::Update);
            }
        }
    }

    pub fn cancel_edit(&mut self, id: i64, rollback_title: &str) {
        self.update_item(id, |t| {
            t.title = rollback_title.to_string();
            t.is_editing = false;
        });
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn items(&self) -> impl Iterator<Item = &TodoItem> {
        self.todos.iter().flatten()
    }

    fn update_item(&mut self, id: i64, f: impl FnOnce(&mut TodoItem)) -> bool {
        match self.todos.as_mut().and_then(|todos| todos.iter_mut().find(|t| t.id == id)) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// The item for `id`, unless a remote call for it is in flight.
    fn idle_item_mut(&mut self, id: i64) -> Option<&mut TodoItem> {
        self.todos
            .as_mut()?
            .iter_mut()
            .find(|t| t.id == id)
            .filter(|t| !t.is_pending)
    }

    fn request_focus(&mut self) {
        self.focus_epoch += 1;
    }
}

//! Runs `TodoStore` operations against a `TodoApi`.
//!
//! Each method applies the optimistic step, awaits the remote call with the
//! store unlocked, then applies the reconcile step. Bulk operations fire all
//! their calls at once.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::watch;
use tracing::debug;

use todo_core::{CommitAction, Filter, StoreSnapshot, TodoStore};

use crate::api::TodoApi;

/// Cloneable handle to the shared list state.
pub struct TodoApp<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    api: A,
    store: Mutex<TodoStore>,
    changes: watch::Sender<StoreSnapshot>,
    error_timeout: Duration,
}

impl<A> Clone for TodoApp<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: TodoApi> TodoApp<A> {
    pub fn new(api: A, user_id: i64, error_timeout: Duration) -> Self {
        let store = TodoStore::new(user_id);
        let (changes, _) = watch::channel(store.snapshot());
        Self {
            inner: Arc::new(Inner {
                api,
                store: Mutex::new(store),
                changes,
                error_timeout,
            }),
        }
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.changes.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    pub async fn load(&self) {
        let result = self.inner.api.list().await;
        self.mutate(|store| store.finish_load(result));
    }

    pub async fn add(&self, title: &str) {
        let Ok(title) = self.mutate(|store| store.begin_add(title)) else {
            return;
        };
        debug!(%title, "adding todo");
        let result = self.inner.api.create(&title).await;
        self.mutate(|store| store.finish_add(result));
    }

    pub async fn delete(&self, id: i64) {
        if !self.mutate(|store| store.begin_delete(id)) {
            return;
        }
        let result = self.inner.api.remove(id).await;
        self.mutate(|store| store.finish_delete(id, result));
    }

    pub async fn clear_completed(&self) {
        let ids = self.mutate(TodoStore::begin_clear_completed);
        if ids.is_empty() {
            return;
        }
        debug!(count = ids.len(), "clearing completed todos");
        let api = &self.inner.api;
        let outcomes = join_all(ids.into_iter().map(|id| async move { (id, api.remove(id).await) })).await;
        self.mutate(|store| store.finish_clear_completed(outcomes));
    }

    pub async fn toggle(&self, id: i64) {
        let Some(update) = self.mutate(|store| store.begin_toggle(id)) else {
            return;
        };
        let result = self.inner.api.update(update.id, &update.patch).await;
        self.mutate(|store| store.finish_toggle(&update, result));
    }

    /// Each item is reconciled as soon as its own call finishes.
    pub async fn toggle_all(&self) {
        let updates = self.mutate(TodoStore::begin_toggle_all);
        debug!(count = updates.len(), "toggling all todos");
        let api = &self.inner.api;
        let mut in_flight: FuturesUnordered<_> = updates
            .into_iter()
            .map(|update| async move {
                let result = api.update(update.id, &update.patch).await;
                (update, result)
            })
            .collect();
        while let Some((update, result)) = in_flight.next().await {
            self.mutate(|store| store.finish_toggle(&update, result));
        }
    }

    /// Returns the title to hand back to `cancel_edit`.
    pub fn begin_edit(&self, id: i64) -> Option<String> {
        self.mutate(|store| store.begin_edit(id))
    }

    pub fn change_title(&self, id: i64, value: &str) {
        self.mutate(|store| store.change_title(id, value));
    }

    pub async fn commit_edit(&self, id: i64) {
        match self.mutate(|store| store.begin_commit(id)) {
            CommitAction::Delete(id) => {
                let result = self.inner.api.remove(id).await;
                self.mutate(|store| store.finish_delete(id, result));
            }
            CommitAction::Update(update) => {
                let result = self.inner.api.update(update.id, &update.patch).await;
                self.mutate(|store| store.finish_commit(update.id, result));
            }
            CommitAction::Nothing => {}
        }
    }

    pub fn cancel_edit(&self, id: i64, rollback_title: &str) {
        self.mutate(|store| store.cancel_edit(id, rollback_title));
    }

    pub fn set_filter(&self, filter: Filter) {
        self.mutate(|store| store.set_filter(filter));
    }

    pub fn set_draft(&self, text: &str) {
        self.mutate(|store| store.set_draft(text));
    }

    pub fn dismiss_error(&self) {
        self.mutate(TodoStore::dismiss_error);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TodoStore> {
        self.inner.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f`, publish the result, and start the auto-clear timer if `f`
    /// raised a new error.
    fn mutate<R>(&self, f: impl FnOnce(&mut TodoStore) -> R) -> R {
        let (out, snapshot, raised) = {
            let mut store = self.lock();
            let before = store.error_generation();
            let out = f(&mut *store);
            let generation = store.error_generation();
            (out, store.snapshot(), (generation != before).then_some(generation))
        };
        self.inner.changes.send_replace(snapshot);
        if let Some(generation) = raised {
            self.expire_error_later(generation);
        }
        out
    }

    fn expire_error_later(&self, generation: u64) {
        let app = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(app.inner.error_timeout).await;
            app.mutate(|store| store.expire_error(generation));
        });
    }
}

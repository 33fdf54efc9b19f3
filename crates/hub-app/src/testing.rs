//! Scriptable in-memory remote API for store and view tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use hub_core::{Idea, IdeaPatch, Stats};
use hub_remote::{IdeaApi, RemoteError, StatsApi};
use tokio::sync::Notify;

pub fn idea(id: &str, title: &str, category: Option<&str>) -> Idea {
    Idea {
        id: Some(id.into()),
        user_id: "u1".into(),
        title: title.into(),
        description: "Y".into(),
        category: category.map(String::from),
        user_name: None,
    }
}

#[derive(Default)]
pub struct FakeApi {
    ideas: Mutex<Vec<Idea>>,
    stats: Mutex<Stats>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn with(ideas: Vec<Idea>) -> Self {
        Self {
            ideas: Mutex::new(ideas),
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    pub fn set_ideas(&self, ideas: Vec<Idea>) {
        *self.ideas.lock().unwrap() = ideas;
    }

    pub fn set_stats(&self, stats: Stats) {
        *self.stats.lock().unwrap() = stats;
    }

    /// Make every call to `op` fail until [`FakeApi::recover`].
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    pub fn calls(&self, op: &'static str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    /// The next `list` snapshots its data, then waits for the returned
    /// notifier before answering.
    pub fn hold_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn enter(&self, op: &'static str) -> Result<(), RemoteError> {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        if self.failing.lock().unwrap().contains(op) {
            return Err(RemoteError::Api {
                status: 500,
                message: format!("{op} unavailable"),
            });
        }
        Ok(())
    }
}

impl IdeaApi for FakeApi {
    async fn list(&self) -> Result<Vec<Idea>, RemoteError> {
        let gate = self.list_gate.lock().unwrap().take();
        let result = self.enter("list").map(|()| self.ideas.lock().unwrap().clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn create(&self, idea: &Idea) -> Result<Idea, RemoteError> {
        self.enter("create")?;
        let mut created = idea.clone();
        created.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        self.ideas.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &IdeaPatch) -> Result<Idea, RemoteError> {
        self.enter("update")?;
        let mut ideas = self.ideas.lock().unwrap();
        let stored = ideas
            .iter_mut()
            .find(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| RemoteError::Api {
                status: 404,
                message: "not found".into(),
            })?;
        if let Some(title) = &patch.title {
            stored.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            stored.description.clone_from(description);
        }
        if let Some(category) = patch.category {
            stored.category = Some(category.as_str().to_string());
        }
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.enter("delete")?;
        self.ideas
            .lock()
            .unwrap()
            .retain(|i| i.id.as_deref() != Some(id));
        Ok(())
    }
}

impl StatsApi for FakeApi {
    async fn stats(&self) -> Result<Stats, RemoteError> {
        self.enter("stats")?;
        Ok(*self.stats.lock().unwrap())
    }
}

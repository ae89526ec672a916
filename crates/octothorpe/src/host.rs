// File: src/host.rs
// Purpose: Seam between the engine and whatever owns the location fragment,
//          the page container and the input fields

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Trait for the surface the engine renders into
///
/// The engine never touches a page directly. It reads the location
/// fragment and input values through this trait and pushes whole-page
/// commits back through it.
#[async_trait]
pub trait Host: Send + Sync {
    /// Current location fragment, including the leading `#` when present
    async fn fragment(&self) -> String;

    /// Replaces the location fragment
    async fn set_fragment(&self, fragment: &str);

    /// Replaces the app container's content
    async fn commit(&self, html: &str);

    /// Current value of an input field, by id
    async fn field(&self, id: &str) -> Option<String>;

    /// Host name, for logging
    fn name(&self) -> &str;
}

/// In-memory host
///
/// Keeps every commit in order, so callers can assert on intermediate
/// screens as well as the final one.
#[derive(Clone, Default)]
pub struct MemoryHost {
    fragment: Arc<RwLock<String>>,
    fields: Arc<RwLock<HashMap<String, String>>>,
    commits: Arc<RwLock<Vec<String>>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an input field's value, as a user typing into it would
    pub async fn set_field(&self, id: impl Into<String>, value: impl Into<String>) {
        self.fields.write().await.insert(id.into(), value.into());
    }

    pub async fn clear_fields(&self) {
        self.fields.write().await.clear();
    }

    /// The most recent commit, if any
    pub async fn last_commit(&self) -> Option<String> {
        self.commits.read().await.last().cloned()
    }

    /// Every commit so far, oldest first
    pub async fn commits(&self) -> Vec<String> {
        self.commits.read().await.clone()
    }

    pub async fn commit_count(&self) -> usize {
        self.commits.read().await.len()
    }
}

#[async_trait]
impl Host for MemoryHost {
    async fn fragment(&self) -> String {
        self.fragment.read().await.clone()
    }

    async fn set_fragment(&self, fragment: &str) {
        *self.fragment.write().await = fragment.to_string();
    }

    async fn commit(&self, html: &str) {
        self.commits.write().await.push(html.to_string());
    }

    async fn field(&self, id: &str) -> Option<String> {
        self.fields.read().await.get(id).cloned()
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// File: src/events.rs
// Purpose: Event catalog collaborator and its in-memory implementation

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::EventError;
use crate::session::UserId;

pub type EventId = i64;

/// A catalog event as rendered by list and detail views
///
/// `registered_count` is derived from the attendee set at read time,
/// so a fetched value is a point-in-time snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: u32,
    pub registered_count: u32,
    pub created_by: Option<UserId>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.registered_count >= self.capacity
    }
}

/// Field set accepted by create and update operations
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: u32,
}

/// Trait for the event catalog collaborator
///
/// Domain failures are raised as [`EventError`] values inside the
/// `anyhow` error, so boundary code can surface their Display text.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events, in stable id order
    async fn events(&self) -> Result<Vec<Event>>;

    /// One event by id
    async fn event(&self, id: EventId) -> Result<Event>;

    /// Creates an event, recording who created it
    async fn create(&self, draft: EventDraft, created_by: UserId) -> Result<Event>;

    /// Replaces an event's fields
    async fn update(&self, id: EventId, draft: EventDraft) -> Result<Event>;

    /// Removes an event
    async fn delete(&self, id: EventId) -> Result<()>;

    /// Adds a user to an event's attendee set
    async fn register_attendee(&self, id: EventId, user: UserId) -> Result<()>;
}

struct StoredEvent {
    title: String,
    description: String,
    date: String,
    time: String,
    location: String,
    capacity: u32,
    created_by: Option<UserId>,
    attendees: HashSet<UserId>,
}

impl StoredEvent {
    fn materialize(&self, id: EventId) -> Event {
        Event {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            capacity: self.capacity,
            registered_count: self.attendees.len() as u32,
            created_by: self.created_by,
        }
    }

    fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.date = draft.date;
        self.time = draft.time;
        self.location = draft.location;
        self.capacity = draft.capacity;
    }
}

struct EventsInner {
    events: BTreeMap<EventId, StoredEvent>,
    next_id: EventId,
}

/// In-memory event catalog
///
/// Events live in a `BTreeMap` so listing order is stable across
/// mutations. Ids are assigned sequentially starting at 1.
#[derive(Clone)]
pub struct MemoryEvents {
    inner: Arc<RwLock<EventsInner>>,
}

impl MemoryEvents {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(EventsInner {
                events: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Inserts a pre-built event under its own id, for seeding
    ///
    /// The attendee set starts empty regardless of the value's
    /// `registered_count`.
    pub async fn insert(&self, event: Event) -> EventId {
        let mut inner = self.inner.write().await;
        let id = event.id;
        inner.events.insert(
            id,
            StoredEvent {
                title: event.title,
                description: event.description,
                date: event.date,
                time: event.time,
                location: event.location,
                capacity: event.capacity,
                created_by: event.created_by,
                attendees: HashSet::new(),
            },
        );
        inner.next_id = inner.next_id.max(id + 1);
        id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.events.is_empty()
    }
}

impl Default for MemoryEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for MemoryEvents {
    async fn events(&self) -> Result<Vec<Event>> {
        let inner = self.inner.read().await;
        Ok(inner
            .events
            .iter()
            .map(|(id, stored)| stored.materialize(*id))
            .collect())
    }

    async fn event(&self, id: EventId) -> Result<Event> {
        let inner = self.inner.read().await;
        let stored = inner.events.get(&id).ok_or(EventError::NotFound(id))?;
        Ok(stored.materialize(id))
    }

    async fn create(&self, draft: EventDraft, created_by: UserId) -> Result<Event> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let stored = StoredEvent {
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            capacity: draft.capacity,
            created_by: Some(created_by),
            attendees: HashSet::new(),
        };
        let event = stored.materialize(id);
        inner.events.insert(id, stored);

        debug!(id, title = %event.title, "created event");
        Ok(event)
    }

    async fn update(&self, id: EventId, draft: EventDraft) -> Result<Event> {
        let mut inner = self.inner.write().await;
        let stored = inner.events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        stored.apply(draft);
        let event = stored.materialize(id);

        debug!(id, "updated event");
        Ok(event)
    }

    async fn delete(&self, id: EventId) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.events.remove(&id).ok_or(EventError::NotFound(id))?;

        debug!(id, "deleted event");
        Ok(())
    }

    async fn register_attendee(&self, id: EventId, user: UserId) -> Result<()> {
        let mut inner = self.inner.write().await;
        let stored = inner.events.get_mut(&id).ok_or(EventError::NotFound(id))?;

        // A repeat registration outranks a full event for the same user.
        if stored.attendees.contains(&user) {
            return Err(EventError::AlreadyRegistered.into());
        }
        if stored.attendees.len() as u32 >= stored.capacity {
            return Err(EventError::CapacityFull.into());
        }

        stored.attendees.insert(user);
        debug!(id, %user, "registered attendee");
        Ok(())
    }
}

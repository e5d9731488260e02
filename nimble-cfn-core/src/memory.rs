//! In-memory remote store.
//!
//! Simulates the lifecycle of remote resources for tests and local runs:
//! mutations move a record into a transitional state which settles after a
//! configurable number of describe calls. Faults can be injected per
//! operation and every call is counted.

use std::collections::{BTreeMap, HashMap, VecDeque};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::state::ResourceState;

const DEFAULT_PAGE_SIZE: usize = 25;

/// Remote operation, for fault injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
    List,
}

/// A stored remote resource.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord<T> {
    pub id: String,
    /// Parent container (studio) id.
    pub scope: String,
    pub value: T,
    pub state: ResourceState,
    pub status_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

struct Entry<T> {
    record: StoredRecord<T>,
    pending_polls: u32,
}

struct Inner<T> {
    entries: BTreeMap<String, Entry<T>>,
    /// Insertion order, for stable listing.
    order: Vec<String>,
    client_tokens: HashMap<String, String>,
    settle_polls: Option<u32>,
    page_size: usize,
    next_faults: HashMap<Operation, VecDeque<ServiceError>>,
    persistent_fault: Option<ServiceError>,
    calls: HashMap<Operation, usize>,
}

/// Simulated remote store for one resource type.
pub struct InMemoryStore<T> {
    id_prefix: String,
    inner: Mutex<Inner<T>>,
}

impl<T: Clone + Send> InMemoryStore<T> {
    /// Store whose transitional states settle on the first describe.
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                order: Vec::new(),
                client_tokens: HashMap::new(),
                settle_polls: Some(0),
                page_size: DEFAULT_PAGE_SIZE,
                next_faults: HashMap::new(),
                persistent_fault: None,
                calls: HashMap::new(),
            }),
        }
    }

    /// Number of describe calls a transitional record survives before it
    /// settles. `None` freezes states: mutations change values only and
    /// states move solely through [`InMemoryStore::set_state`].
    pub fn with_settle_polls(mut self, settle_polls: Option<u32>) -> Self {
        self.inner.get_mut().settle_polls = settle_polls;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.inner.get_mut().page_size = page_size.max(1);
        self
    }

    /// Seed a record without counting a call.
    pub async fn insert(
        &self,
        scope: &str,
        id: &str,
        value: T,
        state: ResourceState,
    ) -> StoredRecord<T> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let record = StoredRecord {
            id: id.to_string(),
            scope: scope.to_string(),
            value,
            state,
            status_message: None,
            created_at: now,
            updated_at: now,
        };
        let pending_polls = inner.settle_polls.unwrap_or(0);
        if !inner.entries.contains_key(id) {
            inner.order.push(id.to_string());
        }
        inner.entries.insert(
            id.to_string(),
            Entry {
                record: record.clone(),
                pending_polls,
            },
        );
        record
    }

    /// Force the state of a record. Returns false if it does not exist.
    pub async fn set_state(
        &self,
        id: &str,
        state: ResourceState,
        status_message: Option<&str>,
    ) -> bool {
        let mut inner = self.inner.lock().await;
        let settle_polls = inner.settle_polls.unwrap_or(0);
        match inner.entries.get_mut(id) {
            Some(entry) => {
                entry.record.state = state;
                entry.record.status_message = status_message.map(str::to_string);
                entry.record.updated_at = Utc::now();
                entry.pending_polls = settle_polls;
                true
            }
            None => false,
        }
    }

    /// Peek at a record without counting a call or advancing its lifecycle.
    pub async fn record(&self, id: &str) -> Option<StoredRecord<T>> {
        let inner = self.inner.lock().await;
        inner.entries.get(id).map(|entry| entry.record.clone())
    }

    /// Fail the next call of `operation` with `error`.
    pub async fn fail_next(&self, operation: Operation, error: ServiceError) {
        let mut inner = self.inner.lock().await;
        inner
            .next_faults
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Fail every call with `error` until [`InMemoryStore::clear_faults`].
    pub async fn fail_always(&self, error: ServiceError) {
        self.inner.lock().await.persistent_fault = Some(error);
    }

    pub async fn clear_faults(&self) {
        let mut inner = self.inner.lock().await;
        inner.next_faults.clear();
        inner.persistent_fault = None;
    }

    /// Number of calls of `operation`, including failed ones.
    pub async fn calls(&self, operation: Operation) -> usize {
        let inner = self.inner.lock().await;
        inner.calls.get(&operation).copied().unwrap_or(0)
    }

    pub async fn get(&self, scope: &str, id: &str) -> Result<StoredRecord<T>, ServiceError> {
        let mut inner = self.inner.lock().await;
        inner.begin(Operation::Get)?;
        let settle_polls = inner.settle_polls;

        let entry = inner.lookup_mut(scope, id)?;
        let record = entry.record.clone();
        if settle_polls.is_some() && entry.record.state.is_transitional() {
            if entry.pending_polls == 0 {
                let settled = entry.record.state.settled();
                debug!("{} settled {:?} -> {:?}", id, entry.record.state, settled);
                entry.record.state = settled;
                entry.record.updated_at = Utc::now();
                return Ok(entry.record.clone());
            }
            entry.pending_polls -= 1;
        }
        Ok(record)
    }

    /// Create a record. A repeated client token returns the record created
    /// by the first call.
    pub async fn create(
        &self,
        scope: &str,
        value: T,
        client_token: Option<&str>,
    ) -> Result<StoredRecord<T>, ServiceError> {
        let mut inner = self.inner.lock().await;
        inner.begin(Operation::Create)?;

        if let Some(existing) = client_token.and_then(|t| inner.client_tokens.get(t)).cloned() {
            if let Some(entry) = inner.entries.get(&existing) {
                debug!("Client token replay for {}", existing);
                return Ok(entry.record.clone());
            }
        }

        let id = format!("{}-{}", self.id_prefix, Uuid::new_v4().simple());
        let now = Utc::now();
        let (state, pending_polls) = match inner.settle_polls {
            Some(polls) => (ResourceState::Creating, polls),
            None => (ResourceState::Ready, 0),
        };
        let record = StoredRecord {
            id: id.clone(),
            scope: scope.to_string(),
            value,
            state,
            status_message: None,
            created_at: now,
            updated_at: now,
        };
        inner.entries.insert(
            id.clone(),
            Entry {
                record: record.clone(),
                pending_polls,
            },
        );
        inner.order.push(id.clone());
        if let Some(token) = client_token {
            inner.client_tokens.insert(token.to_string(), id);
        }
        Ok(record)
    }

    /// Apply `change` to a stable record and start an update.
    pub async fn update<F>(
        &self,
        scope: &str,
        id: &str,
        change: F,
    ) -> Result<StoredRecord<T>, ServiceError>
    where
        F: FnOnce(&mut T) + Send,
    {
        let mut inner = self.inner.lock().await;
        inner.begin(Operation::Update)?;
        let settle_polls = inner.settle_polls;

        let entry = inner.lookup_mut(scope, id)?;
        if entry.record.state == ResourceState::Deleted {
            return Err(ServiceError::ResourceNotFound(format!("{} not found", id)));
        }
        if entry.record.state.is_transitional() {
            return Err(ServiceError::Conflict(format!(
                "{} is {:?}",
                id, entry.record.state
            )));
        }

        change(&mut entry.record.value);
        entry.record.updated_at = Utc::now();
        if let Some(polls) = settle_polls {
            entry.record.state = ResourceState::Updating;
            entry.record.status_message = None;
            entry.pending_polls = polls;
        }
        Ok(entry.record.clone())
    }

    pub async fn delete(&self, scope: &str, id: &str) -> Result<StoredRecord<T>, ServiceError> {
        let mut inner = self.inner.lock().await;
        inner.begin(Operation::Delete)?;
        let settle_polls = inner.settle_polls;

        let entry = inner.lookup_mut(scope, id)?;
        if entry.record.state == ResourceState::Deleted {
            return Err(ServiceError::ResourceNotFound(format!("{} not found", id)));
        }
        if entry.record.state.is_transitional() {
            return Err(ServiceError::Conflict(format!(
                "{} is {:?}",
                id, entry.record.state
            )));
        }

        entry.record.updated_at = Utc::now();
        if let Some(polls) = settle_polls {
            entry.record.state = ResourceState::Deleting;
            entry.record.status_message = None;
            entry.pending_polls = polls;
        }
        Ok(entry.record.clone())
    }

    /// One page of live (not deleted) records in `scope`.
    pub async fn list(
        &self,
        scope: &str,
        next_token: Option<&str>,
    ) -> Result<(Vec<StoredRecord<T>>, Option<String>), ServiceError> {
        let mut inner = self.inner.lock().await;
        inner.begin(Operation::List)?;

        let offset = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ServiceError::Validation(format!("invalid next token: {}", token)))?,
            None => 0,
        };

        let live: Vec<StoredRecord<T>> = inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .map(|entry| &entry.record)
            .filter(|record| record.scope == scope && record.state != ResourceState::Deleted)
            .cloned()
            .collect();

        if offset > live.len() {
            return Err(ServiceError::Validation(format!(
                "invalid next token: {}",
                offset
            )));
        }

        let end = offset.saturating_add(inner.page_size).min(live.len());
        let page = live.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let next = (end < live.len()).then(|| end.to_string());
        Ok((page, next))
    }
}

impl<T> Inner<T> {
    /// Count the call and surface any injected fault.
    fn begin(&mut self, operation: Operation) -> Result<(), ServiceError> {
        *self.calls.entry(operation).or_insert(0) += 1;
        if let Some(fault) = &self.persistent_fault {
            return Err(fault.clone());
        }
        match self.next_faults.get_mut(&operation).and_then(VecDeque::pop_front) {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn lookup_mut(&mut self, scope: &str, id: &str) -> Result<&mut Entry<T>, ServiceError> {
        self.entries
            .get_mut(id)
            .filter(|entry| entry.record.scope == scope)
            .ok_or_else(|| ServiceError::ResourceNotFound(format!("{} not found", id)))
    }
}

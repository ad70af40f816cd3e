#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use lib::admin::backend::{Backend, BackendError};
use lib::admin::models::Collection;
use lib::admin::notifier::Notifier;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    GetAll,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct MockState {
    collections: HashMap<Collection, Vec<Value>>,
    next_id: u32,
    calls: Vec<(Verb, Collection)>,
    failing: BTreeSet<Verb>,
    fail_after: Option<usize>,
}

/// In-memory stand-in for the hosted REST resource. Ids are assigned on
/// create, like the real service does.
#[derive(Default)]
pub struct MockBackend {
    state: RefCell<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend {
            state: RefCell::new(MockState {
                next_id: 1,
                ..MockState::default()
            }),
        }
    }

    pub fn with_items<T: Serialize>(self, collection: Collection, items: &[T]) -> Self {
        for item in items {
            self.insert(collection, item);
        }
        self
    }

    pub fn insert<T: Serialize>(&self, collection: Collection, item: &T) -> String {
        let mut state = self.state.borrow_mut();
        let id = state.next_id.to_string();
        state.next_id += 1;
        let mut value = serde_json::to_value(item).unwrap();
        value["id"] = Value::String(id.clone());
        state.collections.entry(collection).or_default().push(value);
        id
    }

    pub fn items<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let state = self.state.borrow();
        let values = state.collections.get(&collection).cloned().unwrap_or_default();
        serde_json::from_value(Value::Array(values)).unwrap()
    }

    pub fn fail_on(&self, verb: Verb) {
        self.state.borrow_mut().failing.insert(verb);
    }

    pub fn recover(&self) {
        let mut state = self.state.borrow_mut();
        state.failing.clear();
        state.fail_after = None;
    }

    /// Every call after the next `calls` ones fails.
    pub fn fail_after(&self, calls: usize) {
        let mut state = self.state.borrow_mut();
        state.fail_after = Some(state.calls.len() + calls);
    }

    pub fn calls(&self) -> Vec<(Verb, Collection)> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, verb: Verb) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|(called, _)| *called == verb)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn record(&self, verb: Verb, collection: Collection) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        let exhausted = state
            .fail_after
            .is_some_and(|limit| state.calls.len() >= limit);
        state.calls.push((verb, collection));
        if exhausted || state.failing.contains(&verb) {
            Err(BackendError::Unavailable(format!("{:?} {}", verb, collection)))
        } else {
            Ok(())
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::Unavailable(e.to_string()))
}

fn not_found(collection: Collection, id: &str) -> BackendError {
    BackendError::Status {
        url: format!("mock://{}/{}", collection, id),
        status: StatusCode::NOT_FOUND,
    }
}

impl Backend for MockBackend {
    async fn get_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, BackendError> {
        self.record(Verb::GetAll, collection)?;
        let values = self
            .state
            .borrow()
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default();
        decode(Value::Array(values))
    }

    async fn create<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        body: &T,
    ) -> Result<T, BackendError> {
        self.record(Verb::Create, collection)?;
        let id = self.insert(collection, body);
        let state = self.state.borrow();
        let created = state.collections[&collection]
            .iter()
            .find(|value| value["id"] == id.as_str())
            .cloned()
            .unwrap();
        decode(created)
    }

    async fn update<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> Result<T, BackendError> {
        self.record(Verb::Update, collection)?;
        let mut state = self.state.borrow_mut();
        let stored = state
            .collections
            .entry(collection)
            .or_default()
            .iter_mut()
            .find(|value| value["id"] == id)
            .ok_or_else(|| not_found(collection, id))?;
        let mut value = serde_json::to_value(body).unwrap();
        value["id"] = Value::String(id.to_owned());
        *stored = value.clone();
        decode(value)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        self.record(Verb::Delete, collection)?;
        let mut state = self.state.borrow_mut();
        let items = state.collections.entry(collection).or_default();
        let before = items.len();
        items.retain(|value| value["id"] != id);
        if items.len() == before {
            return Err(not_found(collection, id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Acknowledged(String),
    Alerted(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Acknowledged(message.to_owned()));
    }

    fn alert(&self, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Alerted(message.to_owned()));
    }
}

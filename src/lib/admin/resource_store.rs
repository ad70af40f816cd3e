use log::{error, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{
    backend::{Backend, BackendError},
    helpers::decode_records,
    local_storage::{LocalStorage, COURSES_SNAPSHOT_KEY, USERS_SNAPSHOT_KEY},
    models::{Collection, Course, Product, User},
};

/// An entity kept in a `ResourceStore`, together with the shape the backend
/// stores it in.
pub trait Resource: Clone + Serialize + DeserializeOwned {
    type Wire: Serialize + DeserializeOwned;
    const COLLECTION: Collection;
    const SNAPSHOT_KEY: &'static str;

    fn from_wire(wire: Self::Wire) -> Self;
    fn id(&self) -> &str;
}

impl Resource for User {
    type Wire = User;
    const COLLECTION: Collection = Collection::Users;
    const SNAPSHOT_KEY: &'static str = USERS_SNAPSHOT_KEY;

    fn from_wire(wire: User) -> Self {
        wire
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Course {
    type Wire = Product;
    const COLLECTION: Collection = Collection::Products;
    const SNAPSHOT_KEY: &'static str = COURSES_SNAPSHOT_KEY;

    fn from_wire(wire: Product) -> Self {
        Course::from(wire)
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Where the current list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSource {
    #[default]
    NotLoaded,
    Backend,
    Snapshot,
}

/// The last confirmed backend read of one collection.
///
/// Every mutation is followed by a full reload inside the same `&mut self`
/// call, so no other read can interleave between the two.
#[derive(Debug)]
pub struct ResourceStore<T> {
    items: Vec<T>,
    source: ListSource,
}

impl<T> Default for ResourceStore<T> {
    fn default() -> Self {
        ResourceStore {
            items: Vec::new(),
            source: ListSource::NotLoaded,
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn source(&self) -> ListSource {
        self.source
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replaces the list with the backend's. When the backend can't be
    /// reached the persisted snapshot is shown instead, the caller never
    /// sees an error. The snapshot is only ever read here.
    pub async fn list<B: Backend>(&mut self, backend: &B, storage: &LocalStorage) -> &[T] {
        match backend.get_all::<Value>(T::COLLECTION).await {
            Ok(records) => {
                self.items = decode_records::<T::Wire>(T::COLLECTION, records)
                    .into_iter()
                    .map(T::from_wire)
                    .collect();
                self.source = ListSource::Backend;
                info!("Loaded {} {} from backend", self.items.len(), T::COLLECTION);
            }
            Err(err) => {
                error!("Error loading {}: {}", T::COLLECTION, err);
                self.items = match storage.get::<Vec<T>>(T::SNAPSHOT_KEY) {
                    Ok(snapshot) => snapshot.unwrap_or_default(),
                    Err(err) => {
                        warn!("Unreadable {} snapshot: {}", T::COLLECTION, err);
                        Vec::new()
                    }
                };
                self.source = ListSource::Snapshot;
                info!(
                    "Showing {} {} from local snapshot",
                    self.items.len(),
                    T::COLLECTION
                );
            }
        }
        &self.items
    }

    pub async fn create<B: Backend>(
        &mut self,
        backend: &B,
        storage: &LocalStorage,
        body: &T::Wire,
    ) -> Result<(), BackendError> {
        backend.create(T::COLLECTION, body).await?;
        self.list(backend, storage).await;
        Ok(())
    }

    pub async fn update<B: Backend>(
        &mut self,
        backend: &B,
        storage: &LocalStorage,
        id: &str,
        body: &T::Wire,
    ) -> Result<(), BackendError> {
        backend.update(T::COLLECTION, id, body).await?;
        self.list(backend, storage).await;
        Ok(())
    }

    pub async fn delete<B: Backend>(
        &mut self,
        backend: &B,
        storage: &LocalStorage,
        id: &str,
    ) -> Result<(), BackendError> {
        backend.delete(T::COLLECTION, id).await?;
        self.list(backend, storage).await;
        Ok(())
    }
}

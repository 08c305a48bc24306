//! Storage seam for entity services.
//!
//! [`Repository`] is the boundary a real backend would implement.
//! [`InMemoryRepository`] keeps an ordered `Vec` seeded from fixtures; each
//! method is one critical section, so an update or remove that misses leaves
//! the sequence untouched.

use crate::entity::Entity;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Ordered storage for one entity kind
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every stored entity, in insertion order
    async fn list(&self) -> Vec<E>;

    async fn find(&self, id: &E::Id) -> Option<E>;

    /// Append and return the stored copy
    async fn insert(&self, entity: E) -> E;

    /// Apply a patch to the matching entity; `None` if absent
    async fn update(&self, id: &E::Id, patch: E::Patch) -> Option<E>;

    /// Delete the matching entity; `None` if absent
    async fn delete(&self, id: &E::Id) -> Option<E>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-memory repository. Contents are lost when it is dropped.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    items: RwLock<Vec<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start from fixture data
    pub fn seeded(items: Vec<E>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn list(&self) -> Vec<E> {
        self.items.read().await.clone()
    }

    async fn find(&self, id: &E::Id) -> Option<E> {
        self.items.read().await.iter().find(|e| e.id() == id).cloned()
    }

    async fn insert(&self, entity: E) -> E {
        self.items.write().await.push(entity.clone());
        entity
    }

    async fn update(&self, id: &E::Id, patch: E::Patch) -> Option<E> {
        let mut items = self.items.write().await;
        let entity = items.iter_mut().find(|e| e.id() == id)?;
        entity.apply(patch);
        Some(entity.clone())
    }

    async fn delete(&self, id: &E::Id) -> Option<E> {
        let mut items = self.items.write().await;
        let index = items.iter().position(|e| e.id() == id)?;
        Some(items.remove(index))
    }

    async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

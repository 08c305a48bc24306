//! Generic CRUD service shared by boards, columns, cards and users.
//!
//! Each call waits for its configured latency, then performs a single
//! repository operation and hands back an owned copy. Only `update` and
//! `remove` can fail, and only with [`KanbanError::NotFound`].

use crate::delay::delay;
use crate::entity::Entity;
use crate::error::{KanbanError, Result};
use crate::store::{InMemoryRepository, Repository};
use crate::types::{Board, Card, Column, EntityId, User};
use flowboard_config::ServiceLatency;
use tracing::{debug, info, warn};

pub type BoardService = EntityService<Board>;
pub type ColumnService = EntityService<Column>;
pub type CardService = EntityService<Card>;
pub type UserService = EntityService<User>;

/// Asynchronous CRUD over one entity kind
#[derive(Debug)]
pub struct EntityService<E: Entity, R = InMemoryRepository<E>> {
    repo: R,
    latency: ServiceLatency,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Entity> EntityService<E> {
    /// In-memory service seeded with fixture data
    pub fn seeded(items: Vec<E>, latency: ServiceLatency) -> Self {
        Self::with_repository(InMemoryRepository::seeded(items), latency)
    }
}

impl<E: Entity, R: Repository<E>> EntityService<E, R> {
    pub fn with_repository(repo: R, latency: ServiceLatency) -> Self {
        Self {
            repo,
            latency,
            _entity: std::marker::PhantomData,
        }
    }

    pub fn latency(&self) -> &ServiceLatency {
        &self.latency
    }

    /// Every entity, in stored order
    pub async fn get_all(&self) -> Vec<E> {
        delay(self.latency.get_all()).await;
        let items = self.repo.list().await;
        debug!(kind = E::KIND, count = items.len(), "get all");
        items
    }

    /// The matching entity, or `None`
    pub async fn get_by_id(&self, id: &E::Id) -> Option<E> {
        delay(self.latency.get_by_id()).await;
        let found = self.repo.find(id).await;
        debug!(kind = E::KIND, %id, found = found.is_some(), "get by id");
        found
    }

    /// Store a new entity under a freshly generated id
    pub async fn create(&self, draft: E::Draft) -> E {
        delay(self.latency.create()).await;
        let entity = E::from_draft(E::Id::generate(), draft);
        let stored = self.repo.insert(entity).await;
        info!(kind = E::KIND, id = %stored.id(), "created");
        stored
    }

    /// Shallow-merge `patch` over the stored entity
    pub async fn update(&self, id: &E::Id, patch: E::Patch) -> Result<E> {
        delay(self.latency.update()).await;
        match self.repo.update(id, patch).await {
            Some(updated) => {
                info!(kind = E::KIND, %id, "updated");
                Ok(updated)
            }
            None => {
                warn!(kind = E::KIND, %id, "update of missing entity");
                Err(KanbanError::not_found(E::KIND, id))
            }
        }
    }

    /// Delete the stored entity
    pub async fn remove(&self, id: &E::Id) -> Result<()> {
        delay(self.latency.remove()).await;
        match self.repo.delete(id).await {
            Some(_) => {
                info!(kind = E::KIND, %id, "removed");
                Ok(())
            }
            None => {
                warn!(kind = E::KIND, %id, "remove of missing entity");
                Err(KanbanError::not_found(E::KIND, id))
            }
        }
    }

    /// Number of stored entities, without artificial latency
    pub async fn count(&self) -> usize {
        self.repo.len().await
    }
}

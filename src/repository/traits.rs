//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. Implementations here are SQLite;
//! tests could swap in an in-memory backend.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type. All operations are async to keep the
/// command layer uniform.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity, returning it with its assigned ID
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories whose entities carry a dense ordering.
///
/// Reordering is splice-and-reinsert: the moved entity lands at the target
/// index and every position is reassigned densely from zero.
#[async_trait]
pub trait OrderedRepository<T: Entity>: Repository<T> {
    /// Move an entity to a new index within its ordering
    async fn move_to_index(&self, id: T::Id, new_index: usize) -> DomainResult<()>;
}

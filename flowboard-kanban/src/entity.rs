//! The shape every stored record shares.
//!
//! Boards, columns, cards and users differ only in their fields. Creation
//! takes a draft (everything but the id), updates take a patch whose `Some`
//! fields overwrite the stored value and whose `None` fields leave it alone.

use crate::types::EntityId;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A record managed by an [`EntityService`](crate::service::EntityService)
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Lowercase resource name used in errors and logs ("card", "board", ...)
    const KIND: &'static str;

    type Id: EntityId;

    /// Input to `create`: every field except the id
    type Draft: Debug + Send + 'static;

    /// Input to `update`: shallow, field-level overrides
    type Patch: Debug + Send + 'static;

    fn id(&self) -> &Self::Id;

    /// Build a stored record from a draft, filling type-specific defaults
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Shallow-merge a patch over this record
    fn apply(&mut self, patch: Self::Patch);
}

//! Position store port
//!
//! The reorder engine talks to storage only through an explicit transaction
//! object. Every write made through a [`PositionTransaction`] becomes visible
//! on `commit` and is discarded on `rollback` or when the transaction is
//! dropped without committing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Positioned, ShiftPlan};
use crate::error::DomainError;

#[async_trait]
pub trait PositionStore<T: Positioned>: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn PositionTransaction<T>>, DomainError>;
}

#[async_trait]
pub trait PositionTransaction<T: Positioned>: Send {
    /// Current state of a record as seen by this transaction.
    async fn find(&mut self, id: &Uuid) -> Result<Option<T>, DomainError>;

    /// Blocks until no other transaction holds the scope; held until the
    /// transaction ends. Transactions on other scopes are unaffected.
    async fn lock_scope(&mut self, scope: &T::Scope) -> Result<(), DomainError>;

    /// Applies `shift` to every record of `scope` except `exclude`.
    /// Returns how many records moved.
    async fn shift_siblings(
        &mut self,
        scope: &T::Scope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError>;

    /// `None` when the record no longer exists.
    async fn set_position(&mut self, id: &Uuid, position: i32) -> Result<Option<T>, DomainError>;

    async fn commit(&mut self) -> Result<(), DomainError>;

    async fn rollback(&mut self) -> Result<(), DomainError>;
}

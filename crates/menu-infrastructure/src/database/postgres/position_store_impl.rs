// ============================================================================
// Menu Infrastructure - PostgreSQL Position Store
// File: crates/menu-infrastructure/src/database/postgres/position_store_impl.rs
// ============================================================================
//! Reposition transactions on PostgreSQL.
//!
//! A scope is locked with a transaction-level advisory lock keyed by the
//! scope's lock key, so moves within one language (or one category and
//! language) run one at a time while other scopes proceed.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use menu_core::domain::{Positioned, ScopeKey, ShiftPlan};
use menu_core::error::DomainError;
use menu_core::repositories::{PositionStore, PositionTransaction};

use super::db_error;

/// Table-specific statements used by [`PgPositionStore`].
#[async_trait]
pub trait PgPositioned: Positioned {
    async fn fetch(conn: &mut PgConnection, id: &Uuid) -> Result<Option<Self>, DomainError>;

    /// Moves every row of `scope` other than `exclude` whose position lies in
    /// the plan's range.
    async fn shift_siblings(
        conn: &mut PgConnection,
        scope: &Self::Scope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError>;

    async fn write_position(
        conn: &mut PgConnection,
        id: &Uuid,
        position: i32,
    ) -> Result<Option<Self>, DomainError>;
}

pub struct PgPositionStore<T> {
    pool: PgPool,
    lock_timeout: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgPositionStore<T> {
    pub fn new(pool: PgPool, lock_timeout: Duration) -> Self {
        Self {
            pool,
            lock_timeout,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: PgPositioned> PositionStore<T> for PgPositionStore<T> {
    async fn begin(&self) -> Result<Box<dyn PositionTransaction<T>>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting reposition transaction", e))?;

        if !self.lock_timeout.is_zero() {
            let statement = format!(
                "SET LOCAL lock_timeout = '{}ms'",
                self.lock_timeout.as_millis()
            );
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("setting lock timeout", e))?;
        }

        Ok(Box::new(PgPositionTransaction::<T> {
            tx: Some(tx),
            _entity: PhantomData,
        }))
    }
}

struct PgPositionTransaction<T> {
    /// `None` once committed or rolled back. Dropping an open transaction
    /// rolls it back.
    tx: Option<Transaction<'static, Postgres>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgPositionTransaction<T> {
    fn conn(&mut self) -> Result<&mut PgConnection, DomainError> {
        match self.tx.as_mut() {
            Some(tx) => Ok(&mut **tx),
            None => Err(DomainError::InternalError(
                "reposition transaction already finished".into(),
            )),
        }
    }
}

#[async_trait]
impl<T: PgPositioned> PositionTransaction<T> for PgPositionTransaction<T> {
    async fn find(&mut self, id: &Uuid) -> Result<Option<T>, DomainError> {
        T::fetch(self.conn()?, id).await
    }

    async fn lock_scope(&mut self, scope: &T::Scope) -> Result<(), DomainError> {
        let key = scope.lock_key();
        debug!("Acquiring scope lock {}", key);

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&key)
            .execute(self.conn()?)
            .await
            .map_err(|e| db_error("locking reposition scope", e))?;
        Ok(())
    }

    async fn shift_siblings(
        &mut self,
        scope: &T::Scope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError> {
        T::shift_siblings(self.conn()?, scope, exclude, shift).await
    }

    async fn set_position(&mut self, id: &Uuid, position: i32) -> Result<Option<T>, DomainError> {
        T::write_position(self.conn()?, id, position).await
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        match self.tx.take() {
            Some(tx) => tx
                .commit()
                .await
                .map_err(|e| db_error("committing reposition", e)),
            None => Err(DomainError::InternalError(
                "reposition transaction already finished".into(),
            )),
        }
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .await
                .map_err(|e| db_error("rolling back reposition", e)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Menu Core - Reorder Engine
// File: crates/menu-core/src/services/reorder_engine.rs
// ============================================================================
//! Moves one record within its scope and renumbers the siblings in between,
//! all inside a single store transaction.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use menu_shared::config::OrderingSettings;
use menu_shared::StalePositionPolicy;

use crate::domain::{Positioned, RepositionRequest, ShiftPlan};
use crate::error::DomainError;
use crate::repositories::{PositionStore, PositionTransaction};

/// Generic reorder engine, shared by categories and items.
pub struct ReorderEngine<T: Positioned> {
    store: Arc<dyn PositionStore<T>>,
    policy: StalePositionPolicy,
    timeout: Duration,
}

impl<T: Positioned> Clone for ReorderEngine<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy,
            timeout: self.timeout,
        }
    }
}

impl<T: Positioned> ReorderEngine<T> {
    pub fn new(store: Arc<dyn PositionStore<T>>, settings: &OrderingSettings) -> Self {
        Self {
            store,
            policy: settings.stale_position,
            timeout: settings.operation_timeout(),
        }
    }

    pub fn policy(&self) -> StalePositionPolicy {
        self.policy
    }

    /// Moves `request.id` to `request.new_position`.
    ///
    /// Siblings between the old and new slot shift by one so that positions
    /// in the scope stay distinct. Returns the moved record only.
    pub async fn reposition(&self, request: RepositionRequest) -> Result<T, DomainError> {
        info!(
            "Reposition {} {}: {} -> {}",
            T::ENTITY,
            request.id,
            request.old_position,
            request.new_position
        );

        // Dropping the in-flight future on expiry drops the transaction, which
        // rolls it back.
        match tokio::time::timeout(self.timeout, self.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Reposition of {} {} timed out", T::ENTITY, request.id);
                Err(DomainError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    async fn run(&self, request: RepositionRequest) -> Result<T, DomainError> {
        let mut tx = self.store.begin().await?;

        match self.apply(tx.as_mut(), &request).await {
            Ok(record) => {
                tx.commit().await.map_err(|e| {
                    DomainError::PositionConflict(format!(
                        "could not commit move of {} {}: {}",
                        T::ENTITY,
                        request.id,
                        e
                    ))
                })?;
                info!(
                    "{} {} now at position {}",
                    T::ENTITY,
                    request.id,
                    record.position()
                );
                Ok(record)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed reposition also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut dyn PositionTransaction<T>,
        request: &RepositionRequest,
    ) -> Result<T, DomainError> {
        let record = tx
            .find(&request.id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY, request.id))?;
        let scope = record.scope();

        tx.lock_scope(&scope).await?;

        // Read again under the lock: a move that committed while we waited
        // may have changed the position.
        let record = tx
            .find(&request.id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY, request.id))?;
        if record.scope() != scope {
            return Err(DomainError::PositionConflict(format!(
                "{} {} changed scope while being moved",
                T::ENTITY,
                request.id
            )));
        }

        let old_position = resolve_old_position::<T>(self.policy, request, record.position())?;

        if let Some(shift) = ShiftPlan::for_move(old_position, request.new_position) {
            let shifted = tx.shift_siblings(&scope, &request.id, shift).await?;
            debug!(
                "Shifted {} siblings of {} {} by {} in {}..={}",
                shifted,
                T::ENTITY,
                request.id,
                shift.delta,
                shift.lower,
                shift.upper
            );
        }

        tx.set_position(&request.id, request.new_position)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY, request.id))
    }
}

/// Picks the position the shift range is computed from.
fn resolve_old_position<T: Positioned>(
    policy: StalePositionPolicy,
    request: &RepositionRequest,
    stored: i32,
) -> Result<i32, DomainError> {
    if request.old_position == stored {
        return Ok(stored);
    }

    match policy {
        StalePositionPolicy::Reread => {
            warn!(
                "{} {} is at position {}, caller expected {}; using stored position",
                T::ENTITY,
                request.id,
                stored,
                request.old_position
            );
            Ok(stored)
        }
        StalePositionPolicy::Reject => Err(DomainError::PositionConflict(format!(
            "{} {} is at position {}, not {}",
            T::ENTITY,
            request.id,
            stored,
            request.old_position
        ))),
        StalePositionPolicy::Trust => {
            warn!(
                "{} {} is at position {}, trusting caller value {}",
                T::ENTITY,
                request.id,
                stored,
                request.old_position
            );
            Ok(request.old_position)
        }
    }
}

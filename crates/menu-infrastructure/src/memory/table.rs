// ============================================================================
// Menu Infrastructure - In-Memory Table
// File: crates/menu-infrastructure/src/memory/table.rs
// ============================================================================
//! Process-local storage with the same transaction semantics as the
//! PostgreSQL store.
//!
//! A reposition transaction stages its position writes and publishes them
//! only on commit. Scope locks are async mutexes keyed by the scope's lock
//! key and held until the transaction ends.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::OwnedMutexGuard;
use tracing::debug;
use uuid::Uuid;

use menu_core::domain::{MenuCategory, MenuItem, Positioned, ScopeKey, ShiftPlan};
use menu_core::error::DomainError;
use menu_core::repositories::{PositionStore, PositionTransaction};

/// Records whose position can be rewritten in place.
pub trait Placeable: Positioned {
    fn place(&mut self, position: i32);
}

impl Placeable for MenuCategory {
    fn place(&mut self, position: i32) {
        self.position = position;
        self.modified_at = Some(Utc::now());
    }
}

impl Placeable for MenuItem {
    fn place(&mut self, position: i32) {
        self.position = position;
        self.modified_at = Some(Utc::now());
    }
}

/// Scope mutexes by lock key. Entries are dropped once nobody holds or
/// waits on them.
#[derive(Default)]
struct ScopeLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ScopeLocks {
    fn get(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.lock().entry(key.to_string()).or_default().clone()
    }

    fn release(&self, key: &str) {
        let mut locks = self.locks.lock();
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }

    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

struct ScopeGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: Arc<ScopeLocks>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // Unlock first so the map holds the last reference.
        self.guard.take();
        self.locks.release(&self.key);
    }
}

pub struct MemoryTable<T> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
    locks: Arc<ScopeLocks>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            locks: self.locks.clone(),
        }
    }
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            locks: Arc::new(ScopeLocks::default()),
        }
    }
}

impl<T: Clone> MemoryTable<T> {
    /// Number of scope locks currently tracked.
    pub fn scope_lock_count(&self) -> usize {
        self.locks.len()
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.rows.read().get(id).cloned()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.rows.read().contains_key(id)
    }

    /// Clones every row matching `filter`, in no particular order.
    pub fn select(&self, filter: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().values().filter(|r| filter(r)).cloned().collect()
    }

    pub fn any(&self, filter: impl Fn(&T) -> bool) -> bool {
        self.rows.read().values().any(filter)
    }

    pub fn insert(&self, id: Uuid, row: T) {
        self.rows.write().insert(id, row);
    }

    /// Edits the current row in place under the write lock and returns the
    /// result. `None` when `id` is unknown.
    pub fn modify(&self, id: &Uuid, edit: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(id)?;
        edit(row);
        Some(row.clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.rows.write().remove(id)
    }

    /// Removes `id` unless `blocked` holds for it, checked under the write lock.
    pub fn remove_unless(&self, id: &Uuid, blocked: impl Fn(&T) -> bool) -> Result<Option<T>, T> {
        let mut rows = self.rows.write();
        match rows.get(id) {
            Some(row) if blocked(row) => Err(row.clone()),
            Some(_) => Ok(rows.remove(id)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<T: Placeable> PositionStore<T> for MemoryTable<T> {
    async fn begin(&self) -> Result<Box<dyn PositionTransaction<T>>, DomainError> {
        Ok(Box::new(MemoryTransaction {
            table: self.clone(),
            guard: None,
            staged: HashMap::new(),
        }))
    }
}

struct MemoryTransaction<T> {
    table: MemoryTable<T>,
    guard: Option<ScopeGuard>,
    /// Position writes not yet visible to other readers.
    staged: HashMap<Uuid, i32>,
}

impl<T: Placeable> MemoryTransaction<T> {
    fn staged_view(&self, mut row: T) -> T {
        if let Some(&position) = self.staged.get(&row.id()) {
            row.place(position);
        }
        row
    }
}

#[async_trait]
impl<T: Placeable> PositionTransaction<T> for MemoryTransaction<T> {
    async fn find(&mut self, id: &Uuid) -> Result<Option<T>, DomainError> {
        Ok(self.table.get(id).map(|row| self.staged_view(row)))
    }

    async fn lock_scope(&mut self, scope: &T::Scope) -> Result<(), DomainError> {
        let key = scope.lock_key();
        debug!("Acquiring scope lock {}", key);
        let lock = self.table.locks.get(&key);
        let guard = lock.lock_owned().await;
        self.guard = Some(ScopeGuard {
            guard: Some(guard),
            key,
            locks: self.table.locks.clone(),
        });
        Ok(())
    }

    async fn shift_siblings(
        &mut self,
        scope: &T::Scope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError> {
        let siblings = self
            .table
            .select(|row| row.id() != *exclude && row.scope() == *scope);

        let mut moves = Vec::new();
        for sibling in siblings {
            let current = self.staged_view(sibling);
            if !shift.contains(current.position()) {
                continue;
            }
            let position = shift.apply(current.position()).ok_or_else(|| {
                DomainError::PositionConflict(format!(
                    "{} {} cannot be shifted past position {}",
                    T::ENTITY,
                    current.id(),
                    current.position()
                ))
            })?;
            moves.push((current.id(), position));
        }

        let shifted = moves.len() as u64;
        self.staged.extend(moves);
        Ok(shifted)
    }

    async fn set_position(&mut self, id: &Uuid, position: i32) -> Result<Option<T>, DomainError> {
        match self.table.get(id) {
            Some(mut row) => {
                self.staged.insert(*id, position);
                row.place(position);
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        {
            let mut rows = self.table.rows.write();
            for (id, position) in self.staged.drain() {
                if let Some(row) = rows.get_mut(&id) {
                    row.place(position);
                }
            }
        }
        self.guard = None;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        self.staged.clear();
        self.guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::{LanguageCode, NewMenuCategory};

    fn category(position: i32) -> MenuCategory {
        MenuCategory::new(NewMenuCategory {
            language: LanguageCode::En,
            title: format!("c{}", position),
            description: None,
            image: None,
            hidden: false,
            position,
        })
    }

    #[tokio::test]
    async fn scope_locks_are_released_after_commit_and_drop() {
        let table: MemoryTable<MenuCategory> = MemoryTable::default();
        let first = category(0);
        table.insert(first.id, first.clone());

        let mut tx = table.begin().await.unwrap();
        tx.lock_scope(&first.scope()).await.unwrap();
        assert_eq!(table.scope_lock_count(), 1);
        tx.commit().await.unwrap();
        assert_eq!(table.scope_lock_count(), 0);

        {
            let mut tx = table.begin().await.unwrap();
            tx.lock_scope(&first.scope()).await.unwrap();
        }
        assert_eq!(table.scope_lock_count(), 0);
    }

    #[tokio::test]
    async fn waiting_transaction_keeps_the_lock_entry() {
        let table: MemoryTable<MenuCategory> = MemoryTable::default();
        let first = category(0);
        table.insert(first.id, first.clone());
        let scope = first.scope();

        let mut holder = table.begin().await.unwrap();
        holder.lock_scope(&scope).await.unwrap();

        let waiter_table = table.clone();
        let waiter = tokio::spawn(async move {
            let mut tx = waiter_table.begin().await.unwrap();
            tx.lock_scope(&scope).await.unwrap();
            tx.rollback().await.unwrap();
        });
        tokio::task::yield_now().await;

        holder.rollback().await.unwrap();
        waiter.await.unwrap();
        assert_eq!(table.scope_lock_count(), 0);
    }

    #[tokio::test]
    async fn shift_at_the_i32_edge_is_a_conflict() {
        let table: MemoryTable<MenuCategory> = MemoryTable::default();
        let top = category(i32::MAX);
        let other = category(i32::MAX);
        table.insert(top.id, top.clone());
        table.insert(other.id, other.clone());

        let mut tx = table.begin().await.unwrap();
        let plan = ShiftPlan::for_move(i32::MAX, 0).unwrap();
        let err = tx.shift_siblings(&top.scope(), &top.id, plan).await.unwrap_err();
        assert!(matches!(err, DomainError::PositionConflict(_)));
        assert_eq!(table.get(&other.id).unwrap().position, i32::MAX);
    }
}

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use shared_models::account::Account;
use shared_models::booking::Booking;
use shared_models::forum::ForumPost;
use shared_models::notice::Notice;
use shared_models::reservation::UserBooking;
use shared_models::Record;

/// Ordered in-memory collection. Cloning the handle shares the rows.
#[derive(Debug)]
pub struct Table<T: Record> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, row: T) -> T {
        self.rows.write().await.push(row.clone());
        row
    }

    pub async fn insert_front(&self, row: T) -> T {
        self.rows.write().await.insert(0, row.clone());
        row
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().find(|r| predicate(r)).cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Applies `apply` to the row with `id` and returns the updated copy.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        apply(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        let mut rows = self.rows.write().await;
        let index = rows.iter().position(|r| r.id() == id)?;
        Some(rows.remove(index))
    }

    /// Keeps rows matching `keep`; returns how many were dropped.
    pub async fn retain<F>(&self, keep: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| keep(r));
        before - rows.len()
    }

    /// Exclusive access for mutations that must read and write under one lock.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().await
    }
}

/// Every collection the portal keeps. Lock order for compound operations is
/// bookings before user_bookings.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub accounts: Table<Account>,
    pub bookings: Table<Booking>,
    pub user_bookings: Table<UserBooking>,
    pub notices: Table<Notice>,
    pub forum_posts: Table<ForumPost>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}

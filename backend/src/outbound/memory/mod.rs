//! In-memory adapters for the post and social graph ports.
//!
//! Used as the default store when no database URL is configured and as
//! deterministic collaborators in HTTP tests. State lives behind a
//! `std::sync::RwLock`; every read copies its result out under one guard, so
//! a single call always observes one consistent snapshot.

mod post_repository;
mod social_graph;

pub use post_repository::InMemoryPostRepository;
pub use social_graph::InMemorySocialGraph;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

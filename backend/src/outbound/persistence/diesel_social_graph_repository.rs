//! PostgreSQL-backed `SocialGraphRepository` implementation using Diesel ORM.
//!
//! Follow is `INSERT .. ON CONFLICT (follower_id, followee_id) DO NOTHING`, so
//! concurrent duplicate follows converge on one row without a read first.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::FollowEdge;
use crate::domain::ports::{SocialGraphRepository, SocialGraphRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewFollowRow;
use super::pool::{DbPool, PoolError};
use super::schema::follows;

/// Diesel-backed implementation of the `SocialGraphRepository` port.
#[derive(Clone)]
pub struct DieselSocialGraphRepository {
    pool: DbPool,
}

impl DieselSocialGraphRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SocialGraphRepositoryError {
    map_basic_pool_error(error, SocialGraphRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SocialGraphRepositoryError {
    map_basic_diesel_error(
        error,
        SocialGraphRepositoryError::query,
        SocialGraphRepositoryError::connection,
    )
}

#[async_trait]
impl SocialGraphRepository for DieselSocialGraphRepository {
    async fn create_edge(&self, edge: &FollowEdge) -> Result<(), SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFollowRow {
            id: edge.id(),
            follower_id: edge.follower_id(),
            followee_id: edge.followee_id(),
            created_at: edge.created_at(),
        };

        diesel::insert_into(follows::table)
            .values(&row)
            .on_conflict((follows::follower_id, follows::followee_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn remove_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower_id))
                .filter(follows::followee_id.eq(followee_id)),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn following_ids(
        &self,
        follower_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::follower_id.eq(follower_id))
            .order(follows::followee_id.asc())
            .select(follows::followee_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn follower_ids(
        &self,
        followee_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::followee_id.eq(followee_id))
            .order(follows::follower_id.asc())
            .select(follows::follower_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

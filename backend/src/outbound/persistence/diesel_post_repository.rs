//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! The fan-in timeline read is a single `author_id = ANY($1)` query ordered
//! and paginated by the database, served by the
//! `(author_id, created_at DESC, id)` index.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Page, Post};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

/// Convert a database row to a domain post, re-checking invariants.
fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let id = row.id.clone();
    Post::new(row.id, row.author_id, row.text, row.created_at).map_err(|err| {
        warn!(post_id = %id, error = %err, "stored post violates domain invariants");
        PostRepositoryError::query(format!("stored post {id} is invalid: {err}"))
    })
}

/// Convert page bounds to SQL `LIMIT`/`OFFSET` values.
fn sql_bounds(page: Page) -> (i64, i64) {
    let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPostRow {
            id: post.id(),
            author_id: post.author_id(),
            text: post.text(),
            created_at: post.created_at(),
        };

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn timeline_for_authors(
        &self,
        author_ids: &[String],
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = sql_bounds(page);

        let rows: Vec<PostRow> = posts::table
            .filter(posts::author_id.eq_any(author_ids))
            .order((posts::created_at.desc(), posts::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn by_author(
        &self,
        author_id: &str,
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = sql_bounds(page);

        let rows: Vec<PostRow> = posts::table
            .filter(posts::author_id.eq(author_id))
            .order((posts::created_at.desc(), posts::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_to_post_accepts_valid_rows() {
        let post = row_to_post(PostRow {
            id: "p1".to_owned(),
            author_id: "u1".to_owned(),
            text: "hola".to_owned(),
            created_at: 7,
        })
        .expect("valid row");
        assert_eq!(post.created_at(), 7);
    }

    #[rstest]
    fn row_to_post_rejects_corrupt_rows() {
        let error = row_to_post(PostRow {
            id: "p1".to_owned(),
            author_id: String::new(),
            text: "hola".to_owned(),
            created_at: 7,
        })
        .expect_err("empty author");
        assert!(matches!(error, PostRepositoryError::Query { .. }));
    }

    #[rstest]
    fn sql_bounds_follow_page() {
        assert_eq!(sql_bounds(Page::new(Some(20), Some(40))), (20, 40));
    }
}

//! List executor
//!
//! Runs a [`QueryPlan`] against a filtered `Select` and computes the token for
//! the next page. Fetches `limit + 1` rows: the extra row proves more data
//! exists and its key becomes the cursor key of the next page.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityName, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use tracing::{debug, warn};

use vane_common::{Result, StorageError};

use super::page_token;
use super::query::{PageCursor, QueryPlan};
use crate::model::ResultSet;

/// Largest row count or offset every backend accepts (signed 64-bit)
const MAX_ROWS: u64 = i64::MAX as u64;

/// An entity that can be listed page by page
pub trait Paginated: EntityTrait {
    /// Whether listings of this entity are filtered by namespace
    const SCOPED: bool = true;

    /// Primary ordering column
    fn created_column() -> Self::Column;

    /// Column matched against the key carried by a page token
    fn key_column() -> Self::Column;

    /// Identifier columns that break ties on the primary ordering column
    fn tie_break_columns() -> Vec<Self::Column>;

    fn cursor_key(model: &Self::Model) -> &str;
}

fn table_name<E: EntityName>() -> String {
    EntityName::table_name(&E::default()).to_string()
}

/// Rows to request: one past the page, or everything when unbounded.
///
/// SQLite and MySQL reject `OFFSET` without `LIMIT`, so an unbounded listing
/// with an offset gets the backend maximum.
fn fetch_limit(limit: Option<u64>, offset: u64) -> Option<u64> {
    match limit {
        Some(limit) => Some(limit.saturating_add(1).min(MAX_ROWS)),
        None if offset > 0 => Some(MAX_ROWS),
        None => None,
    }
}

/// Offset carried by the next page token, clamped to what a token can encode
fn next_offset(offset: u64, limit: u64) -> u64 {
    offset.saturating_add(limit).min(MAX_ROWS)
}

/// Reject a cursor whose key belongs to this entity outside the requested
/// scope. A key that no longer exists anywhere falls through to offset paging.
async fn check_cursor<E, C>(db: &C, select: &Select<E>, cursor: &PageCursor) -> Result<()>
where
    E: Paginated,
    C: ConnectionTrait,
{
    let in_scope = select
        .clone()
        .filter(E::key_column().eq(cursor.key.as_str()))
        .one(db)
        .await
        .map_err(|e| StorageError::internal("check page token", e))?
        .is_some();
    if in_scope {
        return Ok(());
    }

    let elsewhere = E::find()
        .filter(E::key_column().eq(cursor.key.as_str()))
        .one(db)
        .await
        .map_err(|e| StorageError::internal("check page token", e))?
        .is_some();
    if elsewhere {
        warn!(
            table = %table_name::<E>(),
            key = %cursor.key,
            "Rejecting page token outside of the requested scope"
        );
        return Err(StorageError::InvalidPageToken(cursor.raw.clone()));
    }

    debug!(
        table = %table_name::<E>(),
        key = %cursor.key,
        "Page token key no longer exists, paging by offset"
    );
    Ok(())
}

/// List one page of `select` according to `plan`.
///
/// `select` must already carry the scope filters; the cursor key is checked
/// against that same scope.
pub async fn list<E, C>(db: &C, select: Select<E>, plan: &QueryPlan) -> Result<ResultSet<E::Model>>
where
    E: Paginated,
    C: ConnectionTrait,
{
    if E::SCOPED
        && let Some(cursor) = &plan.cursor
    {
        check_cursor(db, &select, cursor).await?;
    }

    let order: sea_orm::Order = plan.order.into();
    let mut query = select.order_by(E::created_column(), order.clone());
    for column in E::tie_break_columns() {
        query = query.order_by(column, order.clone());
    }

    if let Some(fetch) = fetch_limit(plan.limit, plan.offset) {
        query = query.limit(fetch);
    }
    if plan.offset > 0 {
        query = query.offset(plan.offset);
    }

    let mut rows = query
        .all(db)
        .await
        .map_err(|e| StorageError::internal(format!("list {}", table_name::<E>()), e))?;

    let next_page_token = match plan.limit {
        Some(limit) if rows.len() as u64 > limit => {
            let page_len = usize::try_from(limit).unwrap_or(rows.len());
            let next = rows.split_off(page_len);
            let token =
                page_token::encode(E::cursor_key(&next[0]), next_offset(plan.offset, limit))?;
            Some(token)
        }
        _ => None,
    };

    debug!(
        table = %table_name::<E>(),
        order = %plan.order,
        offset = plan.offset,
        limit = ?plan.limit,
        returned = rows.len(),
        has_more = next_page_token.is_some(),
        "Listed page"
    );

    Ok(ResultSet::new(rows, next_page_token))
}

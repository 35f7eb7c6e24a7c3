//! PostgreSQL-backed `RetreatRepository` implementation using Diesel ORM.
//!
//! Listing translates a [`RetreatFilter`] into boxed predicates that are
//! applied to both the `COUNT(*)` and the page query, so the total and the
//! slice always agree. Text criteria use `ILIKE` with `%`, `_` and `\`
//! escaped, so user input is matched literally.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RetreatRepository, RetreatRepositoryError};
use crate::domain::{NewRetreat, Retreat, RetreatFilter, RetreatId};

use super::diesel_basic_error_mapping::{
    from_sql_count, map_basic_diesel_error, map_basic_pool_error, to_sql_bigint,
};
use super::models::{NewRetreatRow, RetreatRow};
use super::pool::{DbPool, PoolError};
use super::schema::retreats;

type RetreatPredicate = Box<dyn BoxableExpression<retreats::table, Pg, SqlType = Bool>>;

/// Diesel-backed implementation of the `RetreatRepository` port.
#[derive(Clone)]
pub struct DieselRetreatRepository {
    pool: DbPool,
}

impl DieselRetreatRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RetreatRepositoryError {
    map_basic_pool_error(error, RetreatRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> RetreatRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        RetreatRepositoryError::query,
        RetreatRepositoryError::connection,
    )
}

/// Build a `%term%` pattern with `ILIKE` metacharacters escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn filter_predicates(filter: &RetreatFilter) -> Vec<RetreatPredicate> {
    let mut predicates: Vec<RetreatPredicate> = Vec::new();

    for term in filter.search_terms() {
        let pattern = contains_pattern(term);
        predicates.push(Box::new(
            retreats::title
                .ilike(pattern.clone())
                .or(retreats::description.ilike(pattern.clone()))
                .or(retreats::location.ilike(pattern)),
        ));
    }
    if let Some(text) = filter.text() {
        let pattern = contains_pattern(text);
        predicates.push(Box::new(
            retreats::title
                .ilike(pattern.clone())
                .or(retreats::description.ilike(pattern)),
        ));
    }
    if let Some(location) = filter.location() {
        predicates.push(Box::new(retreats::location.ilike(contains_pattern(location))));
    }
    if let Some(min) = filter.min_price() {
        predicates.push(Box::new(retreats::price.ge(min)));
    }
    if let Some(max) = filter.max_price() {
        predicates.push(Box::new(retreats::price.le(max)));
    }
    if let Some(min) = filter.min_duration() {
        predicates.push(Box::new(retreats::duration.ge(min)));
    }
    if let Some(max) = filter.max_duration() {
        predicates.push(Box::new(retreats::duration.le(max)));
    }

    predicates
}

/// Apply every criterion in `filter` to a boxed retreat query.
fn apply_filter<'a, ST>(
    query: retreats::BoxedQuery<'a, Pg, ST>,
    filter: &RetreatFilter,
) -> retreats::BoxedQuery<'a, Pg, ST> {
    filter_predicates(filter)
        .into_iter()
        .fold(query, |query, predicate| query.filter(predicate))
}

#[async_trait]
impl RetreatRepository for DieselRetreatRepository {
    async fn insert(&self, retreat: &NewRetreat) -> Result<Retreat, RetreatRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RetreatRow = diesel::insert_into(retreats::table)
            .values(NewRetreatRow::from(retreat))
            .returning(RetreatRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert retreat"))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: RetreatId) -> Result<Option<Retreat>, RetreatRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RetreatRow> = retreats::table
            .find(id.get())
            .select(RetreatRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find retreat"))?;

        Ok(row.map(Retreat::from))
    }

    async fn search(
        &self,
        filter: &RetreatFilter,
        page: PageRequest,
    ) -> Result<Page<Retreat>, RetreatRepositoryError> {
        let count_query = apply_filter(retreats::table.select(count_star()).into_boxed(), filter);
        let page_query = apply_filter(
            retreats::table.select(RetreatRow::as_select()).into_boxed(),
            filter,
        )
            .order(retreats::id.asc())
            .limit(to_sql_bigint(page.limit()))
            .offset(to_sql_bigint(page.offset()));

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count retreats"))?;
        let rows: Vec<RetreatRow> = page_query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load retreats"))?;

        Ok(Page::new(
            rows.into_iter().map(Retreat::from).collect(),
            from_sql_count(total),
            page,
        ))
    }
}

//! PostgreSQL-backed `ReferenceRepository` for ranks and rules.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{NewRank, NewRule, Rank, Rule};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRankRow, NewRuleRow, RankRow, RuleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ranks, rules};

/// Diesel implementation of [`ReferenceRepository`].
#[derive(Clone)]
pub struct DieselReferenceRepository {
    pool: DbPool,
}

impl DieselReferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceRepositoryError {
    map_basic_pool_error(error, ReferenceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReferenceRepositoryError {
    map_basic_diesel_error(
        error,
        ReferenceRepositoryError::query,
        ReferenceRepositoryError::connection,
    )
}

impl From<RankRow> for Rank {
    fn from(row: RankRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            name: row.name,
            code: row.code,
            order: row.sort_order,
        }
    }
}

impl From<RuleRow> for Rule {
    fn from(row: RuleRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            category: row.category,
        }
    }
}

#[async_trait]
impl ReferenceRepository for DieselReferenceRepository {
    async fn ranks(&self) -> Result<Vec<Rank>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RankRow> = ranks::table
            .select(RankRow::as_select())
            .order_by((ranks::sort_order.asc(), ranks::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Rank::from).collect())
    }

    async fn rules(&self) -> Result<Vec<Rule>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RuleRow> = rules::table
            .select(RuleRow::as_select())
            .order_by(rules::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Rule::from).collect())
    }

    async fn insert_ranks(&self, new_ranks: &[NewRank]) -> Result<(), ReferenceRepositoryError> {
        let rows: Vec<NewRankRow<'_>> = new_ranks
            .iter()
            .map(|rank| NewRankRow {
                title: rank.title,
                name: rank.name,
                code: rank.code,
                sort_order: rank.order,
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ranks::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_rules(&self, new_rules: &[NewRule]) -> Result<(), ReferenceRepositoryError> {
        let rows: Vec<NewRuleRow<'_>> = new_rules
            .iter()
            .map(|rule| NewRuleRow {
                content: rule.content,
                category: rule.category,
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(rules::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

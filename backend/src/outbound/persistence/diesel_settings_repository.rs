//! PostgreSQL-backed `SettingsRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::SettingKey;
use crate::domain::ports::{SettingsRepository, SettingsRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SettingRow;
use super::pool::{DbPool, PoolError};
use super::schema::settings;

/// Diesel implementation of [`SettingsRepository`].
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SettingsRepositoryError {
    map_basic_pool_error(error, SettingsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SettingsRepositoryError {
    map_basic_diesel_error(
        error,
        SettingsRepositoryError::query,
        SettingsRepositoryError::connection,
    )
}

#[async_trait]
impl SettingsRepository for DieselSettingsRepository {
    async fn get(&self, key: SettingKey) -> Result<Option<String>, SettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        settings::table
            .find(key.as_str())
            .select(settings::value)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn upsert(&self, key: SettingKey, json: &str) -> Result<(), SettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = SettingRow {
            key: key.as_str().to_owned(),
            value: json.to_owned(),
        };
        diesel::insert_into(settings::table)
            .values(&row)
            .on_conflict(settings::key)
            .do_update()
            .set(settings::value.eq(excluded(settings::value)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

//! Port for key/value settings storage.
//!
//! Values cross this port as JSON text so adapters never interpret them.

use async_trait::async_trait;

use crate::domain::SettingKey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by settings storage.
    pub enum SettingsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "settings repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "settings repository query failed: {message}",
    }
}

/// Settings storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored JSON text for `key`, if any.
    async fn get(&self, key: SettingKey) -> Result<Option<String>, SettingsRepositoryError>;

    /// Insert or replace the JSON text for `key`.
    async fn upsert(&self, key: SettingKey, json: &str) -> Result<(), SettingsRepositoryError>;
}

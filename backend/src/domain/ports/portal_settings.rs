//! Driving port for typed settings.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Caller, Error, SettingKey};

/// Settings use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalSettings: Send + Sync {
    /// Stored value for `key`, or `None` when unset.
    async fn read(&self, caller: &Caller, key: SettingKey) -> Result<Option<Value>, Error>;

    /// Replace the value for `key` after checking its type.
    async fn update(&self, caller: &Caller, key: SettingKey, value: Value) -> Result<(), Error>;
}

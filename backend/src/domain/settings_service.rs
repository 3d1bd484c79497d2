//! Typed settings service and the applications-open gate.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::domain::ports::{PortalSettings, SettingsRepository, SettingsRepositoryError};
use crate::domain::{Action, Caller, Error, InvalidSettingValue, SettingKey, authorize};

pub(crate) fn map_settings_error(error: SettingsRepositoryError) -> Error {
    Error::internal(format!("settings repository error: {error}"))
}

fn invalid_value_error(error: &InvalidSettingValue) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "value",
        "key": error.key.as_str(),
        "code": "invalid_setting_value",
    }))
}

/// Load and decode the stored value for `key`.
pub(crate) async fn load_setting<S>(repo: &S, key: SettingKey) -> Result<Option<Value>, Error>
where
    S: SettingsRepository + ?Sized,
{
    let Some(raw) = repo.get(key).await.map_err(map_settings_error)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| Error::internal(format!("stored setting {key} is not JSON: {err}")))
}

/// Whether submissions are accepted. An unset gate counts as closed.
pub(crate) async fn applications_open<S>(repo: &S) -> Result<bool, Error>
where
    S: SettingsRepository + ?Sized,
{
    Ok(matches!(
        load_setting(repo, SettingKey::ApplicationsOpen).await?,
        Some(Value::Bool(true))
    ))
}

/// Settings service implementing [`PortalSettings`].
#[derive(Clone)]
pub struct SettingsService<S: ?Sized> {
    repo: Arc<S>,
}

impl<S: ?Sized> SettingsService<S> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<S> PortalSettings for SettingsService<S>
where
    S: SettingsRepository + ?Sized,
{
    async fn read(&self, caller: &Caller, key: SettingKey) -> Result<Option<Value>, Error> {
        authorize(caller, Action::ReadSetting)?;
        load_setting(self.repo.as_ref(), key).await
    }

    async fn update(&self, caller: &Caller, key: SettingKey, value: Value) -> Result<(), Error> {
        authorize(caller, Action::UpdateSetting)?;
        key.validate(&value)
            .map_err(|err| invalid_value_error(&err))?;
        let encoded = serde_json::to_string(&value)
            .map_err(|err| Error::internal(format!("failed to encode setting: {err}")))?;
        self.repo
            .upsert(key, &encoded)
            .await
            .map_err(map_settings_error)?;
        info!(key = %key, value = %encoded, "setting updated");
        Ok(())
    }
}

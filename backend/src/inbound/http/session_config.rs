//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning so a fresh
//! checkout runs without secrets. Release builds refuse to start unless every
//! toggle is present and valid.
//!
//! | Variable | Values | Debug default |
//! |----------|--------|---------------|
//! | `PORTAL_SESSION_KEY_FILE` | path to >= 64 key bytes | ephemeral key |
//! | `PORTAL_SESSION_COOKIE_SECURE` | `1`/`0`/`true`/`false` | `true` |
//! | `PORTAL_SESSION_SAMESITE` | `Strict`/`Lax`/`None` | `Lax` |
//! | `PORTAL_SESSION_ALLOW_EPHEMERAL` | `1`/`0`/`true`/`false` | `false` |

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub const KEY_FILE_ENV: &str = "PORTAL_SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "PORTAL_SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "PORTAL_SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "PORTAL_SESSION_ALLOW_EPHEMERAL";

const KEY_DEFAULT_PATH: &str = "/var/run/secrets/portal_session_key";
const KEY_MIN_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Whether configuration problems are tolerated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// The mode of the running binary.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Cookie session parameters for `SessionMiddleware`.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Reasons session configuration was refused.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("PORTAL_SESSION_SAMESITE=None requires PORTAL_SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("PORTAL_SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Either fall back (debug) or fail (release).
fn tolerate<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    match mode {
        BuildMode::Debug => {
            warn!(%error, "session configuration problem ignored in debug build");
            Ok(fallback)
        }
        BuildMode::Release => Err(error),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return tolerate(mode, fallback, SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => tolerate(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(value) = env.string(SAMESITE_ENV) else {
        return tolerate(
            mode,
            SameSite::Lax,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
        );
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => tolerate(mode, SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => tolerate(
            mode,
            SameSite::Lax,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn signing_key<E: Env>(env: &E, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let allow_ephemeral = bool_toggle(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let too_short = length < KEY_MIN_LEN;
            let key = (!too_short).then(|| Key::derive_from(&bytes));
            bytes.zeroize();
            match key {
                Some(key) => Ok(key),
                None => tolerate(
                    mode,
                    Key::generate(),
                    SessionConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: KEY_MIN_LEN,
                    },
                ),
            }
        }
        Err(source) => tolerate(
            mode,
            Key::generate(),
            SessionConfigError::KeyRead { path, source },
        ),
    }
}

/// Read and validate session settings.
///
/// # Errors
/// In release builds, any missing or malformed toggle, an unreadable or short
/// key file, `SameSite=None` without `Secure`, or an ephemeral-key opt-in.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_toggle(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let key = signing_key(env, mode)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

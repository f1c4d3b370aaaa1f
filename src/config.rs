use chrono::FixedOffset;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::audit::DEFAULT_OFFSET_SECS;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_HISTORY_SHEET: &str = "History_Log";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Google service account fields, as found in a credentials JSON file
#[derive(Clone, Debug, Default)]
pub struct ServiceAccount {
    pub account_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub token_uri: String,
}

/// Process configuration, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub sheet_id: String,
    pub credentials: ServiceAccount,
    pub bind: SocketAddr,
    pub history_sheet: String,
    pub audit_offset: FixedOffset,
    pub static_dir: Option<PathBuf>,
    pub api_base: String,
}

impl Config {
    /// Load from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let credentials = ServiceAccount {
            account_type: get("TYPE").unwrap_or_else(|| "service_account".to_string()),
            project_id: get("PROJECT_ID").unwrap_or_default(),
            private_key_id: get("PRIVATE_KEY_ID").unwrap_or_default(),
            private_key: unescape_newlines(&require("PRIVATE_KEY")?),
            client_email: require("CLIENT_EMAIL")?,
            client_id: get("CLIENT_ID").unwrap_or_default(),
            token_uri: get("TOKEN_URI").unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let host = get("BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let bind = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                var: "BIND_HOST",
                value: host,
            })?;

        let audit_offset = match get("AUDIT_UTC_OFFSET") {
            Some(raw) => raw
                .trim()
                .parse::<FixedOffset>()
                .map_err(|_| ConfigError::Invalid {
                    var: "AUDIT_UTC_OFFSET",
                    value: raw,
                })?,
            None => FixedOffset::east_opt(DEFAULT_OFFSET_SECS).ok_or(ConfigError::Invalid {
                var: "AUDIT_UTC_OFFSET",
                value: DEFAULT_OFFSET_SECS.to_string(),
            })?,
        };

        Ok(Config {
            sheet_id: require("SHEET_ID")?,
            credentials,
            bind,
            history_sheet: get("HISTORY_SHEET")
                .unwrap_or_else(|| DEFAULT_HISTORY_SHEET.to_string()),
            audit_offset,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            api_base: get("SHEETS_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

/// Hosting dashboards store PEM keys on one line with literal `\n`
fn unescape_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

//! Runtime configuration for embedding applications.

use std::{env, path::PathBuf};

use crate::pagination::PaginationConfig;

/// The environment variable naming the REST backend's base URL.
pub const API_URL_VAR: &str = "BUDGET_BUDDY_API_URL";
/// The environment variable naming the local data file.
pub const DATA_PATH_VAR: &str = "BUDGET_BUDDY_DATA_PATH";
/// The data file used when nothing is configured.
pub const DEFAULT_DATA_PATH: &str = "budget-buddy.json";

/// Where the facades read and write records.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendMode {
    /// Talk to the REST backend at this base URL.
    Remote {
        /// The backend origin, without a trailing slash, ready for endpoint
        /// paths to be appended.
        base_url: String,
    },
    /// Keep records in a local JSON document.
    Local {
        /// The path of the data file.
        data_path: PathBuf,
    },
}

/// The application configuration handed to whoever wires up the facades.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where records live.
    pub backend: BackendMode,
    /// How listings are paged by default.
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Resolve the configuration from the environment.
    ///
    /// `BUDGET_BUDDY_API_URL` selects the remote backend; otherwise records
    /// go to the JSON file named by `BUDGET_BUDDY_DATA_PATH`, defaulting to
    /// `budget-buddy.json` in the working directory.
    pub fn from_env() -> Self {
        let backend = match env::var(API_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => BackendMode::Remote {
                base_url: trim_trailing_slashes(&url),
            },
            _ => BackendMode::Local {
                data_path: env::var(DATA_PATH_VAR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            },
        };

        Self {
            backend,
            pagination: PaginationConfig::default(),
        }
    }
}

/// Strip trailing slashes so endpoint paths can be appended directly.
fn trim_trailing_slashes(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

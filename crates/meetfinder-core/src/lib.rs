pub mod app_config;
pub mod columns;
pub mod config;
pub mod geo;
pub mod links;
pub mod table;

pub use app_config::AppConfig;
pub use columns::{classify, columns_matching, ColumnRole, ColumnRoleMap, ROLE_KEYWORDS};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_miles, round_tenth, Coordinate, EARTH_RADIUS_MILES};
pub use links::SearchLinks;
pub use table::{CellValue, CompetitionRecord, CompetitionTable, TableError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

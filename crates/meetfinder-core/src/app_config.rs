use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub postcodes_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub data_dir: PathBuf,
    pub home_postcode: Option<String>,
}

use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: i64,
    #[serde(default)]
    pub summary_api: SummaryApi,
    #[serde(default)]
    pub report_time: ReportTime,
    #[serde(default)]
    pub table: TableLayout,
    #[serde(default)]
    pub render: Render,
    #[serde(default)]
    pub delivery: Delivery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryApi {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportTime {
    #[serde(default = "default_source_format")]
    pub source_format: String,
    #[serde(default = "default_display_format")]
    pub display_format: String,
    #[serde(default = "default_source_timezone")]
    pub source_timezone: String,
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableLayout {
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
    #[serde(default = "default_sort_column")]
    pub sort_column: String,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Render {
    #[serde(default = "default_engine_binary")]
    pub engine_binary: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default = "default_render_quiet")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delivery {
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
}

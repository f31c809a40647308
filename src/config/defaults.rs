use super::schema::{Delivery, Render, ReportTime, SummaryApi, TableLayout};

pub(super) fn default_base_url() -> String {
    "https://api.covid19api.com".to_string()
}

pub(super) fn default_endpoint() -> String {
    "/summary".to_string()
}

pub(super) fn default_max_attempts() -> u32 {
    5
}

pub(super) fn default_retry_backoff_ms() -> u64 {
    500
}

pub(super) fn default_source_format() -> String {
    "%Y-%m-%dT%H:%M:%SZ".to_string()
}

pub(super) fn default_display_format() -> String {
    "%d %B %Y %H:%M".to_string()
}

pub(super) fn default_source_timezone() -> String {
    "UTC".to_string()
}

pub(super) fn default_display_timezone() -> String {
    "Europe/Istanbul".to_string()
}

pub(super) fn default_columns() -> Vec<String> {
    [
        "Country",
        "TotalConfirmed",
        "TotalDeaths",
        "TotalRecovered",
        "TotalActive",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

pub(super) fn default_sort_column() -> String {
    "TotalConfirmed".to_string()
}

pub(super) fn default_rows_per_page() -> usize {
    10
}

pub(super) fn default_engine_binary() -> String {
    "wkhtmltoimage".to_string()
}

pub(super) fn default_output_dir() -> String {
    "output".to_string()
}

pub(super) fn default_palette() -> String {
    "red".to_string()
}

pub(super) fn default_render_quiet() -> bool {
    true
}

pub(super) fn default_upload_timeout_secs() -> u64 {
    300
}

impl Default for SummaryApi {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for ReportTime {
    fn default() -> Self {
        Self {
            source_format: default_source_format(),
            display_format: default_display_format(),
            source_timezone: default_source_timezone(),
            display_timezone: default_display_timezone(),
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            sort_column: default_sort_column(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl Default for Render {
    fn default() -> Self {
        Self {
            engine_binary: default_engine_binary(),
            output_dir: default_output_dir(),
            palette: default_palette(),
            quiet: default_render_quiet(),
        }
    }
}

impl Default for Delivery {
    fn default() -> Self {
        Self {
            upload_timeout_secs: default_upload_timeout_secs(),
        }
    }
}

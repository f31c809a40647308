use std::fmt::Write as _;

use teloxide::types::ChatId;
use thiserror::Error;

use crate::render::Palette;
use crate::table::Column;
use crate::timezone;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bot_token must not be empty".to_string(),
            ));
        }
        if self.chat_id == 0 {
            return Err(ConfigError::Validation(
                "chat_id must be a non-zero Telegram chat id".to_string(),
            ));
        }
        if self.summary_api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary_api.base_url must not be empty".to_string(),
            ));
        }
        if self.summary_api.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary_api.endpoint must not be empty".to_string(),
            ));
        }
        if self.summary_api.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "summary_api.max_attempts must be greater than 0".to_string(),
            ));
        }
        validate_timezone("report_time.source_timezone", &self.report_time.source_timezone)?;
        validate_timezone(
            "report_time.display_timezone",
            &self.report_time.display_timezone,
        )?;
        if self.report_time.source_format.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report_time.source_format must not be empty".to_string(),
            ));
        }
        validate_display_format(&self.report_time.display_format)?;
        if self.table.columns.is_empty() {
            return Err(ConfigError::Validation(
                "table.columns must list at least one column".to_string(),
            ));
        }
        for name in &self.table.columns {
            Column::from_name(name).map_err(|error| {
                ConfigError::Validation(format!("table.columns: {}", error))
            })?;
        }
        if !self.table.columns.contains(&self.table.sort_column) {
            return Err(ConfigError::Validation(format!(
                "table.sort_column {} must be one of table.columns",
                self.table.sort_column
            )));
        }
        if self.table.rows_per_page == 0 {
            return Err(ConfigError::Validation(
                "table.rows_per_page must be greater than 0".to_string(),
            ));
        }
        if self.render.engine_binary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.engine_binary must not be empty".to_string(),
            ));
        }
        if self.render.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.output_dir must not be empty".to_string(),
            ));
        }
        Palette::parse(&self.render.palette)
            .map_err(|error| ConfigError::Validation(format!("render.palette: {}", error)))?;
        if self.delivery.upload_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "delivery.upload_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chat(&self) -> ChatId {
        ChatId(self.chat_id)
    }
}

fn validate_timezone(field: &str, value: &str) -> Result<(), ConfigError> {
    timezone::zone(value)
        .map(|_| ())
        .map_err(|error| ConfigError::Validation(format!("{}: {}", field, error)))
}

// chrono's DelayedFormat only reports a bad strftime pattern when it is
// rendered, so probe the pattern against a fixed timestamp here instead of
// failing mid-pipeline.
fn validate_display_format(format: &str) -> Result<(), ConfigError> {
    if format.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report_time.display_format must not be empty".to_string(),
        ));
    }

    let probe = chrono::NaiveDate::from_ymd_opt(2020, 4, 5)
        .and_then(|date| date.and_hms_opt(6, 37, 0));
    let Some(probe) = probe else {
        return Ok(());
    };

    let mut rendered = String::new();
    write!(rendered, "{}", probe.format(format)).map_err(|_| {
        ConfigError::Validation(format!(
            "report_time.display_format {} is not a valid strftime pattern",
            format
        ))
    })?;
    Ok(())
}

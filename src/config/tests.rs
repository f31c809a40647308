use super::schema::Config;

fn minimal_config() -> Config {
    toml::from_str("bot_token = \"123:abc\"\nchat_id = -1001234567890\n").expect("minimal config")
}

#[test]
fn minimal_config_gets_defaults_and_validates() {
    let config = minimal_config();

    assert_eq!(config.summary_api.endpoint, "/summary");
    assert_eq!(config.summary_api.max_attempts, 5);
    assert_eq!(config.table.rows_per_page, 10);
    assert_eq!(config.table.sort_column, "TotalConfirmed");
    assert_eq!(config.render.palette, "red");
    assert_eq!(config.delivery.upload_timeout_secs, 300);
    assert!(config.validate().is_ok());
}

#[test]
fn rejects_empty_token() {
    let mut config = minimal_config();
    config.bot_token = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_chat_id() {
    let mut config = minimal_config();
    config.chat_id = 0;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_unknown_table_column() {
    let mut config = minimal_config();
    config.table.columns.push("NewConfirmed".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn rejects_sort_column_outside_column_set() {
    let mut config = minimal_config();
    config.table.sort_column = "TotalDeaths".to_string();
    config.table.columns = vec!["Country".to_string(), "TotalConfirmed".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_rows_per_page() {
    let mut config = minimal_config();
    config.table.rows_per_page = 0;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_unknown_timezone() {
    let mut config = minimal_config();
    config.report_time.display_timezone = "Mars/Olympus_Mons".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_bad_display_format() {
    let mut config = minimal_config();
    config.report_time.display_format = "%Q".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_bad_palette() {
    let mut config = minimal_config();
    config.render.palette = "plaid".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_upload_timeout() {
    let mut config = minimal_config();
    config.delivery.upload_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_fetch_attempts() {
    let mut config = minimal_config();
    config.summary_api.max_attempts = 0;
    assert!(config.validate().is_err());
}

mod config;
mod delivery;
mod pipeline;
mod render;
mod summary;
mod table;
mod timezone;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::{load_config, Config};
use crate::delivery::TelegramChannel;
use crate::render::WkhtmlRasterizer;
use crate::summary::HttpSummaryClient;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    init_json_logging();

    let config: Config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "summary_run_starting endpoint={} chat_id={}",
        config.summary_api.endpoint,
        config.chat_id
    );

    let fetcher = match HttpSummaryClient::from_config(&config.summary_api) {
        Ok(fetcher) => fetcher,
        Err(error) => {
            log::error!("summary client setup failed: {}", error);
            return ExitCode::FAILURE;
        }
    };
    let rasterizer = WkhtmlRasterizer::from_config(&config.render);
    let channel = TelegramChannel::new(&config.bot_token, config.chat());

    match pipeline::run(&config, &fetcher, &rasterizer, channel).await {
        Ok(report) => {
            log::info!(
                "summary_run_completed countries={} pages={} images={}",
                report.countries,
                report.pages,
                report.images
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("summary_run_failed error={}", error);
            ExitCode::FAILURE
        }
    }
}

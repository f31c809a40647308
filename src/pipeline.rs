use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::Config;
use crate::delivery::{split_batches, ChannelApi, DeliveryError, Dispatcher, TextMode};
use crate::render::{page_image_path, render_markup, Palette, Rasterize, RenderError};
use crate::summary::{FetchError, SummaryFetch};
use crate::table::{build_table, split_table, Column, TableError};
use crate::timezone::{self, TimeError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
}

pub struct RunReport {
    pub countries: usize,
    pub pages: usize,
    pub images: usize,
}

/// One full fetch-transform-render-deliver run. Strictly sequential; the
/// first failing stage aborts the rest.
pub async fn run(
    config: &Config,
    fetcher: &impl SummaryFetch,
    rasterizer: &impl Rasterize,
    channel: impl ChannelApi,
) -> Result<RunReport, PipelineError> {
    let report = fetcher.fetch_summary().await?;

    let report_naive = timezone::parse_naive(&report.date, &config.report_time.source_format)?;
    let source_tz = timezone::zone(&config.report_time.source_timezone)?;
    let display_tz = timezone::zone(&config.report_time.display_timezone)?;
    let display_time = timezone::convert(report_naive, source_tz, display_tz)?;

    let records = report.into_records_with_global();
    let countries = records.len();

    let columns = config
        .table
        .columns
        .iter()
        .map(|name| Column::from_name(name))
        .collect::<Result<Vec<_>, _>>()?;
    let sort_column = Column::from_name(&config.table.sort_column)?;
    let table = build_table(&records, &columns, sort_column, false)?;
    let pages = split_table(&table, config.table.rows_per_page)?;
    log::info!(
        "table_built rows={} pages={} sort_column={}",
        table.rows.len(),
        pages.len(),
        sort_column.name()
    );

    let palette = Palette::parse(&config.render.palette)?;
    let output_dir = Path::new(&config.render.output_dir);
    std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::OutputDir {
        path: config.render.output_dir.clone(),
        source,
    })?;

    let mut image_paths = Vec::with_capacity(pages.len());
    for page in &pages {
        let markup = render_markup(page, palette);
        let path = page_image_path(output_dir, page.index);
        rasterizer.rasterize(&markup, &path).await?;
        log::info!(
            "page_rendered page={} rows={} path={}",
            page.index,
            page.rows.len(),
            path.display()
        );
        image_paths.push(path);
    }

    let dispatcher = Dispatcher::new(channel);
    let announcement = format!(
        "COVID-19 summary statistics as of *{}*",
        display_time.format(&config.report_time.display_format)
    );
    dispatcher.announce(&announcement, TextMode::Markdown).await?;

    let timeout = Duration::from_secs(config.delivery.upload_timeout_secs);
    let (first, second) = split_batches(&image_paths);
    dispatcher.send_images(first, timeout).await?;
    dispatcher.send_images(second, timeout).await?;

    Ok(RunReport {
        countries,
        pages: pages.len(),
        images: image_paths.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use crate::config::Config;
    use crate::delivery::{ChannelApi, DeliveryError, Presence, TextMode};
    use crate::render::{Rasterize, RenderError};
    use crate::summary::{FetchError, SummaryFetch, SummaryReport};

    use super::run;

    struct FixedFetcher {
        report_json: String,
    }

    impl SummaryFetch for FixedFetcher {
        async fn fetch_summary(&self) -> Result<SummaryReport, FetchError> {
            Ok(serde_json::from_str(&self.report_json).expect("fixture report"))
        }
    }

    struct FailingFetcher;

    impl SummaryFetch for FailingFetcher {
        async fn fetch_summary(&self) -> Result<SummaryReport, FetchError> {
            Err(FetchError::RetriesExhausted {
                attempts: 5,
                status: reqwest::StatusCode::BAD_GATEWAY,
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingRasterizer {
        rendered: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl Rasterize for RecordingRasterizer {
        async fn rasterize(&self, markup: &str, output_path: &Path) -> Result<(), RenderError> {
            assert!(markup.contains("<table>"));
            self.rendered
                .lock()
                .expect("rendered lock")
                .push(output_path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Presence(Presence),
        Text(String),
        Photo(PathBuf),
        Album(Vec<PathBuf>),
    }

    #[derive(Clone, Default)]
    struct RecordingChannel {
        sent: Arc<Mutex<Vec<Sent>>>,
    }

    impl RecordingChannel {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().expect("sent lock").clone()
        }
    }

    impl ChannelApi for RecordingChannel {
        async fn send_presence(&self, presence: Presence) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .expect("sent lock")
                .push(Sent::Presence(presence));
            Ok(())
        }

        async fn send_text(&self, text: &str, _mode: TextMode) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .expect("sent lock")
                .push(Sent::Text(text.to_string()));
            Ok(())
        }

        async fn send_photo(&self, path: &Path) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .expect("sent lock")
                .push(Sent::Photo(path.to_path_buf()));
            Ok(())
        }

        async fn send_album(&self, paths: &[PathBuf]) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .expect("sent lock")
                .push(Sent::Album(paths.to_vec()));
            Ok(())
        }
    }

    fn test_config(output_dir: &Path) -> Config {
        let mut config: Config =
            toml::from_str("bot_token = \"123:abc\"\nchat_id = -1001234567890\n")
                .expect("test config");
        config.render.output_dir = output_dir.display().to_string();
        config
    }

    fn report_with_countries(count: usize) -> String {
        let countries: Vec<String> = (0..count)
            .map(|n| {
                format!(
                    r#"{{"Country": "Country{:02}", "CountryCode": "C{}", "Date": "2020-04-05T06:37:00Z",
                        "Slug": "country-{:02}", "TotalConfirmed": {}, "TotalDeaths": {},
                        "TotalRecovered": {}, "TotalActive": {}}}"#,
                    n,
                    n,
                    n,
                    100_000 - n,
                    n,
                    n * 2,
                    100_000 - n * 3
                )
            })
            .collect();
        format!(
            r#"{{"Date": "2020-04-05T06:37:00Z",
                "Global": {{"TotalConfirmed": 1197405, "TotalDeaths": 64606,
                            "TotalRecovered": 246152, "TotalActive": 886647}},
                "Countries": [{}]}}"#,
            countries.join(",")
        )
    }

    #[tokio::test]
    async fn full_run_renders_three_pages_and_delivers_two_batches() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = test_config(temp.path());
        let fetcher = FixedFetcher {
            report_json: report_with_countries(23),
        };
        let rasterizer = RecordingRasterizer::default();
        let channel = RecordingChannel::default();

        let run_report = run(&config, &fetcher, &rasterizer, channel.clone())
            .await
            .expect("pipeline run");

        // 23 countries + synthesized Global, paged by 10.
        assert_eq!(run_report.countries, 24);
        assert_eq!(run_report.pages, 3);
        assert_eq!(run_report.images, 3);

        let rendered = rasterizer.rendered.lock().expect("rendered lock").clone();
        assert_eq!(
            rendered,
            vec![
                temp.path().join("table_1.png"),
                temp.path().join("table_2.png"),
                temp.path().join("table_3.png"),
            ]
        );

        let sent = channel.sent();
        assert_eq!(
            sent[0],
            Sent::Presence(Presence::Typing),
            "announcement presence comes first"
        );
        let Sent::Text(announcement) = &sent[1] else {
            panic!("expected announcement text, got {:?}", sent[1]);
        };
        assert_eq!(
            announcement,
            "COVID-19 summary statistics as of *05 April 2020 09:37*"
        );

        // floor(3/2) = 1 image in the first batch, 2 in the second.
        assert_eq!(
            sent[2..],
            [
                Sent::Presence(Presence::UploadingPhoto),
                Sent::Photo(temp.path().join("table_1.png")),
                Sent::Presence(Presence::UploadingPhoto),
                Sent::Album(vec![
                    temp.path().join("table_2.png"),
                    temp.path().join("table_3.png"),
                ]),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_failure_aborts_before_any_render_or_delivery() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = test_config(temp.path());
        let rasterizer = RecordingRasterizer::default();
        let channel = RecordingChannel::default();

        let result = run(&config, &FailingFetcher, &rasterizer, channel.clone()).await;

        assert!(result.is_err());
        assert!(rasterizer.rendered.lock().expect("rendered lock").is_empty());
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_country_list_still_announces_and_sends_global_page() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = test_config(temp.path());
        let fetcher = FixedFetcher {
            report_json: report_with_countries(0),
        };
        let rasterizer = RecordingRasterizer::default();
        let channel = RecordingChannel::default();

        let run_report = run(&config, &fetcher, &rasterizer, channel.clone())
            .await
            .expect("pipeline run");

        // Only the synthesized Global row: one page, one image, batches of 0 and 1.
        assert_eq!(run_report.countries, 1);
        assert_eq!(run_report.images, 1);
        let sent = channel.sent();
        assert!(sent.contains(&Sent::Photo(temp.path().join("table_1.png"))));
        assert!(!sent.iter().any(|call| matches!(call, Sent::Album(_))));
    }
}

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::Render;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid palette {0}: expected red, green, blue or #rrggbb")]
    InvalidPalette(String),
    #[error("failed to launch render engine {binary}: {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },
    #[error("render engine stdin unavailable")]
    StdinUnavailable,
    #[error("failed to stream markup to render engine: {0}")]
    StdinWrite(std::io::Error),
    #[error("failed waiting for render engine: {0}")]
    Wait(std::io::Error),
    #[error("render engine failed: {0}")]
    Engine(String),
}

pub trait Rasterize {
    async fn rasterize(&self, markup: &str, output_path: &Path) -> Result<(), RenderError>;
}

/// Shells out to wkhtmltoimage, feeding the markup on stdin. The engine is an
/// opaque collaborator; all we observe is its exit status and stderr.
pub struct WkhtmlRasterizer {
    binary: String,
    quiet: bool,
}

impl WkhtmlRasterizer {
    pub fn from_config(config: &Render) -> Self {
        Self {
            binary: config.engine_binary.clone(),
            quiet: config.quiet,
        }
    }
}

impl Rasterize for WkhtmlRasterizer {
    async fn rasterize(&self, markup: &str, output_path: &Path) -> Result<(), RenderError> {
        let mut command = Command::new(&self.binary);
        if self.quiet {
            command.arg("--quiet");
        }
        command
            .arg("--format")
            .arg("png")
            .arg("-")
            .arg(output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| RenderError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        let mut stdin = child.stdin.take().ok_or(RenderError::StdinUnavailable)?;
        stdin
            .write_all(markup.as_bytes())
            .await
            .map_err(RenderError::StdinWrite)?;
        drop(stdin);

        let output = child.wait_with_output().await.map_err(RenderError::Wait)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Engine(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

pub fn page_image_path(output_dir: &Path, page_index: usize) -> PathBuf {
    output_dir.join(format!("table_{}.png", page_index))
}

//! Thin shim over the yt-dlp metadata backend: descriptor retrieval via
//! `yt-dlp -J`, download/transcode trigger via the same binary. No
//! classification logic lives here; backend errors pass through verbatim
//! for the caller to wrap.

use std::path::Path;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use katalog_descriptor_api::url::Url;
use katalog_descriptor_api::{async_trait, DescriptorSource, InfoJson};
use katalog_download_plan::DownloadPlan;
use tokio::process::Command;

pub struct YtDlpSource {
    binary: String,
}

impl YtDlpSource {
    pub fn new() -> Self {
        YtDlpSource {
            binary: "yt-dlp".to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        YtDlpSource {
            binary: binary.into(),
        }
    }

    /// Hand a resolved plan back to the backend.
    pub async fn download(&self, url: &Url, plan: &DownloadPlan, output_dir: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--no-playlist", "--no-warnings"]);
        cmd.arg("--paths").arg(output_dir);
        cmd.args(plan_args(plan));
        cmd.arg("--").arg(url.as_str());
        cmd.stdin(Stdio::null());

        log::debug!("invoking {} for {}", self.binary, url);
        let status = cmd
            .status()
            .await
            .with_context(|| format!("spawning {}", self.binary))?;
        if !status.success() {
            bail!("{} exited with status {:?}", self.binary, status.code());
        }
        Ok(())
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new()
    }
}

fn plan_args(plan: &DownloadPlan) -> Vec<String> {
    match plan {
        DownloadPlan::BestMuxed => vec![
            "-f".to_string(),
            "bestvideo+bestaudio/best".to_string(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
        ],
        DownloadPlan::Direct { format_id } => vec!["-f".to_string(), format_id.clone()],
        DownloadPlan::ExtractAudio { codec, .. } => vec![
            "-f".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            codec.backend_name().to_string(),
            "--audio-quality".to_string(),
            codec.preferred_quality().to_string(),
        ],
    }
}

#[async_trait]
impl DescriptorSource for YtDlpSource {
    async fn fetch_info(&self, url: &Url) -> Result<InfoJson> {
        let output = Command::new(&self.binary)
            .args(["--dump-single-json", "--no-warnings", "--no-playlist"])
            .arg("--")
            .arg(url.as_str())
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("spawning {}", self.binary))?;
        if !output.status.success() {
            bail!(
                "{} exited with status {:?}: {}",
                self.binary,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        serde_json::from_slice(&output.stdout).context("decoding backend metadata")
    }
}

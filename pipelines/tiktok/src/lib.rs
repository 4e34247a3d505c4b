//! TikTok pipeline. The backend almost never exposes split streams here,
//! so classification is strict: only fully-specified muxed h264/h265+aac
//! variants make it in, everything else is dropped. Variants often repeat
//! the same resolution at different rates, so dedup is by raw identifier,
//! ranking is by height alone, and the MP3 conversion option is always
//! synthesized from the top entry.

use katalog_descriptor_api::coerce::coerce_int;
use katalog_descriptor_api::url::Url;
use katalog_descriptor_api::{
    Catalog, InfoJson, PlatformMatch, PlatformPipeline, StreamDescriptor, StreamKind,
};
use katalog_engine::pipeline::{self, PlatformPolicy};
use katalog_engine::organize;
use once_cell::sync::Lazy;

/// Synthetic variant the backend lists alongside the real streams; it
/// duplicates the best one under a watermark-free alias.
const PLACEHOLDER_ID: &str = "download";

const MUXED_VIDEO_CODECS: [&str; 2] = ["h264", "h265"];

pub struct TikTokPipeline {}

fn codec_of(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("none").trim().to_lowercase()
}

impl PlatformPolicy for TikTokPipeline {
    fn platform_name(&self, _info: &InfoJson) -> String {
        "TikTok".to_string()
    }

    fn keep(&self, fmt: &StreamDescriptor) -> bool {
        fmt.format_id.as_deref() != Some(PLACEHOLDER_ID)
    }

    fn classify(&self, fmt: &StreamDescriptor) -> StreamKind {
        let vcodec = codec_of(&fmt.vcodec);
        let acodec = codec_of(&fmt.acodec);
        if MUXED_VIDEO_CODECS.contains(&vcodec.as_str()) && acodec == "aac" {
            StreamKind::Complete
        } else {
            StreamKind::Unknown
        }
    }

    fn bitrate_proxy(&self, fmt: &StreamDescriptor) -> i64 {
        coerce_int(fmt.tbr, 0)
    }

    fn complete_codec(&self, fmt: &StreamDescriptor) -> Option<String> {
        Some(codec_of(&fmt.vcodec))
    }

    fn complete_key(
        &self,
        fmt: &StreamDescriptor,
        _resolution: &str,
        _ext: &str,
        _bitrate_proxy: i64,
    ) -> String {
        fmt.format_id.clone().unwrap_or_default()
    }

    fn organize(&self, catalog: &mut Catalog) {
        organize::sort_desc_or_keep(&mut catalog.complete_videos, |v| v.height as f64);
        if let Some(best) = catalog.complete_videos.first() {
            catalog.audio_only.push(organize::mp3_conversion(&best.id));
        }
    }
}

impl PlatformMatch for TikTokPipeline {
    fn match_platform(&self, url: &Url) -> bool {
        Some(url)
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .and_then(|u| u.host_str())
            .map(|host| {
                let host = host.to_lowercase();
                host == "tiktok.com" || host.ends_with(".tiktok.com")
            })
            .unwrap_or(false)
    }
}

impl PlatformPipeline for TikTokPipeline {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    fn build_catalog(&self, info: &InfoJson) -> Catalog {
        pipeline::run(self, info)
    }
}

pub static PIPELINES: Lazy<Vec<Box<dyn PlatformPipeline>>> =
    Lazy::new(|| vec![Box::new(TikTokPipeline {})]);

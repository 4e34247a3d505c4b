//! The shared descriptor pipeline: filter, classify, normalize, dedup,
//! organize. Platform quirks come in through [`PlatformPolicy`], whose
//! default methods are the generic behavior; a platform crate overrides
//! only the hooks where its backend metadata actually differs.

use std::collections::HashSet;

use katalog_descriptor_api::coerce::{coerce_float, coerce_int};
use katalog_descriptor_api::{
    AudioOption, Catalog, CompleteOption, InfoJson, StreamDescriptor, StreamKind, VideoInfo,
    VideoOption,
};

use crate::{classify, dedup, normalize, organize};

/// Container formats that never yield a usable download.
const JUNK_EXTS: [&str; 2] = ["mhtml", "3gp"];
/// Identifier fragments marking storyboards and other placeholder variants.
const JUNK_ID_FRAGMENTS: [&str; 3] = ["-drc", "storyboard", "sb-"];

pub trait PlatformPolicy {
    /// Display name for the catalog header.
    fn platform_name(&self, info: &InfoJson) -> String {
        info.extractor_key
            .clone()
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Pre-filter, applied before classification.
    fn keep(&self, fmt: &StreamDescriptor) -> bool {
        let ext = fmt.ext.as_deref().unwrap_or("").to_lowercase();
        if JUNK_EXTS.contains(&ext.as_str()) {
            return false;
        }
        let id = fmt.format_id.as_deref().unwrap_or("").to_lowercase();
        if JUNK_ID_FRAGMENTS.iter().any(|frag| id.contains(frag)) {
            return false;
        }
        // placeholder ids some services report with no dimensions attached
        if ["sd", "hd"].contains(&id.as_str())
            && coerce_int(fmt.height, 0) == 0
            && coerce_int(fmt.width, 0) == 0
        {
            return false;
        }
        true
    }

    fn classify(&self, fmt: &StreamDescriptor) -> StreamKind {
        classify::classify(fmt)
    }

    /// Second chance for descriptors the cascade could not place. `None`
    /// (the default) drops them.
    fn reclassify_unknown(&self, _fmt: &StreamDescriptor) -> Option<StreamKind> {
        None
    }

    /// Bitrate figure used for ranking and dedup of video-like entries.
    fn bitrate_proxy(&self, fmt: &StreamDescriptor) -> i64 {
        normalize::estimate_bitrate(fmt)
    }

    /// Codec tag for complete entries; `None` keeps them codec-less.
    fn complete_codec(&self, _fmt: &StreamDescriptor) -> Option<String> {
        None
    }

    /// Dedup key for complete entries.
    fn complete_key(
        &self,
        _fmt: &StreamDescriptor,
        resolution: &str,
        ext: &str,
        bitrate_proxy: i64,
    ) -> String {
        dedup::complete_key(resolution, ext, bitrate_proxy)
    }

    /// Final ranking and augmentation.
    fn organize(&self, catalog: &mut Catalog) {
        organize::organize(catalog);
    }
}

/// One pass over a descriptor list. Pure: all working state (seen-key sets,
/// accumulators) lives on this stack frame.
pub fn run<P: PlatformPolicy + ?Sized>(policy: &P, info: &InfoJson) -> Catalog {
    let mut catalog = Catalog::new(VideoInfo {
        id: info.id.clone().unwrap_or_default(),
        title: info.title.clone().unwrap_or_else(|| "Unknown".to_string()),
        duration: coerce_float(info.duration, 0.0),
        thumbnail: info.thumbnail.clone().unwrap_or_default(),
        uploader: info
            .uploader
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        webpage_url: info.webpage_url.clone().unwrap_or_default(),
        platform: policy.platform_name(info),
    });

    let mut seen_complete = HashSet::new();
    let mut seen_video = HashSet::new();
    let mut seen_audio = HashSet::new();

    for fmt in &info.formats {
        if !policy.keep(fmt) {
            continue;
        }

        let mut kind = policy.classify(fmt);
        if kind == StreamKind::Unknown {
            kind = policy
                .reclassify_unknown(fmt)
                .unwrap_or(StreamKind::Unknown);
        }
        if kind == StreamKind::Unknown {
            log::debug!("dropping unclassifiable variant {:?}", fmt.format_id);
            continue;
        }

        let id = fmt.format_id.clone().unwrap_or_default();
        let ext = fmt.ext.as_deref().unwrap_or("").to_lowercase();
        let protocol = fmt.protocol.clone().unwrap_or_else(|| "https".to_string());
        let size_mb = normalize::size_mb(fmt);

        match kind {
            StreamKind::Audio => {
                let bitrate = normalize::estimate_bitrate(fmt);
                let codec = normalize::codec_short(fmt.acodec.as_deref());
                if !seen_audio.insert(dedup::audio_key(&ext, bitrate, &codec)) {
                    continue;
                }
                catalog.audio_only.push(AudioOption {
                    id,
                    label: format!("Audio {} {}kbps", ext.to_uppercase(), bitrate),
                    ext: ext.to_uppercase(),
                    codec,
                    bitrate,
                    size_mb,
                    protocol,
                    convert: false,
                    source: None,
                });
            }
            StreamKind::Video => {
                let codec = normalize::codec_short(fmt.vcodec.as_deref());
                let tbr = policy.bitrate_proxy(fmt);
                let resolution = normalize::resolution_label(fmt.height, fmt.width);
                if !seen_video.insert(dedup::video_key(&resolution, &ext, &codec, tbr)) {
                    continue;
                }
                let fps = coerce_int(fmt.fps, 0);
                catalog.video_only.push(VideoOption {
                    id,
                    label: format!("{} {}", ext.to_uppercase(), resolution),
                    ext: ext.to_uppercase(),
                    resolution,
                    width: coerce_int(fmt.width, 0),
                    height: coerce_int(fmt.height, 0),
                    fps: (fps > 0).then_some(fps),
                    codec,
                    tbr,
                    size_mb,
                    protocol,
                });
            }
            StreamKind::Complete => {
                let tbr = policy.bitrate_proxy(fmt);
                let resolution = normalize::resolution_label(fmt.height, fmt.width);
                if !seen_complete.insert(policy.complete_key(fmt, &resolution, &ext, tbr)) {
                    continue;
                }
                let codec = policy.complete_codec(fmt);
                let tag = codec.clone().unwrap_or_else(|| "Complete".to_string());
                catalog.complete_videos.push(CompleteOption {
                    id,
                    label: format!("{} {} ({})", ext.to_uppercase(), resolution, tag),
                    ext: ext.to_uppercase(),
                    resolution,
                    width: coerce_int(fmt.width, 0),
                    height: coerce_int(fmt.height, 0),
                    codec,
                    tbr,
                    size_mb,
                    protocol,
                });
            }
            StreamKind::Unknown => {}
        }
    }

    policy.organize(&mut catalog);
    catalog
}

#[cfg(test)]
mod tests {
    use katalog_descriptor_api::{InfoJson, StreamDescriptor};

    use super::{run, PlatformPolicy};

    struct Defaults {}

    impl PlatformPolicy for Defaults {}

    fn info(formats: Vec<StreamDescriptor>) -> InfoJson {
        InfoJson {
            id: Some("vid1".to_string()),
            title: Some("a title".to_string()),
            extractor_key: Some("Youtube".to_string()),
            formats,
            ..Default::default()
        }
    }

    fn muxed(id: &str, height: f64, tbr: f64) -> StreamDescriptor {
        StreamDescriptor {
            format_id: Some(id.to_string()),
            ext: Some("mp4".to_string()),
            vcodec: Some("avc1.640028".to_string()),
            acodec: Some("mp4a.40.2".to_string()),
            height: Some(height),
            width: Some(height * 16.0 / 9.0),
            tbr: Some(tbr),
            ..Default::default()
        }
    }

    #[test]
    fn header_defaults_applied() {
        let catalog = run(&Defaults {}, &info(vec![]));
        assert_eq!(catalog.video_info.id, "vid1");
        assert_eq!(catalog.video_info.uploader, "Unknown");
        assert_eq!(catalog.video_info.platform, "Youtube");
    }

    #[test]
    fn junk_variants_are_filtered() {
        let formats = vec![
            StreamDescriptor {
                format_id: Some("sb-0".to_string()),
                ext: Some("mhtml".to_string()),
                ..Default::default()
            },
            StreamDescriptor {
                format_id: Some("storyboard-1".to_string()),
                ext: Some("mp4".to_string()),
                height: Some(90.0),
                ..Default::default()
            },
            StreamDescriptor {
                format_id: Some("sd".to_string()),
                ext: Some("mp4".to_string()),
                ..Default::default()
            },
        ];
        let catalog = run(&Defaults {}, &info(formats));
        assert!(catalog.complete_videos.is_empty());
        assert!(catalog.video_only.is_empty());
        assert!(catalog.audio_only.is_empty());
    }

    #[test]
    fn unknown_variants_never_reach_the_catalog() {
        let catalog = run(&Defaults {}, &info(vec![StreamDescriptor::default()]));
        assert!(catalog.complete_videos.is_empty());
        assert!(catalog.video_only.is_empty());
        assert!(catalog.audio_only.is_empty());
    }

    #[test]
    fn composite_key_dedup_keeps_first() {
        let first = muxed("101", 720.0, 1400.0);
        let twin = muxed("202", 720.0, 1400.0);
        let catalog = run(&Defaults {}, &info(vec![first, twin]));
        assert_eq!(catalog.complete_videos.len(), 1);
        assert_eq!(catalog.complete_videos[0].id, "101");
    }

    #[test]
    fn pipeline_is_idempotent() {
        let descriptors = vec![
            muxed("22", 720.0, 1400.0),
            muxed("18", 360.0, 700.0),
            StreamDescriptor {
                format_id: Some("140".to_string()),
                ext: Some("m4a".to_string()),
                vcodec: Some("none".to_string()),
                acodec: Some("mp4a.40.2".to_string()),
                abr: Some(128.0),
                ..Default::default()
            },
        ];
        let payload = info(descriptors);
        let first = run(&Defaults {}, &payload);
        let second = run(&Defaults {}, &payload);
        assert_eq!(first, second);
    }

    #[test]
    fn missing_numerics_score_as_zero() {
        // video-only descriptor with no height, rate or size anywhere
        let sparse = StreamDescriptor {
            format_id: Some("247".to_string()),
            ext: Some("webm".to_string()),
            vcodec: Some("vp9".to_string()),
            acodec: Some("none".to_string()),
            ..Default::default()
        };
        let catalog = run(&Defaults {}, &info(vec![sparse, muxed("22", 720.0, 1400.0)]));
        assert_eq!(catalog.video_only.len(), 1);
        let entry = &catalog.video_only[0];
        assert_eq!(entry.resolution, "unknown");
        assert_eq!(entry.height, 0);
        assert_eq!(entry.size_mb, 0.0);
    }
}

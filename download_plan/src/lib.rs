//! Resolution of catalog identifiers into download instructions.
//!
//! A catalog hands out two kinds of identifier: real ones that map straight
//! onto a backend stream, and synthesized ones (`mp3_320`, anything
//! prefixed `m4a_extract_`) meaning "no such stream exists — fetch the best
//! matching audio and transcode it". The download collaborator receives the
//! distinction as a [`DownloadPlan`] instead of re-parsing id strings.

use katalog_descriptor_api::Catalog;
use serde::Serialize;

const MP3_CONVERSION_ID: &str = "mp3_320";
const M4A_EXTRACT_PREFIX: &str = "m4a_extract_";

#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AudioCodec {
    Mp3,
    M4a,
}

impl AudioCodec {
    pub fn backend_name(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::M4a => "m4a",
        }
    }

    pub fn preferred_quality(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "320",
            AudioCodec::M4a => "256",
        }
    }
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub enum DownloadPlan {
    /// No preference given: best video plus best audio, muxed.
    BestMuxed,
    /// A stream that exists verbatim under this id.
    Direct { format_id: String },
    /// Synthesized id: extract audio from the stream named in `source`
    /// (advisory — the backend may simply take its best audio track).
    ExtractAudio {
        source: Option<String>,
        codec: AudioCodec,
    },
}

pub fn resolve(catalog: &Catalog, format_id: Option<&str>) -> DownloadPlan {
    match format_id {
        None | Some("auto") => DownloadPlan::BestMuxed,
        Some(MP3_CONVERSION_ID) => DownloadPlan::ExtractAudio {
            source: conversion_source(catalog),
            codec: AudioCodec::Mp3,
        },
        Some(id) if id.starts_with(M4A_EXTRACT_PREFIX) => DownloadPlan::ExtractAudio {
            source: Some(id[M4A_EXTRACT_PREFIX.len()..].to_string()),
            codec: AudioCodec::M4a,
        },
        Some(id) => DownloadPlan::Direct {
            format_id: id.to_string(),
        },
    }
}

fn conversion_source(catalog: &Catalog) -> Option<String> {
    catalog
        .audio_only
        .iter()
        .find(|a| a.id == MP3_CONVERSION_ID)
        .and_then(|a| a.source.clone())
}

#[cfg(test)]
mod tests {
    use katalog_descriptor_api::{AudioOption, Catalog, VideoInfo};

    use super::{resolve, AudioCodec, DownloadPlan};

    fn catalog_with_conversion(source: &str) -> Catalog {
        let mut catalog = Catalog::new(VideoInfo::default());
        catalog.audio_only.push(AudioOption {
            id: "mp3_320".to_string(),
            ext: "MP3".to_string(),
            codec: "mp3".to_string(),
            bitrate: 320,
            size_mb: 0.0,
            protocol: "convert".to_string(),
            label: String::new(),
            convert: true,
            source: Some(source.to_string()),
        });
        catalog
    }

    #[test]
    fn absent_or_auto_is_best_muxed() {
        let catalog = Catalog::new(VideoInfo::default());
        assert_eq!(resolve(&catalog, None), DownloadPlan::BestMuxed);
        assert_eq!(resolve(&catalog, Some("auto")), DownloadPlan::BestMuxed);
    }

    #[test]
    fn mp3_conversion_resolves_to_extraction() {
        let plan = resolve(&catalog_with_conversion("101"), Some("mp3_320"));
        assert_eq!(
            plan,
            DownloadPlan::ExtractAudio {
                source: Some("101".to_string()),
                codec: AudioCodec::Mp3,
            }
        );
    }

    #[test]
    fn m4a_prefix_carries_its_own_source() {
        let catalog = Catalog::new(VideoInfo::default());
        let plan = resolve(&catalog, Some("m4a_extract_140"));
        assert_eq!(
            plan,
            DownloadPlan::ExtractAudio {
                source: Some("140".to_string()),
                codec: AudioCodec::M4a,
            }
        );
    }

    #[test]
    fn anything_else_is_direct() {
        let catalog = Catalog::new(VideoInfo::default());
        assert_eq!(
            resolve(&catalog, Some("137")),
            DownloadPlan::Direct {
                format_id: "137".to_string()
            }
        );
    }
}

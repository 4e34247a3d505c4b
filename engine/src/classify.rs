//! Stream-type detection for one descriptor.
//!
//! Metadata completeness varies enormously by source service, so detection
//! is a cascade from the most reliable signal (explicit naming) down to the
//! least (container extension plus transport guesswork). A missing field
//! moves a descriptor one rung down the ladder instead of misclassifying it.

use katalog_descriptor_api::coerce::coerce_int;
use katalog_descriptor_api::{StreamDescriptor, StreamKind};

use crate::normalize;

/// Identifier/note substrings that reliably mark an audio track.
pub const AUDIO_KEYWORDS: [&str; 5] = ["audio", "mp3", "m4a", "opus", "aac"];

pub const AUDIO_EXTS: [&str; 7] = ["m4a", "mp3", "aac", "opus", "ogg", "flac", "wav"];
pub const VIDEO_EXTS: [&str; 5] = ["mp4", "webm", "mkv", "flv", "avi"];

const STREAMING_PROTOCOLS: [&str; 3] = ["m3u8_native", "m3u8", "http_dash_segments"];

/// Progressive downloads above this size despite missing codec metadata are
/// assumed muxed.
pub const MUXED_SIZE_CUTOFF: f64 = 500_000.0;
/// Same assumption, lower bar, for identifiers naming a muxed codec outright.
pub const CODEC_HINT_SIZE_CUTOFF: f64 = 100_000.0;

fn lower_or(field: &Option<String>, missing: &str) -> String {
    field.as_deref().unwrap_or(missing).trim().to_lowercase()
}

pub fn classify(fmt: &StreamDescriptor) -> StreamKind {
    let vcodec = lower_or(&fmt.vcodec, "none");
    let acodec = lower_or(&fmt.acodec, "none");
    let format_id = lower_or(&fmt.format_id, "");
    let format_note = lower_or(&fmt.format_note, "");
    let ext = lower_or(&fmt.ext, "");

    let height = coerce_int(fmt.height, 0);
    let width = coerce_int(fmt.width, 0);

    // explicit naming beats codec metadata, which lies more often
    if AUDIO_KEYWORDS
        .iter()
        .any(|kw| format_id.contains(kw) || format_note.contains(kw))
    {
        return StreamKind::Audio;
    }

    if vcodec == "none" && acodec != "none" {
        return StreamKind::Audio;
    }
    if vcodec != "none" && acodec == "none" {
        return StreamKind::Video;
    }
    if !["none", "unknown", ""].contains(&vcodec.as_str())
        && !["none", "unknown", ""].contains(&acodec.as_str())
    {
        return StreamKind::Complete;
    }

    // dimensions with vague (but not explicitly absent) codecs: services
    // that report "unknown"/"" for both usually mean a muxed stream.
    // Descriptors with both codecs null fall through so a platform policy
    // gets a say.
    if (height > 0 || width > 0)
        && ["unknown", ""].contains(&vcodec.as_str())
        && ["unknown", ""].contains(&acodec.as_str())
    {
        return StreamKind::Complete;
    }

    if AUDIO_EXTS.contains(&ext.as_str()) {
        return StreamKind::Audio;
    }
    if VIDEO_EXTS.contains(&ext.as_str()) && (height > 0 || width > 0) {
        let protocol = lower_or(&fmt.protocol, "");

        if (format_id.contains("h264") || format_id.contains("bytevc1"))
            && normalize::size_bytes(fmt) > CODEC_HINT_SIZE_CUTOFF
        {
            return StreamKind::Complete;
        }

        if STREAMING_PROTOCOLS.contains(&protocol.as_str()) {
            return StreamKind::Video;
        }

        if ["https", "http"].contains(&protocol.as_str()) {
            if normalize::size_bytes(fmt) > MUXED_SIZE_CUTOFF {
                return StreamKind::Complete;
            }
            return StreamKind::Video;
        }
    }

    StreamKind::Unknown
}

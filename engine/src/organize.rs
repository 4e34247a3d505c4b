//! Ranking and augmentation of an assembled catalog.

use std::cmp::Ordering;
use std::collections::HashMap;

use katalog_descriptor_api::{AudioOption, Catalog};
use once_cell::sync::Lazy;

/// Resolution tier table, built once. Unlisted labels (including
/// `"unknown"`) rank 0, so they sink without breaking the sort.
pub static RESOLUTION_RANK: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("4320p", 13.0),
        ("2160p", 12.0),
        ("1920p", 11.0),
        ("1440p", 10.0),
        ("1280p", 9.0),
        ("1080p", 8.0),
        ("960p", 7.0),
        ("852p", 6.0),
        ("720p", 5.0),
        ("640p", 4.0),
        ("568p", 3.0),
        ("480p", 2.0),
        ("416p", 1.5),
        ("360p", 1.0),
        ("240p", 0.5),
    ])
});

/// Composite rank for video-like entries: resolution tier dominates, the
/// bitrate proxy breaks ties within a tier.
pub fn quality_score(resolution: &str, bitrate_proxy: i64) -> f64 {
    let rank = RESOLUTION_RANK.get(resolution).copied().unwrap_or(0.0);
    rank * 1000.0 + bitrate_proxy as f64
}

/// Descending sort that refuses to fail: if any key comes out non-finite
/// the slice keeps its insertion order. A degraded ranking beats losing the
/// whole catalog.
pub fn sort_desc_or_keep<T, F>(items: &mut [T], score: F)
where
    F: Fn(&T) -> f64,
{
    if items.iter().any(|item| !score(item).is_finite()) {
        log::warn!("non-finite sort key, keeping insertion order");
        return;
    }
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

/// The synthesized "transcode to MP3 at 320kbps" entry. No stream with this
/// id exists; the download side derives it from the entry named in `source`.
pub fn mp3_conversion(source_id: &str) -> AudioOption {
    AudioOption {
        id: "mp3_320".to_string(),
        ext: "MP3".to_string(),
        codec: "mp3".to_string(),
        bitrate: 320,
        size_mb: 0.0,
        protocol: "convert".to_string(),
        label: "MP3 320kbps (converted)".to_string(),
        convert: true,
        source: Some(source_id.to_string()),
    }
}

/// Rank all three categories, then make sure an MP3 option exists whenever
/// anything at all is downloadable: prepended and sourced from the best
/// audio entry when real audio exists, appended and sourced from the best
/// complete video otherwise.
pub fn organize(catalog: &mut Catalog) {
    sort_desc_or_keep(&mut catalog.complete_videos, |v| {
        quality_score(&v.resolution, v.tbr)
    });
    sort_desc_or_keep(&mut catalog.video_only, |v| {
        quality_score(&v.resolution, v.tbr)
    });
    sort_desc_or_keep(&mut catalog.audio_only, |a| a.bitrate as f64);

    if !catalog.audio_only.is_empty() {
        if !catalog.audio_only.iter().any(|a| a.ext == "MP3") {
            let source = catalog.audio_only[0].id.clone();
            catalog.audio_only.insert(0, mp3_conversion(&source));
        }
    } else if let Some(best) = catalog.complete_videos.first() {
        catalog.audio_only.push(mp3_conversion(&best.id));
    }
}

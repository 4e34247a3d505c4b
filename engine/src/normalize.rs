//! Presentation-ready attributes derived from raw descriptor fields.

use katalog_descriptor_api::coerce::{coerce_float, coerce_int};
use katalog_descriptor_api::StreamDescriptor;

/// Best-effort bitrate in kbps: first explicit rate field, then an estimate
/// from the audio sample rate, then a per-container default.
pub fn estimate_bitrate(fmt: &StreamDescriptor) -> i64 {
    let explicit = [fmt.tbr, fmt.vbr, fmt.abr, fmt.bitrate]
        .into_iter()
        .map(|v| coerce_int(v, 0))
        .find(|&v| v != 0);
    if let Some(rate) = explicit {
        return rate;
    }

    let asr = coerce_int(fmt.asr, 0);
    if asr > 0 {
        return (asr as f64 / 1000.0 * 0.128).round() as i64;
    }

    match fmt.ext.as_deref().unwrap_or("").to_lowercase().as_str() {
        "m4a" => 128,
        "mp3" => 192,
        "aac" => 128,
        "opus" => 96,
        "mp4" => 500,
        "webm" => 400,
        _ => 128,
    }
}

/// First usable byte count out of the exact and approximate sizes.
pub fn size_bytes(fmt: &StreamDescriptor) -> f64 {
    [fmt.filesize, fmt.filesize_approx]
        .into_iter()
        .map(|v| coerce_float(v, 0.0))
        .find(|&v| v != 0.0)
        .unwrap_or(0.0)
}

/// Size in megabytes, rounded to two decimals; 0.0 when nothing is known.
pub fn size_mb(fmt: &StreamDescriptor) -> f64 {
    let bytes = size_bytes(fmt);
    if bytes > 0.0 {
        (bytes / (1024.0 * 1024.0) * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// `"1080p"` from the height, falling back to the width, falling back to the
/// literal `"unknown"`.
pub fn resolution_label(height: Option<f64>, width: Option<f64>) -> String {
    let h = coerce_int(height, 0);
    let w = coerce_int(width, 0);
    if h > 0 {
        format!("{h}p")
    } else if w > 0 {
        format!("{w}p")
    } else {
        "unknown".to_string()
    }
}

/// Codec name without the profile/level suffix: `avc1.640028` → `avc1`.
pub fn codec_short(raw: Option<&str>) -> String {
    match raw {
        Some(codec) => codec.split('.').next().unwrap_or(codec).to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use katalog_descriptor_api::StreamDescriptor;

    use super::{codec_short, estimate_bitrate, resolution_label, size_mb};

    #[test]
    fn bitrate_prefers_explicit_rates() {
        let fmt = StreamDescriptor {
            tbr: Some(2500.7),
            abr: Some(128.0),
            ..Default::default()
        };
        assert_eq!(estimate_bitrate(&fmt), 2500);

        let abr_only = StreamDescriptor {
            tbr: Some(0.0),
            abr: Some(128.0),
            ..Default::default()
        };
        assert_eq!(estimate_bitrate(&abr_only), 128);
    }

    #[test]
    fn bitrate_derives_from_sample_rate() {
        let fmt = StreamDescriptor {
            asr: Some(48000.0),
            ..Default::default()
        };
        assert_eq!(estimate_bitrate(&fmt), 6);
    }

    #[test]
    fn bitrate_falls_back_to_container_defaults() {
        let mp4 = StreamDescriptor {
            ext: Some("mp4".to_string()),
            ..Default::default()
        };
        assert_eq!(estimate_bitrate(&mp4), 500);
        assert_eq!(estimate_bitrate(&StreamDescriptor::default()), 128);
    }

    #[test]
    fn size_rounds_to_two_decimals() {
        let fmt = StreamDescriptor {
            filesize: Some(1_572_864.0),
            ..Default::default()
        };
        assert_eq!(size_mb(&fmt), 1.5);

        let approx_only = StreamDescriptor {
            filesize: Some(0.0),
            filesize_approx: Some(5_452_595.0),
            ..Default::default()
        };
        assert_eq!(size_mb(&approx_only), 5.2);

        assert_eq!(size_mb(&StreamDescriptor::default()), 0.0);
    }

    #[test]
    fn resolution_prefers_height() {
        assert_eq!(resolution_label(Some(1080.0), Some(1920.0)), "1080p");
        assert_eq!(resolution_label(None, Some(640.0)), "640p");
        assert_eq!(resolution_label(None, None), "unknown");
    }

    #[test]
    fn codec_short_strips_profiles() {
        assert_eq!(codec_short(Some("avc1.640028")), "avc1");
        assert_eq!(codec_short(Some("vp9")), "vp9");
        assert_eq!(codec_short(None), "unknown");
    }
}

//! Composite keys that collapse descriptors a user could not tell apart.
//!
//! The backend routinely reports several descriptors that would render
//! identically (same resolution, codec and rate under different internal
//! ids); the pipeline keeps the first one seen. Seen-key sets are local to
//! a single pipeline run.

pub fn complete_key(resolution: &str, ext: &str, bitrate_proxy: i64) -> String {
    format!("{resolution}_{ext}_{bitrate_proxy}")
}

pub fn video_key(resolution: &str, ext: &str, codec: &str, bitrate_proxy: i64) -> String {
    format!("{resolution}_{ext}_{codec}_{bitrate_proxy}")
}

pub fn audio_key(ext: &str, bitrate: i64, codec: &str) -> String {
    format!("{ext}_{bitrate}_{codec}")
}

use serde::Serialize;

/// Header block of a catalog: the source item itself, not any one variant.
#[derive(Serialize, Default, PartialEq, Clone, Debug)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    /// seconds
    pub duration: f64,
    pub thumbnail: String,
    pub uploader: String,
    pub webpage_url: String,
    pub platform: String,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct AudioOption {
    pub id: String,
    /// uppercase container extension
    pub ext: String,
    pub codec: String,
    /// kbps
    pub bitrate: i64,
    pub size_mb: f64,
    pub protocol: String,
    pub label: String,
    /// only set on synthesized conversion entries
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub convert: bool,
    /// id of the entry the conversion should be derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct VideoOption {
    pub id: String,
    pub ext: String,
    pub resolution: String,
    pub width: i64,
    pub height: i64,
    pub fps: Option<i64>,
    pub codec: String,
    /// bitrate proxy used for ranking, kbps
    pub tbr: i64,
    pub size_mb: f64,
    pub protocol: String,
    pub label: String,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct CompleteOption {
    pub id: String,
    pub ext: String,
    pub resolution: String,
    pub width: i64,
    pub height: i64,
    /// some pipelines tag muxed entries with the video codec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    pub tbr: i64,
    pub size_mb: f64,
    pub protocol: String,
    pub label: String,
}

/// The finished product: one header plus three deduplicated, quality-ordered
/// option lists. Built once per request, never cached.
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct Catalog {
    pub video_info: VideoInfo,
    pub complete_videos: Vec<CompleteOption>,
    pub video_only: Vec<VideoOption>,
    pub audio_only: Vec<AudioOption>,
}

impl Catalog {
    pub fn new(video_info: VideoInfo) -> Self {
        Catalog {
            video_info,
            complete_videos: Vec::new(),
            video_only: Vec::new(),
            audio_only: Vec::new(),
        }
    }
}

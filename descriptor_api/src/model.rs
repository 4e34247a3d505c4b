use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One encoded variant of a source media item, as reported by the metadata
/// backend. Sources disagree wildly on which fields they fill in and with
/// what types, so every field is optional and deserialization is lenient:
/// a junk-typed value becomes `None` instead of failing the whole payload.
#[derive(Deserialize, Default, PartialEq, Clone, Debug)]
#[serde(default)]
pub struct StreamDescriptor {
    #[serde(deserialize_with = "lenient_string")]
    pub format_id: Option<String>,
    /// container extension
    #[serde(deserialize_with = "lenient_string")]
    pub ext: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub vcodec: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub acodec: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub height: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fps: Option<f64>,
    /// total bitrate, kbps
    #[serde(deserialize_with = "lenient_f64")]
    pub tbr: Option<f64>,
    /// video bitrate, kbps
    #[serde(deserialize_with = "lenient_f64")]
    pub vbr: Option<f64>,
    /// audio bitrate, kbps
    #[serde(deserialize_with = "lenient_f64")]
    pub abr: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub bitrate: Option<f64>,
    /// audio sample rate, Hz
    #[serde(deserialize_with = "lenient_f64")]
    pub asr: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub filesize: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub filesize_approx: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub protocol: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub format_note: Option<String>,
}

/// The extraction payload: whatever the backend knows about one source URL,
/// including every encoded variant it found. Named after the backend's
/// `.info.json` dump format.
#[derive(Deserialize, Default, PartialEq, Clone, Debug)]
#[serde(default)]
pub struct InfoJson {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub uploader: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub webpage_url: Option<String>,
    /// backend's name for the source service
    #[serde(deserialize_with = "lenient_string")]
    pub extractor_key: Option<String>,
    #[serde(deserialize_with = "lenient_formats")]
    pub formats: Vec<StreamDescriptor>,
}

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    })
}

fn lenient_formats<'de, D>(de: D) -> Result<Vec<StreamDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

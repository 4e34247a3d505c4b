//! Instagram pipeline. The backend's Instagram metadata frequently omits
//! both codec fields on perfectly valid muxed streams, so descriptors the
//! cascade could not place are kept as complete when both dimensions are
//! present. Bitrate ranking uses the reported `tbr` verbatim rather than
//! the estimator.

use katalog_descriptor_api::coerce::coerce_int;
use katalog_descriptor_api::url::Url;
use katalog_descriptor_api::{
    Catalog, InfoJson, PlatformMatch, PlatformPipeline, StreamDescriptor, StreamKind,
};
use katalog_engine::pipeline::{self, PlatformPolicy};
use once_cell::sync::Lazy;

pub struct InstagramPipeline {}

impl PlatformPolicy for InstagramPipeline {
    fn platform_name(&self, _info: &InfoJson) -> String {
        "Instagram".to_string()
    }

    fn reclassify_unknown(&self, fmt: &StreamDescriptor) -> Option<StreamKind> {
        let height = coerce_int(fmt.height, 0);
        let width = coerce_int(fmt.width, 0);
        (height > 0 && width > 0).then_some(StreamKind::Complete)
    }

    fn bitrate_proxy(&self, fmt: &StreamDescriptor) -> i64 {
        coerce_int(fmt.tbr, 0)
    }
}

impl PlatformMatch for InstagramPipeline {
    fn match_platform(&self, url: &Url) -> bool {
        Some(url)
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .and_then(|u| u.host_str())
            .map(|host| {
                let host = host.to_lowercase();
                host == "instagram.com" || host.ends_with(".instagram.com")
            })
            .unwrap_or(false)
    }
}

impl PlatformPipeline for InstagramPipeline {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn build_catalog(&self, info: &InfoJson) -> Catalog {
        pipeline::run(self, info)
    }
}

pub static PIPELINES: Lazy<Vec<Box<dyn PlatformPipeline>>> =
    Lazy::new(|| vec![Box::new(InstagramPipeline {})]);

#[cfg(test)]
mod tests {
    use katalog_descriptor_api::url::Url;
    use katalog_descriptor_api::{InfoJson, PlatformMatch, PlatformPipeline, StreamDescriptor};

    use super::InstagramPipeline;

    #[test]
    fn match_instagram_hosts_only() {
        let instagram = InstagramPipeline {};
        for good in [
            "https://www.instagram.com/reel/Cx1/",
            "https://instagram.com/p/Cx1/",
        ] {
            assert!(instagram.match_platform(&Url::parse(good).unwrap()), "{good}");
        }
        for bad in [
            "https://www.youtube.com/watch?v=x",
            "https://notinstagram.com/p/1",
        ] {
            assert!(!instagram.match_platform(&Url::parse(bad).unwrap()), "{bad}");
        }
    }

    #[test]
    fn codecless_with_both_dimensions_is_kept_as_complete() {
        let info = InfoJson {
            formats: vec![StreamDescriptor {
                format_id: Some("dash-0".to_string()),
                ext: Some("mp4".to_string()),
                height: Some(1080.0),
                width: Some(1920.0),
                tbr: Some(2200.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let catalog = InstagramPipeline {}.build_catalog(&info);
        assert_eq!(catalog.video_info.platform, "Instagram");
        assert_eq!(catalog.complete_videos.len(), 1);
        let entry = &catalog.complete_videos[0];
        assert_eq!(entry.resolution, "1080p");
        assert_eq!(entry.width, 1920);
        assert_eq!(entry.tbr, 2200);
    }

    #[test]
    fn codecless_with_one_dimension_is_still_dropped() {
        let info = InfoJson {
            formats: vec![StreamDescriptor {
                format_id: Some("dash-1".to_string()),
                height: Some(1080.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let catalog = InstagramPipeline {}.build_catalog(&info);
        assert!(catalog.complete_videos.is_empty());
        assert!(catalog.audio_only.is_empty());
    }

    #[test]
    fn raw_tbr_drives_ranking() {
        let variant = |id: &str, tbr: f64| StreamDescriptor {
            format_id: Some(id.to_string()),
            ext: Some("mp4".to_string()),
            height: Some(720.0),
            width: Some(1280.0),
            tbr: Some(tbr),
            ..Default::default()
        };
        let info = InfoJson {
            formats: vec![variant("low", 800.0), variant("high", 2400.0)],
            ..Default::default()
        };
        let catalog = InstagramPipeline {}.build_catalog(&info);
        assert_eq!(catalog.complete_videos.len(), 2);
        assert_eq!(catalog.complete_videos[0].id, "high");
    }
}

//! The platform-agnostic pipeline: cascade classification, shared junk
//! filter, shared organizer, no overrides. Routing keeps it last as the
//! terminal fallback, so it must match every URL.

use katalog_descriptor_api::url::Url;
use katalog_descriptor_api::{Catalog, InfoJson, PlatformMatch, PlatformPipeline};
use katalog_engine::pipeline::{self, PlatformPolicy};
use once_cell::sync::Lazy;

pub struct GenericPipeline {}

impl PlatformPolicy for GenericPipeline {}

impl PlatformMatch for GenericPipeline {
    fn match_platform(&self, _url: &Url) -> bool {
        true
    }
}

impl PlatformPipeline for GenericPipeline {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn build_catalog(&self, info: &InfoJson) -> Catalog {
        pipeline::run(self, info)
    }
}

pub static PIPELINES: Lazy<Vec<Box<dyn PlatformPipeline>>> =
    Lazy::new(|| vec![Box::new(GenericPipeline {})]);

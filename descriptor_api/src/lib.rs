mod catalog;
pub mod coerce;
mod error;
mod model;

pub use catalog::{AudioOption, Catalog, CompleteOption, VideoInfo, VideoOption};
pub use error::CatalogError;
pub use model::{InfoJson, StreamDescriptor};

pub use anyhow;
pub use async_trait::async_trait;
pub use url;

use anyhow::Result;
use smart_default::SmartDefault;
use url::Url;

/// What one descriptor turned out to carry.
#[derive(SmartDefault, PartialEq, Eq, Clone, Copy, Debug)]
pub enum StreamKind {
    #[default]
    Unknown,
    Audio,
    Video,
    Complete,
}

pub trait PlatformMatch {
    fn match_platform(&self, url: &Url) -> bool;
}

/// One platform's rendition of the descriptor pipeline. Implementations are
/// pure and hold no state, so a single instance may serve any number of
/// concurrent requests.
pub trait PlatformPipeline: PlatformMatch + Sync + Send {
    fn name(&self) -> &'static str;

    fn build_catalog(&self, info: &InfoJson) -> Catalog;
}

/// The upstream collaborator that turns a URL into descriptors. The engine
/// never cares how; see `katalog_extraction_ytdlp` for the shipped shim.
#[async_trait]
pub trait DescriptorSource: Sync + Send {
    async fn fetch_info(&self, url: &Url) -> Result<InfoJson>;
}

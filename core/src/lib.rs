use katalog_pipeline_generic::GenericPipeline;
use once_cell::sync::Lazy;

use katalog_descriptor_api::url::Url;
pub use katalog_descriptor_api::*;
pub use katalog_download_plan as download_plan;
pub use katalog_extraction_ytdlp::YtDlpSource;

/// Platform-specific pipelines first; the generic fallback matches
/// everything and must stay last.
pub static DEFAULT_PIPELINE_LIST: Lazy<Vec<&'static dyn PlatformPipeline>> = Lazy::new(|| {
    let mut pipelines: Vec<&'static dyn PlatformPipeline> = Vec::new();
    pipelines.extend(katalog_pipeline_tiktok::PIPELINES.iter().map(|p| p.as_ref()));
    pipelines.extend(
        katalog_pipeline_instagram::PIPELINES
            .iter()
            .map(|p| p.as_ref()),
    );
    pipelines.extend(
        katalog_pipeline_generic::PIPELINES
            .iter()
            .map(|p| p.as_ref()),
    );
    pipelines
});

pub struct CatalogClient {
    pipelines: Vec<&'static dyn PlatformPipeline>,
    source: Box<dyn DescriptorSource>,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_source(Box::new(YtDlpSource::new()))
    }

    pub fn with_source(source: Box<dyn DescriptorSource>) -> Self {
        CatalogClient {
            pipelines: DEFAULT_PIPELINE_LIST.to_vec(),
            source,
        }
    }

    /// First pipeline claiming the URL. The default list always ends in the
    /// generic fallback, so a plain instance is the safety net for lists
    /// that do not.
    pub fn route(&self, url: &Url) -> &dyn PlatformPipeline {
        static FALLBACK: GenericPipeline = GenericPipeline {};
        self.pipelines
            .iter()
            .copied()
            .find(|pipeline| pipeline.match_platform(url))
            .unwrap_or(&FALLBACK)
    }

    /// The pure half: route and classify an already-fetched payload.
    pub fn catalog_from_info(&self, url: &Url, info: &InfoJson) -> Catalog {
        self.route(url).build_catalog(info)
    }

    /// Fetch descriptors upstream and build the catalog. An upstream
    /// refusal surfaces as [`CatalogError::Extraction`], carrying the
    /// backend's message for the caller.
    pub async fn catalog_for_url(&self, url: &Url) -> Result<Catalog, CatalogError> {
        let info = self
            .source
            .fetch_info(url)
            .await
            .map_err(|e| CatalogError::Extraction(format!("{e:#}")))?;
        Ok(self.catalog_from_info(url, &info))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

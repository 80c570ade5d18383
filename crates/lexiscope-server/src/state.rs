//! Shared application state.

use lexiscope_core::{LexiscopeConfig, Result};
use lexiscope_runtime::AnalysisPipeline;
use lexiscope_scrape::PageExtractor;

/// Capability handles built once at startup and shared by every handler.
pub struct AppState {
    pub pipeline: AnalysisPipeline,
    pub pages: PageExtractor,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, pages: PageExtractor) -> Self {
        Self { pipeline, pages }
    }

    pub fn from_config(config: &LexiscopeConfig) -> Result<Self> {
        Ok(Self::new(AnalysisPipeline::from_config(config), PageExtractor::new()?))
    }
}

//! Rendering options

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::image_url::{AssetUrlResolver, ImageUrlResolver};

/// Default base URL for asset references
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://cdn.sanity.io";

/// Options threaded through every serializer
#[derive(Clone)]
pub struct Options {
    /// Project owning referenced image assets
    pub project_id: Option<String>,

    /// Dataset owning referenced image assets
    pub dataset: Option<String>,

    /// Base URL for image asset references
    pub image_base_url: String,

    /// Query parameters appended to resolved image URLs (`w`, `h`, `fit`, ...)
    pub image_options: IndexMap<String, String>,

    /// `class` attribute of the container element
    pub class_name: Option<String>,

    /// Wrap a lone top-level node in the container anyway
    pub render_container_on_single_child: bool,

    /// Resolves image blocks to URLs
    pub image_url_resolver: Arc<dyn ImageUrlResolver>,
}

impl Options {
    /// Set the project and dataset used to resolve asset references
    pub fn with_project(mut self, project_id: &str, dataset: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self.dataset = Some(dataset.to_string());
        self
    }

    pub fn with_image_option(mut self, name: &str, value: &str) -> Self {
        self.image_options.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_image_url_resolver<R>(mut self, resolver: R) -> Self
    where
        R: ImageUrlResolver + 'static,
    {
        self.image_url_resolver = Arc::new(resolver);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_options: IndexMap::new(),
            class_name: None,
            render_container_on_single_child: false,
            image_url_resolver: Arc::new(AssetUrlResolver),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("image_base_url", &self.image_base_url)
            .field("image_options", &self.image_options)
            .field("class_name", &self.class_name)
            .field(
                "render_container_on_single_child",
                &self.render_container_on_single_child,
            )
            .finish_non_exhaustive()
    }
}

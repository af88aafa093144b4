//! Image URL resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::form_urlencoded;

use block_content_core::Block;

use crate::options::Options;

/// `image-<id>-<width>x<height>-<format>`
static ASSET_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^image-([A-Za-z0-9_]+)-(\d+)x(\d+)-([a-z0-9]+)$").expect("valid asset ref regex")
});

/// Error type for image URL resolution
#[derive(Debug, thiserror::Error)]
pub enum ImageUrlError {
    #[error("Image does not have required `asset` property")]
    MissingAsset,

    #[error("Unable to generate image URL, `projectId` and `dataset` must be set in options")]
    MissingProjectConfig,

    #[error("Malformed image asset reference: {0}")]
    MalformedReference(String),
}

/// What a resolver gets to see of the image being rendered
#[derive(Debug, Clone, Copy)]
pub struct ImageUrlContext<'a> {
    pub node: &'a Block,
    pub options: &'a Options,
    /// Rendering inside a block's inline content
    pub is_inline: bool,
}

impl<'a> ImageUrlContext<'a> {
    pub fn new(node: &'a Block, options: &'a Options) -> Self {
        Self {
            node,
            options,
            is_inline: false,
        }
    }
}

/// Maps an image block to the URL it should be loaded from
pub trait ImageUrlResolver: Send + Sync {
    fn resolve(&self, ctx: &ImageUrlContext<'_>) -> Result<String, ImageUrlError>;
}

impl<F> ImageUrlResolver for F
where
    F: Fn(&ImageUrlContext<'_>) -> Result<String, ImageUrlError> + Send + Sync,
{
    fn resolve(&self, ctx: &ImageUrlContext<'_>) -> Result<String, ImageUrlError> {
        self(ctx)
    }
}

/// Resolves `asset.url` directly, or builds a CDN URL from `asset._ref`.
///
/// `image_options` are appended as a query string in both cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetUrlResolver;

impl ImageUrlResolver for AssetUrlResolver {
    fn resolve(&self, ctx: &ImageUrlContext<'_>) -> Result<String, ImageUrlError> {
        let options = ctx.options;
        let asset = ctx.node.field("asset").ok_or(ImageUrlError::MissingAsset)?;
        let plain_url = asset.get("url").and_then(Value::as_str);

        let (project_id, dataset) = match (&options.project_id, &options.dataset) {
            (Some(project_id), Some(dataset)) => (project_id, dataset),
            _ => {
                let url = plain_url.ok_or(ImageUrlError::MissingProjectConfig)?;
                return Ok(with_query(url, options));
            }
        };

        let reference = match asset.get("_ref").or_else(|| asset.get("_id")).and_then(Value::as_str) {
            Some(reference) => reference,
            None => {
                let url = plain_url.ok_or(ImageUrlError::MissingAsset)?;
                return Ok(with_query(url, options));
            }
        };

        let captures = ASSET_REF
            .captures(reference)
            .ok_or_else(|| ImageUrlError::MalformedReference(reference.to_string()))?;

        let url = format!(
            "{}/images/{}/{}/{}-{}x{}.{}",
            options.image_base_url.trim_end_matches('/'),
            project_id,
            dataset,
            &captures[1],
            &captures[2],
            &captures[3],
            &captures[4],
        );

        Ok(with_query(&url, options))
    }
}

/// Append `image_options` form-encoded, ahead of any fragment
fn with_query(url: &str, options: &Options) -> String {
    if options.image_options.is_empty() {
        return url.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&options.image_options)
        .finish();

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    let mut out = format!("{}{}{}", base, separator, query);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

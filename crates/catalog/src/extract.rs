use crate::error::{CatalogError, Result};
use async_trait::async_trait;

/// Seam for the external vision service that turns an uploaded sneaker
/// image into a dominant-color palette.
///
/// The scorer only consumes the resulting palette. Timeouts and retries
/// for a real vision backend belong to the request-handling layer, not to
/// implementations of this trait.
#[async_trait]
pub trait ColorExtractor: Send + Sync {
    async fn extract(&self, image_data: &str) -> Result<Vec<String>>;
}

/// Stand-in extractor returning a fixed palette until a real vision
/// service is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPaletteExtractor;

#[async_trait]
impl ColorExtractor for StaticPaletteExtractor {
    async fn extract(&self, image_data: &str) -> Result<Vec<String>> {
        if image_data.is_empty() {
            return Err(CatalogError::Extraction(
                "empty image payload".to_string(),
            ));
        }
        Ok(vec![
            "#FF0000".to_string(),
            "#FFFFFF".to_string(),
            "#000000".to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_palette_has_three_colors() {
        let palette = StaticPaletteExtractor
            .extract("data:image/png;base64,AAAA")
            .await
            .unwrap();
        assert_eq!(palette.len(), 3);
    }

    #[tokio::test]
    async fn empty_payload_is_an_extraction_error() {
        assert!(StaticPaletteExtractor.extract("").await.is_err());
    }
}

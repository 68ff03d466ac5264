//! Decode, resize and JPEG-encode thumbnails with the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::thumbnail::{Dimensions, ThumbnailSpec};

/// JPEG quality used for every thumbnail.
pub const JPEG_QUALITY: u8 = 85;

/// Content type of every encoded thumbnail, whatever the source format.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image has zero width or height")]
    Empty,

    #[error("Failed to encode thumbnail {size}: {source}")]
    Encode {
        size: String,
        #[source]
        source: image::ImageError,
    },
}

/// One encoded thumbnail, ready for upload.
#[derive(Debug, Clone)]
pub struct RenderedThumbnail {
    pub spec: ThumbnailSpec,
    pub dimensions: Dimensions,
    pub bytes: Vec<u8>,
}

/// A decoded source image, already flattened to an opaque 8-bit color model.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Decode raw bytes, detecting the format from the content.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImagingError> {
        let image = image::load_from_memory(bytes).map_err(ImagingError::Decode)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(ImagingError::Empty);
        }
        Ok(Self {
            image: flatten(image),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }

    /// Resize into `spec`'s bounding box with Lanczos3 and encode as JPEG.
    pub fn render(&self, spec: ThumbnailSpec) -> Result<RenderedThumbnail, ImagingError> {
        let target = spec.fit(self.dimensions());
        let resized = self
            .image
            .resize_exact(target.width, target.height, FilterType::Lanczos3);

        let mut bytes = Vec::new();
        resized
            .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))
            .map_err(|source| ImagingError::Encode {
                size: spec.label(),
                source,
            })?;

        Ok(RenderedThumbnail {
            spec,
            dimensions: target,
            bytes,
        })
    }
}

/// JPEG has no alpha, palette or 16-bit support: keep 8-bit gray and RGB,
/// convert everything else to 8-bit RGB (alpha is dropped).
fn flatten(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

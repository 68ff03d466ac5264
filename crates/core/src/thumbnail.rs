//! Thumbnail specs, dimension fitting and object key conventions.
//!
//! Everything here is pure: the thumbnail function uses these rules to decide
//! which uploaded objects to process, how large each thumbnail is and where it
//! is written.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Key prefix reserved for generated thumbnails. Objects under it never
/// trigger processing, otherwise every upload would re-trigger the function.
pub const OUTPUT_PREFIX: &str = "thumbnails/";

/// Extensions (lowercase, with the dot) recognized as images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];

/// Bounding boxes generated for every eligible upload unless overridden.
pub const DEFAULT_SPECS: [ThumbnailSpec; 3] = [
    ThumbnailSpec::new(150, 150),
    ThumbnailSpec::new(300, 300),
    ThumbnailSpec::new(600, 600),
];

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Pixel dimensions, rendered as `"{width}x{height}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Dimensions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// ThumbnailSpec
// ---------------------------------------------------------------------------

/// A maximum bounding box for one thumbnail size.
///
/// The box is an upper bound, not the output size: [`ThumbnailSpec::fit`]
/// derives the emitted dimensions from the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSpec {
    pub width_max: u32,
    pub height_max: u32,
}

impl ThumbnailSpec {
    pub const fn new(width_max: u32, height_max: u32) -> Self {
        Self {
            width_max,
            height_max,
        }
    }

    /// Size label used in output keys, object metadata and notifications.
    pub fn label(&self) -> String {
        format!("{}x{}", self.width_max, self.height_max)
    }

    /// Compute the output dimensions for a source image.
    ///
    /// Landscape sources (`aspect > 1`) take the full box width and a
    /// proportionally floored height; portrait and square sources take the
    /// full box height and a floored width. If the floored side would still
    /// overflow the box (only possible for non-square boxes) the other side is
    /// pinned instead. Both sides are at least one pixel.
    ///
    /// `source` must have non-zero width and height.
    ///
    /// ```
    /// use pinboard_core::thumbnail::{Dimensions, ThumbnailSpec};
    ///
    /// let spec = ThumbnailSpec::new(300, 300);
    /// assert_eq!(spec.fit(Dimensions::new(4000, 2000)), Dimensions::new(300, 150));
    ///
    /// let spec = ThumbnailSpec::new(600, 600);
    /// assert_eq!(spec.fit(Dimensions::new(1000, 2000)), Dimensions::new(300, 600));
    /// ```
    pub fn fit(&self, source: Dimensions) -> Dimensions {
        let aspect = f64::from(source.width) / f64::from(source.height);

        let width_pinned = Dimensions::new(
            self.width_max,
            (f64::from(self.width_max) / aspect).floor() as u32,
        );
        let height_pinned = Dimensions::new(
            (f64::from(self.height_max) * aspect).floor() as u32,
            self.height_max,
        );

        let chosen = if aspect > 1.0 {
            if width_pinned.height <= self.height_max {
                width_pinned
            } else {
                height_pinned
            }
        } else if height_pinned.width <= self.width_max {
            height_pinned
        } else {
            width_pinned
        };

        Dimensions::new(chosen.width.max(1), chosen.height.max(1))
    }
}

impl fmt::Display for ThumbnailSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width_max, self.height_max)
    }
}

impl FromStr for ThumbnailSpec {
    type Err = CoreError;

    /// Parse `"{width}x{height}"`, e.g. `"150x150"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid thumbnail size '{s}'"));

        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width_max: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height_max: u32 = h.trim().parse().map_err(|_| invalid())?;

        if width_max == 0 || height_max == 0 {
            return Err(invalid());
        }
        Ok(Self::new(width_max, height_max))
    }
}

/// Parse a comma-separated list of sizes such as `"150x150,300x300"`.
pub fn parse_spec_list(s: &str) -> Result<Vec<ThumbnailSpec>, CoreError> {
    let specs = s
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<ThumbnailSpec>, _>>()?;

    if specs.is_empty() {
        return Err(CoreError::Validation(
            "At least one thumbnail size is required".into(),
        ));
    }
    Ok(specs)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Why an object notification was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The key is already under [`OUTPUT_PREFIX`].
    AlreadyGenerated,
    /// The key does not end in one of [`IMAGE_EXTENSIONS`].
    NotAnImage,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyGenerated => "already_generated",
            Self::NotAnImage => "not_an_image",
        }
    }
}

/// Whether `key` lives under the reserved output namespace, either at the
/// root or as a nested `thumbnails/` path segment.
pub fn is_generated_key(key: &str) -> bool {
    key.starts_with(OUTPUT_PREFIX) || key.contains(&format!("/{OUTPUT_PREFIX}"))
}

/// Case-insensitive suffix check against [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Apply the filtering rules in order: generated output first, then the
/// extension check.
pub fn check_eligibility(key: &str) -> Result<(), SkipReason> {
    if is_generated_key(key) {
        return Err(SkipReason::AlreadyGenerated);
    }
    if !has_image_extension(key) {
        return Err(SkipReason::NotAnImage);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output keys
// ---------------------------------------------------------------------------

/// Derive the output key for one thumbnail.
///
/// Convention: `thumbnails/{stem}_{width_max}x{height_max}{ext}` where `ext`
/// is the original extension, case preserved.
///
/// ```
/// use pinboard_core::thumbnail::{thumbnail_key, ThumbnailSpec};
///
/// let key = thumbnail_key("photos/cat.JPG", ThumbnailSpec::new(150, 150));
/// assert_eq!(key, "thumbnails/photos/cat_150x150.JPG");
/// ```
pub fn thumbnail_key(original_key: &str, spec: ThumbnailSpec) -> String {
    let (stem, ext) = split_extension(original_key);
    format!("{OUTPUT_PREFIX}{stem}_{}{ext}", spec.label())
}

/// Split `key` at the extension of its last path segment.
///
/// A segment made only of leading dots before the last dot (`.env`,
/// `..jpg`) has no extension.
fn split_extension(key: &str) -> (&str, &str) {
    let name_start = key.rfind('/').map_or(0, |i| i + 1);
    let name = &key[name_start..];

    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => key.split_at(name_start + dot),
        _ => (key, ""),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

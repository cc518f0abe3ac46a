//! Output records written to `annotations.json`.
//!
//! The field names and value types here define the on-disk document, so
//! they follow the consumer's expectations rather than Rust conventions:
//! image sizes stay textual and `category_id` carries the category name.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::ids::ImageId;

/// The full document written to `annotations.json`.
///
/// Categories are tracked during a run but are not part of this document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationsFile {
    /// Copied images, in discovery order.
    pub images: Vec<Image>,

    /// One entry per VOC `<object>`.
    pub annotations: Vec<Annotation>,
}

/// An image copied into the flat `images/` folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Path relative to `images/`, exactly as written in `<filename>`.
    pub file_name: String,

    /// Width as it appears in the source `<size>` element.
    pub width: String,

    /// Height as it appears in the source `<size>` element.
    pub height: String,

    /// 1-based sequential id.
    pub id: ImageId,
}

impl Image {
    /// Creates a new image record.
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            width: width.into(),
            height: height.into(),
            id: id.into(),
        }
    }
}

/// A single labelled box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Id of the image this box belongs to.
    pub image_id: ImageId,

    /// `[x, y, width, height]` in pixels.
    pub bbox: [i64; 4],

    /// The category name (not the numeric category id).
    pub category_id: String,
}

impl Annotation {
    /// Creates an annotation from a VOC corner box.
    pub fn new(
        image_id: impl Into<ImageId>,
        bbox: &BBoxXYXY,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            bbox: bbox.to_xywh(),
            category_id: category_name.into(),
        }
    }
}

//! Records produced by a conversion run.
//!
//! # Example
//!
//! ```
//! use voc2json::model::{Annotation, AnnotationsFile, BBoxXYXY, Image};
//!
//! let document = AnnotationsFile {
//!     images: vec![Image::new(1u64, "a.jpg", "100", "200")],
//!     annotations: vec![Annotation::new(
//!         1u64,
//!         &BBoxXYXY::from_xyxy(10, 20, 30, 50),
//!         "cat",
//!     )],
//! };
//! assert_eq!(document.annotations[0].bbox, [10, 20, 20, 30]);
//! ```

mod bbox;
mod ids;
mod records;

pub use bbox::BBoxXYXY;
pub use ids::{CategoryId, ImageId};
pub use records::{Annotation, AnnotationsFile, Image};

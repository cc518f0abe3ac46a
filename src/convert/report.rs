//! Summary of a finished conversion run.

use serde::Serialize;
use std::fmt;

use crate::category::Category;

/// What a run produced.
///
/// The category table is reported here even though `annotations.json`
/// only carries category names.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Dataset root that was scanned.
    pub dataset_path: String,
    /// Directory holding `images/` and `annotations.json`.
    pub output_directory: String,
    /// Number of `*.xml` files processed.
    pub xml_files: usize,
    /// Number of images copied.
    pub images: usize,
    /// Number of annotation records written.
    pub annotations: usize,
    /// Boxes whose max corner lies before the min corner on some axis.
    pub unordered_boxes: usize,
    /// Category table in first-seen order.
    pub categories: Vec<Category>,
}

impl ConversionReport {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} -> {}",
            self.dataset_path, self.output_directory
        )?;
        writeln!(
            f,
            "  {} xml files, {} images, {} annotations, {} categories",
            self.xml_files,
            self.images,
            self.annotations,
            self.category_count()
        )?;

        if self.unordered_boxes > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "Warning: {} box(es) have xmax < xmin or ymax < ymin; their width/height is negative",
                self.unordered_boxes
            )?;
        }

        if !self.categories.is_empty() {
            writeln!(f)?;
            writeln!(f, "Categories ({}):", self.category_count())?;
            for category in &self.categories {
                writeln!(f, "  {:>4}  {}", category.id.as_u64(), category.name)?;
            }
        }

        Ok(())
    }
}

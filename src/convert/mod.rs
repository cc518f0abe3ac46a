//! The conversion run: walk a VOC tree, copy images, write `annotations.json`.
//!
//! Records accumulate in a [`ConversionContext`] scoped to one run. The JSON
//! file is written only after every annotation file was parsed and its image
//! copied, so a failing run never leaves a fresh but partial document behind.

pub mod report;

pub use report::ConversionReport;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::category::CategoryTable;
use crate::error::ConvertError;
use crate::model::{Annotation, AnnotationsFile, Image, ImageId};
use crate::voc::{self, VocAnnotation};

/// Default dataset root, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "dataset";
/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "input_directory";

const IMAGES_DIR: &str = "images";
const ANNOTATIONS_FILE: &str = "annotations.json";
const JSON_INDENT: &[u8] = b"    ";

/// Where to read from and where to write to.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub dataset_path: PathBuf,
    pub output_directory: PathBuf,
}

impl ConvertOptions {
    pub fn images_dir(&self) -> PathBuf {
        self.output_directory.join(IMAGES_DIR)
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.output_directory.join(ANNOTATIONS_FILE)
    }
}

/// Accumulated output of one run.
#[derive(Debug, Default)]
pub struct ConversionContext {
    images: Vec<Image>,
    annotations: Vec<Annotation>,
    categories: CategoryTable,
    unordered_boxes: usize,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one parsed annotation file and return the id given to its image.
    pub fn record(&mut self, parsed: VocAnnotation) -> ImageId {
        let image_id = ImageId::new(self.images.len() as u64 + 1);

        for object in parsed.objects {
            self.categories.get_or_insert(&object.name);
            if !object.bndbox.is_ordered() {
                warn!(
                    "'{}' in {} has an unordered box {:?}",
                    object.name, parsed.filename, object.bndbox
                );
                self.unordered_boxes += 1;
            }
            self.annotations
                .push(Annotation::new(image_id, &object.bndbox, object.name));
        }

        self.images.push(Image::new(
            image_id,
            parsed.filename,
            parsed.width,
            parsed.height,
        ));

        image_id
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Split into the JSON document and the category table.
    pub fn finish(self) -> (AnnotationsFile, CategoryTable, usize) {
        (
            AnnotationsFile {
                images: self.images,
                annotations: self.annotations,
            },
            self.categories,
            self.unordered_boxes,
        )
    }
}

/// Run a full conversion.
///
/// Creates `<output>/images/`, copies every referenced image into it, and
/// writes `<output>/annotations.json`. The first failure aborts the run.
pub fn run(options: &ConvertOptions) -> Result<ConversionReport, ConvertError> {
    let images_dir = options.images_dir();
    fs::create_dir_all(&images_dir).map_err(ConvertError::Io)?;

    let xml_files = voc::collect_xml_files(&options.dataset_path)?;
    info!(
        "found {} annotation file(s) under {}",
        xml_files.len(),
        options.dataset_path.display()
    );

    let mut context = ConversionContext::new();
    for xml_path in &xml_files {
        let parsed = voc::parse_voc_xml(xml_path)?;
        copy_image(xml_path, &parsed.filename, &images_dir)?;

        let object_count = parsed.objects.len();
        let image_id = context.record(parsed);
        debug!(
            "{} -> image {} with {} object(s)",
            xml_path.display(),
            image_id,
            object_count
        );
    }

    let (document, categories, unordered_boxes) = context.finish();
    let annotations_path = options.annotations_path();
    write_annotations_json(&annotations_path, &document)?;
    info!(
        "wrote {} image(s) and {} annotation(s) to {}",
        document.images.len(),
        document.annotations.len(),
        annotations_path.display()
    );

    Ok(ConversionReport {
        dataset_path: options.dataset_path.display().to_string(),
        output_directory: options.output_directory.display().to_string(),
        xml_files: xml_files.len(),
        images: document.images.len(),
        annotations: document.annotations.len(),
        unordered_boxes,
        categories: categories.into_categories(),
    })
}

/// Copy `<xml dir>/<filename>` to `<images_dir>/<filename>`.
fn copy_image(xml_path: &Path, filename: &str, images_dir: &Path) -> Result<(), ConvertError> {
    if !is_contained_relative(Path::new(filename)) {
        return Err(ConvertError::UnsafeImagePath {
            path: xml_path.to_path_buf(),
            filename: filename.to_string(),
        });
    }

    let source = xml_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(filename);
    let destination = images_dir.join(filename);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(ConvertError::Io)?;
    }

    // Copying a file onto itself truncates it.
    if is_same_file(&source, &destination) {
        return Err(ConvertError::SameFile {
            path: xml_path.to_path_buf(),
            image: source,
        });
    }

    fs::copy(&source, &destination).map_err(|source_err| ConvertError::ImageCopy {
        from: source.clone(),
        to: destination.clone(),
        source: source_err,
    })?;

    Ok(())
}

fn is_same_file(left: &Path, right: &Path) -> bool {
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

fn is_contained_relative(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        && path
            .components()
            .any(|component| matches!(component, Component::Normal(_)))
}

/// Write the document as JSON with a 4-space indent.
pub fn write_annotations_json(path: &Path, document: &AnnotationsFile) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(ConvertError::Io)?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|source| ConvertError::JsonWrite {
            path: path.to_path_buf(),
            source,
        })?;

    writer.flush().map_err(ConvertError::Io)
}

/// Serialize the document to a string, using the same layout as the file.
pub fn to_annotations_json_string(document: &AnnotationsFile) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| {
        serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

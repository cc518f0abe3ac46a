//! Pascal VOC XML discovery and parsing.
//!
//! Annotation files may sit at any depth below the dataset root. Each file
//! describes one image: its `<filename>` (relative to the XML file's own
//! directory), its `<size>`, and one or more `<object>` boxes.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use crate::error::ConvertError;
use crate::model::BBoxXYXY;

const VOC_XML_EXTENSION: &str = "xml";

/// One parsed VOC annotation file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocAnnotation {
    pub filename: String,
    /// Kept as written; never coerced to a number.
    pub width: String,
    pub height: String,
    /// Always at least one entry.
    pub objects: Vec<VocObject>,
}

/// One `<object>` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocObject {
    pub name: String,
    pub bndbox: BBoxXYXY,
}

/// Recursively collect `*.xml` files below `root`.
///
/// Files are sorted by their path relative to `root` so image ids are
/// reproducible across runs on the same tree.
pub fn collect_xml_files(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !root.is_dir() {
        return Err(ConvertError::DatasetTraversal {
            path: root.to_path_buf(),
            message: "dataset path must be a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| ConvertError::DatasetTraversal {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort_by_cached_key(|path| rel_string(root, path));
    Ok(files)
}

/// Read and parse one VOC XML file.
pub fn parse_voc_xml(path: &Path) -> Result<VocAnnotation, ConvertError> {
    let xml = fs::read_to_string(path).map_err(|source| ConvertError::VocXmlRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a UTF-8 string.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_voc_xml_str(xml: &str) -> Result<VocAnnotation, ConvertError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocAnnotation, ConvertError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| ConvertError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocAnnotation, ConvertError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| ConvertError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(ConvertError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let filename = required_child_text(annotation, "filename", path, "<annotation>")?;

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = required_child_text(size, "width", path, "<size>")?;
    let height = required_child_text(size, "height", path, "<size>")?;

    // A lone <object> and a run of several are the same shape here: every
    // direct <object> child becomes one entry.
    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_i64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_i64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_i64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_i64(bndbox, "ymax", path, "<bndbox>")?;

        let bndbox = BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax);
        if bndbox.checked_xywh().is_none() {
            return Err(ConvertError::VocXmlParse {
                path: path.to_path_buf(),
                message: format!(
                    "<bndbox> ({xmin}, {ymin}, {xmax}, {ymax}) in <object> '{name}' has a width or height outside the i64 range"
                ),
            });
        }

        objects.push(VocObject { name, bndbox });
    }

    if objects.is_empty() {
        return Err(ConvertError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <object> in <annotation>".to_string(),
        });
    }

    Ok(VocAnnotation {
        filename,
        width,
        height,
        objects,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, ConvertError> {
    child_element(node, tag).ok_or_else(|| ConvertError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, ConvertError> {
    optional_child_text(node, tag).ok_or_else(|| ConvertError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, ConvertError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<i64>().map_err(|_| ConvertError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VOC_XML_EXTENSION))
        .unwrap_or(false)
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

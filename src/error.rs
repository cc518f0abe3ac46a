use std::path::PathBuf;
use thiserror::Error;

/// The main error type for voc2json operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read VOC XML {path}: {source}")]
    VocXmlRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse VOC XML {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Failed to traverse dataset directory {path}: {message}")]
    DatasetTraversal { path: PathBuf, message: String },

    #[error("Failed to copy image {from} to {to}: {source}")]
    ImageCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image {image} referenced by {path} is already inside the images directory; copying it onto itself would truncate it")]
    SameFile { path: PathBuf, image: PathBuf },

    #[error("Refusing to copy <filename> '{filename}' from {path}: it would escape the images directory")]
    UnsafeImagePath { path: PathBuf, filename: String },

    #[error("Failed to write annotations JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

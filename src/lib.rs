//! voc2json: flatten a Pascal VOC annotation tree.
//!
//! Walks a directory of per-image VOC XML files, copies every referenced
//! image into one `images/` folder, and writes a single `annotations.json`
//! listing images and their bounding boxes.
//!
//! # Modules
//!
//! - [`voc`]: Discovering and parsing VOC XML files
//! - [`model`]: Output records (images, annotations, boxes, ids)
//! - [`category`]: Category name to id table
//! - [`convert`]: The conversion run and its report
//! - [`error`]: Error types for voc2json operations

pub mod category;
pub mod convert;
pub mod error;
pub mod model;
pub mod voc;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use convert::{ConversionReport, ConvertOptions};
pub use error::ConvertError;

/// The voc2json CLI application.
#[derive(Parser)]
#[command(name = "voc2json")]
#[command(version, about)]
struct Cli {
    /// Directory searched recursively for VOC `*.xml` files.
    #[arg(env = "VOC2JSON_DATASET", default_value = convert::DEFAULT_DATASET_PATH)]
    dataset_path: PathBuf,

    /// Directory that receives `images/` and `annotations.json`.
    #[arg(env = "VOC2JSON_OUTPUT", default_value = convert::DEFAULT_OUTPUT_DIRECTORY)]
    output_directory: PathBuf,

    /// Format of the summary printed after a successful run.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the voc2json CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    let options = ConvertOptions {
        dataset_path: cli.dataset_path,
        output_directory: cli.output_directory,
    };
    let report = convert::run(&options)?;

    match cli.report {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                ConvertError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{json}");
        }
        ReportFormat::Text => {
            print!("{}", report);
            println!("Dataset restructuring and conversion to annotations.json completed");
        }
    }

    Ok(())
}

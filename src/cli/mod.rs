//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report layer.

pub mod age;
pub mod export;
pub mod flows;
pub mod import;

pub use age::{handle_age_command, AgeArgs, ReportFormat};
pub use export::{handle_export_command, ExportArgs};
pub use flows::{handle_flows_command, FlowsArgs};
pub use import::{handle_import_command, ImportArgs};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{AgeError, AgeResult};

/// Create an output file, wrapped in a buffered writer
pub(crate) fn create_output(path: &Path) -> AgeResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        AgeError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

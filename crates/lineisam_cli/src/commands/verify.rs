//! Verify command implementation.

use crate::cli::OutputFormat;
use lineisam_core::{verify_index, VerifyReport};
use serde::Serialize;
use std::path::Path;

/// Verification result, as printed in JSON form.
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    /// Index file path.
    pub index: String,
    /// Index size in bytes.
    pub index_bytes: u64,
    /// Data file size in bytes.
    pub data_bytes: u64,
    /// Number of records checked.
    pub records_checked: u64,
    /// Whether no problem was found.
    pub ok: bool,
    /// Problems found.
    pub errors: Vec<String>,
}

impl VerifyOutput {
    fn new(index: &Path, report: VerifyReport) -> Self {
        Self {
            index: index.display().to_string(),
            index_bytes: report.index_bytes,
            data_bytes: report.data_bytes,
            records_checked: report.records_checked,
            ok: report.is_ok(),
            errors: report.errors,
        }
    }
}

/// Checks `index` against `data` and fails if any problem is found.
pub fn run(
    data: &Path,
    index: &Path,
    key_length: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = verify_index(data, index, key_length)?;
    let output = VerifyOutput::new(index, report);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_text_output(&output),
    }

    if output.ok {
        Ok(())
    } else {
        Err("Verification failed".into())
    }
}

fn print_text_output(output: &VerifyOutput) {
    println!("Verifying index {}", output.index);
    println!("  Index size: {} bytes", output.index_bytes);
    println!("  Data size: {} bytes", output.data_bytes);
    println!("  Records checked: {}", output.records_checked);

    for error in &output.errors {
        println!("    - {error}");
    }

    println!();
    if output.ok {
        println!("✓ Index verification passed");
    } else {
        println!("✗ Index verification failed ({} problems)", output.errors.len());
    }
}

//! Create command implementation.

use lineisam_core::{IndexBuilder, IndexConfig};
use std::path::Path;
use tracing::info;

/// Builds the index for `input` into `output`.
pub fn run(
    input: &Path,
    output: &Path,
    key_length: usize,
    write_mirror: bool,
    sync: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Indexing {:?} into {:?}", input, output);

    let config = IndexConfig::new(key_length)
        .write_mirror(write_mirror)
        .sync_on_build(sync);
    let summary = IndexBuilder::new(config)?.build(input, output)?;

    println!("✓ Index created");
    println!("  Path: {:?}", summary.index_path);
    println!("  Records: {}", summary.records);
    println!("  Size: {} bytes", summary.index_bytes);
    if let Some(mirror) = &summary.mirror_path {
        println!("  Mirror: {:?}", mirror);
    }

    Ok(())
}

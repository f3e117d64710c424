//! List command implementation.

use lineisam_core::list_records;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Prints every record of `data` in index order, one per line.
pub fn run(data: &Path, index: &Path, key_length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let lister = list_records(data, index, key_length)?;
    let mut out = BufWriter::new(io::stdout().lock());

    let mut printed = 0u64;
    for record in lister {
        out.write_all(&record?.render())?;
        out.write_all(b"\n")?;
        printed += 1;
    }
    out.flush()?;

    debug!(printed, "listed records");
    Ok(())
}

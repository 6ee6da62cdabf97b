//!
//! Reading aligned sequences in FASTA format
//!
use crate::alignment::{Alignment, Sequence};
use crate::error::Result;
use bio::io::fasta;
use log::{info, warn};
use std::path::Path;

///
/// Parse an alignment from a FASTA formatted reader.
///
/// Record ids are the taxon names. Lowercase bases are uppercased,
/// the symbols themselves are checked later when a column is evaluated.
///
pub fn parse_alignment<R: std::io::Read>(reader: R) -> Result<Alignment> {
    let reader = fasta::Reader::new(reader);
    let mut rows: Vec<(String, Sequence)> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if rows.iter().any(|(name, _)| name == record.id()) {
            warn!("taxon `{}` appears twice, keeping the last one", record.id());
        }
        rows.push((record.id().to_string(), record.seq().to_ascii_uppercase()));
    }
    Alignment::new(rows)
}

///
/// Read an alignment from a FASTA file.
///
pub fn read_alignment<P: AsRef<Path>>(path: P) -> Result<Alignment> {
    let file = std::fs::File::open(path.as_ref())?;
    let alignment = parse_alignment(file)?;
    info!(
        "loaded alignment {}: {} taxa x {} columns",
        path.as_ref().display(),
        alignment.n_rows(),
        alignment.len()
    );
    Ok(alignment)
}

pub mod align_cmd;
pub mod fasta_cmd;
pub mod gene_usage_cmd;
pub mod ingest_cmd;
pub mod ireceptor_cmd;
pub mod kmer_cmd;
pub mod relatedness_cmd;
pub mod search_cmd;
pub mod top_clones_cmd;

pub use align_cmd::AlignCMD;
pub use fasta_cmd::FastaCMD;
pub use gene_usage_cmd::GeneUsageCMD;
pub use ingest_cmd::IngestCMD;
pub use ireceptor_cmd::IReceptorCMD;
pub use kmer_cmd::KmerCMD;
pub use relatedness_cmd::RelatednessCMD;
pub use search_cmd::SearchCMD;
pub use top_clones_cmd::TopClonesCMD;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write analysis rows as a TSV with a serde-derived header.
pub(crate) fn write_rows<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create output file {}", path.display()))?;
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(BufWriter::new(file));
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

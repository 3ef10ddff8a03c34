use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::analysis::search::SearchSpace;
use crate::export::write_fasta;
use crate::ingest::ingest;

/// Export junction sequences as fasta.
#[derive(Args)]
pub struct FastaCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Export amino-acid junctions instead of nucleotide
    #[arg(long, default_value_t = false)]
    pub aa: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl FastaCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let space = if self.aa {
            SearchSpace::AminoAcid
        } else {
            SearchSpace::Nucleotide
        };
        let file = File::create(&self.path_out)
            .with_context(|| format!("cannot create output file {}", self.path_out.display()))?;
        write_fasta(&table, space, BufWriter::new(file))?;
        log::info!("wrote fasta to {}", self.path_out.display());
        Ok(())
    }
}

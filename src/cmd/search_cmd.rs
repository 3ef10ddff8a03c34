use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::analysis::search::{search_sequences, SearchSpace};
use crate::ingest::ingest;
use crate::table::tsv;

/// Search repertoires for junctions near a query sequence.
#[derive(Args)]
pub struct SearchCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Query sequence, nucleotide unless --aa
    #[arg(short = 'q', long)]
    pub query: String,

    // Maximum edit distance; zero is an exact match
    #[arg(short = 'd', long, default_value_t = 0)]
    pub edit_distance: u32,

    // Search amino-acid junctions instead of nucleotide
    #[arg(long, default_value_t = false)]
    pub aa: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl SearchCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let space = if self.aa {
            SearchSpace::AminoAcid
        } else {
            SearchSpace::Nucleotide
        };
        let hits = search_sequences(&table, &self.query, self.edit_distance, space)?;
        tsv::write_table_to_path(&hits, &self.path_out)?;
        log::info!("{} hits written to {}", hits.n_rows(), self.path_out.display());
        Ok(())
    }
}

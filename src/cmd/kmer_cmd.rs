use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::analysis::kmer::count_kmers;
use crate::ingest::ingest;

pub const DEFAULT_KMER_SIZE: usize = 3;

/// Junction k-mer counts per repertoire.
#[derive(Args)]
pub struct KmerCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    #[arg(short = 'k', long, default_value_t = DEFAULT_KMER_SIZE)]
    pub kmer_size: usize,

    // Weigh k-mer occurrences by template count
    #[arg(long, default_value_t = false)]
    pub weighted: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl KmerCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let rows = count_kmers(&table, self.kmer_size, self.weighted)?;
        super::write_rows(&rows, &self.path_out)?;
        log::info!("wrote {} k-mer rows to {}", rows.len(), self.path_out.display());
        Ok(())
    }
}

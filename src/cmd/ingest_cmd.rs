use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::ingest::ingest;
use crate::table::tsv;

pub const DEFAULT_PATH_OUT: &str = "repertoires.airr.tsv";

/// Ingest vendor clonotype tables into one MiAIRR-normalized TSV.
#[derive(Args)]
pub struct IngestCMD {
    // Input files and/or directories with vendor tables
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    // Descend into subdirectories when an input is a directory
    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    #[arg(short = 'o', value_parser, default_value = DEFAULT_PATH_OUT)]
    pub path_out: PathBuf,
}

impl IngestCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        tsv::write_table_to_path(&table, &self.path_out)?;
        log::info!(
            "wrote {} records over {} fields to {}",
            table.n_rows(),
            table.n_columns(),
            self.path_out.display()
        );
        Ok(())
    }
}

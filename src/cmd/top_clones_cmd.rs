use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::analysis::top_clones;
use crate::ingest::ingest;
use crate::table::tsv;

pub const DEFAULT_TOP_N: usize = 10;

/// The most abundant clones of every repertoire.
#[derive(Args)]
pub struct TopClonesCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Clones to keep per repertoire
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl TopClonesCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let top = top_clones(&table, self.top_n)?;
        tsv::write_table_to_path(&top, &self.path_out)?;
        log::info!("wrote {} top clones to {}", top.n_rows(), self.path_out.display());
        Ok(())
    }
}

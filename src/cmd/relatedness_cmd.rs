use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::analysis::relatedness::clonal_relatedness;
use crate::ingest::ingest;

pub const DEFAULT_EDIT_DISTANCE: u32 = 10;

/// Clonal relatedness of every repertoire to its dominant clone.
#[derive(Args)]
pub struct RelatednessCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Maximum edit distance still counted as related
    #[arg(short = 'd', long, default_value_t = DEFAULT_EDIT_DISTANCE)]
    pub edit_distance: u32,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl RelatednessCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let rows = clonal_relatedness(&table, self.edit_distance)?;
        super::write_rows(&rows, &self.path_out)?;
        log::info!(
            "wrote relatedness for {} repertoires to {}",
            rows.len(),
            self.path_out.display()
        );
        Ok(())
    }
}

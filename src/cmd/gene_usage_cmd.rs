use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::analysis::gene_usage::{gene_usage, GeneSegment, UsageWeighting};
use crate::ingest::ingest;

/// Gene family usage frequencies per repertoire.
#[derive(Args)]
pub struct GeneUsageCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Gene segment to summarize: v, d or j
    #[arg(short = 's', long, default_value = "v")]
    pub segment: GeneSegment,

    // Weigh every clonotype once instead of by template count
    #[arg(long, default_value_t = false)]
    pub unique: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl GeneUsageCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let weighting = if self.unique {
            UsageWeighting::UniqueClonotypes
        } else {
            UsageWeighting::DuplicateCount
        };
        let rows = gene_usage(&table, self.segment, weighting)?;
        super::write_rows(&rows, &self.path_out)?;
        log::info!("wrote {} usage rows to {}", rows.len(), self.path_out.display());
        Ok(())
    }
}

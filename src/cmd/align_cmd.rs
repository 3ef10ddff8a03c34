use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::analysis::align::align_top_clones;
use crate::analysis::search::SearchSpace;
use crate::ingest::ingest;

pub const DEFAULT_TOP_N: usize = 5;

/// Align the top clones of every repertoire against a query sequence.
#[derive(Args)]
pub struct AlignCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    // Query sequence, nucleotide unless --aa
    #[arg(short = 'q', long)]
    pub query: String,

    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[arg(long, default_value_t = false)]
    pub aa: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl AlignCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let space = if self.aa {
            SearchSpace::AminoAcid
        } else {
            SearchSpace::Nucleotide
        };
        let reports = align_top_clones(&table, &self.query, self.top_n, space)?;

        let file = File::create(&self.path_out)
            .with_context(|| format!("cannot create output file {}", self.path_out.display()))?;
        let mut out = BufWriter::new(file);
        for report in &reports {
            writeln!(
                out,
                "# {} clone {} score {}",
                report.repertoire_id, report.clone_id, report.score
            )?;
            writeln!(out, "{}", report.pretty)?;
        }
        out.flush()?;
        log::info!("wrote {} alignments to {}", reports.len(), self.path_out.display());
        Ok(())
    }
}

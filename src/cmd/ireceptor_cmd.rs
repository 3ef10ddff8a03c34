use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::export::ireceptor_view;
use crate::ingest::ingest;
use crate::table::tsv;

/// Export the iReceptor projection of the normalized table.
#[derive(Args)]
pub struct IReceptorCMD {
    #[arg(short = 'i', value_parser, required = true, num_args = 1..)]
    pub path_in: Vec<PathBuf>,

    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,
}

impl IReceptorCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let table = ingest(&self.path_in, self.recursive)?;
        let view = ireceptor_view(&table);
        tsv::write_table_to_path(&view, &self.path_out)?;
        log::info!(
            "wrote {} records over {} fields to {}",
            view.n_rows(),
            view.n_columns(),
            self.path_out.display()
        );
        Ok(())
    }
}

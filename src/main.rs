use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clonotab::cmd;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Ingest(cmd::IngestCMD),
    TopClones(cmd::TopClonesCMD),
    GeneUsage(cmd::GeneUsageCMD),
    Kmer(cmd::KmerCMD),
    Relatedness(cmd::RelatednessCMD),
    Search(cmd::SearchCMD),
    Align(cmd::AlignCMD),
    Fasta(cmd::FastaCMD),
    Ireceptor(cmd::IReceptorCMD),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest(mut cmd) => cmd.try_execute(),
        Commands::TopClones(mut cmd) => cmd.try_execute(),
        Commands::GeneUsage(mut cmd) => cmd.try_execute(),
        Commands::Kmer(mut cmd) => cmd.try_execute(),
        Commands::Relatedness(mut cmd) => cmd.try_execute(),
        Commands::Search(mut cmd) => cmd.try_execute(),
        Commands::Align(mut cmd) => cmd.try_execute(),
        Commands::Fasta(mut cmd) => cmd.try_execute(),
        Commands::Ireceptor(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

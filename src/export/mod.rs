pub mod fasta;
pub mod ireceptor;

pub use fasta::write_fasta;
pub use ireceptor::ireceptor_view;

pub mod batch;
pub mod derive;
pub mod normalize;

pub use batch::ingest;
pub use batch::resolve_input_files;

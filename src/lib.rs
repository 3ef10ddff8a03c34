pub mod analysis;
pub mod cmd;
pub mod export;
pub mod ingest;
pub mod schema;
pub mod table;

pub use ingest::ingest;
pub use schema::AirrSchema;
pub use schema::AIRR_SCHEMA;
pub use table::RecordTable;

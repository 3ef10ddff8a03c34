pub mod record_table;
pub mod tsv;

pub use record_table::Column;
pub use record_table::RecordTable;

use crate::table::RecordTable;

/// Columns absent from the iReceptor projection: the batch-local repertoire
/// key, processing metadata, and the locally derived family/frequency
/// fields.
const DROPPED_COLUMNS: &[&str] = &[
    "repertoire_id",
    "sample_processing_id",
    "data_processing_id",
    "v_family",
    "d_family",
    "j_family",
    "duplicate_frequency",
];

/// The iReceptor export view: a pure column drop, no recomputation.
pub fn ireceptor_view(table: &RecordTable) -> RecordTable {
    let keep: Vec<&String> = table
        .column_names()
        .iter()
        .filter(|name| !DROPPED_COLUMNS.contains(&name.as_str()))
        .collect();
    table.select(&keep)
}

use std::io::Write;

use anyhow::Result;

use crate::analysis::search::SearchSpace;
use crate::table::RecordTable;

/// Write junctions as fasta, one record per row, headers built from
/// `repertoire_id` and `sequence_id`. Rows without a junction are skipped.
pub fn write_fasta<W: Write>(table: &RecordTable, space: SearchSpace, mut out: W) -> Result<()> {
    let values = table.str_column(space.column());
    let repertoire_ids = table.str_column("repertoire_id");
    let sequence_ids = table.int_column("sequence_id");

    for row in 0..table.n_rows() {
        let sequence = match values.and_then(|v| v[row].as_deref()) {
            Some(s) => s,
            None => continue,
        };
        let repertoire = repertoire_ids
            .and_then(|v| v[row].as_deref())
            .unwrap_or("unknown");
        match sequence_ids.and_then(|v| v[row]) {
            Some(id) => writeln!(out, ">{}_{}", repertoire, id)?,
            None => writeln!(out, ">{}_{}", repertoire, row + 1)?,
        }
        writeln!(out, "{}", sequence)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn writes_headers_and_skips_null_rows() {
        let mut t = RecordTable::new();
        t.set_column(
            "repertoire_id",
            Column::Str(vec![Some("s1".to_string()), Some("s1".to_string())]),
        )
        .unwrap();
        t.set_column("sequence_id", Column::Int(vec![Some(1), Some(2)]))
            .unwrap();
        t.set_column(
            "junction",
            Column::Str(vec![Some("GTCAAA".to_string()), None]),
        )
        .unwrap();

        let mut buf = Vec::new();
        write_fasta(&t, SearchSpace::Nucleotide, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ">s1_1\nGTCAAA\n");
    }
}

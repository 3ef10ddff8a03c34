use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::{Column, RecordTable};

/// Read a tab-separated file into an all-string table. Compressed inputs
/// (`.tsv.gz`) are decompressed transparently. Empty cells become nulls.
pub fn read_table(path: &Path) -> Result<RecordTable> {
    let (reader, _format) = niffler::from_path(path)
        .with_context(|| format!("cannot open input file {}", path.display()))?;

    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = tsv
        .headers()
        .with_context(|| format!("cannot read header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in tsv.records() {
        let record = record.with_context(|| format!("malformed row in {}", path.display()))?;
        for (i, cell) in values.iter_mut().enumerate() {
            match record.get(i) {
                Some(v) if !v.is_empty() => cell.push(Some(v.to_string())),
                _ => cell.push(None),
            }
        }
    }

    let mut table = RecordTable::new();
    for (header, column) in headers.into_iter().zip(values) {
        table.set_column(&header, Column::Str(column))?;
    }
    Ok(table)
}

/// Write a table as TSV, nulls as empty cells.
pub fn write_table<W: Write>(table: &RecordTable, out: W) -> Result<()> {
    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);
    tsv.write_record(table.column_names())?;
    for row in 0..table.n_rows() {
        let cells: Vec<String> = table
            .column_names()
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .map(|c| c.format_cell(row))
                    .unwrap_or_default()
            })
            .collect();
        tsv.write_record(&cells)?;
    }
    tsv.flush()?;
    Ok(())
}

pub fn write_table_to_path(table: &RecordTable, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create output file {}", path.display()))?;
    write_table(table, BufWriter::new(file))
}

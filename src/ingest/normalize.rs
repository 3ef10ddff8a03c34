use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Result};

use crate::schema::mapping::{self, MappingRule, D_TIE_TARGETS};
use crate::schema::AirrSchema;
use crate::table::{Column, RecordTable};

/// Repertoire identifier of a file: its name minus the recognized input
/// extension. `sample1.tsv.gz` loses both suffixes.
pub fn repertoire_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    for ext in [".tsv.gz", ".tsv", ".txt"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    match name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

/// Normalize one raw per-file table onto the canonical schema.
///
/// A table that already carries every canonical column is returned untouched,
/// which makes normalization idempotent. Otherwise vendor columns are renamed
/// through the mapping table (unmapped ones dropped), the tied-D-gene column
/// is split, `repertoire_id` and `clone_id` are assigned, the
/// sequence/junction column pairs are back-filled from each other, and the
/// result is aligned against the full canonical field list with nulls for
/// everything the vendor never reported.
pub fn normalize(raw: RecordTable, path: &Path, schema: &AirrSchema) -> Result<RecordTable> {
    if schema.is_complete(raw.column_names()) {
        return Ok(raw);
    }

    let n_rows = raw.n_rows();
    let mut out = RecordTable::new();
    let mut tie_values: Option<Vec<Option<String>>> = None;

    // canonical columns first, so they win over vendor aliases
    for name in raw.column_names() {
        if schema.contains(name) {
            out.set_column(name, raw.column(name).cloned().expect("column exists"))?;
        }
    }
    for name in raw.column_names() {
        if schema.contains(name) {
            continue;
        }
        match mapping::lookup(name) {
            Some(MappingRule::Rename(target)) => {
                if !out.has_column(target) {
                    out.set_column(target, raw.column(name).cloned().expect("column exists"))?;
                }
            }
            Some(MappingRule::DGeneTie) => {
                tie_values = raw.str_column(name).map(|v| v.to_vec());
            }
            None => {} // unknown vendor column, dropped
        }
    }

    if let Some(ties) = tie_values {
        apply_d_gene_ties(&mut out, &ties)?;
    }

    let repertoire_id = repertoire_id_from_path(path);
    out.set_column(
        "repertoire_id",
        Column::Str(vec![Some(repertoire_id.clone()); n_rows]),
    )?;

    backfill_pair(&mut out, "sequence", "junction");
    if !out.has_column("sequence") && !out.has_column("junction") {
        bail!("no nucleotide sequence column found (expected a sequence/junction alias)");
    }
    backfill_pair(&mut out, "sequence_aa", "junction_aa");

    let clone_ids = assign_clone_ids(&out, &repertoire_id);
    out.set_column("clone_id", Column::Str(clone_ids))?;

    if schema.is_complete(out.column_names()) {
        Ok(out)
    } else {
        Ok(out.align_to_schema(schema.fields()))
    }
}

/// Split comma-joined tied D-gene calls into `d_call`/`d2_call`. An existing
/// canonical `d_call` value wins over the tie's first value.
fn apply_d_gene_ties(out: &mut RecordTable, ties: &[Option<String>]) -> Result<()> {
    let mut first: Vec<Option<String>> = Vec::with_capacity(ties.len());
    let mut second: Vec<Option<String>> = Vec::with_capacity(ties.len());
    for tie in ties {
        match tie {
            None => {
                first.push(None);
                second.push(None);
            }
            Some(value) => {
                let parts: Vec<&str> = value.split(',').map(str::trim).collect();
                if parts.len() > 2 {
                    bail!("tied D-gene value {:?} has more than two calls", value);
                }
                first.push(parts.first().filter(|p| !p.is_empty()).map(|p| p.to_string()));
                second.push(parts.get(1).filter(|p| !p.is_empty()).map(|p| p.to_string()));
            }
        }
    }

    let (d_call, d2_call) = D_TIE_TARGETS;
    let existing = out.str_column(d_call).map(|v| v.to_vec());
    let merged: Vec<Option<String>> = (0..ties.len())
        .map(|i| {
            existing
                .as_ref()
                .and_then(|v| v[i].clone())
                .or_else(|| first[i].clone())
        })
        .collect();
    out.set_column(d_call, Column::Str(merged))?;

    if !out.has_column(d2_call) {
        out.set_column(d2_call, Column::Str(second))?;
    }
    Ok(())
}

/// Copy whichever of the two naming conventions is present onto the missing
/// one. Vendors ship exactly one of the pair.
fn backfill_pair(out: &mut RecordTable, a: &str, b: &str) {
    if out.has_column(a) && !out.has_column(b) {
        let col = out.column(a).cloned().expect("column exists");
        let _ = out.set_column(b, col);
    } else if out.has_column(b) && !out.has_column(a) {
        let col = out.column(b).cloned().expect("column exists");
        let _ = out.set_column(a, col);
    }
}

/// `clone_id` is the repertoire id concatenated with the 1-based rank of the
/// row's junction among distinct junctions in file order. Identical
/// junctions within a file share an id; a null junction yields a null id.
fn assign_clone_ids(out: &RecordTable, repertoire_id: &str) -> Vec<Option<String>> {
    let n_rows = out.n_rows();
    let junctions = out.str_column("junction");
    let mut ranks: HashMap<String, usize> = HashMap::new();
    (0..n_rows)
        .map(|row| {
            let junction = junctions.and_then(|v| v[row].clone())?;
            let next = ranks.len() + 1;
            let rank = *ranks.entry(junction).or_insert(next);
            Some(format!("{}{}", repertoire_id, rank))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AirrSchema;
    use std::path::PathBuf;

    fn strcol(vals: &[&str]) -> Column {
        Column::Str(vals.iter().map(|s| Some(s.to_string())).collect())
    }

    fn adaptive_v1_table() -> RecordTable {
        let mut t = RecordTable::new();
        t.set_column("nucleotide", strcol(&["GTCAAA", "GTCCCC", "GTCAAA"]))
            .unwrap();
        t.set_column("aminoAcid", strcol(&["CASSL", "CSARD", "CASSL"]))
            .unwrap();
        t.set_column("count (templates/reads)", strcol(&["5", "10", "185"]))
            .unwrap();
        t.set_column("vGeneName", strcol(&["TCRBV12-3", "TCRBV05-1", "TCRBV12-3"]))
            .unwrap();
        t.set_column("jGeneName", strcol(&["TCRBJ01-2", "TCRBJ02-7", "TCRBJ01-2"]))
            .unwrap();
        t.set_column("dGeneNameTies", strcol(&["TCRBD01-1,TCRBD02-1", "TCRBD01-1", ""]))
            .unwrap();
        t.set_column("sequenceStatus", strcol(&["In", "In", "In"])).unwrap();
        t
    }

    #[test]
    fn vendor_columns_are_renamed_and_aligned() {
        let schema = AirrSchema::load();
        let path = PathBuf::from("sampleA.tsv");
        let out = normalize(adaptive_v1_table(), &path, &schema).unwrap();

        assert_eq!(out.n_columns(), schema.len());
        assert_eq!(out.n_rows(), 3);
        assert_eq!(out.str_cell("sequence", 0), Some("GTCAAA"));
        assert_eq!(out.str_cell("junction", 0), Some("GTCAAA"));
        assert_eq!(out.str_cell("sequence_aa", 1), Some("CSARD"));
        assert_eq!(out.str_cell("junction_aa", 1), Some("CSARD"));
        assert_eq!(out.str_cell("repertoire_id", 2), Some("sampleA"));
        // unmapped vendor column dropped
        assert!(!out.has_column("sequenceStatus"));
        // unreported canonical field present as nulls
        assert_eq!(out.str_cell("c_call", 0), None);
    }

    #[test]
    fn d_gene_ties_split_into_d_call_and_d2_call() {
        let schema = AirrSchema::load();
        let out = normalize(adaptive_v1_table(), &PathBuf::from("s.tsv"), &schema).unwrap();
        assert_eq!(out.str_cell("d_call", 0), Some("TCRBD01-1"));
        assert_eq!(out.str_cell("d2_call", 0), Some("TCRBD02-1"));
        assert_eq!(out.str_cell("d_call", 1), Some("TCRBD01-1"));
        assert_eq!(out.str_cell("d2_call", 1), None);
    }

    #[test]
    fn existing_d_call_wins_over_tie() {
        let schema = AirrSchema::load();
        let mut t = RecordTable::new();
        t.set_column("nucleotide", strcol(&["GTC"])).unwrap();
        t.set_column("d_call", strcol(&["TRBD9"])).unwrap();
        t.set_column("dGeneNameTies", strcol(&["TCRBD01-1,TCRBD02-1"]))
            .unwrap();
        let out = normalize(t, &PathBuf::from("s.tsv"), &schema).unwrap();
        assert_eq!(out.str_cell("d_call", 0), Some("TRBD9"));
        assert_eq!(out.str_cell("d2_call", 0), Some("TCRBD02-1"));
    }

    #[test]
    fn three_way_tie_is_an_error() {
        let schema = AirrSchema::load();
        let mut t = RecordTable::new();
        t.set_column("nucleotide", strcol(&["GTC"])).unwrap();
        t.set_column("dGeneNameTies", strcol(&["TRBD1,TRBD2,TRBD3"]))
            .unwrap();
        assert!(normalize(t, &PathBuf::from("s.tsv"), &schema).is_err());
    }

    #[test]
    fn clone_ids_follow_distinct_junction_rank() {
        let schema = AirrSchema::load();
        let out = normalize(adaptive_v1_table(), &PathBuf::from("sampleA.tsv"), &schema).unwrap();
        // rows 0 and 2 carry the same junction, row 1 a different one
        assert_eq!(out.str_cell("clone_id", 0), Some("sampleA1"));
        assert_eq!(out.str_cell("clone_id", 1), Some("sampleA2"));
        assert_eq!(out.str_cell("clone_id", 2), Some("sampleA1"));
    }

    #[test]
    fn missing_nucleotide_column_is_a_schema_error() {
        let schema = AirrSchema::load();
        let mut t = RecordTable::new();
        t.set_column("aminoAcid", strcol(&["CASSL"])).unwrap();
        let err = normalize(t, &PathBuf::from("s.tsv"), &schema).unwrap_err();
        assert!(err.to_string().contains("nucleotide"));
    }

    #[test]
    fn complete_table_passes_through_unchanged() {
        let schema = AirrSchema::load();
        let mut t = RecordTable::new();
        for field in schema.fields() {
            t.set_column(field, strcol(&["x"])).unwrap();
        }
        let before = t.clone();
        let out = normalize(t, &PathBuf::from("other_name.tsv"), &schema).unwrap();
        assert_eq!(out.column_names(), before.column_names());
        // values untouched, including whatever repertoire_id was already there
        assert_eq!(out.str_cell("repertoire_id", 0), Some("x"));
    }

    #[test]
    fn repertoire_id_strips_composite_extension() {
        assert_eq!(repertoire_id_from_path(Path::new("a/b/s1.tsv")), "s1");
        assert_eq!(repertoire_id_from_path(Path::new("s2.tsv.gz")), "s2");
        assert_eq!(repertoire_id_from_path(Path::new("s3.txt")), "s3");
    }
}

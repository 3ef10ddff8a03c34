use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

use crate::table::{Column, RecordTable};

/// Value a multi-allele gene call collapses to.
pub const UNRESOLVED: &str = "unresolved";
/// Family value when no family token can be extracted from a call.
pub const UNRECOGNIZED: &str = "unrecognized";

lazy_static! {
    /// Family token inside a gene call, e.g. TCRBV12 out of TCRBV12-03*01.
    static ref FAMILY_PATTERN: Regex =
        Regex::new(r"(TRB|TCRB)[VDJ]\d+").expect("family pattern compiles");
}

/// Annotate one normalized per-file table with the derived MiAIRR fields.
///
/// Everything is row-local except `duplicate_frequency` (a whole-file
/// aggregate) and `sequence_id` (row order), so row order must already be
/// the source file's order.
pub fn derive(table: &mut RecordTable) -> Result<()> {
    let n_rows = table.n_rows();

    table.set_column(
        "sequence_id",
        Column::Int((1..=n_rows as i64).map(Some).collect()),
    )?;
    table.set_column("rev_comp", Column::Bool(vec![Some(false); n_rows]))?;

    derive_length(table, "junction", "junction_length")?;
    derive_length(table, "junction_aa", "junction_aa_length")?;

    let sequence = owned_str(table, "sequence");
    let sequence_aa = owned_str(table, "sequence_aa");
    let stop_codon: Vec<Option<bool>> = (0..n_rows)
        .map(|row| {
            Some(match (&sequence[row], &sequence_aa[row]) {
                (Some(nt), Some(aa)) => nt.contains('*') || aa.contains('*'),
                // a missing sequence can never be called productive
                _ => true,
            })
        })
        .collect();
    let productive: Vec<Option<bool>> = stop_codon.iter().map(|s| s.map(|s| !s)).collect();
    table.set_column("stop_codon", Column::Bool(stop_codon))?;
    table.set_column("productive", Column::Bool(productive))?;

    let reading_frame: Vec<Option<String>> = (0..n_rows)
        .map(|row| {
            let out_of_frame = sequence_aa[row]
                .as_ref()
                .map(|aa| aa.contains('*'))
                .unwrap_or(false);
            Some(if out_of_frame { "out-of-frame" } else { "in-frame" }.to_string())
        })
        .collect();
    table.set_column("reading_frame", Column::Str(reading_frame))?;

    let v_call = collapse_multi_calls(table, "v_call")?;
    let d_call = collapse_multi_calls(table, "d_call")?;
    let j_call = collapse_multi_calls(table, "j_call")?;

    let complete_vdj: Vec<Option<bool>> = (0..n_rows)
        .map(|row| {
            let resolved = |call: &Option<String>| match call {
                Some(c) => !c.contains(UNRESOLVED),
                None => false,
            };
            Some(resolved(&v_call[row]) && resolved(&d_call[row]) && resolved(&j_call[row]))
        })
        .collect();
    table.set_column("complete_vdj", Column::Bool(complete_vdj))?;

    table.set_column("v_family", Column::Str(extract_families(&v_call)))?;
    table.set_column("d_family", Column::Str(extract_families(&d_call)))?;
    table.set_column("j_family", Column::Str(extract_families(&j_call)))?;

    derive_duplicate_frequency(table)?;
    Ok(())
}

fn owned_str(table: &RecordTable, name: &str) -> Vec<Option<String>> {
    match table.str_column(name) {
        Some(v) => v.to_vec(),
        None => vec![None; table.n_rows()],
    }
}

/// Character count of a string column, null-propagating.
fn derive_length(table: &mut RecordTable, source: &str, target: &str) -> Result<()> {
    let values = owned_str(table, source);
    let lengths: Vec<Option<i64>> = values
        .iter()
        .map(|v| v.as_ref().map(|s| s.chars().count() as i64))
        .collect();
    table.set_column(target, Column::Int(lengths))
}

/// Replace multi-allele calls (raw value containing `/`) with the
/// "unresolved" literal, writing the collapsed column back. Returns the
/// collapsed values for downstream derivation.
fn collapse_multi_calls(table: &mut RecordTable, name: &str) -> Result<Vec<Option<String>>> {
    let collapsed: Vec<Option<String>> = owned_str(table, name)
        .into_iter()
        .map(|call| {
            call.map(|c| {
                if c.contains('/') {
                    UNRESOLVED.to_string()
                } else {
                    c
                }
            })
        })
        .collect();
    table.set_column(name, Column::Str(collapsed.clone()))?;
    Ok(collapsed)
}

fn extract_families(calls: &[Option<String>]) -> Vec<Option<String>> {
    calls
        .iter()
        .map(|call| {
            let family = call
                .as_ref()
                .and_then(|c| FAMILY_PATTERN.find(c))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| UNRECOGNIZED.to_string());
            Some(family)
        })
        .collect()
}

/// File-scoped aggregate: each row's share of the file's total template
/// count. Rows without a count stay null and do not contribute to the total.
fn derive_duplicate_frequency(table: &mut RecordTable) -> Result<()> {
    let counts: Vec<Option<i64>> = match table.column("duplicate_count") {
        Some(Column::Int(v)) => v.clone(),
        Some(Column::Str(v)) => v.iter().map(|c| c.as_deref().and_then(parse_count)).collect(),
        _ => vec![None; table.n_rows()],
    };
    let total: i64 = counts.iter().flatten().sum();
    let frequency: Vec<Option<f64>> = counts
        .iter()
        .map(|c| match c {
            Some(count) if total > 0 => Some(*count as f64 / total as f64),
            _ => None,
        })
        .collect();
    table.set_column("duplicate_count", Column::Int(counts))?;
    table.set_column("duplicate_frequency", Column::Float(frequency))?;
    Ok(())
}

/// Vendor counts are integers, but MiXCR writes them with a decimal point.
fn parse_count(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|f| f.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strcol(vals: &[Option<&str>]) -> Column {
        Column::Str(vals.iter().map(|s| s.map(String::from)).collect())
    }

    fn base_table() -> RecordTable {
        let mut t = RecordTable::new();
        t.set_column(
            "sequence",
            strcol(&[Some("GTCAAA"), Some("GTCCCC"), Some("GTCGGG"), None]),
        )
        .unwrap();
        t.set_column(
            "junction",
            strcol(&[Some("GTCAAA"), Some("GTCCCC"), Some("GTCGGG"), None]),
        )
        .unwrap();
        t.set_column(
            "sequence_aa",
            strcol(&[Some("CASSL"), Some("CASSL*GQGN"), Some("CSAR"), Some("CSAR")]),
        )
        .unwrap();
        t.set_column(
            "junction_aa",
            strcol(&[Some("CASSL"), Some("CASSL*GQGN"), Some("CSAR"), Some("CSAR")]),
        )
        .unwrap();
        t.set_column(
            "v_call",
            strcol(&[
                Some("TCRBV12-3"),
                Some("TRBV12-3/TRBV12-4"),
                Some("TRBV5-1*01"),
                None,
            ]),
        )
        .unwrap();
        t.set_column(
            "d_call",
            strcol(&[Some("TCRBD1-1"), Some("TCRBD1-1"), None, Some("TCRBD2-1")]),
        )
        .unwrap();
        t.set_column(
            "j_call",
            strcol(&[Some("TCRBJ1-2"), Some("TCRBJ2-7"), Some("TRBJ2-1"), Some("TRBJ2-1")]),
        )
        .unwrap();
        t.set_column(
            "duplicate_count",
            strcol(&[Some("5"), Some("10"), Some("185"), None]),
        )
        .unwrap();
        t
    }

    #[test]
    fn sequence_id_and_rev_comp() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        assert_eq!(t.int_column("sequence_id").unwrap(), &[Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(t.bool_column("rev_comp").unwrap(), &[Some(false); 4]);
    }

    #[test]
    fn stop_codon_and_productive_are_negations() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        let stop = t.bool_column("stop_codon").unwrap();
        let productive = t.bool_column("productive").unwrap();
        assert_eq!(stop, &[Some(false), Some(true), Some(false), Some(true)]);
        for row in 0..4 {
            assert_eq!(productive[row], stop[row].map(|s| !s));
        }
    }

    #[test]
    fn reading_frame_follows_amino_acid_stop() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        assert_eq!(t.str_cell("reading_frame", 0), Some("in-frame"));
        assert_eq!(t.str_cell("reading_frame", 1), Some("out-of-frame"));
    }

    #[test]
    fn multi_allele_calls_collapse_before_family_extraction() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        assert_eq!(t.str_cell("v_call", 1), Some(UNRESOLVED));
        assert_eq!(t.str_cell("v_family", 1), Some(UNRECOGNIZED));
        assert_eq!(t.str_cell("v_family", 0), Some("TCRBV12"));
        assert_eq!(t.str_cell("v_family", 2), Some("TRBV5"));
        assert_eq!(t.str_cell("v_family", 3), Some(UNRECOGNIZED));
        assert_eq!(t.str_cell("j_family", 3), Some("TRBJ2"));
    }

    #[test]
    fn complete_vdj_requires_all_three_calls() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        let complete = t.bool_column("complete_vdj").unwrap();
        // row 1 has an unresolved v, row 2 a null d, row 3 a null v
        assert_eq!(complete, &[Some(true), Some(false), Some(false), Some(false)]);
    }

    #[test]
    fn duplicate_frequency_sums_to_one() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        let freq = t.float_column("duplicate_frequency").unwrap();
        assert!((freq[0].unwrap() - 0.025).abs() < 1e-9);
        assert!((freq[1].unwrap() - 0.05).abs() < 1e-9);
        assert_eq!(freq[3], None);
        let sum: f64 = freq.iter().flatten().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lengths_propagate_nulls() {
        let mut t = base_table();
        derive(&mut t).unwrap();
        let lengths = t.int_column("junction_length").unwrap();
        assert_eq!(lengths, &[Some(6), Some(6), Some(6), None]);
        let aa_lengths = t.int_column("junction_aa_length").unwrap();
        assert_eq!(aa_lengths[1], Some(10));
    }

    #[test]
    fn zero_total_count_leaves_frequency_null() {
        let mut t = RecordTable::new();
        t.set_column("sequence", strcol(&[Some("GTC")])).unwrap();
        t.set_column("junction", strcol(&[Some("GTC")])).unwrap();
        t.set_column("sequence_aa", strcol(&[None])).unwrap();
        t.set_column("junction_aa", strcol(&[None])).unwrap();
        t.set_column("duplicate_count", strcol(&[None])).unwrap();
        derive(&mut t).unwrap();
        assert_eq!(t.float_column("duplicate_frequency").unwrap(), &[None]);
    }

    #[test]
    fn mixcr_style_float_counts_parse() {
        assert_eq!(parse_count("1234"), Some(1234));
        assert_eq!(parse_count("1234.0"), Some(1234));
        assert_eq!(parse_count("x"), None);
    }
}

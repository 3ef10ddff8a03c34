use std::collections::HashMap;

use lazy_static::lazy_static;

/// Canonical targets of the D-gene tie rule: the tied pair is split into
/// these two columns.
pub const D_TIE_TARGETS: (&str, &str) = ("d_call", "d2_call");

/// How one vendor column maps onto the canonical schema.
///
/// Almost every entry is a plain one-to-one rename. The exception is the
/// Adaptive tied-D-gene column, which carries two comma-joined gene calls in
/// one raw value and therefore produces two canonical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRule {
    Rename(&'static str),
    DGeneTie,
}

/// (vendor column, rule) pairs covering Adaptive ImmunoSEQ v1 (camelCase)
/// and v2 (snake_case) exports, BGI IR-SEQ, and MiXCR clone tables.
const VENDOR_FIELD_RULES: &[(&str, MappingRule)] = &[
    // Adaptive ImmunoSEQ v1
    ("nucleotide", MappingRule::Rename("sequence")),
    ("aminoAcid", MappingRule::Rename("sequence_aa")),
    ("count (templates/reads)", MappingRule::Rename("duplicate_count")),
    ("count (templates)", MappingRule::Rename("duplicate_count")),
    ("count (reads)", MappingRule::Rename("duplicate_count")),
    ("estimatedNumberGenomes", MappingRule::Rename("consensus_count")),
    ("vGeneName", MappingRule::Rename("v_call")),
    ("dGeneName", MappingRule::Rename("d_call")),
    ("jGeneName", MappingRule::Rename("j_call")),
    ("vFamilyName", MappingRule::Rename("v_family")),
    ("dFamilyName", MappingRule::Rename("d_family")),
    ("jFamilyName", MappingRule::Rename("j_family")),
    ("dGeneNameTies", MappingRule::DGeneTie),
    ("cdr3Length", MappingRule::Rename("junction_length")),
    // Adaptive ImmunoSEQ v2
    ("rearrangement", MappingRule::Rename("sequence")),
    ("amino_acid", MappingRule::Rename("sequence_aa")),
    ("templates", MappingRule::Rename("duplicate_count")),
    ("seq_reads", MappingRule::Rename("consensus_count")),
    ("v_resolved", MappingRule::Rename("v_call")),
    ("d_resolved", MappingRule::Rename("d_call")),
    ("j_resolved", MappingRule::Rename("j_call")),
    ("d_gene_ties", MappingRule::DGeneTie),
    ("cdr1_rearrangement", MappingRule::Rename("cdr1")),
    ("cdr1_amino_acid", MappingRule::Rename("cdr1_aa")),
    ("cdr2_rearrangement", MappingRule::Rename("cdr2")),
    ("cdr2_amino_acid", MappingRule::Rename("cdr2_aa")),
    ("cdr3_rearrangement", MappingRule::Rename("cdr3")),
    ("cdr3_amino_acid", MappingRule::Rename("cdr3_aa")),
    ("cdr3_length", MappingRule::Rename("junction_length")),
    // BGI IR-SEQ
    ("Clone_count", MappingRule::Rename("duplicate_count")),
    ("CDR3_dna", MappingRule::Rename("junction")),
    ("CDR3_aa", MappingRule::Rename("junction_aa")),
    ("V_gene", MappingRule::Rename("v_call")),
    ("D_gene", MappingRule::Rename("d_call")),
    ("J_gene", MappingRule::Rename("j_call")),
    ("Locus", MappingRule::Rename("locus")),
    // MiXCR
    ("cloneCount", MappingRule::Rename("duplicate_count")),
    ("readCount", MappingRule::Rename("consensus_count")),
    ("targetSequences", MappingRule::Rename("sequence")),
    ("targetQualities", MappingRule::Rename("quality")),
    ("nSeqCDR1", MappingRule::Rename("cdr1")),
    ("aaSeqCDR1", MappingRule::Rename("cdr1_aa")),
    ("nSeqCDR2", MappingRule::Rename("cdr2")),
    ("aaSeqCDR2", MappingRule::Rename("cdr2_aa")),
    ("nSeqCDR3", MappingRule::Rename("junction")),
    ("aaSeqCDR3", MappingRule::Rename("junction_aa")),
    ("bestVHit", MappingRule::Rename("v_call")),
    ("bestDHit", MappingRule::Rename("d_call")),
    ("bestJHit", MappingRule::Rename("j_call")),
    ("bestCHit", MappingRule::Rename("c_call")),
    ("bestVGene", MappingRule::Rename("v_call")),
    ("bestDGene", MappingRule::Rename("d_call")),
    ("bestJGene", MappingRule::Rename("j_call")),
];

lazy_static! {
    static ref RULE_INDEX: HashMap<&'static str, MappingRule> =
        VENDOR_FIELD_RULES.iter().cloned().collect();
}

/// Look up the mapping rule for a vendor column name. `None` means the
/// column has no canonical counterpart and is dropped, never an error.
pub fn lookup(vendor_field: &str) -> Option<MappingRule> {
    RULE_INDEX.get(vendor_field).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_resolve() {
        assert_eq!(lookup("aminoAcid"), Some(MappingRule::Rename("sequence_aa")));
        assert_eq!(lookup("nSeqCDR3"), Some(MappingRule::Rename("junction")));
        assert_eq!(lookup("Clone_count"), Some(MappingRule::Rename("duplicate_count")));
        assert_eq!(lookup("dGeneNameTies"), Some(MappingRule::DGeneTie));
        assert_eq!(lookup("d_gene_ties"), Some(MappingRule::DGeneTie));
    }

    #[test]
    fn unknown_field_is_dropped_not_an_error() {
        assert_eq!(lookup("sequenceStatus"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn rename_targets_are_canonical() {
        use crate::schema::airr::AirrSchema;
        let schema = AirrSchema::load();
        for (_, rule) in VENDOR_FIELD_RULES {
            if let MappingRule::Rename(target) = rule {
                assert!(schema.contains(target), "non-canonical target {}", target);
            }
        }
        assert!(schema.contains(D_TIE_TARGETS.0));
        assert!(schema.contains(D_TIE_TARGETS.1));
    }
}

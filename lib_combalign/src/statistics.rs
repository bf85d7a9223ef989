use crate::{format::BlockFormatter, matrix::AlignmentMatrix, slots::SlotReconciliation};

/// Summary of a merge run.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStatistics {
    pub reference_name: String,
    pub reference_length: usize,
    /// The number of columns of the merged alignment.
    pub gapped_reference_length: usize,
    pub insertion_columns: usize,
    pub segment_size: usize,
    pub segment_count: usize,
    pub targets: Vec<TargetStatistics>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetStatistics {
    pub name: String,
    pub aligned_residues: usize,
    pub inserted_residues: usize,
    pub unaligned_reference_residues: usize,
}

impl MergeStatistics {
    pub fn new(
        reconciliation: &SlotReconciliation,
        matrix: &AlignmentMatrix,
        formatter: &BlockFormatter,
    ) -> Self {
        Self {
            reference_name: matrix.reference_name().to_string(),
            reference_length: matrix.reference_column_count(),
            gapped_reference_length: matrix.column_count(),
            insertion_columns: matrix.insertion_column_count(),
            segment_size: formatter.line_width().get(),
            segment_count: formatter.segment_count(matrix),
            targets: reconciliation
                .scans()
                .iter()
                .map(|(target, scan)| TargetStatistics {
                    name: scan.target_name().to_string(),
                    aligned_residues: scan.aligned_residue_count(),
                    inserted_residues: scan.inserted_residue_count(),
                    unaligned_reference_residues: matrix.unaligned_reference_residues(target),
                })
                .collect(),
        }
    }
}

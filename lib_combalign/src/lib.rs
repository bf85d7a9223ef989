//! Merging of pairwise alignments that share a common reference into a single gapped, one-to-many alignment.
//!
//! The reference defines the coordinate system ([`reference::ReferenceIndex`]).
//! Every pairwise alignment ([`record::PairwiseRecord`]) is scanned against it,
//! and the longest insertion between each pair of consecutive reference residues is determined ([`slots::SlotReconciliation`]).
//! The merged alignment ([`matrix::AlignmentMatrix`]) pads all shorter insertions with gaps,
//! and is finally rendered in fixed-width segments ([`format::BlockFormatter`]).

use log::info;

use crate::{
    error::Result, matrix::AlignmentMatrix, record::PairwiseRecord, reference::ReferenceIndex,
    slots::SlotReconciliation,
};

pub mod error;
pub mod format;
pub mod index_types;
pub mod input;
pub mod matrix;
pub mod record;
pub mod reference;
pub mod slots;
pub mod statistics;


/// Reconciles the insertion slots of all records, then merges them into one alignment.
pub fn combine_alignments(
    reference: &ReferenceIndex,
    records: &[PairwiseRecord],
) -> Result<AlignmentMatrix> {
    info!(
        "Combining {} pairwise alignments against reference '{}' of length {}",
        records.len(),
        reference.name(),
        reference.len()
    );

    let reconciliation = SlotReconciliation::new(reference, records)?;
    AlignmentMatrix::merge(reference, &reconciliation)
}

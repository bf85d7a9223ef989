use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, trace};
use tagged_vec::TaggedVec;

use crate::{
    error::{Error, Result},
    index_types::{ReferencePosition, SlotId, TargetIndex},
    record::{PairwiseRecord, Symbol},
    reference::ReferenceIndex,
};

#[cfg(test)]
mod tests;

/// The result of scanning a single pairwise record against the reference.
#[derive(Debug, Clone)]
pub struct RecordScan {
    target_name: String,
    /// 0-based offset of the first reference residue covered by the record.
    offset: usize,
    aligned: Vec<AlignedResidue>,
    insertions: BTreeMap<SlotId, Vec<char>>,
}

/// What a record aligns to a single reference residue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AlignedResidue {
    pub symbol: Symbol,
    pub correspondence: char,
}

/// The slot width table together with the per-record scans it was computed from.
#[derive(Debug, Clone)]
pub struct SlotReconciliation {
    widths: TaggedVec<SlotId, usize>,
    scans: TaggedVec<TargetIndex, RecordScan>,
}

struct ScanState {
    consumed: usize,
    aligned: Vec<AlignedResidue>,
    insertions: BTreeMap<SlotId, Vec<char>>,
}

impl RecordScan {
    /// Scans the columns of `record` in order, tracking the current reference position.
    ///
    /// Each run of reference-gap columns is an insertion into the slot preceding the next reference residue.
    /// Columns that are gaps on both sides are ignored.
    pub fn new(reference: &ReferenceIndex, record: &PairwiseRecord) -> Result<Self> {
        let target_name = record.target_name();
        let projection = record.reference_projection();
        if projection.is_empty() {
            return Err(Error::RecordWithoutReferenceResidues {
                target: target_name.to_string(),
            });
        }

        let offset = reference.find_projection(&projection).ok_or_else(|| {
            Error::RecordReferenceMismatch {
                target: target_name.to_string(),
                projection: projection.iter().collect(),
            }
        })?;
        if projection.len() < reference.len() {
            debug!(
                "Record '{target_name}' covers reference positions {}..={}",
                offset + 1,
                offset + projection.len()
            );
        }

        let alphabet = reference.alphabet();
        let check_target = |column: usize, target: Symbol| -> Result<()> {
            match target {
                Symbol::Residue(residue) if !alphabet.contains(residue) => {
                    Err(Error::InvalidTargetResidue {
                        target: target_name.to_string(),
                        residue,
                        column,
                        alphabet: alphabet.to_string(),
                    })
                }
                _ => Ok(()),
            }
        };

        let state = record.columns().iter().enumerate().try_fold(
            ScanState {
                consumed: 0,
                aligned: Vec::with_capacity(projection.len()),
                insertions: BTreeMap::new(),
            },
            |mut state, (column, pair)| -> Result<ScanState> {
                check_target(column, pair.target)?;

                match (pair.reference, pair.target) {
                    (Symbol::Residue(_), target) => {
                        state.aligned.push(AlignedResidue {
                            symbol: target,
                            correspondence: record.correspondence_at(column),
                        });
                        state.consumed += 1;
                    }
                    (Symbol::Gap, Symbol::Residue(residue)) => {
                        let next_position = ReferencePosition::from(offset + state.consumed + 1);
                        let slot = SlotId::preceding(next_position);
                        state.insertions.entry(slot).or_default().push(residue);
                    }
                    (Symbol::Gap, Symbol::Gap) => {
                        trace!("Ignoring gap-only column {column} of '{target_name}'");
                    }
                }

                Ok(state)
            },
        )?;
        debug_assert_eq!(state.consumed, projection.len());

        Ok(Self {
            target_name: target_name.to_string(),
            offset,
            aligned: state.aligned,
            insertions: state.insertions,
        })
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// The first reference position covered by the record.
    pub fn first_position(&self) -> ReferencePosition {
        ReferencePosition::from(self.offset + 1)
    }

    /// The last reference position covered by the record.
    pub fn last_position(&self) -> ReferencePosition {
        ReferencePosition::from(self.offset + self.aligned.len())
    }

    /// What the record aligns to the given reference position.
    ///
    /// Returns `None` if the position lies outside the part of the reference covered by the record.
    pub fn aligned_at(&self, position: ReferencePosition) -> Option<&AlignedResidue> {
        position
            .offset()
            .checked_sub(self.offset)
            .and_then(|index| self.aligned.get(index))
    }

    /// The residues inserted by the record at the given slot, or an empty slice.
    pub fn insertion_at(&self, slot: SlotId) -> &[char] {
        self.insertions
            .get(&slot)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn insertions(&self) -> impl Iterator<Item = (SlotId, &[char])> {
        self.insertions
            .iter()
            .map(|(slot, residues)| (*slot, residues.as_slice()))
    }

    pub fn aligned_residue_count(&self) -> usize {
        self.aligned
            .iter()
            .filter(|aligned| !aligned.symbol.is_gap())
            .count()
    }

    pub fn inserted_residue_count(&self) -> usize {
        self.insertions.values().map(Vec::len).sum()
    }
}

impl SlotReconciliation {
    /// Scans every record and computes, for each of the `N + 1` slots, the longest insertion any record has there.
    ///
    /// Slots without insertions have width zero.
    pub fn new(reference: &ReferenceIndex, records: &[PairwiseRecord]) -> Result<Self> {
        debug!(
            "Reconciling insertion slots of {} records: {}",
            records.len(),
            records.iter().map(PairwiseRecord::target_name).join(", ")
        );

        let scans = records
            .iter()
            .map(|record| RecordScan::new(reference, record))
            .collect::<Result<Vec<_>>>()?;

        let widths = scans.iter().fold(
            TaggedVec::from(vec![0; reference.len() + 1]),
            |mut widths: TaggedVec<SlotId, usize>, scan| {
                for (slot, residues) in scan.insertions() {
                    widths[slot] = widths[slot].max(residues.len());
                }
                widths
            },
        );

        for (slot, width) in widths.iter().filter(|(_, width)| **width > 0) {
            trace!("Slot {} has width {width}", usize::from(slot));
        }

        Ok(Self {
            widths,
            scans: scans.into(),
        })
    }

    pub fn width(&self, slot: SlotId) -> usize {
        self.widths[slot]
    }

    pub fn widths(&self) -> &TaggedVec<SlotId, usize> {
        &self.widths
    }

    /// The number of insertion columns the merged alignment will contain.
    pub fn total_insertion_width(&self) -> usize {
        self.widths.iter_values().sum()
    }

    pub fn scans(&self) -> &TaggedVec<TargetIndex, RecordScan> {
        &self.scans
    }

    #[cfg(test)]
    pub(crate) fn override_width(&mut self, slot: SlotId, width: usize) {
        self.widths[slot] = width;
    }
}

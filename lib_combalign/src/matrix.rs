use log::{debug, info, trace};
use tagged_vec::TaggedVec;

use crate::{
    error::{Error, Result},
    index_types::{ReferencePosition, SlotId, TargetIndex},
    record::{NO_CORRESPONDENCE, Symbol},
    reference::ReferenceIndex,
    slots::SlotReconciliation,
};


/// The merged one-to-many alignment.
///
/// It consists of one reference row and one row per target, in input order.
/// All rows have the same number of columns by construction, since every column stores one cell per row.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    reference_name: String,
    target_names: TaggedVec<TargetIndex, String>,
    columns: Vec<AlignmentColumn>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AlignmentColumn {
    kind: ColumnKind,
    reference: Symbol,
    targets: Vec<TargetCell>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ColumnKind {
    /// A column carrying a reference residue.
    Reference { position: ReferencePosition },
    /// The `offset`-th column of an insertion slot.
    ///
    /// The reference row is always a gap here.
    Insertion { slot: SlotId, offset: usize },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TargetCell {
    pub symbol: Symbol,
    pub correspondence: char,
}

impl AlignmentMatrix {
    /// Walks the slots `0..=N` and emits, for each slot, its reconciled insertion columns,
    /// followed by the column of the next reference residue if there is one.
    ///
    /// Insertions are placed left-aligned and padded with gaps up to the slot width.
    /// Reference residues a target does not align, or that lie outside the part of the reference the target covers,
    /// become gaps in the target row.
    pub fn merge(reference: &ReferenceIndex, reconciliation: &SlotReconciliation) -> Result<Self> {
        let scans = reconciliation.scans();
        let mut columns =
            Vec::with_capacity(reference.len() + reconciliation.total_insertion_width());

        for slot in reference.slots() {
            let width = reconciliation.width(slot);

            for scan in scans.iter_values() {
                let insertion_length = scan.insertion_at(slot).len();
                if insertion_length > width {
                    return Err(Error::InsertionExceedsSlotWidth {
                        target: scan.target_name().to_string(),
                        slot: slot.into(),
                        insertion_length,
                        slot_width: width,
                    });
                }
            }

            if width > 0 {
                trace!("Emitting {width} insertion columns for slot {}", usize::from(slot));
            }
            columns.extend((0..width).map(|offset| AlignmentColumn {
                kind: ColumnKind::Insertion { slot, offset },
                reference: Symbol::Gap,
                targets: scans
                    .iter_values()
                    .map(|scan| TargetCell {
                        symbol: scan
                            .insertion_at(slot)
                            .get(offset)
                            .copied()
                            .map(Symbol::Residue)
                            .unwrap_or(Symbol::Gap),
                        correspondence: NO_CORRESPONDENCE,
                    })
                    .collect(),
            }));

            if slot < reference.last_slot() {
                let position = ReferencePosition::following(slot);
                columns.push(AlignmentColumn {
                    kind: ColumnKind::Reference { position },
                    reference: Symbol::Residue(reference.residue(position)),
                    targets: scans
                        .iter_values()
                        .map(|scan| {
                            scan.aligned_at(position)
                                .map(|aligned| TargetCell {
                                    symbol: aligned.symbol,
                                    correspondence: aligned.correspondence,
                                })
                                .unwrap_or(TargetCell {
                                    symbol: Symbol::Gap,
                                    correspondence: NO_CORRESPONDENCE,
                                })
                        })
                        .collect(),
                });
            }
        }

        let result = Self {
            reference_name: reference.name().to_string(),
            target_names: scans
                .iter_values()
                .map(|scan| scan.target_name().to_string())
                .collect(),
            columns,
        };
        info!(
            "Merged {} targets into {} columns ({} insertion columns)",
            result.target_count(),
            result.column_count(),
            result.insertion_column_count()
        );
        debug_assert_eq!(result.reference_column_count(), reference.len());

        Ok(result)
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    pub fn target_names(&self) -> &TaggedVec<TargetIndex, String> {
        &self.target_names
    }

    pub fn target_name(&self, target: TargetIndex) -> &str {
        &self.target_names[target]
    }

    pub fn target_count(&self) -> usize {
        self.target_names.len()
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetIndex> + use<> {
        (0..self.target_names.len()).map(TargetIndex::from)
    }

    pub fn columns(&self) -> &[AlignmentColumn] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn reference_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|column| column.is_reference())
            .count()
    }

    pub fn insertion_column_count(&self) -> usize {
        self.column_count() - self.reference_column_count()
    }

    pub fn reference_row(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().map(|column| column.reference)
    }

    pub fn target_row(&self, target: TargetIndex) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().map(move |column| column.target(target).symbol)
    }

    pub fn correspondence_row(&self, target: TargetIndex) -> impl Iterator<Item = char> + '_ {
        self.columns
            .iter()
            .map(move |column| column.target(target).correspondence)
    }

    /// Counts the reference residues the target has no residue aligned to.
    pub fn unaligned_reference_residues(&self, target: TargetIndex) -> usize {
        let count = self
            .columns
            .iter()
            .filter(|column| column.is_reference() && column.target(target).symbol.is_gap())
            .count();
        debug!(
            "Target '{}' leaves {count} reference residues unaligned",
            self.target_name(target)
        );
        count
    }
}

impl AlignmentColumn {
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, ColumnKind::Reference { .. })
    }

    pub fn reference(&self) -> Symbol {
        self.reference
    }

    pub fn target(&self, target: TargetIndex) -> &TargetCell {
        &self.targets[usize::from(target)]
    }

    pub fn targets(&self) -> &[TargetCell] {
        &self.targets
    }
}

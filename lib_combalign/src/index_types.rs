use strong_type::StrongType;


/// A 1-based residue position in the ungapped reference sequence.
#[derive(StrongType)]
#[strong_type(conversion)]
pub struct ReferencePosition(usize);

/// An insertion slot, identified by the reference position immediately preceding it.
///
/// Slot `0` lies before the first residue, slot `N` after the last residue of a reference of length `N`.
#[derive(StrongType)]
#[strong_type(conversion)]
pub struct SlotId(usize);

/// The index of a target row, in input order of the pairwise records.
#[derive(StrongType)]
#[strong_type(conversion)]
pub struct TargetIndex(usize);

impl ReferencePosition {
    /// The position of the residue directly following the given slot.
    pub fn following(slot: SlotId) -> Self {
        Self(slot.0 + 1)
    }

    /// The 0-based offset of this position in the reference sequence.
    pub fn offset(&self) -> usize {
        debug_assert!(self.0 > 0, "reference positions are 1-based");
        self.0 - 1
    }
}

impl SlotId {
    /// The slot directly preceding the given reference position.
    pub fn preceding(position: ReferencePosition) -> Self {
        Self(position.offset())
    }
}

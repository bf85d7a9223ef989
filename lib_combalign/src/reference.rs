use std::fmt::Display;

use log::debug;

use crate::{
    error::{Error, Result},
    index_types::{ReferencePosition, SlotId},
};


/// The set of residue characters accepted in reference and target sequences.
///
/// Matching is case-insensitive.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum ResidueAlphabet {
    /// The 20 standard amino acids plus `B`, `Z`, `X`, `U` and `O`.
    #[default]
    Protein,
    /// `A`, `C`, `G`, `T`, `U` and `N`.
    Nucleic,
    /// Any ASCII letter.
    Any,
}

/// The ordered, 1-based coordinate system over the ungapped reference sequence.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    name: String,
    residues: Vec<char>,
    alphabet: ResidueAlphabet,
}

impl ResidueAlphabet {
    pub fn contains(&self, residue: char) -> bool {
        let residue = residue.to_ascii_uppercase();
        match self {
            Self::Protein => "ACDEFGHIKLMNPQRSTVWYBZXUO".contains(residue),
            Self::Nucleic => "ACGTUN".contains(residue),
            Self::Any => residue.is_ascii_alphabetic(),
        }
    }
}

impl Display for ResidueAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protein => write!(f, "protein"),
            Self::Nucleic => write!(f, "nucleic acid"),
            Self::Any => write!(f, "ASCII letter"),
        }
    }
}

impl ReferenceIndex {
    /// Builds the coordinate system from the raw reference sequence.
    ///
    /// Fails if the sequence is empty or contains a character outside of `alphabet`.
    pub fn new(
        name: impl Into<String>,
        sequence: &str,
        alphabet: ResidueAlphabet,
    ) -> Result<Self> {
        let name = name.into();
        if sequence.is_empty() {
            return Err(Error::EmptyReference);
        }

        let residues = sequence
            .chars()
            .enumerate()
            .map(|(offset, residue)| {
                if alphabet.contains(residue) {
                    Ok(residue)
                } else {
                    Err(Error::InvalidReferenceResidue {
                        residue,
                        position: offset + 1,
                        alphabet: alphabet.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Indexed reference '{name}' with {} residues",
            residues.len()
        );
        Ok(Self {
            name,
            residues,
            alphabet,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> ResidueAlphabet {
        self.alphabet
    }

    /// The number of residues `N`.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Always false, since an empty reference is rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residue(&self, position: ReferencePosition) -> char {
        self.residues[position.offset()]
    }

    pub fn residues(&self) -> &[char] {
        &self.residues
    }

    /// Iterates the positions `1..=N` together with their residues.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = (ReferencePosition, char)> + '_ {
        self.residues
            .iter()
            .enumerate()
            .map(|(offset, residue)| (ReferencePosition::from(offset + 1), *residue))
    }

    /// Iterates the slots `0..=N`.
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = SlotId> + use<> {
        (0..=self.residues.len()).map(SlotId::from)
    }

    /// The slot after the last residue.
    pub fn last_slot(&self) -> SlotId {
        SlotId::from(self.residues.len())
    }

    /// Finds the first offset at which `projection` occurs as a contiguous part of the reference.
    ///
    /// Residues are compared case-insensitively.
    pub fn find_projection(&self, projection: &[char]) -> Option<usize> {
        if projection.is_empty() || projection.len() > self.residues.len() {
            return None;
        }

        self.residues.windows(projection.len()).position(|window| {
            window
                .iter()
                .zip(projection)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
    }
}

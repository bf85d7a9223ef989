use std::fmt::Display;

use crate::error::{Error, Result};

/// The character used to render a gap.
pub const GAP_CHARACTER: char = '-';

/// The correspondence marker used where no marker applies.
pub const NO_CORRESPONDENCE: char = ' ';

/// A residue or a gap in one row of an alignment column.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Symbol {
    Residue(char),
    Gap,
}

/// One column of a pairwise alignment between the reference and a target.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ColumnPair {
    pub reference: Symbol,
    pub target: Symbol,
}

/// One reference-vs-target alignment, normalised to an ordered list of column pairs.
#[derive(Debug, Clone)]
pub struct PairwiseRecord {
    target_name: String,
    columns: Vec<ColumnPair>,
    correspondence: Option<Vec<char>>,
}

impl Symbol {
    pub fn from_char(character: char) -> Self {
        if character == GAP_CHARACTER {
            Self::Gap
        } else {
            Self::Residue(character)
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Residue(residue) => *residue,
            Self::Gap => GAP_CHARACTER,
        }
    }

    pub fn residue(&self) -> Option<char> {
        match self {
            Self::Residue(residue) => Some(*residue),
            Self::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl ColumnPair {
    pub fn new(reference: Symbol, target: Symbol) -> Self {
        Self { reference, target }
    }

    pub fn from_chars(reference: char, target: char) -> Self {
        Self::new(Symbol::from_char(reference), Symbol::from_char(target))
    }
}

impl PairwiseRecord {
    pub fn new(target_name: impl Into<String>, columns: Vec<ColumnPair>) -> Self {
        Self {
            target_name: target_name.into(),
            columns,
            correspondence: None,
        }
    }

    /// Creates a record from the two gapped lines of a pairwise alignment.
    ///
    /// Both lines must have the same number of characters.
    pub fn from_lines(
        target_name: impl Into<String>,
        reference_line: &str,
        target_line: &str,
    ) -> Result<Self> {
        let target_name = target_name.into();
        let reference_length = reference_line.chars().count();
        let target_length = target_line.chars().count();
        if reference_length != target_length {
            return Err(Error::RecordLineLengthMismatch {
                target: target_name,
                reference_length,
                target_length,
            });
        }

        Ok(Self::new(
            target_name,
            reference_line
                .chars()
                .zip(target_line.chars())
                .map(|(reference, target)| ColumnPair::from_chars(reference, target))
                .collect(),
        ))
    }

    /// Attaches one correspondence marker per column.
    pub fn with_correspondence(mut self, correspondence: Vec<char>) -> Result<Self> {
        if correspondence.len() != self.columns.len() {
            return Err(Error::CorrespondenceLengthMismatch {
                target: self.target_name,
                expected: self.columns.len(),
                actual: correspondence.len(),
            });
        }

        self.correspondence = Some(correspondence);
        Ok(self)
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn columns(&self) -> &[ColumnPair] {
        &self.columns
    }

    pub fn correspondence(&self) -> Option<&[char]> {
        self.correspondence.as_deref()
    }

    /// The correspondence marker of the given column, or a space if the record has none.
    pub fn correspondence_at(&self, column: usize) -> char {
        self.correspondence
            .as_ref()
            .map(|correspondence| correspondence[column])
            .unwrap_or(NO_CORRESPONDENCE)
    }

    /// The reference side of the record with all gaps removed.
    pub fn reference_projection(&self) -> Vec<char> {
        self.columns
            .iter()
            .filter_map(|column| column.reference.residue())
            .collect()
    }
}

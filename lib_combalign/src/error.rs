use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[error("A parsing error of kind '{kind:?}' occurred when the remaining input was '{input}'.")]
    Parser {
        input: String,
        kind: nom::error::ErrorKind,
    },

    #[error("Parsing was unsuccessful due to incomplete input: {0:?}.")]
    ParserIncomplete(nom::Needed),

    #[error("The input does not start with a fasta header line ('>').")]
    MissingFastaHeader,

    #[error("The fasta header is not followed by a reference sequence line.")]
    MissingReferenceSequence,

    #[error("The pairwise alignment starting at line {line} is incomplete.")]
    IncompleteRecord { line: usize },

    #[error(
        "The alignment lines of target '{target}' have different lengths (reference: {reference_length}, target: {target_length})."
    )]
    RecordLineLengthMismatch {
        target: String,
        reference_length: usize,
        target_length: usize,
    },

    #[error("The reference sequence is empty.")]
    EmptyReference,

    #[error(
        "The reference sequence contains '{residue}' at position {position}, which is not part of the {alphabet} alphabet."
    )]
    InvalidReferenceResidue {
        residue: char,
        position: usize,
        alphabet: String,
    },

    #[error("The alignment of target '{target}' contains no reference residues.")]
    RecordWithoutReferenceResidues { target: String },

    #[error(
        "The reference side of the alignment of target '{target}' ('{projection}') is not a contiguous part of the reference sequence."
    )]
    RecordReferenceMismatch { target: String, projection: String },

    #[error(
        "The alignment of target '{target}' contains '{residue}' in column {column}, which is not part of the {alphabet} alphabet."
    )]
    InvalidTargetResidue {
        target: String,
        residue: char,
        column: usize,
        alphabet: String,
    },

    #[error(
        "The correspondence line of target '{target}' has {actual} markers, but the alignment has {expected} columns."
    )]
    CorrespondenceLengthMismatch {
        target: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "The insertion of target '{target}' at slot {slot} has length {insertion_length}, but the slot was reconciled to width {slot_width}."
    )]
    InsertionExceedsSlotWidth {
        target: String,
        slot: usize,
        insertion_length: usize,
        slot_width: usize,
    },

    #[error("The line width '{value}' is not a positive integer below 250.")]
    InvalidLineWidth { value: String },
}

/// The broad category of an [`Error`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// The reference sequence is empty or contains characters outside the alphabet.
    MalformedReference,
    /// A pairwise alignment does not fit the reference.
    MalformedRecord,
    /// An insertion does not fit its reconciled slot.
    ///
    /// This is an internal invariant violation.
    Reconciliation,
    InvalidLineWidth,
    /// Reading or parsing the input failed before reaching the merge.
    Input,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::Parser { .. }
            | Self::ParserIncomplete(_)
            | Self::MissingFastaHeader
            | Self::MissingReferenceSequence
            | Self::IncompleteRecord { .. }
            | Self::RecordLineLengthMismatch { .. } => ErrorKind::Input,
            Self::EmptyReference | Self::InvalidReferenceResidue { .. } => {
                ErrorKind::MalformedReference
            }
            Self::RecordWithoutReferenceResidues { .. }
            | Self::RecordReferenceMismatch { .. }
            | Self::InvalidTargetResidue { .. }
            | Self::CorrespondenceLengthMismatch { .. } => ErrorKind::MalformedRecord,
            Self::InsertionExceedsSlotWidth { .. } => ErrorKind::Reconciliation,
            Self::InvalidLineWidth { .. } => ErrorKind::InvalidLineWidth,
        }
    }
}

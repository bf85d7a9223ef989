//! Reading the reference and the pairwise alignments from an input file.
//!
//! An input file starts with the reference in fasta format, with the sequence on a single line.
//! It is followed by the pairwise alignments of the reference against each target,
//! in one of the formats implementing [`PairwiseFormat`].

use log::{debug, info};
use nom::{
    IResult,
    bytes::complete::take_till,
    character::complete::{char, not_line_ending},
};

use crate::{
    error::{Error, Result},
    record::PairwiseRecord,
    reference::{ReferenceIndex, ResidueAlphabet},
};

pub use dali::DaliFormat;
pub use tm_align::TmAlignFormat;

mod dali;
pub mod io;
mod tm_align;

#[cfg(test)]
mod tests;

/// A parser that turns the alignment part of an input file into normalised pairwise records.
pub trait PairwiseFormat {
    /// A human-readable name of the format.
    fn name(&self) -> &'static str;

    /// Parses the given lines, where `first_line` is the 1-based line number of `lines[0]` in the input file.
    fn parse_records(&self, lines: &[&str], first_line: usize) -> Result<Vec<PairwiseRecord>>;
}

/// The parsed content of an input file.
#[derive(Debug, Clone)]
pub struct AlignmentInput {
    pub reference_id: String,
    pub reference_comment: String,
    pub reference_sequence: String,
    pub records: Vec<PairwiseRecord>,
}

impl AlignmentInput {
    pub fn read(mut reader: impl std::io::Read, format: &dyn PairwiseFormat) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input, format)
    }

    pub fn parse(input: &str, format: &dyn PairwiseFormat) -> Result<Self> {
        let lines = io::split_lines(input)?;
        let Some(header_index) = lines.iter().position(|line| !line.trim().is_empty()) else {
            return Err(Error::MissingFastaHeader);
        };
        if !lines[header_index].starts_with('>') {
            return Err(Error::MissingFastaHeader);
        }

        let (reference_id, reference_comment) = parse_fasta_header(lines[header_index])
            .map(|(_, header)| header)
            .map_err(io::translate_nom_error)?;
        debug!("Reference id: '{reference_id}', comment: '{reference_comment}'");

        let reference_sequence = lines
            .get(header_index + 1)
            .map(|line| io::strip_terminator(line.trim()))
            .ok_or(Error::MissingReferenceSequence)?;
        if reference_sequence.is_empty() {
            return Err(Error::EmptyReference);
        }

        let first_record_index = header_index + 2;
        let records = format.parse_records(
            lines.get(first_record_index..).unwrap_or_default(),
            first_record_index + 1,
        )?;
        info!(
            "Read {} pairwise alignments in {} format",
            records.len(),
            format.name()
        );

        Ok(Self {
            reference_id: reference_id.to_string(),
            reference_comment: reference_comment.to_string(),
            reference_sequence: reference_sequence.to_string(),
            records,
        })
    }

    /// Builds the reference coordinate system, labelled with the fasta id.
    pub fn reference_index(&self, alphabet: ResidueAlphabet) -> Result<ReferenceIndex> {
        ReferenceIndex::new(&self.reference_id, &self.reference_sequence, alphabet)
    }
}

fn parse_fasta_header(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = char('>')(input)?;
    let (input, id) = take_till(io::is_any_whitespace)(input)?;
    let input = io::skip_whitespace(input)?;
    let (input, comment) = not_line_ending(input)?;
    Ok((input, (id, comment.trim_end())))
}

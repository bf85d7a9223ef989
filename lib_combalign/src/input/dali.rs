use log::{debug, trace, warn};
use nom::{
    IResult,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::{char, digit1, space1},
};

use crate::{
    error::Result,
    record::{NO_CORRESPONDENCE, PairwiseRecord},
};

use super::{PairwiseFormat, io::is_any_whitespace};

/// Pairwise alignments as printed by DaliLite.
///
/// Each alignment starts with a line `No <n>: Query=<id> Sbjct=<id> ...`,
/// followed by chunks of `Query`, `ident` and `Sbjct` lines:
///
/// ```text
/// No 1: Query=1ppt Sbjct=1bbaA Z-score=4.3
///
/// DSSP  LLLLLLLLLLLLLHHHHHHHH
/// Query GPSQPTYPGDDAPVEDLIRFY   21
/// ident  |    |   |||||
/// Sbjct APLEPEYPGDNATPEQMAQYA   21
/// DSSP  LLLLLLLLLLLLLHHHHHHHH
/// ```
///
/// The query is the reference, and the subject the target.
/// `DSSP` lines and anything outside of alignment blocks are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DaliFormat;

#[derive(Debug, Default)]
struct DaliBlock {
    name: String,
    reference: String,
    correspondence: Vec<char>,
    target: String,
    /// Byte column and character length of the most recent query chunk.
    query_chunk: Option<(usize, usize)>,
}

impl PairwiseFormat for DaliFormat {
    fn name(&self) -> &'static str {
        "DaliLite"
    }

    fn parse_records(&self, lines: &[&str], first_line: usize) -> Result<Vec<PairwiseRecord>> {
        let mut blocks = Vec::new();
        let mut current: Option<DaliBlock> = None;

        for (index, line) in lines.iter().enumerate() {
            if let Ok((_, name)) = parse_block_header(line.trim_start()) {
                trace!("Found DaliLite block '{name}' at line {}", first_line + index);
                blocks.extend(current.take());
                current = Some(DaliBlock {
                    name: name.to_string(),
                    ..Default::default()
                });
                continue;
            }

            let Some(block) = current.as_mut() else {
                continue;
            };

            if let Ok((column, chunk)) = parse_labelled_chunk(line, "Query") {
                block.pad_correspondence();
                block.reference.push_str(chunk);
                block.query_chunk = Some((column, chunk.chars().count()));
            } else if line.starts_with("ident") {
                if let Some((column, length)) = block.query_chunk.take() {
                    let markers = line.get(column..).unwrap_or_default();
                    block.correspondence.extend(
                        markers
                            .chars()
                            .chain(std::iter::repeat(NO_CORRESPONDENCE))
                            .take(length),
                    );
                }
            } else if let Ok((_, chunk)) = parse_labelled_chunk(line, "Sbjct") {
                block.target.push_str(chunk);
            }
        }
        blocks.extend(current);

        blocks
            .into_iter()
            .map(|mut block| {
                block.pad_correspondence();
                if block.reference.is_empty() {
                    warn!("DaliLite block '{}' contains no alignment lines", block.name);
                }
                debug!(
                    "Parsed alignment of '{}' with {} columns",
                    block.name,
                    block.reference.chars().count()
                );

                PairwiseRecord::from_lines(block.name, &block.reference, &block.target)?
                    .with_correspondence(block.correspondence)
            })
            .collect()
    }
}

impl DaliBlock {
    /// Fills up the correspondence markers of chunks without `ident` line.
    fn pad_correspondence(&mut self) {
        let length = self.reference.chars().count();
        if self.correspondence.len() < length {
            self.correspondence.resize(length, NO_CORRESPONDENCE);
        }
    }
}

fn parse_block_header(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("No")(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = digit1(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = take_until("Sbjct=")(input)?;
    let (input, _) = tag("Sbjct=")(input)?;
    take_till1(is_any_whitespace)(input)
}

/// Parses a line `<label> <chunk> [...]`, returning the byte column of the chunk and the chunk.
fn parse_labelled_chunk<'line>(
    line: &'line str,
    label: &'static str,
) -> std::result::Result<(usize, &'line str), nom::Err<nom::error::Error<&'line str>>> {
    let (input, _) = tag(label)(line)?;
    let (input, _) = space1(input)?;
    let column = line.len() - input.len();
    let (_, chunk) = take_till1(is_any_whitespace)(input)?;
    Ok((column, chunk))
}

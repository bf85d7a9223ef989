use log::{debug, trace};

use crate::{
    error::{Error, Result},
    record::{NO_CORRESPONDENCE, PairwiseRecord},
};

use super::{PairwiseFormat, io::strip_terminator};

/// Pairwise alignments as printed by TM-align, preceded by the target name.
///
/// Each alignment takes four lines:
///
/// ```text
/// target_name
/// MGPKAKAEA--SKPHQIPQIPVKLPFVTAPDAL
///          ..         .   .  ::::
/// ---------TDPA---------P---P--PTAL
/// ```
///
/// The second line is the reference, the third the correspondence markers and the fourth the target.
/// The correspondence line may be shorter than the alignment lines, in which case it is padded with spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct TmAlignFormat;

impl PairwiseFormat for TmAlignFormat {
    fn name(&self) -> &'static str {
        "TM-align"
    }

    fn parse_records(&self, lines: &[&str], first_line: usize) -> Result<Vec<PairwiseRecord>> {
        let content_length = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map(|index| index + 1)
            .unwrap_or(0);
        let lines = &lines[..content_length];

        lines
            .chunks(4)
            .enumerate()
            .map(|(index, block)| {
                let line = first_line + index * 4;
                let [name, reference, correspondence, target] = block else {
                    return Err(Error::IncompleteRecord { line });
                };
                trace!("Parsing TM-align block at line {line}");

                parse_block(name, reference, correspondence, target)
            })
            .collect()
    }
}

fn parse_block(
    name: &str,
    reference: &str,
    correspondence: &str,
    target: &str,
) -> Result<PairwiseRecord> {
    let name = name.trim();
    let reference = strip_terminator(reference.trim_end());
    let target = strip_terminator(target.trim_end());
    let record = PairwiseRecord::from_lines(name, reference, target)?;

    let mut correspondence: Vec<char> = correspondence.trim_end().chars().collect();
    if correspondence.last() == Some(&'*') && correspondence.len() > record.columns().len() {
        correspondence.pop();
    }
    if correspondence.len() < record.columns().len() {
        correspondence.resize(record.columns().len(), NO_CORRESPONDENCE);
    }
    debug!(
        "Parsed alignment of '{name}' with {} columns",
        record.columns().len()
    );

    record.with_correspondence(correspondence)
}

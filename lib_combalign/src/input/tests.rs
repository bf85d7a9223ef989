use crate::{
    error::{Error, ErrorKind},
    record::{ColumnPair, Symbol},
    reference::ResidueAlphabet,
};

use super::{AlignmentInput, DaliFormat, TmAlignFormat, io::split_lines};

const TM_ALIGN_INPUT: &str = ">1abc chain A
MGPKAKAEASKPHQ*
2xyz
MGPKAKAEA--SKPHQ
::::...     ..::
MGPKAKAEATDSKPHQ
3def
MGPKAKAEASKPHQ
  ::
--PKAKAEASKP--
";

#[test]
fn split_lines_handles_line_endings() {
    assert_eq!(split_lines("a\r\nb\nc").unwrap(), vec!["a", "b", "c"]);
    assert_eq!(split_lines("a\n\n").unwrap(), vec!["a", ""]);
    assert!(split_lines("").unwrap().is_empty());
}

#[test]
fn parse_tm_align_input() {
    let input = AlignmentInput::parse(TM_ALIGN_INPUT, &TmAlignFormat).unwrap();
    assert_eq!(input.reference_id, "1abc");
    assert_eq!(input.reference_comment, "chain A");
    assert_eq!(input.reference_sequence, "MGPKAKAEASKPHQ");
    assert_eq!(input.records.len(), 2);

    let first = &input.records[0];
    assert_eq!(first.target_name(), "2xyz");
    assert_eq!(first.columns().len(), 16);
    assert_eq!(
        first.columns()[9],
        ColumnPair::new(Symbol::Gap, Symbol::Residue('T'))
    );
    assert_eq!(first.correspondence().unwrap()[0], ':');

    let second = &input.records[1];
    assert_eq!(second.target_name(), "3def");
    let correspondence = second.correspondence().unwrap();
    assert_eq!(correspondence.len(), 14);
    assert_eq!(correspondence[2], ':');
    assert_eq!(correspondence[13], ' ');

    let reference = input.reference_index(ResidueAlphabet::Protein).unwrap();
    assert_eq!(reference.name(), "1abc");
    assert_eq!(reference.len(), 14);
}

#[test]
fn tm_align_incomplete_record() {
    let input = ">ref\nACDE\ntarget\nACDE\n";
    let error = AlignmentInput::parse(input, &TmAlignFormat).unwrap_err();
    assert!(matches!(error, Error::IncompleteRecord { line: 3 }));
    assert_eq!(error.kind(), ErrorKind::Input);
}

#[test]
fn tm_align_line_length_mismatch() {
    let input = ">ref\nACDE\ntarget\nACDE\n\nACD\n";
    let error = AlignmentInput::parse(input, &TmAlignFormat).unwrap_err();
    assert!(matches!(
        error,
        Error::RecordLineLengthMismatch {
            reference_length: 4,
            target_length: 3,
            ..
        }
    ));
}

#[test]
fn tm_align_correspondence_too_long() {
    let input = ">ref\nACDE\ntarget\nACDE\n:::::\nACDE\n";
    let error = AlignmentInput::parse(input, &TmAlignFormat).unwrap_err();
    assert!(matches!(
        error,
        Error::CorrespondenceLengthMismatch {
            expected: 4,
            actual: 5,
            ..
        }
    ));
    assert_eq!(error.kind(), ErrorKind::MalformedRecord);
}

#[test]
fn missing_header() {
    let error = AlignmentInput::parse("ACDE\n", &TmAlignFormat).unwrap_err();
    assert!(matches!(error, Error::MissingFastaHeader));

    let error = AlignmentInput::parse("\n\n", &TmAlignFormat).unwrap_err();
    assert!(matches!(error, Error::MissingFastaHeader));
}

#[test]
fn missing_reference_sequence() {
    let error = AlignmentInput::parse(">ref\n", &TmAlignFormat).unwrap_err();
    assert!(matches!(error, Error::MissingReferenceSequence));
}

#[test]
fn empty_reference_sequence() {
    for input in [">ref\n\nt\nAC\n\nAC\n", ">ref\n*\nt\nAC\n\nAC\n"] {
        let error = AlignmentInput::parse(input, &TmAlignFormat).unwrap_err();
        assert!(matches!(error, Error::EmptyReference), "{input:?}");
        assert_eq!(error.kind(), ErrorKind::MalformedReference);
    }
}

#[test]
fn no_records() {
    let input = AlignmentInput::parse(">ref\nACDE\n\n", &TmAlignFormat).unwrap();
    assert!(input.records.is_empty());
}

#[test]
fn parse_dali_input() {
    let input = ">1ppt
GPSQPTYPGDDAPVEDLIRFY
Summary
   1:  1bbaA  4.3  1.9   21    36   19

No 1: Query=1ppt Sbjct=1bbaA Z-score=4.3

DSSP  LLLLLLLLLL
Query GPSQPTYPGD   10
ident  |    |  |
Sbjct AP-EPEYPGD   9
DSSP  LL-LLLLLLL

DSSP  LLLHHHHHHHH
Query DAPVEDLIRFY   21
Sbjct NATPEQMAQYA   20
DSSP  LLLHHHHHHHH

No 2: Query=1ppt Sbjct=2xyz Z-score=2.0

Query GPS--QPTYPGDDAPVEDLIRFY   21
ident |||  |
Sbjct GPSKKQ-----------------   6
";
    let input = AlignmentInput::parse(input, &DaliFormat).unwrap();
    assert_eq!(input.reference_id, "1ppt");
    assert_eq!(input.records.len(), 2);

    let first = &input.records[0];
    assert_eq!(first.target_name(), "1bbaA");
    assert_eq!(first.columns().len(), 21);
    assert_eq!(first.columns()[2], ColumnPair::from_chars('S', '-'));
    assert_eq!(first.columns()[20], ColumnPair::from_chars('Y', 'A'));
    let correspondence = first.correspondence().unwrap();
    assert_eq!(correspondence.len(), 21);
    assert_eq!(correspondence[1], '|');
    assert_eq!(correspondence[6], '|');
    assert_eq!(correspondence[9], '|');
    assert!(correspondence[10..].iter().all(|marker| *marker == ' '));

    let second = &input.records[1];
    assert_eq!(second.target_name(), "2xyz");
    assert_eq!(second.columns().len(), 23);
    assert_eq!(
        second.columns()[3],
        ColumnPair::new(Symbol::Gap, Symbol::Residue('K'))
    );
    assert_eq!(second.correspondence().unwrap()[5], '|');
}

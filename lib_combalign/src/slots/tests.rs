use crate::{
    error::{Error, ErrorKind},
    index_types::{ReferencePosition, SlotId},
    record::{PairwiseRecord, Symbol},
    reference::{ReferenceIndex, ResidueAlphabet},
};

use super::{AlignedResidue, RecordScan, SlotReconciliation};

fn reference(sequence: &str) -> ReferenceIndex {
    ReferenceIndex::new("ref", sequence, ResidueAlphabet::Protein).unwrap()
}

fn record(name: &str, reference_line: &str, target_line: &str) -> PairwiseRecord {
    PairwiseRecord::from_lines(name, reference_line, target_line).unwrap()
}

fn widths(reconciliation: &SlotReconciliation) -> Vec<usize> {
    reconciliation.widths().iter_values().copied().collect()
}

#[test]
fn no_insertions() {
    let reference = reference("ACDE");
    let reconciliation =
        SlotReconciliation::new(&reference, &[record("t", "ACDE", "ACDE")]).unwrap();
    assert_eq!(widths(&reconciliation), vec![0, 0, 0, 0, 0]);
    assert_eq!(reconciliation.total_insertion_width(), 0);
}

#[test]
fn insertion_between_residues() {
    let reference = reference("ACDE");
    let reconciliation = SlotReconciliation::new(
        &reference,
        &[record("t1", "AC--DE", "ACXYDE"), record("t2", "ACDE", "ACDE")],
    )
    .unwrap();
    assert_eq!(widths(&reconciliation), vec![0, 0, 2, 0, 0]);
    assert_eq!(reconciliation.width(SlotId::from(2)), 2);

    let scans = reconciliation.scans();
    assert_eq!(scans.len(), 2);
    assert_eq!(
        scans.iter_values().next().unwrap().insertion_at(SlotId::from(2)),
        &['X', 'Y']
    );
    assert!(
        scans
            .iter_values()
            .nth(1)
            .unwrap()
            .insertion_at(SlotId::from(2))
            .is_empty()
    );
}

#[test]
fn insertions_at_both_ends() {
    let reference = reference("ACDE");
    let reconciliation =
        SlotReconciliation::new(&reference, &[record("t", "--ACDE-", "MMACDEK")]).unwrap();
    assert_eq!(widths(&reconciliation), vec![2, 0, 0, 0, 1]);
}

#[test]
fn width_is_maximum_over_records() {
    let reference = reference("ACDE");
    let reconciliation = SlotReconciliation::new(
        &reference,
        &[
            record("t1", "A-CDE", "AWCDE"),
            record("t2", "A---CDE", "AWWWCDE"),
            record("t3", "A--CDE", "AWWC-E"),
        ],
    )
    .unwrap();
    assert_eq!(widths(&reconciliation), vec![0, 3, 0, 0, 0]);
    assert_eq!(reconciliation.total_insertion_width(), 3);
}

#[test]
fn gap_only_columns_are_ignored() {
    let reference = reference("ACDE");
    let reconciliation =
        SlotReconciliation::new(&reference, &[record("t", "A-C-DE", "A-CXDE")]).unwrap();
    assert_eq!(widths(&reconciliation), vec![0, 0, 1, 0, 0]);
}

#[test]
fn scan_of_partial_record() {
    let reference = reference("ACDEF");
    let scan = RecordScan::new(&reference, &record("t", "-CD-", "WC-Y")).unwrap();
    assert_eq!(scan.first_position(), ReferencePosition::from(2));
    assert_eq!(scan.last_position(), ReferencePosition::from(3));
    assert_eq!(scan.aligned_at(ReferencePosition::from(1)), None);
    assert_eq!(
        scan.aligned_at(ReferencePosition::from(2)),
        Some(&AlignedResidue {
            symbol: Symbol::Residue('C'),
            correspondence: ' ',
        })
    );
    assert_eq!(
        scan.aligned_at(ReferencePosition::from(3)).unwrap().symbol,
        Symbol::Gap
    );
    assert_eq!(scan.aligned_at(ReferencePosition::from(4)), None);
    assert_eq!(scan.insertion_at(SlotId::from(1)), &['W']);
    assert_eq!(scan.insertion_at(SlotId::from(3)), &['Y']);
    assert_eq!(scan.aligned_residue_count(), 1);
    assert_eq!(scan.inserted_residue_count(), 2);
}

#[test]
fn correspondence_is_carried() {
    let reference = reference("ACD");
    let record = record("t", "ACD", "ACD")
        .with_correspondence(vec![':', '.', ' '])
        .unwrap();
    let scan = RecordScan::new(&reference, &record).unwrap();
    assert_eq!(
        scan.aligned_at(ReferencePosition::from(1))
            .unwrap()
            .correspondence,
        ':'
    );
    assert_eq!(
        scan.aligned_at(ReferencePosition::from(2))
            .unwrap()
            .correspondence,
        '.'
    );
}

#[test]
fn mismatching_reference_side() {
    let reference = reference("ACDE");
    let error =
        SlotReconciliation::new(&reference, &[record("t", "ACWE", "ACDE")]).unwrap_err();
    assert!(matches!(error, Error::RecordReferenceMismatch { .. }));
    assert_eq!(error.kind(), ErrorKind::MalformedRecord);

    let error =
        SlotReconciliation::new(&reference, &[record("t", "ACDEA", "ACDEA")]).unwrap_err();
    assert!(matches!(error, Error::RecordReferenceMismatch { .. }));
}

#[test]
fn record_without_reference_residues() {
    let reference = reference("ACDE");
    let error = SlotReconciliation::new(&reference, &[record("t", "--", "AC")]).unwrap_err();
    assert!(matches!(error, Error::RecordWithoutReferenceResidues { .. }));
    assert_eq!(error.kind(), ErrorKind::MalformedRecord);
}

#[test]
fn invalid_target_residue() {
    let reference = reference("ACDE");
    let error =
        SlotReconciliation::new(&reference, &[record("t", "AC-DE", "AC1DE")]).unwrap_err();
    assert!(matches!(
        error,
        Error::InvalidTargetResidue {
            residue: '1',
            column: 2,
            ..
        }
    ));
}

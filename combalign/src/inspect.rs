use std::io::{Write, stdout};

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use lib_combalign::{
    index_types::{ReferencePosition, SlotId},
    reference::ReferenceIndex,
    slots::SlotReconciliation,
};
use log::{LevelFilter, info};

use crate::input::{CliInput, initialise_logging};


#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    #[command(flatten)]
    input: CliInput,

    /// Only list slots that contain insertions.
    #[clap(long)]
    insertions_only: bool,
}

pub fn cli(cli: Cli) -> Result<()> {
    initialise_logging(cli.log_level);

    let (input, reference) = cli.input.load()?;
    let reconciliation = SlotReconciliation::new(&reference, &input.records)?;
    info!(
        "{} of {} slots contain insertions",
        reconciliation
            .widths()
            .iter_values()
            .filter(|width| **width > 0)
            .count(),
        reference.len() + 1
    );

    write_reconciliation(
        stdout().lock(),
        &reference,
        &reconciliation,
        cli.insertions_only,
    )
}

/// Writes one line per reference residue with the symbols aligned to it,
/// and one line per slot with the insertions of each target.
pub fn write_reconciliation(
    mut output: impl Write,
    reference: &ReferenceIndex,
    reconciliation: &SlotReconciliation,
    insertions_only: bool,
) -> Result<()> {
    let scans = reconciliation.scans();
    writeln!(
        output,
        "Targets: {}",
        scans.iter_values().map(|scan| scan.target_name()).join(", ")
    )?;

    let write_slot = |output: &mut dyn Write, slot: SlotId| -> Result<()> {
        let width = reconciliation.width(slot);
        if insertions_only && width == 0 {
            return Ok(());
        }

        let insertions = scans
            .iter_values()
            .map(|scan| scan.insertion_at(slot).iter().collect::<String>())
            .map(|insertion| format!("{insertion:-<width$}"))
            .join(" ");
        let line = format!("slot {:>5} width {width:>3}  {insertions}", usize::from(slot));
        writeln!(output, "{}", line.trim_end())?;
        Ok(())
    };

    for slot in reference.slots() {
        write_slot(&mut output, slot)?;

        if slot < reference.last_slot() && !insertions_only {
            let position = ReferencePosition::following(slot);
            let aligned = scans
                .iter_values()
                .map(|scan| {
                    scan.aligned_at(position)
                        .map(|aligned| aligned.symbol.as_char())
                        .unwrap_or(' ')
                })
                .collect::<String>();
            writeln!(
                output,
                "residue {:>5} {}  {aligned}",
                usize::from(position),
                reference.residue(position)
            )?;
        }
    }

    Ok(())
}

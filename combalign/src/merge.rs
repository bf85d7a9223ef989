use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
};

use anyhow::{Result, anyhow};
use clap::Parser;
use itertools::Itertools;
use lib_combalign::{
    format::{BlockFormatter, LineWidth},
    matrix::AlignmentMatrix,
    slots::SlotReconciliation,
    statistics::MergeStatistics,
};
use log::{LevelFilter, info};

use crate::input::{CliInput, initialise_logging};

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    #[command(flatten)]
    input: CliInput,

    /// The maximum number of alignment columns per output line.
    ///
    /// Must be a positive integer below 250.
    /// If not given, lines are 80 columns wide.
    #[clap(long, short = 'w')]
    line_width: Option<LineWidth>,

    /// The file to write the merged alignment to.
    ///
    /// If not given, the alignment is written to standard output.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,

    /// The file to store the run statistics in toml format.
    #[clap(long)]
    report: Option<PathBuf>,

    /// Print the correspondence markers of each target above its sequence.
    #[clap(long)]
    correspondence: bool,

    /// Do not prefix the output lines with the sequence names.
    #[clap(long)]
    no_labels: bool,
}

pub fn cli(cli: Cli) -> Result<()> {
    initialise_logging(cli.log_level);

    let (input, reference) = cli.input.load()?;
    info!(
        "Compared structures: {}",
        input
            .records
            .iter()
            .map(|record| record.target_name())
            .join(", ")
    );

    let formatter = BlockFormatter::with_line_width(cli.line_width.unwrap_or_default())
        .with_correspondence(cli.correspondence)
        .with_labels(!cli.no_labels);

    let reconciliation = SlotReconciliation::new(&reference, &input.records)?;
    let matrix = AlignmentMatrix::merge(&reference, &reconciliation)?;
    let statistics = MergeStatistics::new(&reconciliation, &matrix, &formatter);
    info!(
        "Gapped reference length: {}, segment size: {}, segments: {}",
        statistics.gapped_reference_length, statistics.segment_size, statistics.segment_count
    );

    if let Some(output) = &cli.output {
        info!("Writing alignment to {output:?}");
        let mut writer = BufWriter::new(
            File::create(output)
                .map_err(|error| anyhow!("Unable to create output file {output:?}: {error}"))?,
        );
        formatter.render(&mut writer, &matrix)?;
        writer.flush()?;
    } else {
        formatter.render(stdout().lock(), &matrix)?;
    }

    if let Some(report) = &cli.report {
        info!("Writing statistics to {report:?}");
        let mut file = File::create(report)
            .map_err(|error| anyhow!("Unable to create report file {report:?}: {error}"))?;
        write!(file, "{}", toml::to_string(&statistics)?)?;
    }

    Ok(())
}

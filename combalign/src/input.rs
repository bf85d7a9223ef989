use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::{Args, ValueEnum};
use lib_combalign::{
    input::{AlignmentInput, DaliFormat, PairwiseFormat, TmAlignFormat},
    reference::{ReferenceIndex, ResidueAlphabet},
};
use log::{LevelFilter, debug, info};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

#[derive(Args)]
pub struct CliInput {
    /// The input file.
    ///
    /// It starts with the reference in fasta format, with the sequence on a single line,
    /// followed by the pairwise alignments of the reference against each target.
    #[clap(long, short = 'i')]
    pub input: PathBuf,

    /// The format of the pairwise alignments in the input file.
    #[clap(long, short = 'f', default_value = "tm-align")]
    pub format: InputFormat,

    /// The residue alphabet of the reference and the targets.
    #[clap(long, short = 'a', default_value = "protein")]
    pub alphabet: InputAlphabet,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// Four lines per alignment: target name, reference, correspondence markers, target.
    TmAlign,
    /// DaliLite alignment blocks.
    Dali,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum InputAlphabet {
    Protein,
    Nucleic,
    Any,
}

impl InputFormat {
    fn parser(&self) -> &'static dyn PairwiseFormat {
        match self {
            Self::TmAlign => &TmAlignFormat,
            Self::Dali => &DaliFormat,
        }
    }
}

impl From<InputAlphabet> for ResidueAlphabet {
    fn from(value: InputAlphabet) -> Self {
        match value {
            InputAlphabet::Protein => Self::Protein,
            InputAlphabet::Nucleic => Self::Nucleic,
            InputAlphabet::Any => Self::Any,
        }
    }
}

impl CliInput {
    /// Reads and parses the input file, and indexes its reference.
    pub fn load(&self) -> Result<(AlignmentInput, ReferenceIndex)> {
        let path = &self.input;
        info!("Reading input file {path:?}");
        let reader = BufReader::new(
            File::open(path)
                .map_err(|error| anyhow!("Unable to open input file {path:?}: {error}"))?,
        );

        let input = AlignmentInput::read(reader, self.format.parser())
            .map_err(|error| anyhow!("Error parsing input file {path:?}: {error}"))?;
        let reference = input.reference_index(self.alphabet.into())?;
        debug!(
            "Reference '{}' ({}) has {} residues",
            reference.name(),
            input.reference_comment,
            reference.len()
        );

        Ok((input, reference))
    }
}

pub fn initialise_logging(log_level: LevelFilter) {
    // Tests run several commands in the same process, and only the first can install the logger.
    if TermLogger::init(
        log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        debug!("Logger is already initialised");
    }
}

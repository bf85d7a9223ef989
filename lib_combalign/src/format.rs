use std::{io::Write, ops::Range, str::FromStr};

use log::debug;

use crate::{
    error::{Error, Result},
    index_types::TargetIndex,
    matrix::AlignmentMatrix,
};


/// The maximum number of alignment columns per output line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LineWidth(usize);

/// Renders an [`AlignmentMatrix`] as text, sliced into segments of at most [`LineWidth`] columns.
#[derive(Debug, Clone)]
pub struct BlockFormatter {
    line_width: LineWidth,
    correspondence: bool,
    labels: bool,
}

/// A slice of consecutive columns of the matrix, with one line per displayed row.
///
/// Correspondence lines without any marker in the segment are left out.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Segment {
    pub columns: Range<usize>,
    pub lines: Vec<SegmentLine>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SegmentLine {
    pub row: MatrixRow,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MatrixRow {
    Reference,
    /// The correspondence markers of a target, displayed above its sequence.
    Correspondence(TargetIndex),
    Target(TargetIndex),
}

impl LineWidth {
    pub const DEFAULT: usize = 80;
    /// Line widths must be strictly below this value.
    pub const LIMIT: usize = 250;

    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width >= Self::LIMIT {
            Err(Error::InvalidLineWidth {
                value: width.to_string(),
            })
        } else {
            Ok(Self(width))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl FromStr for LineWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let width = s.trim().parse::<usize>().map_err(|_| Error::InvalidLineWidth {
            value: s.to_string(),
        })?;
        Self::new(width)
    }
}

impl Default for BlockFormatter {
    fn default() -> Self {
        Self::with_line_width(LineWidth::default())
    }
}

impl BlockFormatter {
    /// Creates a formatter with the given line width.
    ///
    /// If `line_width` is `None`, the default of 80 columns is used.
    pub fn new(line_width: Option<usize>) -> Result<Self> {
        Ok(Self::with_line_width(
            line_width.map(LineWidth::new).transpose()?.unwrap_or_default(),
        ))
    }

    pub fn with_line_width(line_width: LineWidth) -> Self {
        Self {
            line_width,
            correspondence: false,
            labels: true,
        }
    }

    /// If set, each target line is preceded by a line with its correspondence markers.
    pub fn with_correspondence(mut self, correspondence: bool) -> Self {
        self.correspondence = correspondence;
        self
    }

    /// If set, each line is prefixed with the label of its row.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    pub fn line_width(&self) -> LineWidth {
        self.line_width
    }

    pub fn segment_count(&self, matrix: &AlignmentMatrix) -> usize {
        matrix.column_count().div_ceil(self.line_width.get())
    }

    /// The displayed rows in output order: reference first, then targets in input order.
    pub fn rows(&self, matrix: &AlignmentMatrix) -> Vec<MatrixRow> {
        let mut rows = vec![MatrixRow::Reference];
        for target in matrix.targets() {
            if self.correspondence {
                rows.push(MatrixRow::Correspondence(target));
            }
            rows.push(MatrixRow::Target(target));
        }
        rows
    }

    pub fn segments<'matrix>(
        &self,
        matrix: &'matrix AlignmentMatrix,
    ) -> impl Iterator<Item = Segment> + use<'matrix> {
        let width = self.line_width.get();
        let rows = self.rows(matrix);
        let column_count = matrix.column_count();

        (0..column_count).step_by(width).map(move |start| {
            let columns = start..(start + width).min(column_count);
            Segment {
                lines: rows
                    .iter()
                    .filter_map(|row| {
                        let text = row_text(matrix, *row, columns.clone());
                        match row {
                            MatrixRow::Correspondence(_) => {
                                let text = text.trim_end();
                                (!text.is_empty()).then(|| SegmentLine {
                                    row: *row,
                                    text: text.to_string(),
                                })
                            }
                            _ => Some(SegmentLine { row: *row, text }),
                        }
                    })
                    .collect(),
                columns,
            }
        })
    }

    pub fn row_label<'matrix>(
        &self,
        matrix: &'matrix AlignmentMatrix,
        row: MatrixRow,
    ) -> &'matrix str {
        match row {
            MatrixRow::Reference => matrix.reference_name(),
            MatrixRow::Correspondence(_) => "",
            MatrixRow::Target(target) => matrix.target_name(target),
        }
    }

    /// Writes all segments, separated by a blank line.
    pub fn render(&self, mut output: impl Write, matrix: &AlignmentMatrix) -> Result<()> {
        debug!(
            "Rendering {} columns in {} segments of width {}",
            matrix.column_count(),
            self.segment_count(matrix),
            self.line_width.get()
        );

        let max_label_len = self
            .rows(matrix)
            .into_iter()
            .map(|row| self.row_label(matrix, row).chars().count())
            .max()
            .unwrap_or(0);

        for (index, segment) in self.segments(matrix).enumerate() {
            if index > 0 {
                writeln!(output)?;
            }

            for line in &segment.lines {
                if self.labels {
                    let label = self.row_label(matrix, line.row);
                    if label.is_empty() {
                        write!(output, "  ")?;
                    } else {
                        write!(output, "{label}: ")?;
                    }
                    for _ in label.chars().count()..max_label_len {
                        write!(output, " ")?;
                    }
                }

                writeln!(output, "{}", line.text)?;
            }
        }

        Ok(())
    }

    pub fn render_to_string(&self, matrix: &AlignmentMatrix) -> Result<String> {
        let mut output = Vec::new();
        self.render(&mut output, matrix)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

fn row_text(matrix: &AlignmentMatrix, row: MatrixRow, columns: Range<usize>) -> String {
    let columns = &matrix.columns()[columns];
    match row {
        MatrixRow::Reference => columns
            .iter()
            .map(|column| column.reference().as_char())
            .collect(),
        MatrixRow::Correspondence(target) => columns
            .iter()
            .map(|column| column.target(target).correspondence)
            .collect(),
        MatrixRow::Target(target) => columns
            .iter()
            .map(|column| column.target(target).symbol.as_char())
            .collect(),
    }
}

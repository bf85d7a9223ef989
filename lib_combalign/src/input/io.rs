use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{line_ending, not_line_ending, satisfy},
    combinator::eof,
    multi::many0,
    sequence::terminated,
};

use crate::error::{Error, Result};

/// Parses a single line, consuming its line ending if present.
pub fn parse_line(input: &str) -> IResult<&str, &str> {
    terminated(not_line_ending, alt((line_ending, eof)))(input)
}

/// Splits the input into lines, accepting both `\n` and `\r\n` line endings.
pub fn split_lines(mut input: &str) -> Result<Vec<&str>> {
    let mut lines = Vec::new();
    while !input.is_empty() {
        let (remaining, line) = parse_line(input).map_err(translate_nom_error)?;
        lines.push(line);
        input = remaining;
    }
    Ok(lines)
}

pub fn skip_whitespace(
    input: &str,
) -> std::result::Result<&str, nom::Err<nom::error::Error<&str>>> {
    many0(satisfy(is_whitespace))
        .parse(input)
        .map(|(input, _)| input)
}

pub fn is_any_whitespace(c: char) -> bool {
    is_whitespace(c) || is_any_line_break(c)
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_any_line_break(c)
}

pub fn is_any_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Removes a single trailing `*` terminator.
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('*').unwrap_or(line)
}

pub fn translate_nom_error(error: nom::Err<nom::error::Error<&str>>) -> Error {
    match error {
        nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        nom::Err::Error(error) | nom::Err::Failure(error) => Error::Parser {
            input: error.input.to_string(),
            kind: error.code,
        },
    }
}

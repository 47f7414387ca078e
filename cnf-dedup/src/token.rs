use flussab::text::{self, LineColumn, LineReader};
use num_traits::{
    ops::overflowing::{OverflowingAdd, OverflowingMul, OverflowingSub},
    FromPrimitive, Zero,
};

use crate::error::{MalformedLiteral, ParseError};

/// Returns true for the bytes that separate tokens within a line.
#[inline]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c')
}

/// Returns true when the byte at `offset` is whitespace, a newline or past the EOF.
#[inline]
pub fn is_end_of_word(input: &mut LineReader, offset: usize) -> bool {
    match input.reader.request_byte_at_offset(offset) {
        Some(byte) => byte == b'\n' || is_space(byte),
        None => true,
    }
}

/// Returns true when the byte at `offset` is a newline or past the EOF.
#[inline]
pub fn is_end_of_line(input: &mut LineReader, offset: usize) -> bool {
    matches!(input.reader.request_byte_at_offset(offset), Some(b'\n') | None)
}

/// Returns true when `offset` points to the first word of a comment or header line.
///
/// Only the first byte is inspected, so `cnf` or `pxyz` start a skipped line as well.
#[inline]
pub fn is_directive(input: &mut LineReader, offset: usize) -> bool {
    matches!(
        input.reader.request_byte_at_offset(offset),
        Some(b'c') | Some(b'p')
    )
}

/// Passes over whitespace within the current line.
#[inline]
pub fn spaces(input: &mut LineReader, mut offset: usize) -> usize {
    while let Some(byte) = input.reader.request_byte_at_offset(offset) {
        if !is_space(byte) {
            break;
        }
        offset += 1;
    }
    offset
}

/// Advances the reader past the next newline, or to the EOF.
#[inline]
pub fn skip_line(input: &mut LineReader, offset: usize) {
    let offset = text::next_newline(input.reader(), offset);
    input.line_at_offset(offset);
    input.reader.advance(offset);
}

/// Parses an integer word starting at `offset`, with an optional sign.
///
/// Returns the parsed value, or `None` on overflow, together with the offset past the word. When
/// the bytes at `offset` do not form an integer word, `offset` is returned unchanged.
#[inline]
pub fn int<T>(input: &mut LineReader, offset: usize) -> (Option<T>, usize)
where
    T: Zero + FromPrimitive + OverflowingAdd + OverflowingSub + OverflowingMul,
{
    let start = match (
        input.reader.request_byte_at_offset(offset),
        input.reader.request_byte_at_offset(offset + 1),
    ) {
        (Some(b'+'), Some(b'0'..=b'9')) => offset + 1,
        _ => offset,
    };

    let (value, end) = text::signed_ascii_digits_multi(input.reader(), start);
    if end != start && is_end_of_word(input, end) {
        (value, end)
    } else {
        (None, offset)
    }
}

/// Parses a literal or terminating zero word starting at `offset`.
///
/// Fails with a [`MalformedLiteral`] error when the word is not an integer or when its magnitude
/// exceeds `limit`.
#[inline]
pub fn literal(
    input: &mut LineReader,
    offset: usize,
    limit: isize,
) -> Result<(isize, usize), ParseError> {
    match int::<isize>(input, offset) {
        (Some(lit), end) if (-limit..=limit).contains(&lit) => Ok((lit, end)),
        (_, end) if end != offset => Err(malformed_literal(input, offset, Some(limit))),
        _ => Err(malformed_literal(input, offset, None)),
    }
}

/// Builds the error for an unparsable word at `offset` on the current line.
///
/// `limit` is passed for integer words that are out of range. The reader must not have been
/// advanced since the start of the line.
#[cold]
#[inline(never)]
pub fn malformed_literal(
    input: &mut LineReader,
    offset: usize,
    limit: Option<isize>,
) -> ParseError {
    if let Err(err) = input.reader.check_io_error() {
        return err.into();
    }

    let mut line_end = offset;
    while !is_end_of_line(input, line_end) {
        line_end += 1;
    }
    let mut word_end = offset;
    while !is_end_of_word(input, word_end) {
        word_end += 1;
    }

    let location = LineColumn {
        line: input.line,
        column: input.reader.position() + offset - input.line_start + 1,
    };

    let buf = input.reader.buf();
    let tokens = buf[..line_end]
        .split(|&byte| is_space(byte))
        .filter(|word| !word.is_empty())
        .map(|word| String::from_utf8_lossy(word).into_owned())
        .collect();
    let token = String::from_utf8_lossy(&buf[offset..word_end]).into_owned();

    MalformedLiteral {
        location,
        tokens,
        token,
        limit,
    }
    .into()
}

//! Parsing and writing of DIMACS CNF clauses.
use std::io::{Read, Write};

use flussab::{text::LineReader, write, DeferredReader, DeferredWriter};
use log::debug;

use crate::{error::ParseError, token, Dimacs};

/// Header data of a DIMACS CNF file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Largest variable index present in the formula.
    pub var_count: usize,
    /// Number of clauses present in the formula.
    pub clause_count: usize,
}

/// Configuration for the DIMACS CNF parser.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Config {
    /// When set, literals of an unterminated clause at the end of the input count towards
    /// [`Parser::max_var`] even though the clause itself is discarded. (Default: `true`)
    pub count_unterminated_vars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count_unterminated_vars: true,
        }
    }
}

impl Config {
    #[inline]
    /// Sets the [`count_unterminated_vars`][Self#structfield.count_unterminated_vars] field.
    pub fn count_unterminated_vars(mut self, value: bool) -> Self {
        self.count_unterminated_vars = value;
        self
    }
}

/// Parser for the clauses of a DIMACS CNF file.
///
/// Comment and header lines are skipped without being checked. Clauses are delimited by their
/// terminating zero only, so a clause can span several lines and a line can contain several
/// clauses.
pub struct Parser<'a, L> {
    reader: LineReader<'a>,
    config: Config,
    line_lits: Vec<isize>,
    line_pos: usize,
    lit_buf: Vec<L>,
    lit_buf_complete: bool,
    clause_count: usize,
    max_var: usize,
    open_max_var: usize,
    dropped_lits: usize,
}

impl<'a, L> Parser<'a, L>
where
    L: Dimacs,
{
    /// Creates a parser reading from a [`Read`] instance.
    pub fn from_read(read: impl Read + 'a, config: Config) -> Self {
        Self::new(LineReader::new(DeferredReader::from_read(read)), config)
    }

    /// Creates a parser reading from a [`LineReader`].
    pub fn new(reader: LineReader<'a>, config: Config) -> Self {
        Self {
            reader,
            config,
            line_lits: vec![],
            line_pos: 0,
            lit_buf: vec![],
            lit_buf_complete: false,
            clause_count: 0,
            max_var: 0,
            open_max_var: 0,
            dropped_lits: 0,
        }
    }

    /// Parses and returns the next clause with its literals sorted in ascending order.
    ///
    /// Returns `Ok(None)` if the end of file was successfully reached. Literals following the last
    /// terminating zero are discarded at that point.
    pub fn next_clause(&mut self) -> Result<Option<&[L]>, ParseError> {
        if self.lit_buf_complete {
            self.lit_buf.clear();
            self.lit_buf_complete = false;
        }

        loop {
            while let Some(&lit) = self.line_lits.get(self.line_pos) {
                self.line_pos += 1;
                if lit == 0 {
                    self.lit_buf.sort_unstable();
                    self.lit_buf_complete = true;
                    self.clause_count += 1;
                    self.max_var = self.max_var.max(self.open_max_var);
                    self.open_max_var = 0;
                    return Ok(Some(&self.lit_buf));
                }
                let lit = L::from_dimacs(lit);
                self.open_max_var = self.open_max_var.max(lit.var());
                self.lit_buf.push(lit);
            }

            if !self.next_line()? {
                self.end_of_input();
                return Ok(None);
            }
        }
    }

    /// Reads the literals of the next clause line into `line_lits`.
    ///
    /// Returns `Ok(false)` at the end of the input.
    fn next_line(&mut self) -> Result<bool, ParseError> {
        let input = &mut self.reader;
        self.line_lits.clear();
        self.line_pos = 0;

        let mut offset = token::spaces(input, 0);
        if input.reader.request_byte_at_offset(offset).is_none() {
            input.reader.advance(offset);
            input.reader.check_io_error()?;
            return Ok(false);
        }

        if !token::is_directive(input, offset) {
            while !token::is_end_of_line(input, offset) {
                let (lit, end) = token::literal(input, offset, L::MAX_DIMACS)?;
                self.line_lits.push(lit);
                offset = token::spaces(input, end);
            }
        }

        token::skip_line(input, offset);
        Ok(true)
    }

    fn end_of_input(&mut self) {
        if self.lit_buf_complete || self.lit_buf.is_empty() {
            return;
        }
        debug!(
            "discarding {} literal(s) of an unterminated clause at the end of the input",
            self.lit_buf.len()
        );
        self.dropped_lits = self.lit_buf.len();
        self.lit_buf.clear();
        if self.config.count_unterminated_vars {
            self.max_var = self.max_var.max(self.open_max_var);
        }
        self.open_max_var = 0;
    }

    /// Returns the largest variable index among the literals read so far.
    ///
    /// This includes literals of clauses that are not yet terminated, unless
    /// [`count_unterminated_vars`][Config::count_unterminated_vars] is disabled.
    pub fn max_var(&self) -> usize {
        if self.config.count_unterminated_vars {
            self.max_var.max(self.open_max_var)
        } else {
            self.max_var
        }
    }

    /// Returns the number of terminated clauses read so far, including repeated ones.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Returns the number of literals discarded because their clause was not terminated before
    /// the end of the input.
    pub fn dropped_lits(&self) -> usize {
        self.dropped_lits
    }
}

/// Writes a DIMACS CNF header.
pub fn write_header(writer: &mut DeferredWriter, header: Header) {
    let _ = writeln!(writer, "p cnf {} {}", header.var_count, header.clause_count);
}

/// Writes a clause.
pub fn write_clause<L: Dimacs>(writer: &mut DeferredWriter, clause_lits: &[L]) {
    for lit in clause_lits {
        write::text::ascii_digits(writer, lit.dimacs());
        writer.write_all_defer_err(b" ");
    }
    writer.write_all_defer_err(b"0\n")
}

//! Removal of duplicate clauses.
use flussab::DeferredWriter;
use log::debug;
use zwohash::HashMap;

use crate::{
    cnf::{self, Header, Parser},
    error::ParseError,
    Dimacs,
};

/// Set of distinct clauses.
///
/// Clauses are compared as literal sequences, so they should be sorted before insertion, as done
/// by [`Parser::next_clause`]. Iteration yields clauses in the order of their first insertion.
pub struct ClauseSet<L> {
    clauses: HashMap<Box<[L]>, usize>,
    inserted: usize,
}

impl<L> Default for ClauseSet<L> {
    fn default() -> Self {
        Self {
            clauses: Default::default(),
            inserted: 0,
        }
    }
}

impl<L> ClauseSet<L>
where
    L: Dimacs,
{
    /// Creates an empty clause set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause, returning whether it was not already present.
    pub fn insert(&mut self, clause_lits: &[L]) -> bool {
        self.inserted += 1;
        if self.clauses.contains_key(clause_lits) {
            return false;
        }
        let first = self.clauses.len();
        self.clauses.insert(clause_lits.into(), first);
        true
    }

    /// Number of distinct clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if no clause was inserted.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of insertions that were dropped as duplicates.
    pub fn duplicates(&self) -> usize {
        self.inserted - self.clauses.len()
    }

    /// Iterates over the distinct clauses in order of their first insertion.
    pub fn iter(&self) -> impl Iterator<Item = &[L]> + '_ {
        let mut clauses: Vec<_> = self.clauses.iter().collect();
        clauses.sort_unstable_by_key(|&(_, &first)| first);
        clauses.into_iter().map(|(clause_lits, _)| &clause_lits[..])
    }

    /// Writes all distinct clauses, one per line.
    pub fn write(&self, writer: &mut DeferredWriter) {
        for clause_lits in self.iter() {
            cnf::write_clause(writer, clause_lits);
        }
    }
}

/// Result of deduplicating a complete DIMACS CNF input.
pub struct Deduplicated<L> {
    /// Header describing the deduplicated formula.
    pub header: Header,
    /// The distinct clauses.
    pub clauses: ClauseSet<L>,
    /// Number of terminated clauses read, including duplicates.
    pub clauses_read: usize,
    /// Number of literals of an unterminated trailing clause that were discarded.
    pub dropped_lits: usize,
}

impl<L> Deduplicated<L>
where
    L: Dimacs,
{
    /// Writes the header followed by all distinct clauses.
    pub fn write(&self, writer: &mut DeferredWriter) {
        cnf::write_header(writer, self.header);
        self.clauses.write(writer);
    }
}

/// Reads all clauses from `parser` and removes duplicates.
///
/// The header's variable count is the parser's [`max_var`][Parser::max_var], so it also covers
/// literals of clauses that were removed as duplicates.
pub fn deduplicate<L: Dimacs>(mut parser: Parser<L>) -> Result<Deduplicated<L>, ParseError> {
    let mut clauses = ClauseSet::new();

    while let Some(clause_lits) = parser.next_clause()? {
        clauses.insert(clause_lits);
    }

    let header = Header {
        var_count: parser.max_var(),
        clause_count: clauses.len(),
    };

    debug!(
        "read {} clauses, removed {} duplicates, {} variables",
        parser.clause_count(),
        clauses.duplicates(),
        header.var_count
    );

    Ok(Deduplicated {
        header,
        clauses_read: parser.clause_count(),
        dropped_lits: parser.dropped_lits(),
        clauses,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::cnf::Config;

    type Result<T> = std::result::Result<T, ParseError>;

    fn dedup(input: &str) -> Result<Deduplicated<i32>> {
        deduplicate(Parser::from_read(input.as_bytes(), Config::default()))
    }

    fn output(deduplicated: &Deduplicated<i32>) -> Result<String> {
        let mut output = vec![];
        {
            let mut writer = DeferredWriter::from_write(&mut output);
            deduplicated.write(&mut writer);
            writer.flush()?;
        }
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn clause_set_counts() {
        let mut set = ClauseSet::<i32>::new();
        assert!(set.is_empty());

        assert!(set.insert(&[1, 2]));
        assert!(set.insert(&[-3, 1]));
        assert!(!set.insert(&[1, 2]));
        assert!(!set.insert(&[1, 2]));
        assert!(set.insert(&[]));

        assert_eq!(set.len(), 3);
        assert_eq!(set.duplicates(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [&[1, 2][..], &[-3, 1][..], &[][..]]
        );
    }

    #[test]
    fn example() -> Result<()> {
        let deduplicated = dedup("p cnf 3 3\n1 2 0\n2 1 0\n-3 1 0\n")?;

        assert_eq!(
            deduplicated.header,
            Header {
                var_count: 3,
                clause_count: 2
            }
        );
        assert_eq!(deduplicated.clauses_read, 3);
        assert_eq!(output(&deduplicated)?, "p cnf 3 2\n1 2 0\n-3 1 0\n");
        Ok(())
    }

    #[test]
    fn duplicates_in_any_order_and_multiplicity() -> Result<()> {
        let deduplicated = dedup("3 -1 2 0\n2 3 -1 0 -1 3 2 0\n-1 2 3\n0\n4 0 4 0\n")?;

        assert_eq!(output(&deduplicated)?, "p cnf 4 2\n-1 2 3 0\n4 0\n");
        assert_eq!(deduplicated.clauses.duplicates(), 4);
        Ok(())
    }

    #[test]
    fn repeated_literals_are_kept() -> Result<()> {
        let deduplicated = dedup("1 1 0\n1 0\n1 1 0\n")?;

        assert_eq!(output(&deduplicated)?, "p cnf 1 2\n1 1 0\n1 0\n");
        Ok(())
    }

    #[test]
    fn empty_clause() -> Result<()> {
        let deduplicated = dedup("0\n1 0\n0\n")?;

        assert_eq!(output(&deduplicated)?, "p cnf 1 2\n0\n1 0\n");
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<()> {
        let deduplicated = dedup("c nothing here\n")?;

        assert_eq!(output(&deduplicated)?, "p cnf 0 0\n");
        Ok(())
    }

    #[test]
    fn header_is_recomputed() -> Result<()> {
        let deduplicated = dedup("p cnf 100 7\n1 -2 0\n")?;

        assert_eq!(output(&deduplicated)?, "p cnf 2 1\n-2 1 0\n");
        Ok(())
    }

    #[test]
    fn max_var_covers_removed_and_dropped_clauses() -> Result<()> {
        let deduplicated = dedup("1 -5 0\n-5 1 0\n2 9")?;

        assert_eq!(deduplicated.dropped_lits, 2);
        assert_eq!(output(&deduplicated)?, "p cnf 9 1\n-5 1 0\n");
        Ok(())
    }

    #[test]
    fn idempotent() -> Result<()> {
        let input = "p cnf 4 6\n4 -2 1 0\n1 4 -2 0\nc\n3 0 3 0 -4\n1 0\n0\n";
        let once = output(&dedup(input)?)?;
        let twice = output(&dedup(&once)?)?;

        assert_eq!(once, "p cnf 4 4\n-2 1 4 0\n3 0\n-4 1 0\n0\n");
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn malformed_input_produces_nothing() {
        assert!(dedup("1 2 0\n1 x 0\n").is_err());
    }
}

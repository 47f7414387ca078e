use std::hash::Hash;

/// Type that can be used to represent literals in the DIMACS CNF format.
///
/// Clauses are sorted and compared by value, so the ordering of the type has to agree with the
/// ordering of the encoded integers.
pub trait Dimacs: Copy + Ord + Hash {
    /// Largest literal magnitude supported.
    const MAX_DIMACS: isize;

    /// Returns the literal that is encoded as the passed integer in the DIMACS CNF format.
    ///
    /// If the value is out of range this may panic or return an arbitrary value.
    fn from_dimacs(value: isize) -> Self;

    /// Returns the integer that is used to encode this literal in the DIMACS CNF format.
    fn dimacs(self) -> isize;

    /// Returns the variable index of this literal, i.e. the magnitude of its encoding.
    #[inline]
    fn var(self) -> usize {
        self.dimacs().unsigned_abs()
    }
}

impl Dimacs for i64 {
    #[cfg(any(
        target_pointer_width = "64",
        target_pointer_width = "32",
        target_pointer_width = "16"
    ))]
    const MAX_DIMACS: isize = isize::MAX;

    fn from_dimacs(value: isize) -> Self {
        value as i64
    }

    fn dimacs(self) -> isize {
        self as isize
    }
}

impl Dimacs for i32 {
    #[cfg(target_pointer_width = "64")]
    const MAX_DIMACS: isize = i32::MAX as isize;

    #[cfg(any(target_pointer_width = "32", target_pointer_width = "16"))]
    const MAX_DIMACS: isize = isize::MAX;

    fn from_dimacs(value: isize) -> Self {
        value as i32
    }

    fn dimacs(self) -> isize {
        self as isize
    }
}

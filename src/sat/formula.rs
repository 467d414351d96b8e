//! CNF formula representation and assignment scoring

use crate::error::{Result, SatArtError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed variable reference, positive for the plain variable and negative
/// for its negation. Variables are numbered from 1.
pub type Literal = i32;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause, rejecting the zero literal
    pub fn new(literals: Vec<Literal>) -> Result<Self> {
        if let Some(pos) = literals.iter().position(|&lit| lit == 0) {
            return Err(SatArtError::InvalidArgument(format!(
                "literal {} of clause {:?} is zero",
                pos, literals
            )));
        }
        Ok(Self { literals })
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Largest variable referenced by this clause
    pub fn max_variable(&self) -> u32 {
        self.literals
            .iter()
            .map(|lit| lit.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Check whether any literal agrees with `assignment`.
    ///
    /// See [`assignment_bit`] for how literals are mapped onto bits.
    pub fn is_satisfied_by(&self, assignment: u64, n: u32, wrap: bool) -> bool {
        self.literals.iter().any(|&lit| {
            assignment_bit(lit, n, wrap)
                .map(|bit| (lit > 0) == read_bit(assignment, bit))
                .unwrap_or(false)
        })
    }
}

/// Bit of an `n`-bit assignment that `literal` reads, if any.
///
/// Variable `v` is read from bit `v mod n`. With `wrap` every literal is
/// folded onto the available bits; without it, only variables below `n`
/// are read and every other literal is skipped. When `n` is zero there is
/// nothing to read.
#[inline]
pub fn assignment_bit(literal: Literal, n: u32, wrap: bool) -> Option<u32> {
    let var = literal.unsigned_abs();
    if n == 0 || (!wrap && var >= n) {
        return None;
    }
    Some(var % n)
}

#[inline]
fn read_bit(assignment: u64, bit: u32) -> bool {
    assignment.checked_shr(bit).unwrap_or(0) & 1 == 1
}

/// A CNF formula: the conjunction of its clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Build a formula from nested literal lists
    pub fn from_clauses(clauses: Vec<Vec<Literal>>) -> Result<Self> {
        let clauses = clauses
            .into_iter()
            .map(Clause::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// Partition a flat literal array into clauses of `k` literals each
    pub fn from_ksat(literals: &[Literal], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SatArtError::InvalidArgument(
                "clause width must be positive".to_string(),
            ));
        }
        if literals.len() % k != 0 {
            return Err(SatArtError::InvalidArgument(format!(
                "{} literals cannot be split into clauses of width {}",
                literals.len(),
                k
            )));
        }
        Self::from_clauses(literals.chunks_exact(k).map(<[Literal]>::to_vec).collect())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Largest variable magnitude across all clauses, 0 for an empty formula
    pub fn num_variables(&self) -> u32 {
        self.clauses
            .iter()
            .map(Clause::max_variable)
            .max()
            .unwrap_or(0)
    }

    /// Check whether every clause is satisfied by an `n`-bit assignment
    pub fn evaluate(&self, assignment: u64, n: u32, wrap: bool) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied_by(assignment, n, wrap))
    }

    /// Count clauses with no literal satisfied by an `n`-bit assignment
    pub fn count_unsatisfied(&self, assignment: u64, n: u32, wrap: bool) -> usize {
        self.clauses
            .iter()
            .filter(|clause| !clause.is_satisfied_by(assignment, n, wrap))
            .count()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            write!(f, "(")?;
            for lit in clause.literals() {
                write!(f, "{:4}", lit)?;
            }
            write!(f, ") ")?;
        }
        Ok(())
    }
}

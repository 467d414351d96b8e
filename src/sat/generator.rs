//! Seeded random k-SAT generation

use super::formula::{Clause, Formula, Literal};
use crate::error::{Result, SatArtError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derive a 64-bit seed from a seed string (FNV-1a over its bytes)
pub fn seed_from_str(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Random number stream for a seed string, stable across platforms and runs
pub fn rng_from_seed(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed_from_str(seed))
}

impl Formula {
    /// Generate a random k-SAT formula.
    ///
    /// Every literal picks a variable uniformly from `1..=num_variables` and
    /// a uniform sign. Afterwards clause `i` (for `i < num_variables`) gets
    /// variable `i + 1` as its first literal, so no variable is missing.
    pub fn random_ksat(
        num_clauses: usize,
        num_variables: u32,
        seed: &str,
        k: usize,
    ) -> Result<Self> {
        if k == 0 {
            return Err(SatArtError::InvalidArgument(
                "clause width must be positive".to_string(),
            ));
        }
        if num_variables == 0 {
            return Err(SatArtError::InvalidArgument(
                "number of variables must be positive".to_string(),
            ));
        }
        if num_variables > Literal::MAX as u32 {
            return Err(SatArtError::InvalidArgument(format!(
                "number of variables ({}) does not fit in a literal",
                num_variables
            )));
        }
        if num_variables as usize > num_clauses {
            return Err(SatArtError::ResourceLimit(format!(
                "number of variables ({}) must not exceed number of clauses ({})",
                num_variables, num_clauses
            )));
        }

        let mut rng = rng_from_seed(seed);
        let max_var = num_variables as Literal;

        let mut clauses: Vec<Vec<Literal>> = (0..num_clauses)
            .map(|_| {
                (0..k)
                    .map(|_| {
                        let var = rng.gen_range(1..=max_var);
                        if rng.gen::<bool>() {
                            -var
                        } else {
                            var
                        }
                    })
                    .collect()
            })
            .collect();

        for (i, clause) in clauses.iter_mut().take(num_variables as usize).enumerate() {
            let var = i as Literal + 1;
            clause[0] = if rng.gen::<bool>() { -var } else { var };
        }

        let clauses = clauses
            .into_iter()
            .map(Clause::new)
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "generated {} clauses over {} variables (k = {}, seed {:?})",
            num_clauses,
            num_variables,
            k,
            seed
        );
        Ok(Formula::new(clauses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_hash_is_stable() {
        assert_eq!(seed_from_str(""), FNV_OFFSET);
        assert_eq!(seed_from_str("a"), 0xaf63_dc4c_8601_ec8c);
        assert_ne!(seed_from_str("abc"), seed_from_str("abd"));
    }

    #[test]
    fn test_reproducible() {
        let a = Formula::random_ksat(4, 2, "abc", 2).unwrap();
        let b = Formula::random_ksat(4, 2, "abc", 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.num_clauses(), 4);
        assert!(a.clauses().iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_seed_changes_formula() {
        let a = Formula::random_ksat(64, 16, "abc", 3).unwrap();
        let b = Formula::random_ksat(64, 16, "xyz", 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_every_variable_leads_a_clause() {
        let formula = Formula::random_ksat(40, 12, "coverage", 3).unwrap();
        for (i, clause) in formula.clauses().iter().take(12).enumerate() {
            assert_eq!(clause.literals()[0].unsigned_abs(), i as u32 + 1);
        }
        assert_eq!(formula.num_variables(), 12);
    }

    #[test]
    fn test_literals_in_range() {
        let formula = Formula::random_ksat(100, 7, "range", 4).unwrap();
        for clause in formula.clauses() {
            for &lit in clause.literals() {
                assert!(lit != 0 && lit.unsigned_abs() <= 7);
            }
        }
    }

    #[test]
    fn test_both_signs_appear() {
        let formula = Formula::random_ksat(200, 10, "signs", 3).unwrap();
        let lits: Vec<_> = formula.clauses().iter().flat_map(|c| c.literals().to_vec()).collect();
        assert!(lits.iter().any(|&l| l > 0));
        assert!(lits.iter().any(|&l| l < 0));
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(
            Formula::random_ksat(3, 4, "", 3),
            Err(SatArtError::ResourceLimit(_))
        ));
        assert!(Formula::random_ksat(3, 0, "", 3).is_err());
        assert!(Formula::random_ksat(3, 2, "", 0).is_err());
        assert!(Formula::random_ksat(3, 3, "", 1).is_ok());
    }
}

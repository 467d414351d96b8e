//! Reading and writing formulas in the DIMACS CNF exchange format

use super::formula::{Clause, Formula, Literal};
use crate::error::{Result, SatArtError};
use anyhow::Context;
use itertools::Itertools;
use std::io::{BufRead, Write};
use std::path::Path;

/// First characters of lines that carry no clause data
pub const COMMENT_MARKERS: [char; 4] = ['c', 'p', '%', '#'];

/// Parse a formula from DIMACS text.
///
/// Clauses are terminated by `0` and may span several lines. Literals left
/// without a terminator at the end of the input form a final clause.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Formula> {
    let mut clauses = Vec::new();
    let mut pending: Vec<Literal> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim_start();

        match trimmed.chars().next() {
            None => continue,
            Some(first) if COMMENT_MARKERS.contains(&first) => continue,
            Some(_) => {}
        }

        for token in trimmed.split_whitespace() {
            let lit: Literal = token.parse().map_err(|_| SatArtError::Parse {
                line: line_no,
                text: line.clone(),
                reason: format!("'{}' is not an integer literal", token),
            })?;

            if lit != 0 {
                pending.push(lit);
                continue;
            }

            if pending.is_empty() {
                return Err(SatArtError::Parse {
                    line: line_no,
                    text: line.clone(),
                    reason: "clause has no literals".to_string(),
                });
            }
            clauses.push(Clause::new(std::mem::take(&mut pending))?);
        }
    }

    if !pending.is_empty() {
        clauses.push(Clause::new(pending)?);
    }

    Ok(Formula::new(clauses))
}

/// Parse a formula from a DIMACS string
pub fn parse_dimacs_str(content: &str) -> Result<Formula> {
    parse_dimacs(content.as_bytes())
}

/// Write a formula as DIMACS, preceded by one `c` line per line of `comment`
pub fn write_dimacs<W: Write>(formula: &Formula, mut writer: W, comment: &str) -> Result<()> {
    writer.write_all(formula_to_dimacs(formula, comment).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Convert a formula to its DIMACS text
pub fn formula_to_dimacs(formula: &Formula, comment: &str) -> String {
    let mut text = String::new();
    for line in comment.lines() {
        text.push_str("c ");
        text.push_str(line);
        text.push('\n');
    }
    text.push_str(&format!(
        "p cnf {} {}\n",
        formula.num_variables(),
        formula.num_clauses()
    ));
    for clause in formula.clauses() {
        text.push_str(&clause.literals().iter().join(" "));
        text.push_str(" 0\n");
    }
    text
}

/// Load a formula from a DIMACS file
pub fn load_formula_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Formula> {
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open DIMACS file: {}", path.as_ref().display()))?;

    parse_dimacs(std::io::BufReader::new(file))
        .with_context(|| format!("Invalid DIMACS file: {}", path.as_ref().display()))
}

/// Save a formula to a DIMACS file
pub fn save_formula_to_file<P: AsRef<Path>>(
    formula: &Formula,
    path: P,
    comment: &str,
) -> anyhow::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to write DIMACS file: {}", path.as_ref().display()))?;

    write_dimacs(formula, std::io::BufWriter::new(file), comment)
        .with_context(|| format!("Failed to write DIMACS file: {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_basic_file() {
        let content = "c example\np cnf 3 2\n1 -2 3 0\n-1 2 0\n";
        let formula = parse_dimacs_str(content).unwrap();

        assert_eq!(formula.num_clauses(), 2);
        assert_eq!(formula.num_variables(), 3);
        assert_eq!(formula.clauses()[0].literals(), &[1, -2, 3]);
        assert_eq!(formula.clauses()[1].literals(), &[-1, 2]);
    }

    #[test]
    fn test_clause_spanning_lines() {
        let content = "p cnf 4 2\n1 2\n3 0 -4\n0\n";
        let formula = parse_dimacs_str(content).unwrap();

        assert_eq!(formula.num_clauses(), 2);
        assert_eq!(formula.clauses()[0].literals(), &[1, 2, 3]);
        assert_eq!(formula.clauses()[1].literals(), &[-4]);
    }

    #[test]
    fn test_markers_and_blank_lines_skipped() {
        let content = "# generated\n% note\n\n   \nc x\n1 0\n";
        let formula = parse_dimacs_str(content).unwrap();
        assert_eq!(formula.num_clauses(), 1);
    }

    #[test]
    fn test_trailing_clause_without_terminator() {
        let formula = parse_dimacs_str("1 2 0\n-3").unwrap();
        assert_eq!(formula.num_clauses(), 2);
        assert_eq!(formula.clauses()[1].literals(), &[-3]);
    }

    #[test]
    fn test_empty_clause_reports_line() {
        let err = parse_dimacs_str("c header\n1 2 0\n0\n").unwrap_err();
        match err {
            SatArtError::Parse { line, text, .. } => {
                assert_eq!(line, 3);
                assert_eq!(text, "0");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_token() {
        let err = parse_dimacs_str("1 x 0\n").unwrap_err();
        assert!(matches!(err, SatArtError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_write_format() {
        let formula = Formula::from_clauses(vec![vec![1, -2], vec![3]]).unwrap();
        let text = formula_to_dimacs(&formula, "Seed: abc");

        assert_eq!(text, "c Seed: abc\np cnf 3 2\n1 -2 0\n3 0\n");
        assert_eq!(parse_dimacs_str(&text).unwrap(), formula);
    }

    #[test]
    fn test_write_without_comment() {
        let formula = Formula::from_clauses(vec![vec![-1]]).unwrap();
        assert_eq!(formula_to_dimacs(&formula, ""), "p cnf 1 1\n-1 0\n");
    }

    #[test]
    fn test_write_errors_propagate() {
        struct Full;

        impl Write for Full {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::WriteZero, "device full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let formula = Formula::from_clauses(vec![vec![1, -2]]).unwrap();
        let err = write_dimacs(&formula, Full, "Seed: abc").unwrap_err();
        assert!(matches!(err, SatArtError::Io(_)));

        let mut buf = Vec::new();
        write_dimacs(&formula, &mut buf, "Seed: abc").unwrap();
        assert_eq!(buf, formula_to_dimacs(&formula, "Seed: abc").into_bytes());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/formula.cnf");
        let formula = Formula::from_clauses(vec![vec![1, 2, 3], vec![-1, -2, -3]]).unwrap();

        save_formula_to_file(&formula, &path, "Seed: test").unwrap();
        let loaded = load_formula_from_file(&path).unwrap();

        assert_eq!(loaded, formula);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("c Seed: test\n"));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(load_formula_from_file(temp_dir.path().join("absent.cnf")).is_err());
    }
}

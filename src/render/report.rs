//! Summary statistics over an enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Distribution of unsatisfied-clause counts over all assignments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub num_variables: u32,
    pub num_clauses: usize,
    pub beta: f64,
    pub assignments: u64,
    pub satisfying: u64,
    pub min_unsatisfied: Option<usize>,
    pub mean_unsatisfied: f64,
    /// `histogram[k]` is the number of assignments breaking exactly `k` clauses
    pub histogram: Vec<u64>,
}

impl RenderReport {
    pub fn from_histogram(
        num_variables: u32,
        num_clauses: usize,
        beta: f64,
        histogram: Vec<u64>,
    ) -> Self {
        let assignments: u64 = histogram.iter().sum();
        let satisfying = histogram.first().copied().unwrap_or(0);
        let min_unsatisfied = histogram.iter().position(|&count| count > 0);
        let weighted: f64 = histogram
            .iter()
            .enumerate()
            .map(|(k, &count)| k as f64 * count as f64)
            .sum();
        let mean_unsatisfied = if assignments > 0 {
            weighted / assignments as f64
        } else {
            0.0
        };

        Self {
            num_variables,
            num_clauses,
            beta,
            assignments,
            satisfying,
            min_unsatisfied,
            mean_unsatisfied,
            histogram,
        }
    }

    /// Whether some assignment satisfies every clause
    pub fn is_satisfiable(&self) -> bool {
        self.satisfying > 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Enumeration Summary:")?;
        writeln!(f, "  Variables: {}", self.num_variables)?;
        writeln!(f, "  Clauses: {}", self.num_clauses)?;
        writeln!(f, "  Assignments: {}", self.assignments)?;
        writeln!(
            f,
            "  Satisfying: {} ({:.4}%)",
            self.satisfying,
            if self.assignments > 0 {
                self.satisfying as f64 / self.assignments as f64 * 100.0
            } else {
                0.0
            }
        )?;
        match self.min_unsatisfied {
            Some(min) => writeln!(f, "  Fewest unsatisfied clauses: {}", min)?,
            None => writeln!(f, "  Fewest unsatisfied clauses: -")?,
        }
        write!(f, "  Mean unsatisfied clauses: {:.3}", self.mean_unsatisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_histogram() {
        let report = RenderReport::from_histogram(3, 4, 0.5, vec![0, 2, 4, 2, 0]);
        assert_eq!(report.assignments, 8);
        assert_eq!(report.satisfying, 0);
        assert!(!report.is_satisfiable());
        assert_eq!(report.min_unsatisfied, Some(1));
        assert!((report.mean_unsatisfied - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_histogram() {
        let report = RenderReport::from_histogram(0, 0, 0.5, vec![]);
        assert_eq!(report.assignments, 0);
        assert_eq!(report.min_unsatisfied, None);
        assert_eq!(report.mean_unsatisfied, 0.0);
    }

    #[test]
    fn test_json_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        let report = RenderReport::from_histogram(2, 2, 1.0, vec![2, 2, 0]);

        report.save_to_file(&path).unwrap();
        let loaded = RenderReport::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded, report);
    }

    #[test]
    fn test_display() {
        let report = RenderReport::from_histogram(2, 2, 1.0, vec![2, 2, 0]);
        let text = report.to_string();
        assert!(text.contains("Satisfying: 2 (50.0000%)"));
        assert!(text.contains("Fewest unsatisfied clauses: 0"));
    }
}

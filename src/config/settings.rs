//! Configuration settings for the SAT art renderer

use crate::render::{ColorMap, Rgb, MAX_VARIABLES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub render: RenderConfig,
    pub palette: PaletteConfig,
    pub random: RandomConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Decay rate of the color map
    pub beta: f64,
    pub max_variables: u32,
    /// Fold variables above the rendered width onto the available bits
    pub wrap_variables: bool,
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub unsatisfied: Rgb,
    pub satisfied: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomConfig {
    pub clauses: usize,
    pub variables: u32,
    pub clause_width: usize,
    pub seed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub image: Option<PathBuf>,
    pub formula: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub preview: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig {
                beta: 0.5,
                max_variables: MAX_VARIABLES,
                wrap_variables: true,
                parallel: true,
            },
            palette: PaletteConfig {
                unsatisfied: Rgb::BLACK,
                satisfied: Rgb::GREEN,
            },
            random: RandomConfig {
                clauses: 32,
                variables: 16,
                clause_width: 3,
                seed: String::new(),
            },
            output: OutputConfig {
                image: None,
                formula: None,
                report: None,
                preview: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the render settings
    pub fn validate(&self) -> Result<()> {
        if !self.render.beta.is_finite() || self.render.beta < 0.0 {
            anyhow::bail!("Beta must be a non-negative number, got {}", self.render.beta);
        }

        if self.render.max_variables > MAX_VARIABLES {
            anyhow::bail!(
                "max_variables ({}) cannot exceed {}",
                self.render.max_variables,
                MAX_VARIABLES
            );
        }

        Ok(())
    }

    /// Validate the random sentence parameters; only needed when a sentence
    /// is generated
    pub fn validate_random(&self) -> Result<()> {
        if self.random.clauses == 0 {
            anyhow::bail!("Number of clauses must be positive");
        }

        if self.random.variables == 0 {
            anyhow::bail!("Number of variables must be positive");
        }

        if self.random.variables as usize > self.random.clauses {
            anyhow::bail!(
                "Number of variables ({}) must not exceed number of clauses ({})",
                self.random.variables,
                self.random.clauses
            );
        }

        if self.random.clause_width == 0 {
            anyhow::bail!("Clause width must be positive");
        }

        Ok(())
    }

    /// Color map described by the palette and beta
    pub fn color_map(&self) -> Result<ColorMap> {
        ColorMap::new(
            self.palette.unsatisfied,
            self.palette.satisfied,
            self.render.beta,
        )
        .context("Invalid color map")
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(beta) = cli_overrides.beta {
            self.render.beta = beta;
        }
        if let Some(clauses) = cli_overrides.clauses {
            self.random.clauses = clauses;
        }
        if let Some(variables) = cli_overrides.variables {
            self.random.variables = variables;
        }
        if let Some(clause_width) = cli_overrides.clause_width {
            self.random.clause_width = clause_width;
        }
        if let Some(ref seed) = cli_overrides.seed {
            self.random.seed = seed.clone();
        }
        if let Some(ref image) = cli_overrides.image {
            self.output.image = Some(image.clone());
        }
        if let Some(ref formula) = cli_overrides.formula {
            self.output.formula = Some(formula.clone());
        }
        if let Some(ref report) = cli_overrides.report {
            self.output.report = Some(report.clone());
        }
        if cli_overrides.preview {
            self.output.preview = true;
        }
        if cli_overrides.sequential {
            self.render.parallel = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub beta: Option<f64>,
    pub clauses: Option<usize>,
    pub variables: Option<u32>,
    pub clause_width: Option<usize>,
    pub seed: Option<String>,
    pub image: Option<PathBuf>,
    pub formula: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub preview: bool,
    pub sequential: bool,
}

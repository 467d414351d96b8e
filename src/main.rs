//! Command line renderer for k-SAT sentences

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use sat_art::{
    build_renderer,
    config::{CliOverrides, Settings},
    sat::{load_formula_from_file, save_formula_to_file},
    utils::{ProgressIndicator, RenderFormatter, Status},
    Formula, PixelBuffer,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

/// Image written when no output path is given
const DEFAULT_IMAGE: &str = "sat_art.png";

#[derive(Parser, Debug)]
#[command(name = "sat_art")]
#[command(version = "1.0")]
#[command(about = "Renders k-SAT sentences as pictures")]
#[command(group(ArgGroup::new("source").required(true).args(["file", "random"])))]
struct Cli {
    /// Rate of decay of the image shader (non-negative)
    #[arg(short = 'b', value_name = "BETA", value_parser = parse_beta)]
    beta: Option<f64>,

    /// DIMACS (.cnf) file to read a sentence from; only the first
    /// variables are evaluated if the sentence is too large
    #[arg(short = 'f', value_name = "DIMACS_FILE", value_parser = parse_file_name)]
    file: Option<PathBuf>,

    /// Generate a random sentence instead of reading a DIMACS file
    #[arg(long)]
    random: bool,

    /// Number of clauses in the random sentence
    #[arg(short = 'c', value_name = "N_CLAUSES", value_parser = parse_positive)]
    clauses: Option<usize>,

    /// Number of variables in the random sentence
    #[arg(short = 'v', value_name = "N_VARS", value_parser = clap::value_parser!(u32).range(1..))]
    variables: Option<u32>,

    /// Literals per clause in the random sentence
    #[arg(short = 'k', value_name = "WIDTH", value_parser = parse_positive)]
    clause_width: Option<usize>,

    /// Seed string for the random sentence
    #[arg(short = 's', value_name = "SEED", value_parser = parse_seed)]
    seed: Option<String>,

    /// DIMACS (.cnf) file to save the sentence to
    #[arg(short = 'o', value_name = "DIMACS_FILE_OUT", value_parser = parse_file_name)]
    formula_out: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    dump_config: Option<PathBuf>,

    /// Write unsatisfied-clause statistics as JSON
    #[arg(long, value_name = "PATH", value_parser = parse_file_name)]
    report: Option<PathBuf>,

    /// Draw the image in the terminal
    #[arg(long)]
    preview: bool,

    /// Render on a single thread
    #[arg(long)]
    sequential: bool,

    /// Verbose output
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Output image (PNG, BMP or PPM, by extension)
    #[arg(value_name = "IMG_OUT", value_parser = parse_file_name)]
    image: Option<PathBuf>,
}

fn parse_beta(s: &str) -> std::result::Result<f64, String> {
    let beta: f64 = s.parse().map_err(|_| format!("invalid beta value '{}'", s))?;
    if !beta.is_finite() || beta < 0.0 {
        return Err(format!("beta must be a non-negative number, got '{}'", s));
    }
    Ok(beta)
}

fn parse_positive(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{}' is not a positive integer", s)),
    }
}

fn parse_file_name(s: &str) -> std::result::Result<PathBuf, String> {
    if s.is_empty() || s.starts_with('-') {
        return Err(format!("invalid file name '{}'", s));
    }
    Ok(PathBuf::from(s))
}

fn parse_seed(s: &str) -> std::result::Result<String, String> {
    if s.starts_with('-') {
        return Err("seed cannot start with '-'".to_string());
    }
    Ok(s.to_string())
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            beta: self.beta,
            clauses: self.clauses,
            variables: self.variables,
            clause_width: self.clause_width,
            seed: self.seed.clone(),
            image: self.image.clone(),
            formula: self.formula_out.clone(),
            report: self.report.clone(),
            preview: self.preview,
            sequential: self.sequential,
        }
    }

    fn log_level(&self) -> simplelog::LevelFilter {
        if self.quiet {
            simplelog::LevelFilter::Warn
        } else if self.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        }
    }
}

fn main() -> Result<()> {
    // clap exits with 2 on usage errors; argument errors exit with 1 here
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print().ok();
            std::process::exit(code);
        }
    };

    simplelog::TermLogger::init(
        cli.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if let Err(err) = run(cli) {
        eprintln!("{}", Status::Failure.message(&format!("{:#}", err)));
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;

    if let Some(ref path) = cli.dump_config {
        settings.to_file(path)?;
        println!(
            "{}",
            Status::Done.message(&format!("Configuration written to {}", path.display()))
        );
        return Ok(());
    }

    let formula = load_formula(&cli, &settings)?;
    log::info!("{}", RenderFormatter::format_formula_summary(&formula));
    log::debug!("Sentence: {}", formula);

    let start_time = Instant::now();
    let buffer = render(&formula, &settings, cli.quiet)?;
    log::info!(
        "Rendered {}x{} image in {:.3}s",
        buffer.width(),
        buffer.height(),
        start_time.elapsed().as_secs_f64()
    );

    write_outputs(&formula, &settings, &buffer, cli.quiet)
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.config {
        Some(ref path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Settings::default(),
    };
    settings.merge_with_cli(&cli.overrides());
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn load_formula(cli: &Cli, settings: &Settings) -> Result<Formula> {
    let (formula, comment) = if cli.random {
        settings
            .validate_random()
            .context("Invalid random sentence parameters")?;
        let random = &settings.random;
        let formula = Formula::random_ksat(
            random.clauses,
            random.variables,
            &random.seed,
            random.clause_width,
        )
        .context("Failed to generate random sentence")?;
        (formula, format!("Seed: {}", random.seed))
    } else {
        let path = cli
            .file
            .as_ref()
            .context("no DIMACS file given")?;
        let formula = load_formula_from_file(path)?;
        (formula, format!("Source: {}", path.display()))
    };

    if let Some(ref path) = settings.output.formula {
        save_formula_to_file(&formula, path, &comment)?;
        log::info!("Sentence saved to {}", path.display());
    }

    Ok(formula)
}

fn render(formula: &Formula, settings: &Settings, quiet: bool) -> Result<PixelBuffer> {
    let renderer = build_renderer(formula, settings)?;

    let buffer = if settings.render.parallel {
        let progress = Mutex::new(ProgressIndicator::new(!quiet));
        let buffer = renderer.render_with_progress(|fraction| {
            if let Ok(mut bar) = progress.lock() {
                bar.update(fraction);
            }
        });
        if let Ok(mut bar) = progress.into_inner() {
            bar.finish();
        }
        buffer
    } else {
        let mut progress = ProgressIndicator::new(!quiet);
        let buffer = renderer.render_sequential(|fraction| progress.update(fraction));
        progress.finish();
        buffer
    };

    let buffer = buffer.context("Failed to render sentence")?;

    if let Some(ref path) = settings.output.report {
        let report = renderer.report();
        if !quiet {
            println!("{}", report);
        }
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(buffer)
}

fn write_outputs(
    formula: &Formula,
    settings: &Settings,
    buffer: &PixelBuffer,
    quiet: bool,
) -> Result<()> {
    if settings.output.preview {
        match RenderFormatter::format_buffer_preview(buffer) {
            Some(preview) => print!("{}", preview),
            None => println!(
                "{}",
                Status::Warning.message(&format!(
                    "Image is {} pixels wide, too wide for a terminal preview",
                    buffer.width()
                ))
            ),
        }
    }

    let image_path = match settings.output.image {
        Some(ref path) => Some(path.clone()),
        None if settings.output.preview => None,
        None => Some(PathBuf::from(DEFAULT_IMAGE)),
    };

    if let Some(path) = image_path {
        save_image(buffer, &path)?;
        if !quiet {
            println!(
                "{}",
                Status::Done.message(&format!(
                    "Rendered {} clauses over {} variables to {}",
                    formula.num_clauses(),
                    formula.num_variables(),
                    path.display()
                ))
            );
        }
    }

    Ok(())
}

fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    buffer
        .save(path)
        .with_context(|| format!("Failed to write image to {}", path.display()))
}

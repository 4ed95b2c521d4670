//! Orientation correction command

use anyhow::{Context, Result};
use pathfix_core::{LogSink, PathfixConfig, PolicyKind};
use pathfix_io::{CsvPointSource, LoadOptions, PointSource};
use pathfix_solver::{OrientationPolicy, OrientationSolver, Segmenter};
use std::path::{Path, PathBuf};

pub struct CorrectArgs {
    pub input: String,
    pub output: Option<String>,
    pub policy: Option<PolicyKind>,
    pub realign: bool,
    pub marker: Option<String>,
    pub renumber: bool,
    pub drop_first_point: bool,
}

pub fn run(args: CorrectArgs, mut config: PathfixConfig) -> Result<()> {
    apply_flags(&args, &mut config)?;

    let input = Path::new(&args.input);
    let output = match &args.output {
        Some(path) => PathBuf::from(path),
        None => default_output_path(input),
    };

    let source = CsvPointSource::new(LoadOptions::from(&config.load)).with_sink(LogSink);
    let mut sequence = source
        .load(input)
        .with_context(|| format!("Failed to load points from {}", input.display()))?;

    let segmenter = Segmenter::new(config.solver.marker.clone());
    let segments = segmenter.split(&sequence);

    let policy = OrientationPolicy::from_config(&config.solver);
    let updated = OrientationSolver::new(policy).solve(&mut sequence, &segments, &LogSink);

    if config.solver.renumber {
        segmenter.renumber(&mut sequence, &segments);
    }

    source
        .save(&output, &sequence)
        .with_context(|| format!("Failed to save points to {}", output.display()))?;

    println!(
        "Corrected {} of {} point(s) in {} segment(s) with {} policy",
        updated,
        sequence.len(),
        segments.len(),
        policy.name()
    );
    println!("Saved to {}", output.display());

    Ok(())
}

/// Command-line flags win over every config layer
fn apply_flags(args: &CorrectArgs, config: &mut PathfixConfig) -> Result<()> {
    if let Some(policy) = args.policy {
        config.solver.policy = policy;
    }
    if let Some(marker) = &args.marker {
        config.solver.marker = marker.clone();
    }
    config.solver.realign |= args.realign;
    config.solver.renumber |= args.renumber;
    config.load.drop_first_point |= args.drop_first_point;
    config.validate().context("Invalid command-line option")?;
    Ok(())
}

/// `path.csv` becomes `path_corrected.csv` next to the input
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{}_corrected.{}", stem, ext))
}

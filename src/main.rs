//! Paint shop command line entry point

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{debug, error, info};

use paintshop::{
    batch::BatchDescriptor,
    config::{Config, InputFormat},
    fixtures::Fixture,
    input::parse_batches,
    logging,
    report::Report,
    solution::Solution,
    solvers::backtracking::{BacktrackingSolver, SearchStats},
};

fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(error) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging is not initialised, eprintln is the only way to report it"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let batches = load_batches(config)?;

    info!(batches = batches.len(), "loaded input");

    let report: Report = batches.iter().enumerate().map(resolve).collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if config.table {
        report.write_table(&mut handle)?;
    } else {
        report.write_to(&mut handle)?;
    }

    handle.flush()?;

    if let Some(path) = config.output.as_deref() {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        report
            .write_to(&mut writer)
            .with_context(|| format!("failed to write output file {}", path.display()))?;

        writer.flush()?;

        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn load_batches(config: &Config) -> Result<Vec<BatchDescriptor>> {
    let path = config.input.as_path();

    let batches = match config.format {
        InputFormat::Text => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))?;

            parse_batches(&contents)
                .with_context(|| format!("invalid input file {}", path.display()))?
        }
        InputFormat::Yaml => Fixture::from_path(path)
            .with_context(|| format!("invalid batch file {}", path.display()))?
            .into_descriptors(),
    };

    Ok(batches)
}

fn resolve((index, batch): (usize, &BatchDescriptor)) -> Solution {
    let mut stats = SearchStats::default();
    let start = Instant::now();

    let solution = BacktrackingSolver::resolve_with_observer(batch, &mut stats);

    let elapsed = start.elapsed();

    debug!(
        case = index + 1,
        found = solution.is_found(),
        pins = stats.pins,
        candidates = stats.candidates,
        satisfied_skips = stats.satisfied_skips,
        max_depth = stats.max_depth,
        elapsed = %elapsed.human(Truncate::Nano),
        "case resolved"
    );

    solution
}

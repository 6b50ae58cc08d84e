//! linescope: explore a repository's line-level change history
//!
//! This binary loads a line log, builds the explorer over it and writes the
//! requested views to stdout as newline-delimited JSON. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use linescope::config::{Command, Config};
use linescope::gallery::{self, Gallery, Project, YearSlice};
use linescope::{Explorer, Frame, Interaction, NdjsonSink, RecordingSink, RenderSink};
use linescope_commits::Region;
use linescope_log::{LoadOptions, load_path};
use serde::Serialize;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    config.validate()?;

    match config.command() {
        Command::Projects {
            projects,
            search,
            year,
            latest,
        } => run_projects(&projects, search.as_deref(), year.as_deref(), latest),
        Command::Replay => run_replay(load_explorer(config)?),
        command => run_view(load_explorer(config)?, &command),
    }
}

fn load_explorer(config: &Config) -> Result<Explorer> {
    let path = config.input_path();
    let options = LoadOptions {
        strict: config.strict,
    };
    let report = load_path(&path, &options)
        .with_context(|| format!("Failed to load line log {}", path.display()))?;

    if !report.skipped.is_empty() {
        warn!(
            skipped = report.skipped.len(),
            "Some rows of the line log were skipped"
        );
    }

    let explorer = Explorer::new(report.records);
    Ok(match &config.repo_url {
        Some(url) => explorer.with_repo_url(url.clone()),
        None => explorer,
    })
}

/// Apply one command's transition and print the frame it asks for
fn run_view(mut explorer: Explorer, command: &Command) -> Result<()> {
    let mut recording = RecordingSink::new();

    let kind = match *command {
        Command::Summary => {
            recording.render(&Frame::Summary(explorer.summary_frame()))?;
            "summary"
        }
        Command::Scatter { progress } => {
            explorer.set_progress(progress, &mut recording)?;
            "scatter"
        }
        Command::Files { progress } => {
            explorer.set_progress(progress, &mut recording)?;
            "files"
        }
        Command::Select {
            x0,
            y0,
            x1,
            y1,
            progress,
        } => {
            explorer.set_progress(progress, &mut recording)?;
            let region = Region::new((x0, y0), (x1, y1));
            explorer.set_selection(Some(region), &mut recording)?;
            "selection"
        }
        Command::Narrative { step } => {
            if let Some(index) = step {
                explorer.enter_step(index, &mut recording)?;
            }
            recording.render(&Frame::Narrative(explorer.narrative_frame()))?;
            "narrative"
        }
        Command::Replay | Command::Projects { .. } => {
            bail!("{command:?} does not render a single view")
        }
    };

    let mut sink = NdjsonSink::new(io::stdout().lock());
    if let Some(frame) = recording.last(kind) {
        sink.render(frame)?;
    }
    Ok(())
}

/// Render everything, then apply one interaction per stdin line
fn run_replay(mut explorer: Explorer) -> Result<()> {
    let mut sink = NdjsonSink::new(io::stdout().lock());
    explorer.render_all(&mut sink)?;

    let mut applied = 0usize;
    let mut ignored = 0usize;
    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("Failed to read interaction from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Interaction>(&line) {
            Ok(interaction) => {
                explorer.apply(interaction, &mut sink)?;
                applied += 1;
            }
            Err(e) => {
                warn!(line = number + 1, error = %e, "Ignoring malformed interaction");
                ignored += 1;
            }
        }
    }

    info!(applied, ignored, "Replay finished");
    Ok(())
}

/// Gallery query result
#[derive(Debug, Serialize)]
struct ProjectsView<'a> {
    heading: String,
    years: Vec<YearSlice>,
    projects: Vec<&'a Project>,
}

fn run_projects(
    path: &Path,
    search: Option<&str>,
    year: Option<&str>,
    latest: Option<usize>,
) -> Result<()> {
    let gallery = Gallery::load_path(path)
        .with_context(|| format!("Failed to load projects {}", path.display()))?;

    let shown = match latest {
        Some(n) => gallery.latest(n),
        None => gallery.projects(),
    };
    let matching = gallery::search(shown, search.unwrap_or_default());
    let years = gallery::year_slices(matching.iter().copied());
    let projects = match year {
        Some(year) => gallery::filter_year(matching, year),
        None => matching,
    };

    let view = ProjectsView {
        heading: gallery.heading(),
        years,
        projects,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &view)?;
    writeln!(stdout)?;
    Ok(())
}

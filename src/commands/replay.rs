// Replay command - feeds a recorded event stream through the reporter

use crate::cli::Cli;
use crate::config::Config;
use crate::events::{RunEndInfo, RunStartInfo, RunnerEvent, read_events};
use crate::report::{Reporter, ResultsReporter, RunOutcome};
use crate::settings::LaunchSettings;
use crate::upload::{DryRunClient, HttpResultsClient, ResultsClient};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use tracing::{debug, info};

/// Drive the reporter through `events` in order.
///
/// Case and annotation events before any `run_start` get an implicit one, and
/// a run left open at the end of the stream is closed so its upload happens.
pub async fn replay(reporter: &ResultsReporter, events: Vec<RunnerEvent>) -> Vec<RunOutcome> {
    let mut outcomes = Vec::new();
    let mut running = false;

    for event in events {
        match &event {
            RunnerEvent::RunStart(info) => {
                if running {
                    outcomes.push(reporter.on_run_end(&RunEndInfo::default()).await);
                }
                reporter.on_run_start(info);
                running = true;
                continue;
            }
            RunnerEvent::RunEnd(info) => {
                if !running {
                    reporter.on_run_start(&RunStartInfo::default());
                }
                outcomes.push(reporter.on_run_end(info).await);
                running = false;
                continue;
            }
            _ if !running => {
                reporter.on_run_start(&RunStartInfo::default());
                running = true;
            }
            _ => {}
        }

        match event {
            RunnerEvent::CaseStart(info) => {
                reporter.on_case_start(&info);
            }
            RunnerEvent::CaseEnd(info) => reporter.on_case_end(&info),
            RunnerEvent::AttachFile { id, path } => match id {
                Some(id) => reporter.case(&id).attach_file(path),
                None => reporter.annotator().attach_file(path),
            },
            RunnerEvent::SetCustom { id, name, value } => match id {
                Some(id) => reporter.case(&id).set_custom(&name, value),
                None => reporter.annotator().set_custom(&name, value),
            },
            RunnerEvent::SetDescription { id, text } => match id {
                Some(id) => reporter.case(&id).set_description(&text),
                None => reporter.annotator().set_description(&text),
            },
            RunnerEvent::AddStep { id, step } => match id {
                Some(id) => reporter.case(&id).add_step(step),
                None => reporter.annotator().add_step(step),
            },
            RunnerEvent::RunStart(_) | RunnerEvent::RunEnd(_) => {}
        }
    }

    if running {
        debug!("event stream ended without run_end");
        outcomes.push(reporter.on_run_end(&RunEndInfo::default()).await);
    }

    outcomes
}

/// Entry point for the default command
pub async fn handle_replay(cli: &Cli) -> Result<()> {
    let settings = LaunchSettings::from_tokens(&cli.settings);
    let config = Config::resolve(settings.config.as_deref());

    let client: Arc<dyn ResultsClient> = if cli.dry_run {
        Arc::new(DryRunClient::stdout())
    } else {
        Arc::new(HttpResultsClient::new(&config.upload).context("Failed to create upload client")?)
    };

    let reader: Box<dyn BufRead> = match &cli.events {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("Failed to open events file: {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let events = read_events(reader)?;
    debug!(count = events.len(), "decoded runner events");

    let reporter = ResultsReporter::new(client, cli.settings.iter().cloned())
        .with_integration_name(config.metadata.integration_name);

    for outcome in replay(&reporter, events).await {
        match outcome {
            RunOutcome::Disabled => info!("run not reported"),
            RunOutcome::Uploaded { cases, response } => {
                info!(cases, success = response.success, "run reported")
            }
            RunOutcome::UploadFailed { cases, error } => info!(cases, %error, "run not uploaded"),
        }
    }

    Ok(())
}

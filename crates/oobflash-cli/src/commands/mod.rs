use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use oobflash_core::{Dismissal, FlashConfig, InjectionOutcome, RequestContext, timeline};
use serde::Serialize;

use crate::cli::{Commands, PolicyArgs, TimelineArgs};

mod web;

#[cfg(test)]
mod tests;

use self::web::{WebServeOptions, serve};

pub(crate) fn run(command: Commands) -> Result<()> {
    let config = FlashConfig::from_env().context("failed to load flash configuration")?;

    match command {
        Commands::Serve(args) => serve(
            config,
            WebServeOptions {
                host: &args.host,
                port: args.port,
            },
        ),
        Commands::Policy(args) => print_json(&policy_report(&config, &args)),
        Commands::Timeline(args) => print_json(&timeline_report(&config, &args)),
    }
}

#[derive(Debug, Serialize)]
struct PolicyReport {
    decision: bool,
    #[serde(flatten)]
    outcome: InjectionOutcome,
    override_headers: Vec<String>,
}

fn policy_report(config: &FlashConfig, args: &PolicyArgs) -> PolicyReport {
    let policy = config.policy();
    let mut ctx = if args.partial {
        RequestContext::partial()
    } else {
        RequestContext::full_navigation()
    };
    ctx.set_response_headers(args.headers.iter().map(String::as_str));

    let outcome = policy.evaluate(&ctx, args.pending);
    PolicyReport {
        decision: outcome.is_injected(),
        outcome,
        override_headers: policy.override_headers().map(ToString::to_string).collect(),
    }
}

#[derive(Debug, Serialize)]
struct TimelineReport {
    dismiss_ms: u64,
    transition_ms: u64,
    dismissals: Vec<Dismissal>,
}

fn timeline_report(config: &FlashConfig, args: &TimelineArgs) -> TimelineReport {
    let delay = args
        .dismiss_ms
        .map_or(config.dismiss_after, Duration::from_millis);
    let transition = args
        .transition_ms
        .map_or(config.transition, Duration::from_millis);
    let offsets = args
        .at
        .iter()
        .copied()
        .map(Duration::from_millis)
        .collect::<Vec<_>>();

    TimelineReport {
        dismiss_ms: duration_millis(delay),
        transition_ms: duration_millis(transition),
        dismissals: timeline(&offsets, delay, transition),
    }
}

fn duration_millis(value: Duration) -> u64 {
    u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

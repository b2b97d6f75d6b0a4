use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use yuletide_core::{
    check_once, CheckOutcome, ChristmasMatcher, Config, DateSource, FixedDateSource,
    NormalizedDate, PromptedLines, Reporter, Session,
};

use crate::console::{JsonReporter, TextReporter};

#[derive(Args)]
pub struct CheckArgs {
    /// Pretend today is this date (e.g. "Dec 25")
    #[arg(long)]
    date: Option<NormalizedDate>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Background check cadence in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,
}

#[derive(Args)]
pub struct OnceArgs {
    /// Pretend today is this date (e.g. "Dec 25")
    #[arg(long)]
    date: Option<NormalizedDate>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

fn date_source(date: Option<NormalizedDate>, config: &Config) -> Arc<dyn DateSource> {
    match date {
        Some(date) => Arc::new(FixedDateSource(date)),
        None => config.date_source(),
    }
}

fn reporter(json: bool) -> Arc<dyn Reporter> {
    if json {
        Arc::new(JsonReporter)
    } else {
        Arc::new(TextReporter::new())
    }
}

pub fn run(args: CheckArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = config.session_settings();
    if let Some(ms) = args.interval_ms {
        settings.interval = Duration::from_millis(ms);
    }

    // Keep stdout clean for JSON lines.
    let prompt_out: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let lines = PromptedLines::new(io::stdin().lock(), prompt_out);

    let mut session = Session::new(
        date_source(args.date, config),
        reporter(args.json),
        lines,
        settings,
    );
    let end = session.run();
    tracing::debug!(?end, "check session finished");

    let code = end.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

pub fn run_once(args: OnceArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let source = date_source(args.date, config);
    let reporter = reporter(args.json);
    let outcome = check_once(&*source, &ChristmasMatcher::new(), &*reporter);
    if let CheckOutcome::Unknown = outcome {
        tracing::warn!("could not determine the current date");
    }
    Ok(())
}

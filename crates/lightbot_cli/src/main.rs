use std::io::Write as _;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clio::{Input, Output};
use flexi_logger::Logger;
use lightbot_responses::{Responder, ResponderOptions};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Print one LightBot response
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    response: Response,

    /// Log specification, e.g. `debug` or `warn,lightbot_responses=trace`
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// Seed for a reproducible pick
    #[clap(long)]
    seed: Option<u64>,

    /// YAML file with responder options (index policy, custom response sets)
    #[clap(long, value_parser)]
    options_file: Option<Input>,

    /// File to write output
    #[clap(long, short, value_parser, default_value = "-")]
    output: Output,
}

#[derive(Subcommand, Debug)]
enum Response {
    /// Describe the lights and offer to flip them
    Status { state: LightState },
    /// Acknowledge an action the bot cannot perform
    UnknownAction { action: String },
    /// Decline an off-topic request
    OffTopic,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LightState {
    On,
    Off,
}

fn main() -> Result<()> {
    let mut args = Args::parse();
    let _logger = Logger::try_with_str(&args.log_level)
        .context("Invalid log specification")?
        .start()?;

    let options: ResponderOptions = match args.options_file {
        Some(f) => serde_yaml::from_reader(f).context("Cannot parse options file")?,
        None => Default::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut responder = Responder::with_options(options, rng)?;
    debug!("Index policy: {:?}", responder.policy());

    let text = match args.response {
        Response::Status { state } => responder.light_status(matches!(state, LightState::On)),
        Response::UnknownAction { action } => responder.unknown_action(&action),
        Response::OffTopic => responder.off_topic(),
    };
    writeln!(args.output, "{text}")?;
    Ok(())
}

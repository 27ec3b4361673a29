//! Stratus - resource-lifecycle action runtime.
//!
//! One invocation = one lifecycle operation: validate the declared
//! inputs, resolve the endpoint (production or emulator override),
//! execute with bounded retries, and emit the output mapping. Exit code
//! zero means success; anything else tells the orchestrator to skip
//! dependent steps.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use stratus_action::runner::default_retry_safe;
use stratus_action::{ActionContext, Runner};
use stratus_catalog::builtin_registry;
use stratus_config::{EndpointConfig, Environment};
use stratus_provider::Transport;
use tracing::{error, info};

mod inputs;
mod outputs;
mod telemetry;

/// Stratus - resource-lifecycle action runtime.
#[derive(Parser)]
#[command(name = "stratus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON (for CI log collection)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one action
    Run(RunArgs),

    /// List the action catalog
    List,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Action key, e.g. `queue.create`
    action: String,

    /// Input as `name=value`; repeatable, wins over `INPUT_*` variables
    #[arg(long = "input", value_name = "NAME=VALUE")]
    inputs: Vec<String>,

    /// Overall deadline in seconds for the whole invocation
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let env = Environment::from_os();
    let outcome = match cli.command {
        Commands::Run(args) => run(&env, args).await,
        Commands::List => list(&env),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "invocation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(env: &Environment, args: RunArgs) -> Result<()> {
    let raw = inputs::collect(env, &args.inputs)?;

    let endpoint = EndpointConfig::resolve(env)?;
    if endpoint.is_emulator() {
        info!("endpoint override active, routing calls to the emulator");
    }
    let transport = Transport::new(endpoint)?;
    let registry = builtin_registry(&transport);

    let action = registry.get(&args.action).ok_or_else(|| {
        anyhow!(
            "unknown action `{}` (run `stratus list` for the catalog)",
            args.action
        )
    })?;

    let ctx = ActionContext::new();
    let cancel_on_signal = ctx.cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    let runner = Runner::new();
    let invocation = runner.run(action.as_ref(), &raw, &ctx);
    let outputs = match args.timeout {
        Some(secs) => {
            stratus_resilience::timeout(&args.action, Duration::from_secs(secs), invocation)
                .await?
        }
        None => invocation.await?,
    };

    outputs::emit(env, &outputs)?;
    Ok(())
}

fn list(env: &Environment) -> Result<()> {
    // Listing never needs credentials; resolve against the emulator
    // placeholder when the environment has none.
    let endpoint = EndpointConfig::resolve(env).unwrap_or_else(|_| {
        let fallback = Environment::from_pairs([(
            stratus_config::ENDPOINT_URL_VAR,
            "http://localhost:4566",
        )]);
        EndpointConfig::resolve(&fallback).unwrap_or_else(|e| {
            unreachable!("static fallback endpoint must resolve: {e}")
        })
    });
    let registry = builtin_registry(&Transport::new(endpoint)?);

    for metadata in registry.list() {
        let retries = if default_retry_safe(metadata.operation) {
            "retried on transient failures"
        } else {
            "retried only with a deduplication id"
        };
        println!(
            "{}  [{}]  {} ({retries})",
            metadata.key, metadata.operation, metadata.description
        );
        for input in metadata.schema.inputs() {
            let required = if input.required { "required" } else { "optional" };
            println!("    in:  {} ({required}) {}", input.key, input.description);
        }
        for output in &metadata.outputs {
            println!("    out: {} {}", output.name, output.description);
        }
    }
    Ok(())
}

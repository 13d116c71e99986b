//! gatehouse — SSH forced-command dispatcher.
//!
//! Runs one allow-listed action script from a bundle on behalf of an
//! authenticated user, or lists what that user may run.
//!
//! Usage:
//!   gatehouse <user> <bundle> <action> [args...]
//!   gatehouse <user> ls

mod settings;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use gatehouse_audit::{JsonLinesAuditWriter, TracingAuditWriter};
use gatehouse_contracts::{
    error::{exit_code, GateError, GateResult},
    execution::DispatchOutcome,
    request::{Invocation, InvocationId},
};
use gatehouse_core::{
    resolve::BundleLayout, traits::AuditWriter, validate::validate_request, Dispatcher, Listing,
    ProcessRunner,
};
use gatehouse_policy::{FileAccessPolicy, FileDefaults};

use settings::{Settings, DEFAULT_SETTINGS_PATH};

const SYNOPSIS: &str = "\
usage: gatehouse [--config <FILE>] <USER> <BUNDLE> <ACTION> [ARGS...]
       gatehouse [--config <FILE>] <USER> ls";

// ── CLI definition ────────────────────────────────────────────────────────────

/// gatehouse — run allow-listed bundle actions over SSH.
///
/// Intended as an SSH forced command. The user name comes from the trusted
/// caller; everything after it is the requested command. Options are only
/// recognized before the user name.
#[derive(Parser, Debug)]
#[command(
    name = "gatehouse",
    version,
    about,
    long_about = None,
    override_usage = "gatehouse [OPTIONS] <USER> ls\n       gatehouse [OPTIONS] <USER> <BUNDLE> <ACTION> [ARGS]..."
)]
struct Cli {
    /// Settings file path
    #[arg(short, long, env = "GATEHOUSE_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// `<USER> ls`, or `<USER> <BUNDLE> <ACTION> [ARGS...]`
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "TOKENS"
    )]
    tokens: Vec<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures.
            let code = if e.use_stderr() { exit_code::USAGE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "invocation failed");
            eprintln!("gatehouse: {}", e);
            if matches!(e, GateError::Usage { .. }) {
                eprintln!("{}", SYNOPSIS);
            }
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> GateResult<i32> {
    let invocation = Invocation::from_tokens(cli.tokens)?;

    // Reject bad tokens before reading any file at all.
    if let Invocation::Dispatch(request) = &invocation {
        validate_request(request)?;
    }

    let settings = Settings::load(&cli.config)?;
    init_logging(&settings.logging.level);
    debug!(config = %cli.config.display(), "settings loaded");

    let dispatcher = build_dispatcher(&settings);

    match invocation {
        Invocation::List { user } => {
            let listing = dispatcher.list(&user)?;
            write_listing(&mut std::io::stdout().lock(), &listing)?;
            Ok(0)
        }
        Invocation::Dispatch(request) => {
            let outcome = dispatcher.dispatch(&InvocationId::new(), &request)?;
            if let DispatchOutcome::Denied { reason } = &outcome {
                eprintln!("gatehouse: {}", reason);
            }
            Ok(outcome.exit_code())
        }
    }
}

/// Print the listing and flush, so a closed or full stdout is reported.
fn write_listing(out: &mut impl Write, listing: &Listing) -> GateResult<()> {
    write!(out, "{}", listing)
        .and_then(|_| out.flush())
        .map_err(|e| GateError::Output { reason: e.to_string() })
}

/// Wire file-backed policy and defaults, the process runner, and the audit
/// sink chosen by the settings.
fn build_dispatcher(settings: &Settings) -> Dispatcher {
    let audit: Box<dyn AuditWriter> = match &settings.audit_log {
        Some(path) => Box::new(JsonLinesAuditWriter::new(path)),
        None => Box::new(TracingAuditWriter::new()),
    };

    Dispatcher::new(
        Box::new(FileAccessPolicy::new(&settings.access_file)),
        Box::new(FileDefaults::new(&settings.defaults_file)),
        Box::new(ProcessRunner::new()),
        audit,
        BundleLayout::new(&settings.bundles_dir, settings.script_extension.as_str()),
    )
}

/// Structured logging to stderr. stdout belongs to the task script and to
/// the listing. `RUST_LOG` overrides the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{BindCommandInput, run_bind, run_config_check, run_config_schema};
use error::{CliError, ExitCode};
use form_binding_api::v1::{ApiV1ErrorDto, ApiV1ErrorKind, error_envelope_to_api_v1_error};
use form_binding_config::BinderEnv;
use form_binding_shared::{ErrorEnvelope, ErrorKind};
use format::{OutputArgs, OutputMode};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter directive.
const LOG_FILTER_ENV: &str = "FBIND_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "fbind",
    version,
    about = "Bind form submissions against declared integer fields",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bind an encoded form body and/or query string.
    Bind {
        /// Config file declaring the fields (JSON/TOML).
        #[arg(long)]
        config: PathBuf,
        /// Encoded form body. Read from stdin when neither --form nor --query is given.
        #[arg(long)]
        form: Option<String>,
        /// Encoded query string, consulted for keys the form body lacks.
        #[arg(long)]
        query: Option<String>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Validate a config file and print the effective config.
    Check {
        /// Config file path (JSON/TOML).
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the JSON Schema of the config file.
    Schema,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    init_tracing(cli.output.log_json);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing(log_json: bool) {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    let installed = if log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = installed {
        let _ = writeln!(io::stderr(), "warning: logging disabled: {error}");
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Bind {
            config,
            form,
            query,
        } => {
            let env = match BinderEnv::from_std_env() {
                Ok(env) => env,
                Err(error) => {
                    return Ok(format_error_output(
                        mode,
                        &ErrorEnvelope::from(error),
                        ExitCode::InvalidInput,
                    ));
                },
            };
            let stdin_form = if form.is_none() && query.is_none() {
                Some(read_stdin_form()?)
            } else {
                None
            };
            let input = BindCommandInput {
                config_path: config,
                form: form.as_deref().or(stdin_form.as_deref()),
                query: query.as_deref(),
            };
            run_bind(mode, &env, input)
        },
        Commands::Config { command } => match command {
            ConfigCommands::Check { config } => run_config_check(mode, config),
            ConfigCommands::Schema => run_config_schema(),
        },
    }
}

fn read_stdin_form() -> Result<String, CliError> {
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    Ok(body.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn format_error_output(
    mode: OutputMode,
    error: &ErrorEnvelope,
    exit_code: ExitCode,
) -> CliOutput {
    let api_error = error_envelope_to_api_v1_error(error);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": api_error,
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        let mut output = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\"}}".to_string()
        });
        output.push('\n');
        output
    } else {
        format_api_error_text(&api_error)
    };

    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code,
    }
}

/// Exit code for an error raised while binding.
pub(crate) const fn envelope_exit_code(error: &ErrorEnvelope) -> ExitCode {
    match error.kind {
        ErrorKind::Expected | ErrorKind::Invariant => ExitCode::InvalidInput,
        ErrorKind::Unexpected => ExitCode::Internal,
    }
}

fn format_api_error_text(error: &ApiV1ErrorDto) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code);
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(match error.kind {
        ApiV1ErrorKind::Expected => "EXPECTED",
        ApiV1ErrorKind::Invariant => "INVARIANT",
    });
    out.push('\n');

    if let Some(meta) = error.meta.as_ref()
        && !meta.is_empty()
    {
        out.push_str("meta:\n");
        for (key, value) in meta {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

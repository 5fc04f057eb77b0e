use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use vslaunch::config::{load_config, validate_config, Config, ConfigLoader};

/// Exit codes beyond success/failure; clap uses 2 for usage errors
const EXIT_FATAL: u8 = 1;
#[cfg(windows)]
const EXIT_CANCELLED: u8 = 3;
#[cfg(windows)]
const EXIT_NO_INSTANCES: u8 = 4;

#[derive(Parser, Debug)]
#[command(
    name = "vslaunch",
    version,
    about = "Launch a process suspended and attach a running Visual Studio debugger to it"
)]
struct Cli {
    /// Pick instance N (1-based) instead of prompting
    #[arg(long, value_name = "N")]
    instance: Option<usize>,

    /// Attach only; skip the debugger continue call
    #[arg(long)]
    no_continue: bool,

    /// List running debugger instances and exit
    #[arg(long)]
    list: bool,

    /// Path to a vslaunch.toml configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Target executable and its arguments, passed to the OS verbatim
    #[arg(
        trailing_var_arg = true,
        required_unless_present = "list",
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_cli_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("vslaunch: {err:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    init_logging(&config);

    match run(cli, config) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn load_cli_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::new(path).load()?,
        None => load_config()?,
    };
    validate_config(&config)?;
    Ok(config)
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(not(windows))]
fn run(_cli: Cli, _config: Config) -> Result<ExitCode> {
    anyhow::bail!("vslaunch only supports Windows");
}

#[cfg(windows)]
fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    use tracing::{info, warn};
    use vslaunch::attach::{self, AttachOutcome, AttachRequest, ContinueOutcome};
    use vslaunch::discovery::discover;
    use vslaunch::picker::{ConsolePicker, InstancePicker};
    use vslaunch::process::SuspendedProcess;
    use vslaunch::windows::{ComSession, RunningObjectBroker};
    use vslaunch::SUPPORTED_HOSTS;

    let _com = ComSession::initialize()?;
    let broker = RunningObjectBroker::new()?;

    if cli.list {
        let instances = discover(&broker, SUPPORTED_HOSTS)?;
        if instances.is_empty() {
            println!("No running debugger instances found.");
        }
        for (index, instance) in instances.iter().enumerate() {
            println!("  [{}] {}", index + 1, instance);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command_line = cli.command.join(" ");
    let mut target = SuspendedProcess::spawn(&command_line)?;
    info!(pid = target.pid(), command = %command_line, "created suspended process");

    let instances = discover(&broker, SUPPORTED_HOSTS)?;
    if instances.is_empty() {
        warn!(
            pid = target.pid(),
            "no running debugger instances found; target remains suspended"
        );
        return Ok(ExitCode::from(EXIT_NO_INSTANCES));
    }

    let index = match cli.instance {
        Some(n) if n >= 1 && n <= instances.len() => Some(n - 1),
        Some(n) => {
            anyhow::bail!("--instance {n} is out of range 1..={}", instances.len());
        }
        None => ConsolePicker::new().pick(&instances)?,
    };

    let Some(index) = index else {
        warn!(
            pid = target.pid(),
            "selection cancelled; target remains suspended"
        );
        return Ok(ExitCode::from(EXIT_CANCELLED));
    };

    let chosen = &instances[index];
    info!(host = %chosen, "attaching");

    let request = AttachRequest {
        host: &chosen.host,
        target_pid: target.pid(),
        continue_after_attach: config.attach.continue_after_attach && !cli.no_continue,
        reveal_output_pane: config.attach.reveal_output_pane,
    };
    let report = attach::run(&request, &config.retry_policy())?;

    match &report.outcome {
        AttachOutcome::Attached { process_name } => {
            info!(process = %process_name, "attach complete");
        }
        AttachOutcome::NoProcesses => {
            warn!("host reported no live processes; target will run without a debugger");
        }
        AttachOutcome::PidNotFound => {
            warn!(
                pid = target.pid(),
                "host does not list the target; target will run without a debugger"
            );
        }
    }
    if let Some(ContinueOutcome::Exhausted { attempts }) = report.continuation {
        warn!(attempts, "debugger did not accept the continue call");
    }

    target.resume()?;
    info!(pid = target.pid(), "resumed target");
    Ok(ExitCode::SUCCESS)
}

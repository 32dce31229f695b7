// src/system/executor.rs

use crate::{
    constants::{DIRECT_SENTINEL, QUIET_SENTINEL},
    core::paths,
    models::{ExecutionMode, ExecutionSpec, Invocation, ShellSettings},
    system::terminal::MenuTerminal,
};
use colored::Colorize;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::{process::Command, task::JoinHandle};

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Profile path '{0}' could not be used: {1}")]
    Profile(String, String),
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' failed: {status}")]
    NonZeroExitStatus { command: String, status: ExitStatus },
}

/// How one run of a menu entry ended. Never an error for the caller: failures
/// have already been reported on screen when this is returned.
#[derive(Debug)]
pub enum Outcome {
    Completed(ExitStatus),
    /// The entry had nothing to run.
    Skipped,
    Failed(ExecutionError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Reads the sentinel prefix of a command string.
///
/// `!cmd` runs `cmd` as a plain program, `_cmd` runs it through the shell
/// without echoing it, anything else runs through the shell and is echoed.
pub fn resolve(raw_command: &str) -> ExecutionSpec {
    let (command, mode, verbose) = if let Some(rest) = raw_command.strip_prefix(DIRECT_SENTINEL) {
        (rest, ExecutionMode::DirectExecutable, true)
    } else if let Some(rest) = raw_command.strip_prefix(QUIET_SENTINEL) {
        (rest, ExecutionMode::ShellWrapped, false)
    } else {
        (raw_command, ExecutionMode::ShellWrapped, true)
    };

    ExecutionSpec {
        raw_command: raw_command.to_string(),
        command: command.to_string(),
        mode,
        verbose,
    }
}

/// Builds the program and arguments for a resolved command.
///
/// Direct commands are split into words with shell quoting rules. Wrapped
/// commands become `<shell> -o pipefail -c ". <profile>; <command>"`.
pub fn build_invocation(
    spec: &ExecutionSpec,
    shell: &ShellSettings,
) -> Result<Invocation, ExecutionError> {
    match spec.mode {
        ExecutionMode::DirectExecutable => {
            let parts = shlex::split(&spec.command)
                .ok_or_else(|| ExecutionError::CommandParse(spec.command.clone()))?;
            let mut parts = parts.into_iter();
            let program = parts
                .next()
                .ok_or_else(|| ExecutionError::CommandParse(spec.command.clone()))?;
            Ok(Invocation {
                program,
                args: parts.collect(),
            })
        }
        ExecutionMode::ShellWrapped => {
            let mut args = Vec::with_capacity(4);
            if shell.pipefail {
                args.push("-o".to_string());
                args.push("pipefail".to_string());
            }
            args.push("-c".to_string());
            args.push(wrapped_command_line(&spec.command, shell.profile.as_deref())?);
            Ok(Invocation {
                program: shell.program.clone(),
                args,
            })
        }
    }
}

/// `. <profile>; <command>`, or just the command when no profile is configured.
fn wrapped_command_line(command: &str, profile: Option<&str>) -> Result<String, ExecutionError> {
    let Some(profile) = profile.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(command.to_string());
    };

    let expanded = paths::expand_user_path(profile)
        .map_err(|e| ExecutionError::Profile(profile.to_string(), e.to_string()))?;
    let expanded = expanded.to_string_lossy();
    let quoted = shlex::try_quote(&expanded)
        .map_err(|e| ExecutionError::Profile(profile.to_string(), e.to_string()))?;
    Ok(format!(". {}; {}", quoted, command))
}

/// Runs a menu entry's command attached to the terminal and reports how it went.
///
/// Verbose commands are announced on `term` with a dimmed `running…` line,
/// quiet ones with an empty line. Failures are written in red. Interrupts
/// received while the child runs are absorbed so they only affect the child.
pub async fn execute<T: MenuTerminal>(
    raw_command: &str,
    shell: &ShellSettings,
    term: &mut T,
) -> Outcome {
    let spec = resolve(raw_command);
    log::debug!("Resolved '{}' to {:?}", raw_command, spec);

    if spec.verbose {
        let status_line = format!(t!("exec.info.running"), command = spec.raw_command)
            .dimmed()
            .italic()
            .to_string();
        report(term, &status_line);
    } else {
        report(term, "");
    }

    match run(&spec, shell).await {
        Ok(Some(status)) => Outcome::Completed(status),
        Ok(None) => Outcome::Skipped,
        Err(e) => {
            log::debug!("Command '{}' failed: {:?}", spec.raw_command, e);
            report(term, &e.to_string().red().to_string());
            Outcome::Failed(e)
        }
    }
}

/// Writes one line for the user. A terminal that cannot be written to does
/// not stop the command from running.
fn report<T: MenuTerminal>(term: &mut T, line: &str) {
    if let Err(e) = term.write_line(line).and_then(|()| term.flush()) {
        log::warn!("Could not write to the terminal: {}", e);
    }
}

async fn run(
    spec: &ExecutionSpec,
    shell: &ShellSettings,
) -> Result<Option<ExitStatus>, ExecutionError> {
    if spec.command.trim().is_empty() {
        return Ok(None); // An empty command is a success, not an error.
    }

    let invocation = build_invocation(spec, shell)?;
    log::debug!(
        "Spawning {} with args {:?}",
        invocation.program,
        invocation.args
    );

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // Registered before the child starts and aborted on every way out of this function.
    let _observer = scopeguard::guard(spawn_interrupt_observer(), |observer| {
        if let Some(handle) = observer {
            handle.abort();
        }
    });

    let mut child = command
        .spawn()
        .map_err(|e| ExecutionError::CommandFailed(spec.command.clone(), e))?;
    let status = child
        .wait()
        .await
        .map_err(|e| ExecutionError::CommandFailed(spec.command.clone(), e))?;

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus {
            command: spec.command.clone(),
            status,
        });
    }
    Ok(Some(status))
}

/// Listens for SIGINT and SIGTERM while a child runs, so they reach the child
/// without terminating the launcher.
///
/// Aborting the task drops the signal streams, but tokio keeps its process-wide
/// handler installed afterwards: once a command has run, SIGINT and SIGTERM no
/// longer terminate the launcher while the menu is shown either.
#[cfg(unix)]
fn spawn_interrupt_observer() -> Option<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Could not register signal handlers: {}", e);
                return None;
            }
        };

    Some(tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(()) = interrupt.recv() => log::debug!("SIGINT received while a command runs; ignored."),
                Some(()) = terminate.recv() => log::debug!("SIGTERM received while a command runs; ignored."),
                else => break,
            }
        }
    }))
}

#[cfg(not(unix))]
fn spawn_interrupt_observer() -> Option<JoinHandle<()>> {
    Some(tokio::spawn(async {
        while tokio::signal::ctrl_c().await.is_ok() {
            log::debug!("Ctrl-C received while a command runs; ignored.");
        }
    }))
}

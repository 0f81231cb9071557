use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

/// Failure of a delegated external process.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with code {code}")]
    Failed { command: String, code: i32 },
}

impl CommandError {
    /// Exit code to mirror when the delegate ran and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { code, .. } => Some(*code),
            CommandError::Spawn { .. } => None,
        }
    }
}

/// Render a command line for messages: program followed by its arguments.
pub fn render(command: &Command) -> String {
    let mut rendered = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

/// Run a delegate to completion with inherited stdio.
///
/// Ok only for exit status zero. A non-zero exit becomes
/// [`CommandError::Failed`] carrying the delegate's own code; on Unix a
/// signal-terminated delegate maps to the shell convention 128 + signal.
pub fn run(command: &mut Command) -> Result<(), CommandError> {
    debug!("running {}", render(command));

    let status = command.status().map_err(|source| CommandError::Spawn {
        command: render(command),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Failed {
            command: render(command),
            code: exit_code(status),
        })
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

//! # Setup Error Types
//!
//! Failures in the setup pipeline are fatal: a half-provisioned deployment
//! must not continue to Terraform. Every variant carries the command or
//! resource involved so the operator can re-run the failing step by hand.

use thiserror::Error;

/// Error during setup or Terraform orchestration.
#[derive(Error, Debug)]
pub enum SetupError {
    /// A shell command could not be spawned.
    #[error("cannot spawn '{command}': {reason}")]
    CommandSpawn {
        /// The command line that failed to start.
        command: String,
        /// Underlying OS failure.
        reason: String,
    },

    /// A shell command ran but exited unsuccessfully.
    #[error("command '{command}' failed with status {code:?}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// Exit code, when the process was not killed by a signal.
        code: Option<i32>,
    },

    /// The Azure CLI session has no logged-in user.
    #[error("could not find the logged in user")]
    NoCurrentUser,

    /// IO failure writing pipeline artifacts (e.g. the backend override).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

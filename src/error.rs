//! Errors raised while playing a cue.
//!
//! Playback is the only fallible operation in the program. These errors are
//! logged by the task that plays the cue and never reach the scheduler.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// None of the known command-line players is on `PATH`.
    #[error("no supported audio player found on PATH")]
    NoPlayer,

    #[error("cue file not found: {}", .0.display())]
    MissingCue(PathBuf),

    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status} while playing {}", .program.display(), .path.display())]
    Status {
        program: PathBuf,
        path: PathBuf,
        status: ExitStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cue_names_the_file() {
        let err = PlaybackError::MissingCue(PathBuf::from("/cues/ding.mp3"));
        assert_eq!(err.to_string(), "cue file not found: /cues/ding.mp3");
    }

    #[test]
    fn spawn_error_keeps_source() {
        let err = PlaybackError::Spawn {
            program: PathBuf::from("mpg123"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to launch mpg123"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

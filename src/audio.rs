//! Audio cues and the external player that makes them audible.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::PlaybackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    ShortBreak,
    LongBreak,
}

impl Cue {
    pub const fn file_name(self) -> &'static str {
        match self {
            Cue::Start => "start.mp3",
            Cue::ShortBreak => "ding.mp3",
            Cue::LongBreak => "long_break.mp3",
        }
    }
}

/// Directory holding the three cue recordings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSet {
    dir: PathBuf,
}

impl CueSet {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cues shipped next to the binary. Falls back to the working directory
    /// when the executable path cannot be resolved.
    pub fn beside_executable() -> Self {
        let dir = match std::env::current_exe() {
            Ok(exe) => exe
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            Err(err) => {
                warn!("could not locate executable ({err}), looking for cues in the working directory");
                PathBuf::from(".")
            }
        };
        Self::in_dir(dir)
    }

    pub fn path(&self, cue: Cue) -> PathBuf {
        self.dir.join(cue.file_name())
    }
}

/// Plays a single audio file to completion.
#[async_trait::async_trait]
pub trait CuePlayer: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Command-line players tried in order, with the flags that keep them quiet.
const PLAYERS: &[(&str, &[&str])] = &[
    ("afplay", &[]),
    ("mpg123", &["-q"]),
    ("mpg321", &["-q"]),
    ("mplayer", &["-really-quiet"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("cvlc", &["--play-and-exit"]),
    ("play", &["-q"]),
    ("paplay", &[]),
    ("aplay", &["-q"]),
];

/// Plays cues through whichever system player is installed.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    program: Option<(PathBuf, &'static [&'static str])>,
}

impl SystemPlayer {
    pub fn detect() -> Self {
        let program = PLAYERS
            .iter()
            .find_map(|(name, args)| which::which(name).ok().map(|path| (path, *args)));
        match &program {
            Some((path, _)) => debug!("using {} for audio cues", path.display()),
            None => warn!("no audio player found, cues will be silent"),
        }
        Self { program }
    }
}

#[async_trait::async_trait]
impl CuePlayer for SystemPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let (program, args) = self.program.as_ref().ok_or(PlaybackError::NoPlayer)?;

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(PlaybackError::MissingCue(path.to_path_buf()));
        }

        let status = Command::new(program)
            .args(*args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| PlaybackError::Spawn {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PlaybackError::Status {
                program: program.clone(),
                path: path.to_path_buf(),
                status,
            })
        }
    }
}

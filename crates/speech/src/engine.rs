//! Speech engines: external TTS programs, a silent stand-in, or nothing.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::SpeechError;
use crate::types::{SpeechLanguage, DEFAULT_SPEECH_RATE};

/// Programs looked up on `PATH`, in order of preference.
pub const KNOWN_PROGRAMS: [&str; 4] = ["espeak-ng", "espeak", "say", "spd-say"];

/// Words per minute the engines use at rate 1.0.
const BASE_WPM: f32 = 175.0;

/// Silent engine pacing per spoken digit.
const SILENT_MS_PER_WORD: u64 = 350;

/// Speech settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    /// Explicit program (name on `PATH` or a path). Auto-detect when `None`.
    pub program: Option<String>,
    /// Relative speaking rate, 1.0 = engine default.
    pub rate: f32,
    pub language: SpeechLanguage,
    pub timeout_ms: u64,
    /// Use the silent engine regardless of what is installed.
    pub mute: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: None,
            rate: DEFAULT_SPEECH_RATE,
            language: SpeechLanguage::default(),
            timeout_ms: 15_000,
            mute: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramKind {
    Espeak,
    Say,
    SpdSay,
    Other,
}

impl ProgramKind {
    fn of(program: &Path) -> Self {
        match program.file_name().and_then(OsStr::to_str) {
            Some("espeak") | Some("espeak-ng") => ProgramKind::Espeak,
            Some("say") => ProgramKind::Say,
            Some("spd-say") => ProgramKind::SpdSay,
            _ => ProgramKind::Other,
        }
    }
}

/// An external text-to-speech program.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpeaker {
    program: PathBuf,
    kind: ProgramKind,
    rate: f32,
    language: SpeechLanguage,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<PathBuf>, rate: f32, language: SpeechLanguage) -> Self {
        let program = program.into();
        let kind = ProgramKind::of(&program);
        Self {
            program,
            kind,
            rate: rate.clamp(0.1, 4.0),
            language,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for speaking `text`.
    pub fn args(&self, text: &str) -> Vec<String> {
        let wpm = ((BASE_WPM * self.rate).round() as u32).to_string();
        match self.kind {
            ProgramKind::Espeak => vec![
                "-s".into(),
                wpm,
                "-v".into(),
                self.language.tag().into(),
                text.into(),
            ],
            ProgramKind::Say => vec!["-r".into(), wpm, text.into()],
            ProgramKind::SpdSay => {
                // spd-say takes -100..=100 around the default; -w blocks until done.
                let pct = (((self.rate - 1.0) * 100.0).round() as i32).clamp(-100, 100);
                vec![
                    "-w".into(),
                    "-r".into(),
                    pct.to_string(),
                    "-l".into(),
                    self.language.tag().into(),
                    text.into(),
                ]
            }
            ProgramKind::Other => vec![text.into()],
        }
    }

    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let output = Command::new(&self.program)
            .args(self.args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(SpeechError::Spawn)?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        Err(SpeechError::Exited(if detail.is_empty() {
            format!("{} exited with {}", self.program.display(), output.status)
        } else {
            format!("{} exited with {}: {}", self.program.display(), output.status, detail)
        }))
    }
}

/// How the secret gets spoken.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEngine {
    Command(CommandSpeaker),
    /// Waits roughly as long as speaking would take, then succeeds.
    Silent { ms_per_word: u64 },
    /// Every request fails with [`SpeechError::Unsupported`].
    Unavailable(String),
}

impl SpeechEngine {
    /// Pick an engine from settings and what is installed.
    pub fn detect(config: &SpeechConfig) -> Self {
        if config.mute {
            return SpeechEngine::silent();
        }

        let engine = match config.program.as_deref().map(str::trim) {
            Some(program) if !program.is_empty() => match resolve_program(program) {
                Some(path) => {
                    SpeechEngine::Command(CommandSpeaker::new(path, config.rate, config.language))
                }
                None => SpeechEngine::Unavailable(format!("speech program {:?} not found", program)),
            },
            _ => KNOWN_PROGRAMS
                .iter()
                .find_map(|name| find_on_path(name))
                .map(|path| {
                    SpeechEngine::Command(CommandSpeaker::new(path, config.rate, config.language))
                })
                .unwrap_or_else(|| {
                    SpeechEngine::Unavailable(format!(
                        "no speech program found (tried {})",
                        KNOWN_PROGRAMS.join(", ")
                    ))
                }),
        };
        debug!(engine = %engine.describe(), "speech engine selected");
        engine
    }

    pub fn silent() -> Self {
        SpeechEngine::Silent {
            ms_per_word: SILENT_MS_PER_WORD,
        }
    }

    /// Short label for logs and the status line.
    pub fn describe(&self) -> String {
        match self {
            SpeechEngine::Command(cmd) => cmd
                .program()
                .file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("command")
                .to_string(),
            SpeechEngine::Silent { .. } => "silent".to_string(),
            SpeechEngine::Unavailable(_) => "unavailable".to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, SpeechEngine::Unavailable(_))
    }

    /// Speak `text`, failing if it takes longer than `timeout`.
    pub async fn speak(&self, text: &str, timeout: Duration) -> Result<(), SpeechError> {
        let work = async {
            match self {
                SpeechEngine::Command(cmd) => cmd.speak(text).await,
                SpeechEngine::Silent { ms_per_word } => {
                    let words = text.split(|c: char| c == ',' || c == '，').count() as u64;
                    tokio::time::sleep(Duration::from_millis(words * ms_per_word)).await;
                    Ok(())
                }
                SpeechEngine::Unavailable(reason) => Err(SpeechError::Unsupported(reason.clone())),
            }
        };

        match tokio::time::timeout(timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(SpeechError::TimedOut(timeout.as_millis() as u64)),
        }
    }
}

/// A program given as a path must exist; a bare name is looked up on `PATH`.
fn resolve_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }
    find_on_path(program)
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

//! Terminal dictation runner (default binary).
//!
//! Plays a spoken code through the speech bridge, then collects it from a
//! shuffled keypad drawn with the framebuffer renderer.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tui_dictation::core::{GameConfig, GameError, GameSession, SessionSnapshot};
use tui_dictation::input::{handle_key_event, should_quit, CodeEntry, EntryOutcome, KeypadCursor};
use tui_dictation::speech::{SpeechBridge, SpeechConfig};
use tui_dictation::term::{FrameBuffer, GameView, TerminalRenderer, UiState, Viewport};
use tui_dictation::types::{
    GameAction, GameEvent, ShuffleFrequency, SpeechLanguage, ATTEMPTS_MAX, ATTEMPTS_MIN,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SECRET_LEN, DEFAULT_SPEECH_RATE, SECRET_LEN_MAX,
    SECRET_LEN_MIN, TICK_MS,
};

#[derive(Parser, Debug)]
#[command(name = "tui-dictation", version)]
#[command(about = "Listen to a spoken code, then enter it on a shuffled keypad")]
struct Args {
    /// Code length (3-8)
    #[arg(long, env = "DICTATION_LENGTH", default_value_t = DEFAULT_SECRET_LEN)]
    length: u8,

    /// Attempts per round (1-10)
    #[arg(long, env = "DICTATION_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u8,

    /// Keypad shuffle policy: every-game, every-round or never
    #[arg(long, env = "DICTATION_SHUFFLE", default_value = "every-round", value_parser = parse_shuffle)]
    shuffle: ShuffleFrequency,

    /// Replay the code automatically after a wrong guess
    #[arg(long, env = "DICTATION_AUTO_REPLAY", value_parser = BoolishValueParser::new())]
    auto_replay: bool,

    /// Use this code instead of a random one (must match --length)
    #[arg(long, env = "DICTATION_SECRET")]
    secret: Option<String>,

    /// RNG seed; derived from the clock when omitted
    #[arg(long, env = "DICTATION_SEED")]
    seed: Option<u32>,

    /// Spoken language: en or zh
    #[arg(long, env = "DICTATION_LANG", default_value = "en", value_parser = parse_language)]
    lang: SpeechLanguage,

    /// Speech program (name on PATH or a path); auto-detected when omitted
    #[arg(long, env = "DICTATION_SPEECH_CMD")]
    speech_cmd: Option<String>,

    /// Relative speaking rate, 1.0 = engine default
    #[arg(long, env = "DICTATION_SPEECH_RATE", default_value_t = DEFAULT_SPEECH_RATE)]
    speech_rate: f32,

    /// Give up on a single announcement after this many milliseconds
    #[arg(long, env = "DICTATION_SPEECH_TIMEOUT_MS", default_value_t = 15_000)]
    speech_timeout_ms: u64,

    /// Do not speak; wait for the estimated speaking time instead
    #[arg(long, env = "DICTATION_MUTE", value_parser = BoolishValueParser::new())]
    mute: bool,

    /// Write logs here (the terminal is busy drawing the game)
    #[arg(long, env = "DICTATION_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            length: self.length,
            max_attempts: self.attempts,
            shuffle: self.shuffle,
            auto_replay: self.auto_replay,
            custom_secret: self.secret.clone(),
        }
    }

    fn speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            program: self.speech_cmd.clone(),
            rate: self.speech_rate,
            language: self.lang,
            timeout_ms: self.speech_timeout_ms,
            mute: self.mute,
        }
    }
}

fn parse_shuffle(s: &str) -> Result<ShuffleFrequency, String> {
    ShuffleFrequency::from_str(s)
        .ok_or_else(|| format!("unknown shuffle policy {:?} (every-game, every-round, never)", s))
}

fn parse_language(s: &str) -> Result<SpeechLanguage, String> {
    SpeechLanguage::from_str(s).ok_or_else(|| format!("unknown language {:?} (en, zh)", s))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session =
        GameSession::with_config(args.game_config(), seed).context("invalid game settings")?;
    session.set_language(args.lang);

    let mut speech = SpeechBridge::start(&args.speech_config()).context("start speech")?;
    info!(seed, engine = %speech.engine().describe(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut speech);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a file logger. Without a log file nothing is installed.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    speech: &mut SpeechBridge,
) -> Result<()> {
    let view = GameView::default();
    let engine_label = speech.engine().describe();
    let mut cursor = KeypadCursor::default();
    let mut entry: Option<CodeEntry> = None;
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let ui = UiState {
            cursor: Some(cursor.index()),
            speech: &engine_label,
            entry: entry.as_ref().map(CodeEntry::text),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &ui, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(editor) = entry.as_mut() {
                        if is_interrupt(key) {
                            return Ok(());
                        }
                        match editor.handle_key(key) {
                            EntryOutcome::Editing => {}
                            EntryOutcome::Submit(text) => {
                                entry = None;
                                if let Err(err) = session.apply_custom_secret(&text) {
                                    debug!(error = %err, "custom code rejected");
                                }
                            }
                            EntryOutcome::Cancel => entry = None,
                        }
                    } else if should_quit(key) {
                        return Ok(());
                    } else if let Some(action) = handle_key_event(key) {
                        apply_action(action, session, speech, &mut cursor, &mut entry);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Speech completions.
        while let Some(report) = speech.try_recv() {
            session.finish_announcement(report.ticket, report.result.map_err(GameError::from));
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            if let Some(replay) = session.tick(elapsed_ms) {
                speech.request(replay.ticket, replay.text);
            }
        }

        for event in session.take_events() {
            log_event(&event);
        }
    }
}

fn apply_action(
    action: GameAction,
    session: &mut GameSession,
    speech: &mut SpeechBridge,
    cursor: &mut KeypadCursor,
    entry: &mut Option<CodeEntry>,
) {
    debug!(action = action.as_str(), "action");
    match action {
        GameAction::PressSlot(index) => {
            session.press_slot(index);
        }
        GameAction::MoveCursor(dir) => cursor.step(dir),
        GameAction::PressCursor => {
            session.press_slot(cursor.index());
        }
        GameAction::Listen => match session.announce() {
            Ok(announcement) => speech.request(announcement.ticket, announcement.text),
            Err(err) => debug!(error = %err, "listen ignored"),
        },
        GameAction::NewRound => {
            speech.cancel();
            session.start_round();
        }
        GameAction::RandomSecret => {
            if let Err(err) = session.randomize_secret() {
                debug!(error = %err, "random code ignored");
            }
        }
        GameAction::EditCustom => {
            if session.accepts_secret_change() {
                *entry = Some(CodeEntry::new());
            } else {
                debug!(phase = session.phase().as_str(), "code editor needs a finished round");
            }
        }
        GameAction::ToggleAutoReplay => session.set_auto_replay(!session.auto_replay()),
        GameAction::LengthUp
        | GameAction::LengthDown
        | GameAction::AttemptsUp
        | GameAction::AttemptsDown
        | GameAction::CycleShuffle => {
            let Some(config) = adjusted_config(action, &session.config()) else {
                return;
            };
            speech.cancel();
            if let Err(err) = session.configure(config) {
                warn!(error = %err, "settings rejected");
            }
        }
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Settings after a settings action, or `None` when nothing would change.
fn adjusted_config(action: GameAction, current: &GameConfig) -> Option<GameConfig> {
    let mut config = current.clone();
    match action {
        GameAction::LengthUp => config.length = (config.length + 1).min(SECRET_LEN_MAX),
        GameAction::LengthDown => config.length = config.length.saturating_sub(1).max(SECRET_LEN_MIN),
        GameAction::AttemptsUp => config.max_attempts = (config.max_attempts + 1).min(ATTEMPTS_MAX),
        GameAction::AttemptsDown => {
            config.max_attempts = config.max_attempts.saturating_sub(1).max(ATTEMPTS_MIN)
        }
        GameAction::CycleShuffle => config.shuffle = config.shuffle.next(),
        _ => return None,
    }
    // A pinned code only survives while its length still fits.
    if config.length != current.length {
        config.custom_secret = None;
    }
    (config != *current).then_some(config)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Announced => debug!("code announced"),
        GameEvent::AnnounceFailed { reason } => warn!(%reason, "announcement failed"),
        GameEvent::Success => info!("round won"),
        GameEvent::Retry { remaining } => info!(remaining, "wrong code"),
        GameEvent::Exhausted => info!("out of attempts"),
    }
}

//! Game session module - the complete memorization game state machine
//!
//! Ties together the secret, the keypad layout, attempt bookkeeping and the
//! scheduled transitions (review clear, overlay flash, auto replay).
//!
//! Speech is not performed here. [`GameSession::announce`] hands out an
//! [`Announcement`] ticket; the front end speaks the text and reports back
//! through [`GameSession::finish_announcement`] exactly once. Completions with
//! a ticket that is no longer current are ignored.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::keypad::KeypadLayout;
use crate::rng::SimpleRng;
use crate::secret::{DigitBuf, Secret};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// A request to speak the secret, tied to one announce call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub ticket: u64,
    pub text: String,
}

/// Message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notice {
    pub text: String,
    pub kind: MessageKind,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// Named deferred transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scheduled {
    /// Drop the attempt that was just evaluated from the display.
    ClearReview(DigitBuf),
    /// End the success/failure flash.
    Overlay(Overlay),
    /// Speak the code again after a wrong guess.
    Replay,
}

impl Scheduled {
    fn same_kind(&self, other: &Scheduled) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Deferred {
    kind: Scheduled,
    remaining_ms: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    rng: SimpleRng,
    length: u8,
    max_attempts: u8,
    shuffle: ShuffleFrequency,
    auto_replay: bool,
    language: SpeechLanguage,
    secret: Secret,
    /// Custom secret in effect; consumed when a round with it is won.
    pinned: bool,
    layout: KeypadLayout,
    input: DigitBuf,
    remaining: u8,
    phase: Phase,
    notice: Notice,
    /// Last issued announcement ticket.
    ticket: u64,
    /// Ticket of the announcement currently being spoken.
    in_flight: Option<u64>,
    scheduled: ArrayVec<Deferred, 3>,
    events: Vec<GameEvent>,
    rounds_won: u32,
}

impl GameSession {
    /// Create a session with default settings and the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        let mut rng = SimpleRng::new(seed);
        let secret = Secret::generate(&mut rng, config.length);
        let layout = layout_for(config.shuffle, &mut rng);

        Self {
            rng,
            length: config.length,
            max_attempts: config.max_attempts,
            shuffle: config.shuffle,
            auto_replay: config.auto_replay,
            language: SpeechLanguage::default(),
            secret,
            pinned: false,
            layout,
            input: DigitBuf::new(),
            remaining: config.max_attempts,
            phase: Phase::Idle,
            notice: Notice::info("Welcome to Digit Dictation!"),
            ticket: 0,
            in_flight: None,
            scheduled: ArrayVec::new(),
            events: Vec::new(),
            rounds_won: 0,
        }
    }

    /// Create a session and apply `config`
    pub fn with_config(config: GameConfig, seed: u32) -> GameResult<Self> {
        let mut session = Self::new(seed);
        session.configure(config)?;
        session.notice = Notice::info("Welcome to Digit Dictation!");
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.remaining
    }

    pub fn shuffle(&self) -> ShuffleFrequency {
        self.shuffle
    }

    pub fn auto_replay(&self) -> bool {
        self.auto_replay
    }

    /// True between rounds, when the secret may be replaced.
    pub fn accepts_secret_change(&self) -> bool {
        self.require_between_rounds("accepts_secret_change").is_ok()
    }

    pub fn language(&self) -> SpeechLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: SpeechLanguage) {
        self.language = language;
    }

    pub fn layout(&self) -> &KeypadLayout {
        &self.layout
    }

    /// Digits entered so far this round
    pub fn input(&self) -> &[Digit] {
        &self.input
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn custom_pinned(&self) -> bool {
        self.pinned
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Ticket of the announcement being spoken, if any
    pub fn pending_ticket(&self) -> Option<u64> {
        self.in_flight
    }

    /// Current settings, with the pinned custom secret if there is one
    pub fn config(&self) -> GameConfig {
        GameConfig {
            length: self.length,
            max_attempts: self.max_attempts,
            shuffle: self.shuffle,
            auto_replay: self.auto_replay,
            custom_secret: self.pinned.then(|| self.secret.to_string()),
        }
    }

    /// Apply new settings.
    ///
    /// On error nothing changes. On success the secret is regenerated (or the
    /// custom one pinned), counters reset, pending transitions and any
    /// in-flight announcement dropped, and the session returns to `Idle`.
    pub fn configure(&mut self, config: GameConfig) -> GameResult<()> {
        let custom = config.validate()?;

        let shuffle_changed = config.shuffle != self.shuffle;
        self.length = config.length;
        self.max_attempts = config.max_attempts;
        self.shuffle = config.shuffle;
        self.auto_replay = config.auto_replay;

        match custom {
            Some(secret) => {
                self.secret = secret;
                self.pinned = true;
                self.notice = Notice::info("Custom code set! Press listen to start");
            }
            None => {
                self.secret = Secret::generate(&mut self.rng, self.length);
                self.pinned = false;
                self.notice = Notice::info(self.ready_message());
            }
        }

        if shuffle_changed {
            self.layout = layout_for(self.shuffle, &mut self.rng);
        }

        self.reset_round();
        debug!(
            length = self.length,
            max_attempts = self.max_attempts,
            shuffle = self.shuffle.as_str(),
            auto_replay = self.auto_replay,
            custom = self.pinned,
            "session configured"
        );
        Ok(())
    }

    /// Begin a new round.
    ///
    /// Safe to call from any phase; calling it twice in a row is the same as
    /// calling it once (apart from fresh randomness).
    pub fn start_round(&mut self) {
        self.reset_round();
        self.layout = layout_for(self.shuffle, &mut self.rng);
        if !self.pinned {
            self.secret = Secret::generate(&mut self.rng, self.length);
        }
        self.notice = Notice::info(self.ready_message());
        debug!(custom = self.pinned, "round started");
    }

    /// Start speaking the secret.
    ///
    /// Valid from `Idle`, and from `Collecting` while nothing has been typed
    /// (listening again after a wrong guess). A half-typed attempt has to be
    /// finished first.
    pub fn announce(&mut self) -> GameResult<Announcement> {
        match self.phase {
            Phase::Idle => Ok(self.begin_announcement()),
            Phase::Collecting if self.input.is_empty() => Ok(self.begin_announcement()),
            Phase::Announcing => Err(GameError::AnnounceInProgress),
            phase => Err(GameError::InvalidPhase {
                op: "announce",
                phase,
            }),
        }
    }

    /// Report the outcome of the announcement with `ticket`.
    ///
    /// Returns `false` (and changes nothing) for stale or repeated tickets.
    pub fn finish_announcement(&mut self, ticket: u64, result: GameResult<()>) -> bool {
        if self.in_flight != Some(ticket) || self.phase != Phase::Announcing {
            debug!(ticket, "ignoring stale announcement completion");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(()) => {
                self.phase = Phase::Collecting;
                self.notice = Notice::info(format!(
                    "Watch the keypad and enter the {}-digit code",
                    self.length
                ));
                self.events.push(GameEvent::Announced);
            }
            Err(err) => {
                let (text, reason) = match err {
                    GameError::UnsupportedCapability(reason) => (
                        format!("Speech synthesis is not available: {}", reason),
                        reason,
                    ),
                    GameError::AnnounceFailed(reason) => {
                        (format!("Speech playback failed: {}", reason), reason)
                    }
                    other => {
                        let reason = other.to_string();
                        (format!("Speech playback failed: {}", reason), reason)
                    }
                };
                self.phase = Phase::Idle;
                self.notice = Notice::error(text);
                self.events.push(GameEvent::AnnounceFailed { reason });
            }
        }
        true
    }

    /// Enter one digit. Blanks and input outside `Collecting` are ignored.
    ///
    /// Returns whether the key was accepted.
    pub fn submit_digit(&mut self, key: KeySlot) -> bool {
        let Some(digit) = key else {
            return false;
        };
        if !self.phase.accepts_input() || self.input.len() >= self.length as usize {
            return false;
        }

        // Typing takes over from a pending auto replay.
        self.cancel(&Scheduled::Replay);
        self.input.push(digit);
        if self.input.len() == self.length as usize {
            self.evaluate();
        }
        true
    }

    /// Press the keypad slot at `index`.
    pub fn press_slot(&mut self, index: usize) -> bool {
        self.submit_digit(self.layout.get(index))
    }

    /// Pin a custom secret of the current length.
    ///
    /// Only between rounds (`Idle` or `Exhausted`): the code being spoken or
    /// typed never changes under the player.
    pub fn apply_custom_secret(&mut self, text: &str) -> GameResult<()> {
        self.require_between_rounds("apply_custom_secret")?;
        match Secret::parse(text, self.length) {
            Ok(secret) => {
                self.secret = secret;
                self.pinned = true;
                self.notice = Notice::info("Custom code set! Press listen to start");
                Ok(())
            }
            Err(err) => {
                self.notice = Notice::error(format!("Enter a {}-digit code", self.length));
                Err(err)
            }
        }
    }

    /// Replace the secret with a random one, dropping any custom secret.
    ///
    /// Same phase rule as [`GameSession::apply_custom_secret`].
    pub fn randomize_secret(&mut self) -> GameResult<()> {
        self.require_between_rounds("randomize_secret")?;
        self.secret = Secret::generate(&mut self.rng, self.length);
        self.pinned = false;
        self.notice = Notice::info("New random code ready");
        Ok(())
    }

    pub fn set_auto_replay(&mut self, on: bool) {
        self.auto_replay = on;
        if !on {
            self.cancel(&Scheduled::Replay);
        }
    }

    /// Advance scheduled transitions by `elapsed_ms`.
    ///
    /// Returns an announcement when an auto replay fires; the caller speaks it
    /// like any other.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Announcement> {
        let mut replay = false;
        let mut i = 0;
        while i < self.scheduled.len() {
            let entry = &mut self.scheduled[i];
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed_ms);
            if entry.remaining_ms == 0 {
                let fired = self.scheduled.remove(i);
                replay |= fired.kind == Scheduled::Replay;
                continue;
            }
            i += 1;
        }

        if replay && self.phase == Phase::Collecting {
            debug!("auto replay firing");
            return Some(self.begin_announcement());
        }
        None
    }

    /// Overlay currently flashing, derived from the pending overlay transition
    pub fn overlay(&self) -> Option<Overlay> {
        self.scheduled.iter().find_map(|d| match d.kind {
            Scheduled::Overlay(o) => Some(o),
            _ => None,
        })
    }

    /// Digits to show: the live input, or the attempt under review.
    pub fn shown_input(&self) -> &[Digit] {
        if !self.input.is_empty() {
            return &self.input;
        }
        self.scheduled
            .iter()
            .find_map(|d| match &d.kind {
                Scheduled::ClearReview(buf) => Some(buf.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn replay_pending(&self) -> bool {
        self.scheduled.iter().any(|d| d.kind == Scheduled::Replay)
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.phase = self.phase;
        out.message.clear();
        out.message.push_str(&self.notice.text);
        out.message_kind = self.notice.kind;
        out.length = self.length;
        out.entered.clear();
        out.entered.extend(self.shown_input().iter().copied());
        out.remaining_attempts = self.remaining;
        out.max_attempts = self.max_attempts;
        out.layout = self.layout;
        out.overlay = self.overlay();
        out.shuffle = self.shuffle;
        out.auto_replay = self.auto_replay;
        out.replay_pending = self.replay_pending();
        out.custom_pinned = self.pinned;
        out.language = self.language;
        out.rounds_won = self.rounds_won;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn begin_announcement(&mut self) -> Announcement {
        self.cancel(&Scheduled::Replay);
        self.ticket = self.ticket.wrapping_add(1);
        self.in_flight = Some(self.ticket);
        self.phase = Phase::Announcing;
        self.notice = Notice::info("Playing the code...");
        debug!(ticket = self.ticket, "announcing");
        Announcement {
            ticket: self.ticket,
            text: self.secret.spoken(self.language),
        }
    }

    /// Compare the full-length input against the secret.
    fn evaluate(&mut self) {
        let attempt = std::mem::take(&mut self.input);
        let success = self.secret.matches(&attempt);

        self.cancel(&Scheduled::Replay);
        self.schedule(Scheduled::ClearReview(attempt), INPUT_CLEAR_DELAY_MS);

        if success {
            self.rounds_won = self.rounds_won.saturating_add(1);
            info!(rounds_won = self.rounds_won, "code decoded");

            self.schedule(Scheduled::Overlay(Overlay::Success), SUCCESS_OVERLAY_MS);
            if self.shuffle.reshuffles() {
                self.layout = KeypadLayout::shuffled(&mut self.rng);
            }
            self.secret = Secret::generate(&mut self.rng, self.length);
            self.pinned = false;
            self.remaining = self.max_attempts;
            self.phase = Phase::Idle;
            self.notice = Notice::success("Decoded! Well done!");
            self.events.push(GameEvent::Success);
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        self.schedule(Scheduled::Overlay(Overlay::Failure), FAILURE_OVERLAY_MS);

        if self.remaining > 0 {
            info!(remaining = self.remaining, "wrong code");
            self.notice = Notice::error(format!(
                "Wrong code, try again | attempts left: {}",
                self.remaining
            ));
            self.events.push(GameEvent::Retry {
                remaining: self.remaining,
            });
            if self.auto_replay {
                self.schedule(Scheduled::Replay, AUTO_REPLAY_DELAY_MS);
            }
        } else {
            info!("attempts exhausted");
            self.phase = Phase::Exhausted;
            self.notice = Notice::error("Game over! No attempts left");
            self.events.push(GameEvent::Exhausted);
        }
    }

    /// Shared reset for new rounds and reconfiguration.
    fn reset_round(&mut self) {
        self.input.clear();
        self.remaining = self.max_attempts;
        self.scheduled.clear();
        self.in_flight = None;
        self.phase = Phase::Idle;
    }

    fn schedule(&mut self, kind: Scheduled, delay_ms: u32) {
        self.cancel(&kind);
        // One entry per kind, so this never exceeds capacity.
        self.scheduled.push(Deferred {
            kind,
            remaining_ms: delay_ms.max(1),
        });
    }

    fn cancel(&mut self, kind: &Scheduled) {
        self.scheduled.retain(|d| !d.kind.same_kind(kind));
    }

    fn require_between_rounds(&self, op: &'static str) -> GameResult<()> {
        match self.phase {
            Phase::Idle | Phase::Exhausted => Ok(()),
            phase => Err(GameError::InvalidPhase { op, phase }),
        }
    }

    fn ready_message(&self) -> String {
        format!(
            "Press listen to hear the code | attempts left: {}",
            self.max_attempts
        )
    }
}

fn layout_for(shuffle: ShuffleFrequency, rng: &mut SimpleRng) -> KeypadLayout {
    if shuffle.reshuffles() {
        KeypadLayout::shuffled(rng)
    } else {
        KeypadLayout::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<Digit> {
        s.chars().filter_map(Digit::from_char).collect()
    }

    fn session_with(secret: &str, max_attempts: u8) -> GameSession {
        let config = GameConfig::new(secret.len() as u8, max_attempts, ShuffleFrequency::Never)
            .with_custom_secret(secret);
        GameSession::with_config(config, 12345).unwrap()
    }

    /// Announce and complete successfully, leaving the session collecting.
    fn listen(session: &mut GameSession) {
        let a = session.announce().unwrap();
        assert!(session.finish_announcement(a.ticket, Ok(())));
        assert_eq!(session.phase(), Phase::Collecting);
    }

    fn enter(session: &mut GameSession, code: &str) {
        for d in digits(code) {
            session.submit_digit(Some(d));
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(1);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.secret().len(), DEFAULT_SECRET_LEN as usize);
        assert_eq!(session.remaining_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_configure_rejects_and_leaves_session_untouched() {
        let mut session = GameSession::new(1);
        let before = session.secret().clone();

        let err = session
            .configure(GameConfig::new(9, 3, ShuffleFrequency::Never))
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
        assert_eq!(session.secret(), &before);
        assert_eq!(session.length(), DEFAULT_SECRET_LEN);
    }

    #[test]
    fn test_announce_only_from_idle() {
        let mut session = session_with("1234", 3);
        let a = session.announce().unwrap();
        assert_eq!(session.phase(), Phase::Announcing);
        assert_eq!(session.announce(), Err(GameError::AnnounceInProgress));

        session.finish_announcement(a.ticket, Ok(()));
        enter(&mut session, "1");
        assert!(matches!(
            session.announce(),
            Err(GameError::InvalidPhase {
                phase: Phase::Collecting,
                ..
            })
        ));
    }

    #[test]
    fn test_listen_again_after_wrong_guess() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "0000");
        assert_eq!(session.phase(), Phase::Collecting);
        assert!(!session.auto_replay());

        let again = session.announce().unwrap();
        assert_eq!(again.text, "one, two, three, four");
        assert_eq!(session.phase(), Phase::Announcing);
        assert!(!session.submit_digit(digits("1").first().copied()));

        assert!(session.finish_announcement(again.ticket, Ok(())));
        assert_eq!(session.phase(), Phase::Collecting);
        assert_eq!(session.remaining_attempts(), 2);
        enter(&mut session, "1234");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_manual_listen_cancels_pending_replay() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        assert!(session.replay_pending());

        let a = session.announce().unwrap();
        assert!(!session.replay_pending());
        session.finish_announcement(a.ticket, Ok(()));
        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS), None);
        assert_eq!(session.phase(), Phase::Collecting);
    }

    #[test]
    fn test_typing_during_replay_delay_keeps_digits() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        session.tick(AUTO_REPLAY_DELAY_MS / 2);

        enter(&mut session, "12");
        assert!(!session.replay_pending());
        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS), None);
        assert_eq!(session.input(), digits("12").as_slice());
        assert_eq!(session.phase(), Phase::Collecting);

        enter(&mut session, "34");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_secret_changes_rejected_mid_round() {
        let mut session = session_with("1234", 3);
        assert!(session.accepts_secret_change());

        // Announcing
        let a = session.announce().unwrap();
        assert!(!session.accepts_secret_change());
        assert!(matches!(
            session.randomize_secret(),
            Err(GameError::InvalidPhase {
                phase: Phase::Announcing,
                ..
            })
        ));
        assert!(session.apply_custom_secret("9999").is_err());
        assert_eq!(session.secret().to_string(), "1234");

        // Collecting, part way through an attempt
        session.finish_announcement(a.ticket, Ok(()));
        enter(&mut session, "12");
        assert!(!session.accepts_secret_change());
        assert!(matches!(
            session.apply_custom_secret("9999"),
            Err(GameError::InvalidPhase {
                phase: Phase::Collecting,
                ..
            })
        ));
        assert!(session.randomize_secret().is_err());
        assert_eq!(session.secret().to_string(), "1234");

        enter(&mut session, "34");
        assert_eq!(session.take_events().last(), Some(&GameEvent::Success));
    }

    #[test]
    fn test_secret_changes_allowed_when_exhausted() {
        let mut session = session_with("1234", 1);
        listen(&mut session);
        enter(&mut session, "0000");
        assert_eq!(session.phase(), Phase::Exhausted);
        assert!(session.accepts_secret_change());

        session.apply_custom_secret("4444").unwrap();
        session.start_round();
        assert_eq!(session.secret().to_string(), "4444");
        session.randomize_secret().unwrap();
        assert!(!session.custom_pinned());
    }

    #[test]
    fn test_announcement_text_is_spoken_words() {
        let mut session = session_with("907", 3);
        let a = session.announce().unwrap();
        assert_eq!(a.text, "nine, zero, seven");

        session.set_language(SpeechLanguage::Mandarin);
        session.start_round();
        let a = session.announce().unwrap();
        assert_eq!(a.text, "九，零，七");
    }

    #[test]
    fn test_announce_failure_returns_to_idle() {
        let mut session = session_with("1234", 3);
        let a = session.announce().unwrap();
        assert!(session.finish_announcement(
            a.ticket,
            Err(GameError::AnnounceFailed("device busy".into()))
        ));

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.notice().kind, MessageKind::Error);
        assert!(session.notice().text.contains("device busy"));
        assert_eq!(
            session.take_events(),
            vec![GameEvent::AnnounceFailed {
                reason: "device busy".into()
            }]
        );

        // Retry is allowed.
        assert!(session.announce().is_ok());
    }

    #[test]
    fn test_unsupported_capability_notice() {
        let mut session = session_with("1234", 3);
        let a = session.announce().unwrap();
        session.finish_announcement(
            a.ticket,
            Err(GameError::UnsupportedCapability("no tts program".into())),
        );
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.notice().text.starts_with("Speech synthesis is not available"));
    }

    #[test]
    fn test_stale_and_duplicate_tickets_ignored() {
        let mut session = session_with("1234", 3);
        let a = session.announce().unwrap();

        assert!(!session.finish_announcement(a.ticket + 1, Ok(())));
        assert_eq!(session.phase(), Phase::Announcing);

        assert!(session.finish_announcement(a.ticket, Ok(())));
        assert!(!session.finish_announcement(a.ticket, Ok(())));
        assert_eq!(session.phase(), Phase::Collecting);
    }

    #[test]
    fn test_start_round_invalidates_in_flight_announcement() {
        let mut session = session_with("1234", 3);
        let a = session.announce().unwrap();
        session.start_round();

        assert!(!session.finish_announcement(a.ticket, Ok(())));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.pending_ticket(), None);
    }

    #[test]
    fn test_partial_input_stays_collecting() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "12");
        assert_eq!(session.phase(), Phase::Collecting);
        assert_eq!(session.input(), digits("12").as_slice());
    }

    #[test]
    fn test_success_consumes_custom_secret() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "1234");

        assert_eq!(session.take_events(), vec![GameEvent::Announced, GameEvent::Success]);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.custom_pinned());
        assert!(session.input().is_empty());
        assert_eq!(session.overlay(), Some(Overlay::Success));
        assert_eq!(session.notice().kind, MessageKind::Success);
        assert_eq!(session.rounds_won(), 1);
    }

    #[test]
    fn test_custom_secret_survives_start_round_until_won() {
        let mut session = session_with("5678", 1);
        listen(&mut session);
        enter(&mut session, "0000");
        assert_eq!(session.phase(), Phase::Exhausted);

        session.start_round();
        assert!(session.custom_pinned());
        assert_eq!(session.secret().to_string(), "5678");
    }

    #[test]
    fn test_review_shows_attempt_until_cleared() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "9999");

        assert!(session.input().is_empty());
        assert_eq!(session.shown_input(), digits("9999").as_slice());

        session.tick(INPUT_CLEAR_DELAY_MS - 1);
        assert_eq!(session.shown_input().len(), 4);
        session.tick(1);
        assert!(session.shown_input().is_empty());
    }

    #[test]
    fn test_new_typing_replaces_review() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "9999");
        enter(&mut session, "1");
        assert_eq!(session.shown_input(), digits("1").as_slice());
    }

    #[test]
    fn test_overlay_durations() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "0000");
        assert_eq!(session.overlay(), Some(Overlay::Failure));
        session.tick(FAILURE_OVERLAY_MS);
        assert_eq!(session.overlay(), None);

        enter(&mut session, "1234");
        assert_eq!(session.overlay(), Some(Overlay::Success));
        session.tick(SUCCESS_OVERLAY_MS - 16);
        assert_eq!(session.overlay(), Some(Overlay::Success));
        session.tick(16);
        assert_eq!(session.overlay(), None);
    }

    #[test]
    fn test_auto_replay_fires_after_delay() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        assert!(session.replay_pending());

        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS - 1), None);
        let replay = session.tick(1).expect("replay should fire");
        assert_eq!(session.phase(), Phase::Announcing);
        assert_eq!(session.pending_ticket(), Some(replay.ticket));

        session.finish_announcement(replay.ticket, Ok(()));
        assert_eq!(session.phase(), Phase::Collecting);
        assert_eq!(session.remaining_attempts(), 2);
    }

    #[test]
    fn test_auto_replay_cancelled_by_start_round() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");

        session.start_round();
        assert!(!session.replay_pending());
        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS * 2), None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_auto_replay_cancelled_by_toggle_and_configure() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        session.set_auto_replay(false);
        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS), None);

        session.set_auto_replay(true);
        enter(&mut session, "0000");
        assert!(session.replay_pending());
        let cfg = session.config();
        session.configure(cfg).unwrap();
        assert!(!session.replay_pending());
    }

    #[test]
    fn test_auto_replay_not_scheduled_on_exhaustion() {
        let mut session = session_with("1234", 1);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        assert_eq!(session.phase(), Phase::Exhausted);
        assert!(!session.replay_pending());
    }

    #[test]
    fn test_success_before_replay_cancels_it() {
        let mut session = session_with("1234", 3);
        session.set_auto_replay(true);
        listen(&mut session);
        enter(&mut session, "0000");
        enter(&mut session, "1234");
        assert!(!session.replay_pending());
        assert_eq!(session.tick(AUTO_REPLAY_DELAY_MS), None);
    }

    #[test]
    fn test_apply_custom_secret_validation() {
        let mut session = GameSession::new(3);
        assert!(session.apply_custom_secret("12").is_err());
        assert_eq!(session.notice().kind, MessageKind::Error);
        assert!(!session.custom_pinned());

        session.apply_custom_secret("4321").unwrap();
        assert!(session.custom_pinned());
        assert_eq!(session.secret().to_string(), "4321");

        session.randomize_secret().unwrap();
        assert!(!session.custom_pinned());
    }

    #[test]
    fn test_configure_shuffle_change() {
        let mut session = GameSession::new(8);
        let cfg = GameConfig::new(4, 3, ShuffleFrequency::Never);
        session.configure(cfg).unwrap();
        assert!(session.layout().is_canonical());
    }

    #[test]
    fn test_config_round_trips_pinned_secret() {
        let session = session_with("314", 2);
        let cfg = session.config();
        assert_eq!(cfg.custom_secret.as_deref(), Some("314"));
        assert_eq!(cfg.max_attempts, 2);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = session_with("1234", 3);
        listen(&mut session);
        enter(&mut session, "12");
        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Collecting);
        assert_eq!(snap.entered.as_slice(), digits("12").as_slice());
        assert_eq!(snap.length, 4);
        assert!(snap.custom_pinned);
        assert!(snap.keypad_active());
    }
}

use std::time::Duration;

use tui_dictation::core::{GameConfig, GameError, GameSession};
use tui_dictation::speech::{SpeechBridge, SpeechEngine, SpeechError};
use tui_dictation::types::{Phase, ShuffleFrequency};

const WAIT: Duration = Duration::from_secs(3);

fn bridge(engine: SpeechEngine, timeout_ms: u64) -> SpeechBridge {
    SpeechBridge::with_engine(engine, Duration::from_millis(timeout_ms)).unwrap()
}

#[test]
fn silent_engine_reports_success_for_ticket() {
    let mut speech = bridge(SpeechEngine::Silent { ms_per_word: 100 }, 1_000);
    speech.request(7, "one, two".into());
    assert!(speech.is_busy());

    let report = speech.recv_timeout(WAIT).expect("no report");
    assert_eq!(report.ticket, 7);
    assert!(report.result.is_ok());
}

#[test]
fn unavailable_engine_maps_to_unsupported_capability() {
    let mut speech = bridge(SpeechEngine::Unavailable("no tts".into()), 1_000);
    speech.request(1, "one".into());

    let report = speech.recv_timeout(WAIT).expect("no report");
    let err = GameError::from(report.result.unwrap_err());
    assert_eq!(err, GameError::UnsupportedCapability("no tts".into()));
}

#[test]
fn newer_request_cancels_older_one() {
    let mut speech = bridge(SpeechEngine::Silent { ms_per_word: 200 }, 5_000);
    speech.request(1, "one, two, three, four, five".into());
    speech.request(2, "one".into());

    let report = speech.recv_timeout(WAIT).expect("no report");
    assert_eq!(report.ticket, 2);
    assert!(speech.recv_timeout(Duration::from_millis(1_500)).is_none());
}

#[test]
fn cancel_suppresses_report() {
    let mut speech = bridge(SpeechEngine::Silent { ms_per_word: 100 }, 5_000);
    speech.request(3, "one, two".into());
    speech.cancel();
    assert!(!speech.is_busy());
    assert!(speech.recv_timeout(Duration::from_millis(500)).is_none());
}

#[cfg(unix)]
#[test]
fn hung_program_times_out() {
    use tui_dictation::speech::CommandSpeaker;
    use tui_dictation::types::SpeechLanguage;

    // `sleep 5` stands in for a speech program that never finishes.
    let engine = SpeechEngine::Command(CommandSpeaker::new("sleep", 1.0, SpeechLanguage::English));
    let mut speech = bridge(engine, 100);
    speech.request(9, "5".into());

    let report = speech.recv_timeout(WAIT).expect("no report");
    assert_eq!(report.ticket, 9);
    assert!(matches!(report.result, Err(SpeechError::TimedOut(100))));
}

#[test]
fn bridge_drives_session_into_collecting() {
    let config = GameConfig::new(4, 3, ShuffleFrequency::Never).with_custom_secret("1234");
    let mut session = GameSession::with_config(config, 3).unwrap();
    let mut speech = bridge(SpeechEngine::Silent { ms_per_word: 5 }, 1_000);

    let announcement = session.announce().unwrap();
    speech.request(announcement.ticket, announcement.text);
    let report = speech.recv_timeout(WAIT).expect("no report");
    assert!(session.finish_announcement(report.ticket, report.result.map_err(GameError::from)));
    assert_eq!(session.phase(), Phase::Collecting);
}

#[tokio::test]
async fn engine_speaks_without_bridge() {
    let engine = SpeechEngine::silent();
    let started = std::time::Instant::now();
    engine
        .speak("one, two", Duration::from_secs(2))
        .await
        .unwrap();
    // Two words of pacing.
    assert!(started.elapsed() >= Duration::from_millis(500));
}

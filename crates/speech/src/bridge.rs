//! Speech runtime integration.
//!
//! Bridges the sync game loop with async speech tasks. At most one request is
//! in flight; a new request or [`SpeechBridge::cancel`] aborts the previous
//! task (which kills its child process).

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::{SpeechConfig, SpeechEngine};
use crate::error::SpeechError;

/// Completion of one speech request.
#[derive(Debug)]
pub struct SpeechReport {
    pub ticket: u64,
    pub result: Result<(), SpeechError>,
}

/// Running speech bridge.
pub struct SpeechBridge {
    rt: Runtime,
    engine: Arc<SpeechEngine>,
    timeout: Duration,
    report_tx: mpsc::UnboundedSender<SpeechReport>,
    report_rx: mpsc::UnboundedReceiver<SpeechReport>,
    current: Option<JoinHandle<()>>,
}

impl SpeechBridge {
    /// Detect an engine from `config` and start the runtime.
    pub fn start(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Self::with_engine(
            SpeechEngine::detect(config),
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn with_engine(engine: SpeechEngine, timeout: Duration) -> Result<Self, SpeechError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("speech")
            .enable_all()
            .build()
            .map_err(SpeechError::Runtime)?;
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        Ok(Self {
            rt,
            engine: Arc::new(engine),
            timeout,
            report_tx,
            report_rx,
            current: None,
        })
    }

    pub fn engine(&self) -> &SpeechEngine {
        &self.engine
    }

    /// Speak `text`; the outcome arrives later as a report carrying `ticket`.
    pub fn request(&mut self, ticket: u64, text: String) {
        self.cancel();
        debug!(ticket, engine = %self.engine.describe(), "speech requested");

        let engine = Arc::clone(&self.engine);
        let tx = self.report_tx.clone();
        let timeout = self.timeout;
        self.current = Some(self.rt.spawn(async move {
            let result = engine.speak(&text, timeout).await;
            if let Err(err) = &result {
                warn!(ticket, error = %err, "speech failed");
            }
            let _ = tx.send(SpeechReport { ticket, result });
        }));
    }

    /// Abort the in-flight request, if any. No report is sent for it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            if !handle.is_finished() {
                debug!("cancelling in-flight speech");
            }
            handle.abort();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn try_recv(&mut self) -> Option<SpeechReport> {
        self.report_rx.try_recv().ok()
    }

    /// Block until a report arrives or `timeout` passes.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<SpeechReport> {
        let rx = &mut self.report_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }
}

impl Drop for SpeechBridge {
    fn drop(&mut self) {
        self.cancel();
    }
}

// Debounced translation orchestration
//
// One tokio task owns the session. UI events come in over an mpsc channel,
// finished requests over an internal completion channel, and every state
// change is published as a snapshot on a watch channel. A change to the
// text or the language pair arms a single deadline; arming replaces any
// previous one, so only an uninterrupted quiet period fires a request.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use super::client::{TranslateBackend, TranslateError};
use super::language::Language;
use super::session::Session;

/// Quiet period between the last change and the request going out.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// A user-driven change to the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SetSourceText(String),
    SetSourceLang(Language),
    SetTargetLang(Language),
    SwapLanguages,
}

struct Completion {
    generation: u64,
    result: Result<String, TranslateError>,
}

/// Channels for talking to a running orchestrator task.
pub struct OrchestratorHandle {
    pub events: mpsc::UnboundedSender<SessionEvent>,
    pub state: watch::Receiver<Session>,
}

impl OrchestratorHandle {
    /// Send an event; a closed channel means the task is gone and the
    /// session is over, so the event is simply dropped.
    pub fn send(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }
}

pub struct Orchestrator {
    session: Session,
    backend: Arc<dyn TranslateBackend>,
    debounce: Duration,
    deadline: Option<Instant>,
    // Requests are never cancelled once sent; instead each one carries the
    // generation current at fire time, and a completion is applied only if
    // it is still the newest. A superseded response is dropped whole.
    generation: u64,
    state_tx: watch::Sender<Session>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: mpsc::UnboundedReceiver<Completion>,
}

impl Orchestrator {
    /// Spawn the orchestrator task for `session` and hand back its channels.
    pub fn spawn(
        session: Session,
        backend: Arc<dyn TranslateBackend>,
        debounce: Duration,
    ) -> OrchestratorHandle {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(session.clone());

        let orchestrator = Orchestrator {
            session,
            backend,
            debounce,
            deadline: None,
            generation: 0,
            state_tx,
            done_tx,
            done_rx,
        };
        tokio::spawn(orchestrator.run(event_rx));

        OrchestratorHandle {
            events: event_tx,
            state: state_rx,
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<SessionEvent>) {
        loop {
            let deadline = self.deadline;
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.apply_event(event),
                    // All senders gone: the session is over.
                    None => break,
                },
                Some(done) = self.done_rx.recv() => self.apply_completion(done),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire();
                }
            }
            let _ = self.state_tx.send(self.session.clone());
        }
    }

    fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SetSourceText(text) => self.session.set_source_text(text),
            SessionEvent::SetSourceLang(lang) => self.session.set_source_lang(lang),
            SessionEvent::SetTargetLang(lang) => self.session.set_target_lang(lang),
            SessionEvent::SwapLanguages => self.session.swap_languages(),
        }
        self.rearm();
    }

    /// Restart the countdown, or cancel it while there is nothing to send.
    fn rearm(&mut self) {
        self.deadline = if self.session.source_text().is_empty() {
            None
        } else {
            Some(Instant::now() + self.debounce)
        };
    }

    /// The quiet period elapsed: issue one request with the state as of now.
    fn fire(&mut self) {
        self.deadline = None;
        self.generation += 1;
        let generation = self.generation;

        self.session.begin_request();

        let text = self.session.source_text().to_string();
        let pair = self.session.pair();
        let backend = Arc::clone(&self.backend);
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let result = backend.translate(&text, pair).await;
            let _ = done_tx.send(Completion { generation, result });
        });
    }

    fn apply_completion(&mut self, done: Completion) {
        if done.generation != self.generation {
            // Superseded: the loading flag belongs to the newer request.
            return;
        }
        match done.result {
            Ok(text) => self.session.finish_success(text),
            Err(err) => self.session.finish_failure(err.to_string()),
        }
    }
}

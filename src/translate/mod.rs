// Translation core - session state, MyMemory client, debounced orchestration

pub mod client;
pub mod language;
pub mod orchestrator;
pub mod session;

pub use client::{MyMemoryClient, TranslateBackend, TranslateError};
pub use language::{Language, LanguagePair};
pub use orchestrator::{Orchestrator, OrchestratorHandle, SessionEvent};
pub use session::Session;

//! Core conversation engine for the Parlance language-practice tutor.
//!
//! Given one user utterance at a time, the orchestrator replays bounded
//! session history to a chat-completion backend under a fixed tutor
//! persona, classifies the reply for correction feedback, and always
//! returns a displayable result. How the utterance was captured and how
//! the result is rendered are front-end concerns.

pub mod backend;
pub mod capture;
pub mod classifier;
pub mod history;
pub mod orchestrator;

pub use backend::{ChatBackend, DEFAULT_CHAT_MODEL, OpenAiChatClient};
pub use capture::{Submission, Utterance};
pub use classifier::{IssueClassifier, TriggerPhraseClassifier};
pub use history::{MAX_HISTORY_TURNS, Role, SessionHistory, Turn};
pub use orchestrator::{Orchestrator, SYSTEM_INSTRUCTIONS, TutorResponse};

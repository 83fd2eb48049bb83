use crate::backend::ChatBackend;
use crate::classifier::{IssueClassifier, TriggerPhraseClassifier};
use crate::history::{SessionHistory, Turn};

/// The fixed tutor persona, replayed as the system message on every call.
pub const SYSTEM_INSTRUCTIONS: &str = r#"You are an interactive language learning tutor like in language learning apps. Your role is to:

1. FIRST: Acknowledge what they said
2. IDENTIFY errors: Check for grammar, sentence structure, and language mistakes
3. IF THERE ARE ERRORS:
   - Point out the specific mistake clearly
   - Ask them to try saying it correctly: "Now try saying, '[correct version]'"
   - Be encouraging and supportive
4. IF THEY ASK about the mistake or need explanation:
   - Provide a clear, brief explanation of what was wrong
   - Example: "You need to use 'going to' when talking about future plans"
5. IF EVERYTHING IS CORRECT:
   - Praise them and continue the conversation naturally

Be conversational, patient, and educational. Format your responses like a real tutor having a dialogue."#;

/// Shown when the backend answered but produced no content.
const EMPTY_REPLY_FALLBACK: &str = "I couldn't process that. Please try again.";

/// Shown when the failure points at a missing or rejected credential.
const NOT_CONFIGURED_MESSAGE: &str =
    "AI service not configured. Please add your OpenAI API key to continue.";

/// Substring that marks a backend failure as a credential problem rather
/// than a transport one.
const API_KEY_MARKER: &str = "API key";

/// The result of one exchange, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorResponse {
    pub message: String,
    pub has_issues: bool,
    /// The full tutoring reply when corrections were detected. The whole
    /// reply is surfaced rather than an extracted snippet, since the
    /// correction and the retry prompt are interwoven in the tutor's text.
    pub corrections: Option<String>,
}

impl TutorResponse {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            has_issues: false,
            corrections: None,
        }
    }
}

/// Drives one conversation: owns its session history, forwards each
/// utterance to the backend under the fixed tutor persona, and classifies
/// the reply.
///
/// The orchestrator is generic over the backend so tests can drive it with
/// a mock, and each conversation constructs its own orchestrator, so
/// independent sessions never share state. Callers are expected to
/// serialize calls (one exchange in flight at a time); the orchestrator
/// itself takes `&mut self` and imposes no further guard.
pub struct Orchestrator<B> {
    backend: B,
    classifier: Box<dyn IssueClassifier>,
    history: SessionHistory,
}

impl<B: ChatBackend + Send + Sync> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_classifier(backend, Box::new(TriggerPhraseClassifier))
    }

    /// Builds an orchestrator with an alternative classification strategy.
    pub fn with_classifier(backend: B, classifier: Box<dyn IssueClassifier>) -> Self {
        Self {
            backend,
            classifier,
            history: SessionHistory::new(),
        }
    }

    /// The turns retained for this conversation, oldest first.
    pub fn history(&self) -> &[Turn] {
        self.history.snapshot()
    }

    /// Runs one exchange: records the utterance, asks the backend for a
    /// tutor reply over the full history, classifies it, and records it.
    ///
    /// Never fails. Every outcome, including backend errors, resolves to
    /// a displayable [`TutorResponse`]:
    /// - a credential failure returns the fixed not-configured message
    ///   and leaves the history untouched;
    /// - any other failure echoes the utterance back and records no
    ///   assistant turn.
    ///
    /// No retries: each call is a single attempt. Blank-input filtering
    /// is the caller's job (see [`crate::capture`]); whatever string
    /// arrives here is forwarded as-is.
    pub async fn handle(&mut self, utterance: &str) -> TutorResponse {
        let evicted = self.history.append(Turn::user(utterance));

        let result = self
            .backend
            .complete(SYSTEM_INSTRUCTIONS, self.history.snapshot())
            .await;

        match result {
            Ok(content) => {
                let message = content.unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_owned());
                self.history.append(Turn::assistant(message.clone()));

                let has_issues = self.classifier.classify(&message);
                tracing::debug!(has_issues, "tutor reply classified");
                let corrections = has_issues.then(|| message.clone());
                TutorResponse {
                    message,
                    has_issues,
                    corrections,
                }
            }
            Err(err) => {
                let detail = format!("{err:#}");
                if detail.contains(API_KEY_MARKER) {
                    tracing::error!("backend not configured: {detail}");
                    // The exchange never happened; undo the append,
                    // including any eviction it caused, so the session is
                    // exactly as it was before the call.
                    self.history.rollback(evicted);
                    TutorResponse::plain(NOT_CONFIGURED_MESSAGE)
                } else {
                    tracing::error!("backend call failed: {detail}");
                    TutorResponse::plain(format!("I heard you say: \"{utterance}\""))
                }
            }
        }
    }
}

use serde::Serialize;

/// Maximum number of turns retained per session, user and assistant
/// combined. Replayed history is bounded so requests stay well under the
/// backend's token limits.
pub const MAX_HISTORY_TURNS: usize = 10;

/// Who produced a turn. Serialized lowercase to match the chat-completion
/// wire format, so a `Turn` can be sent to the backend as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in a session. Immutable once created; order in
/// the history is chronological and replayed verbatim to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sliding window over the most recent turns of a single conversation.
///
/// Each conversation owns exactly one of these, threaded through the
/// orchestrator rather than held in process-global state, so independent
/// sessions can coexist safely. It lives for the conversation's lifetime
/// and is never persisted.
#[derive(Debug, Default)]
pub struct SessionHistory {
    turns: Vec<Turn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self {
            turns: Vec::with_capacity(MAX_HISTORY_TURNS),
        }
    }

    /// Appends a turn, evicting the oldest entry once the window is
    /// full. The newest turn is never the one dropped.
    ///
    /// Returns the evicted turn, if any, so the caller can undo the
    /// whole append later via [`SessionHistory::rollback`].
    pub fn append(&mut self, turn: Turn) -> Option<Turn> {
        self.turns.push(turn);
        if self.turns.len() > MAX_HISTORY_TURNS {
            Some(self.turns.remove(0))
        } else {
            None
        }
    }

    /// Undoes the most recent `append`: removes the newest turn and puts
    /// back the turn that append evicted, if there was one.
    ///
    /// The orchestrator uses this to roll back a user turn when the
    /// backend call fails before any exchange took place, leaving the
    /// session exactly as it was before the call. Restoring the evicted
    /// turn matters when the window was already full: popping the newest
    /// turn alone would shrink the window and lose its oldest entry.
    pub fn rollback(&mut self, evicted: Option<Turn>) {
        self.turns.pop();
        if let Some(turn) = evicted {
            self.turns.insert(0, turn);
        }
    }

    /// The retained turns, oldest first.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

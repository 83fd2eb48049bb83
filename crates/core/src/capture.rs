//! Normalized entry point for user utterances.
//!
//! The conversation core does not care how text was captured. A browser
//! or terminal front-end produces a [`Submission`] from whichever input
//! path fired, and [`Utterance`] validates it into the single shape the
//! orchestrator accepts.

/// How an utterance reached the system.
///
/// Typed submissions come from a text field; transcribed submissions come
/// from a speech-to-text session that has already settled on its final
/// transcript (the capture layer resolves interim-versus-final before
/// handing text over).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Typed(String),
    Transcribed(String),
}

/// A validated, non-blank utterance ready for the orchestrator.
///
/// Blank filtering happens here, at the boundary, so the orchestrator
/// never has to special-case empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    /// Normalizes a submission into an utterance. Returns `None` for
    /// empty or whitespace-only input; surrounding whitespace is trimmed.
    pub fn from_submission(submission: Submission) -> Option<Self> {
        let text = match submission {
            Submission::Typed(text) | Submission::Transcribed(text) => text,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_submission_is_trimmed() {
        let utterance = Utterance::from_submission(Submission::Typed("  hello there \n".into()))
            .expect("non-blank input should normalize");
        assert_eq!(utterance.as_str(), "hello there");
    }

    #[test]
    fn test_transcribed_submission_normalizes_the_same_way() {
        let utterance =
            Utterance::from_submission(Submission::Transcribed("I is happy".into())).unwrap();
        assert_eq!(utterance.as_str(), "I is happy");
    }

    #[test]
    fn test_blank_input_is_rejected() {
        assert!(Utterance::from_submission(Submission::Typed(String::new())).is_none());
        assert!(Utterance::from_submission(Submission::Typed("   \t\n".into())).is_none());
        assert!(Utterance::from_submission(Submission::Transcribed("  ".into())).is_none());
    }
}

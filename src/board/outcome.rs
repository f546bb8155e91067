// Decides what a server answer does to the page, independent of the DOM.

use serde_json::Number;

use crate::api::{ShuffleWords, SubmissionResult, WordSet};
use crate::error::ClientError;

/// Exactly one of these happens per answer. `Reload` wins over `GameOver`,
/// which wins over everything else.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The server reported an error; local state can no longer be trusted.
    Reload { reason: String },
    GameOver,
    Advance {
        count: Option<Number>,
        correct: bool,
        next: Option<WordSet>,
    },
}

impl From<SubmissionResult> for Outcome {
    fn from(r: SubmissionResult) -> Self {
        if let Some(reason) = r.error.filter(|e| !e.is_empty()) {
            Outcome::Reload { reason }
        } else if r.gameover {
            Outcome::GameOver
        } else {
            Outcome::Advance {
                count: r.count,
                correct: r.correct,
                next: r.shuffle_words,
            }
        }
    }
}

/// A `/shuffle_words` error only fails the fetch: the board stays as it is
/// and nothing reloads.
impl TryFrom<ShuffleWords> for Outcome {
    type Error = ClientError;

    fn try_from(s: ShuffleWords) -> Result<Self, Self::Error> {
        match s.error.filter(|e| !e.is_empty()) {
            Some(reason) => Err(ClientError::Server(reason)),
            None => Ok(Outcome::Advance {
                count: None,
                correct: false,
                next: s.shuffle_words,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Option<WordSet> {
        Some(ws.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn error_beats_gameover() {
        let r = SubmissionResult {
            error: Some("Session expired".into()),
            gameover: true,
            ..Default::default()
        };
        assert_eq!(
            Outcome::from(r),
            Outcome::Reload { reason: "Session expired".into() }
        );
    }

    #[test]
    fn gameover_ignores_words() {
        let r = SubmissionResult {
            gameover: true,
            count: Some(4.into()),
            shuffle_words: words(&["a"]),
            ..Default::default()
        };
        assert_eq!(Outcome::from(r), Outcome::GameOver);
    }

    #[test]
    fn correct_answer_advances() {
        let r = SubmissionResult {
            count: Some(5.into()),
            correct: true,
            shuffle_words: words(&["florp", "table", "grast"]),
            ..Default::default()
        };
        assert_eq!(
            Outcome::from(r),
            Outcome::Advance {
                count: Some(5.into()),
                correct: true,
                next: words(&["florp", "table", "grast"]),
            }
        );
    }

    #[test]
    fn empty_error_string_is_not_a_reload() {
        let r = SubmissionResult {
            error: Some(String::new()),
            count: Some(1.into()),
            shuffle_words: words(&["a"]),
            ..Default::default()
        };
        assert!(matches!(Outcome::from(r), Outcome::Advance { .. }));
    }

    #[test]
    fn decoded_error_with_null_flag_reloads() {
        let r: SubmissionResult =
            serde_json::from_str(r#"{"error":"x","correct":null}"#).unwrap();
        assert_eq!(Outcome::from(r), Outcome::Reload { reason: "x".into() });
    }

    #[test]
    fn shuffle_words_without_list_advances_to_nothing() {
        let out = Outcome::try_from(ShuffleWords::default()).unwrap();
        assert_eq!(
            out,
            Outcome::Advance { count: None, correct: false, next: None }
        );
    }

    #[test]
    fn shuffle_words_error_fails_without_reload() {
        let s = ShuffleWords { error: Some("Session expired".into()), shuffle_words: None };
        let err = Outcome::try_from(s).unwrap_err();
        assert!(matches!(err, ClientError::Server(ref r) if r == "Session expired"));
    }
}

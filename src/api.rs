//! Wire types and HTTP calls for the game server.
//!
//! The server owns every rule of the game; this module only knows the request
//! and response shapes. Submission answers are decoded field by field with
//! JavaScript truthiness, so one oddly typed field never hides the others:
//! absent or null flags read as `false`, an empty `error` as no error.

use std::fmt;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub const COUNT_PATH: &str = "/count";
pub const SHUFFLE_WORDS_PATH: &str = "/shuffle_words";
pub const SUBMIT_WORD_PATH: &str = "/submit_word";
pub const START_TIME_PATH: &str = "/start_time";
pub const SCORES_PATH: &str = "/scores";
pub const SCORES_FULL_PATH: &str = "/scoresFull";
pub const GAMEOVER_PATH: &str = "/gameover";

/// Words shown on the board at one time, in display order.
pub type WordSet = Vec<String>;

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct StartTimeResponse {
    start_time: Option<f64>,
}

/// `/shuffle_words` answers either a word list or an error (expired session).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShuffleWords {
    pub shuffle_words: Option<WordSet>,
    #[serde(deserialize_with = "error_text")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Submission<'a> {
    pub word: &'a str,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubmissionResult {
    /// Words found so far, shown as received. Older servers call it `score`.
    #[serde(alias = "score", deserialize_with = "lenient_number")]
    pub count: Option<Number>,
    #[serde(deserialize_with = "truthy")]
    pub correct: bool,
    #[serde(deserialize_with = "truthy")]
    pub gameover: bool,
    #[serde(deserialize_with = "lenient_words")]
    pub shuffle_words: Option<WordSet>,
    #[serde(deserialize_with = "error_text")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub username: String,
    pub difficulty: String,
    pub score: ScoreCell,
    pub duration: ScoreCell,
}

/// Leaderboard cell as sent by the server: either preformatted text
/// (`"00:01:05"`) or a bare number. Shown verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScoreCell {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ScoreCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreCell::Number(n) => f.write_str(&number_text(n)),
            ScoreCell::Text(s) => f.write_str(s),
        }
    }
}

/// Render a JSON number the way a browser would: `10.0` shows as `10`.
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(d)?))
}

// Falsy values mean "no error"; anything else truthy is kept as its JSON text.
fn error_text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        other if is_truthy(&other) => Some(other.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Number>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

fn lenient_words<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<WordSet>, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(d)?).ok())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        return Err(ClientError::Server(format!(
            "{} {} from {}",
            response.status(),
            response.status_text(),
            response.url()
        )));
    }
    Ok(response.json::<T>().await?)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    log::debug!("GET {url}");
    let response = Request::get(url).send().await?;
    read_json(response).await
}

pub async fn fetch_count(cfg: &ClientConfig) -> Result<Number> {
    let body: CountResponse = get_json(&cfg.url(COUNT_PATH)).await?;
    body.count.ok_or(ClientError::MissingField("count"))
}

pub async fn fetch_shuffle_words(cfg: &ClientConfig) -> Result<ShuffleWords> {
    get_json(&cfg.url(SHUFFLE_WORDS_PATH)).await
}

pub async fn submit_word(cfg: &ClientConfig, word: &str) -> Result<SubmissionResult> {
    let url = cfg.url(SUBMIT_WORD_PATH);
    log::debug!("POST {url} word={word:?}");
    let response = Request::post(&url)
        .json(&Submission { word })?
        .send()
        .await?;
    read_json(response).await
}

/// Server start time of the running game, epoch milliseconds.
pub async fn fetch_start_time(cfg: &ClientConfig) -> Result<f64> {
    let body: StartTimeResponse = get_json(&cfg.url(START_TIME_PATH)).await?;
    body.start_time.ok_or(ClientError::MissingField("start_time"))
}

pub async fn fetch_scores(cfg: &ClientConfig) -> Result<Vec<ScoreEntry>> {
    let path = if cfg.full_leaderboard { SCORES_FULL_PATH } else { SCORES_PATH };
    get_json(&cfg.url(path)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_result_defaults_missing_flags() {
        let r: SubmissionResult = serde_json::from_str(r#"{"count":3}"#).unwrap();
        assert_eq!(r.count, Some(Number::from(3)));
        assert!(!r.correct);
        assert!(!r.gameover);
        assert!(r.shuffle_words.is_none());
        assert!(r.error.is_none());
    }

    #[test]
    fn submission_result_accepts_score_alias() {
        let r: SubmissionResult = serde_json::from_str(r#"{"score":7,"gameover":true}"#).unwrap();
        assert_eq!(r.count, Some(Number::from(7)));
        assert!(r.gameover);
    }

    #[test]
    fn null_flag_keeps_error() {
        let r: SubmissionResult =
            serde_json::from_str(r#"{"error":"x","correct":null,"gameover":null}"#).unwrap();
        assert_eq!(r.error.as_deref(), Some("x"));
        assert!(!r.correct);
        assert!(!r.gameover);
    }

    #[test]
    fn float_count_decodes_and_renders_whole() {
        let r: SubmissionResult =
            serde_json::from_str(r#"{"count":2.0,"correct":true,"shuffle_words":["a","b"]}"#).unwrap();
        let count = r.count.unwrap();
        assert_eq!(number_text(&count), "2");
        assert!(r.correct);
        assert_eq!(r.shuffle_words.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_error_is_no_error() {
        let r: SubmissionResult = serde_json::from_str(r#"{"error":"","count":1}"#).unwrap();
        assert!(r.error.is_none());
    }

    #[test]
    fn odd_sibling_fields_do_not_hide_flags() {
        let r: SubmissionResult =
            serde_json::from_str(r#"{"gameover":1,"count":"many","shuffle_words":5,"correct":"yes"}"#)
                .unwrap();
        assert!(r.gameover);
        assert!(r.correct);
        assert!(r.count.is_none());
        assert!(r.shuffle_words.is_none());
    }

    #[test]
    fn number_text_keeps_real_fractions() {
        let n: Number = serde_json::from_str("2.5").unwrap();
        assert_eq!(number_text(&n), "2.5");
        let n: Number = serde_json::from_str("-4").unwrap();
        assert_eq!(number_text(&n), "-4");
    }

    #[test]
    fn submission_body_is_word_object() {
        let body = serde_json::to_string(&Submission { word: "glimber" }).unwrap();
        assert_eq!(body, r#"{"word":"glimber"}"#);
    }

    #[test]
    fn score_cells_display_verbatim() {
        let e: ScoreEntry = serde_json::from_str(
            r#"{"username":"bo","difficulty":"hard","score":12,"duration":"00:02:10"}"#,
        )
        .unwrap();
        assert_eq!(e.score.to_string(), "12");
        assert_eq!(e.duration.to_string(), "00:02:10");
    }

    #[test]
    fn whole_float_score_cell_drops_fraction() {
        let e: ScoreEntry = serde_json::from_str(
            r#"{"username":"a","difficulty":"easy","score":10.0,"duration":5}"#,
        )
        .unwrap();
        assert_eq!(e.score.to_string(), "10");
        assert_eq!(e.duration.to_string(), "5");
    }

    #[test]
    fn shuffle_words_error_variant() {
        let s: ShuffleWords = serde_json::from_str(r#"{"error":"Session expired"}"#).unwrap();
        assert_eq!(s.error.as_deref(), Some("Session expired"));
        assert!(s.shuffle_words.is_none());
    }
}

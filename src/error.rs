//! Error type shared by every page component.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub(crate) fn dom(what: impl Into<String>) -> Self {
        ClientError::Dom(what.into())
    }
}

// web-sys calls fail with an opaque JsValue; keep whatever text it carries.
impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        ClientError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

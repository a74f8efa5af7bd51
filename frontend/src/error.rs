use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

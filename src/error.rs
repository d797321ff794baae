//! Error types for demo configuration and scene population

use thiserror::Error;

/// Result type for demo operations
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors raised before the first frame is drawn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    #[error("unknown demo: {0}")]
    UnknownDemo(String),

    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("{kind} index {index} out of range (palette has {len})")]
    Palette {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

#[cfg(target_arch = "wasm32")]
impl From<DemoError> for wasm_bindgen::JsValue {
    fn from(err: DemoError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

use wasm_bindgen::JsValue;

/// Errors surfaced by the controller and its collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum VizError {
    /// A required DOM node or browser API is missing
    Dom(String),
    /// Canvas drawing failed
    Rendering(String),
    /// The startup configuration could not be used
    Config(String),
    /// The sketch engine rejected an operation
    Engine(String),
}

impl std::fmt::Display for VizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VizError::Dom(msg) => write!(f, "DOM Error: {}", msg),
            VizError::Rendering(msg) => write!(f, "Rendering Error: {}", msg),
            VizError::Config(msg) => write!(f, "Config Error: {}", msg),
            VizError::Engine(msg) => write!(f, "Engine Error: {}", msg),
        }
    }
}

impl std::error::Error for VizError {}

impl From<VizError> for JsValue {
    fn from(err: VizError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::Config(err.to_string())
    }
}

pub type VizResult<T> = Result<T, VizError>;

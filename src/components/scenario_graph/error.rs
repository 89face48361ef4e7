use wasm_bindgen::JsValue;

/// Failure to decode a graph payload delivered by the server.
#[derive(Debug, thiserror::Error)]
pub enum GraphDataError {
	#[error("malformed graph payload: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Failure of the bundled canvas drawing engine.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error("no global window is available")]
	NoWindow,
	#[error("canvas does not provide a 2d rendering context")]
	NoContext,
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for RenderError {
	fn from(value: JsValue) -> Self {
		RenderError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

//! View data passed to templates.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ViewError;

/// Variables bound to a view while it renders.
pub type ViewData = Map<String, Value>;

/// Reserved key under which a captured content view is handed to its layout.
///
/// Any caller-supplied value under this key is overwritten when a layout is
/// applied.
pub const BODY_KEY: &str = "_BODY";

/// Converts any serializable value into [`ViewData`].
///
/// The value must serialize to a JSON object. `null` (for example `()` or
/// `None`) yields empty data.
///
/// # Errors
///
/// Returns [`ViewError::Serialization`] if serialization fails or the value
/// is not a map.
pub fn to_view_data<T: Serialize + ?Sized>(value: &T) -> Result<ViewData, ViewError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ViewData::new()),
        other => Err(ViewError::Serialization(format!(
            "view data must be a map, got {}",
            kind_of(&other)
        ))),
    }
}

/// Returns a copy of `data` with `body` stored under [`BODY_KEY`].
pub(crate) fn with_body(data: &ViewData, body: String) -> ViewData {
    let mut augmented = data.clone();
    augmented.insert(BODY_KEY.to_string(), Value::String(body));
    augmented
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}

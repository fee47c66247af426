//! Render requests.

use serde::Serialize;
use serde_json::Value;

use crate::data::{to_view_data, ViewData};
use crate::directive::LayoutDirective;
use crate::error::ViewError;

/// A single request to render a view.
///
/// Defaults match a plain view call: no data, the configured default layout,
/// and output emitted to the sink rather than returned.
///
/// # Example
///
/// ```rust
/// use twostep::{LayoutDirective, RenderRequest};
///
/// let request = RenderRequest::new("home")
///     .var("title", "Welcome")
///     .layout("main")
///     .returning();
///
/// assert_eq!(request.view_name(), "home");
/// assert_eq!(request.layout_directive(), &LayoutDirective::named("main"));
/// assert!(request.return_mode());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    view_name: String,
    data: ViewData,
    layout: LayoutDirective,
    return_mode: bool,
}

impl RenderRequest {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            data: ViewData::new(),
            layout: LayoutDirective::UseDefault,
            return_mode: false,
        }
    }

    /// Replaces the view data.
    pub fn data(mut self, data: ViewData) -> Self {
        self.data = data;
        self
    }

    /// Replaces the view data with any value that serializes to a map.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Serialization`] if `value` is not map-shaped.
    pub fn serialize_data<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, ViewError> {
        self.data = to_view_data(value)?;
        Ok(self)
    }

    /// Sets a single variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Sets the layout directive.
    pub fn layout(mut self, layout: impl Into<LayoutDirective>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Renders the view without any layout.
    pub fn no_layout(self) -> Self {
        self.layout(LayoutDirective::Suppressed)
    }

    /// Returns the result instead of emitting it.
    pub fn returning(mut self) -> Self {
        self.return_mode = true;
        self
    }

    /// Sets the return mode explicitly.
    pub fn with_return_mode(mut self, return_mode: bool) -> Self {
        self.return_mode = return_mode;
        self
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn view_data(&self) -> &ViewData {
        &self.data
    }

    pub fn layout_directive(&self) -> &LayoutDirective {
        &self.layout
    }

    pub fn return_mode(&self) -> bool {
        self.return_mode
    }

    pub(crate) fn into_parts(self) -> (String, ViewData, LayoutDirective, bool) {
        (self.view_name, self.data, self.layout, self.return_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let request = RenderRequest::new("home");
        assert!(request.view_data().is_empty());
        assert_eq!(request.layout_directive(), &LayoutDirective::UseDefault);
        assert!(!request.return_mode());
    }

    #[test]
    fn test_builder() {
        let request = RenderRequest::new("home")
            .var("title", "X")
            .var("count", 2)
            .no_layout()
            .with_return_mode(true);
        assert_eq!(request.view_data().get("title"), Some(&json!("X")));
        assert_eq!(request.view_data().get("count"), Some(&json!(2)));
        assert_eq!(request.layout_directive(), &LayoutDirective::Suppressed);
        assert!(request.return_mode());
    }

    #[test]
    fn test_serialize_data() {
        #[derive(Serialize)]
        struct Page<'a> {
            title: &'a str,
        }

        let request = RenderRequest::new("home")
            .serialize_data(&Page { title: "About" })
            .unwrap();
        assert_eq!(request.view_data().get("title"), Some(&json!("About")));
    }

    #[test]
    fn test_serialize_data_rejects_list() {
        let err = RenderRequest::new("home")
            .serialize_data(&vec![1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, ViewError::Serialization(_)));
    }
}

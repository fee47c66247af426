//! Two-step view resolution.
//!
//! [`LayoutResolver`] decides how a view is rendered:
//!
//! | Directive | Behavior |
//! |-----------|----------|
//! | [`Suppressed`](LayoutDirective::Suppressed) | View rendered on its own, straight through the engine |
//! | [`Explicit`](LayoutDirective::Explicit) | View captured into `_BODY`, then the named layout is rendered |
//! | [`UseDefault`](LayoutDirective::UseDefault) | Like `Explicit` with the configured layout; with no layout configured the captured body itself is the result |
//!
//! The content view is always captured when a layout applies. Only the final
//! step honors the caller's return mode: `Some(body)` when returning, `None`
//! after appending to the sink.

use log::debug;

use crate::config::ConfigurationProvider;
use crate::data::{with_body, ViewData, BODY_KEY};
use crate::directive::{DefaultLayout, LayoutDirective};
use crate::engine::RenderEngine;
use crate::error::ViewError;
use crate::output::OutputSink;
use crate::request::RenderRequest;

/// Renders views, wrapping them in layouts as directed.
///
/// # Example
///
/// ```rust
/// use twostep::{DefaultLayout, LayoutResolver, MiniJinjaEngine, OutputBuffer, RenderRequest};
///
/// let mut engine = MiniJinjaEngine::new();
/// engine.add_template("home", "<h1>{{ title }}</h1>").unwrap();
/// engine.add_template("main", "<body>{{ _BODY }}</body>").unwrap();
///
/// let resolver = LayoutResolver::new(engine, DefaultLayout::named("main"));
/// let mut out = OutputBuffer::new();
///
/// resolver
///     .render(RenderRequest::new("home").var("title", "X"), &mut out)
///     .unwrap();
/// assert_eq!(out.as_str(), "<body><h1>X</h1></body>");
/// ```
pub struct LayoutResolver<E, C> {
    engine: E,
    config: C,
}

impl<E: RenderEngine, C: ConfigurationProvider> LayoutResolver<E, C> {
    pub fn new(engine: E, config: C) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn into_parts(self) -> (E, C) {
        (self.engine, self.config)
    }

    /// Renders a request.
    ///
    /// Returns `Some(output)` in return mode. Otherwise the output is appended
    /// to `sink` and `None` is returned.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewError::ViewNotFound`] from the engine and
    /// [`ViewError::ConfigurationUnavailable`] from the configuration. The
    /// sink is untouched when the content view or the configuration fails.
    pub fn render(
        &self,
        request: RenderRequest,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        let (view, data, layout, return_mode) = request.into_parts();

        match layout {
            LayoutDirective::Suppressed => {
                debug!("rendering {:?} without layout", view);
                self.engine.render(&view, &data, return_mode, sink)
            }
            LayoutDirective::UseDefault => match self.config.default_layout()? {
                DefaultLayout::Named(layout) => {
                    debug!("rendering {:?} in default layout {:?}", view, layout);
                    self.render_in_layout(&view, &data, &layout, return_mode, sink)
                }
                DefaultLayout::Suppressed => {
                    debug!("rendering {:?}, no default layout configured", view);
                    let body = self.engine.capture(&view, &data)?;
                    if return_mode {
                        Ok(Some(body))
                    } else {
                        // bypasses the engine's emit path
                        sink.append(&body);
                        Ok(None)
                    }
                }
            },
            LayoutDirective::Explicit(layout) => {
                debug!("rendering {:?} in layout {:?}", view, layout);
                self.render_in_layout(&view, &data, &layout, return_mode, sink)
            }
        }
    }

    /// Renders a view with the caller-facing argument order.
    ///
    /// `layout` accepts a layout name, `None` for the default layout, or
    /// `false` for no layout.
    ///
    /// ```rust
    /// use twostep::{DefaultLayout, LayoutResolver, MiniJinjaEngine, OutputBuffer, ViewData};
    ///
    /// let mut engine = MiniJinjaEngine::new();
    /// engine.add_template("home", "home").unwrap();
    /// engine.add_template("admin", "[{{ _BODY }}]").unwrap();
    /// let resolver = LayoutResolver::new(engine, DefaultLayout::Suppressed);
    /// let mut out = OutputBuffer::new();
    ///
    /// let html = resolver
    ///     .view("home", ViewData::new(), "admin", true, &mut out)
    ///     .unwrap();
    /// assert_eq!(html.as_deref(), Some("[home]"));
    /// ```
    pub fn view(
        &self,
        view_name: &str,
        data: ViewData,
        layout: impl Into<LayoutDirective>,
        return_mode: bool,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        let request = RenderRequest::new(view_name)
            .data(data)
            .layout(layout)
            .with_return_mode(return_mode);
        self.render(request, sink)
    }

    /// Renders a request in return mode.
    pub fn render_to_string(&self, request: RenderRequest) -> Result<String, ViewError> {
        let mut unused = String::new();
        let rendered = self.render(request.returning(), &mut unused)?;
        Ok(rendered.unwrap_or(unused))
    }

    fn render_in_layout(
        &self,
        view: &str,
        data: &ViewData,
        layout: &str,
        return_mode: bool,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        let body = self.engine.capture(view, data)?;
        if data.contains_key(BODY_KEY) {
            debug!("overwriting caller-supplied {} for {:?}", BODY_KEY, view);
        }
        let data = with_body(data, body);
        self.engine.render(layout, &data, return_mode, sink)
    }
}

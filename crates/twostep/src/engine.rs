//! Render engine abstraction.
//!
//! The resolver never parses templates itself. It talks to a [`RenderEngine`],
//! which renders a named view with bound data and either hands the result back
//! (capture) or appends it to an [`OutputSink`] (emit).
//!
//! [`MiniJinjaEngine`] is the default implementation. It serves inline
//! templates first and falls back to files found by a [`ViewLoader`].

use std::io;
use std::path::Path;
use std::sync::Arc;

use log::trace;
use minijinja::{AutoEscape, Environment, ErrorKind, Value};

use crate::data::ViewData;
use crate::error::ViewError;
use crate::loader::ViewLoader;
use crate::output::OutputSink;

/// Renders named views.
///
/// Implementations must report an unknown name as [`ViewError::ViewNotFound`].
pub trait RenderEngine: Send + Sync {
    /// Renders `name` and returns the result without emitting anything.
    fn capture(&self, name: &str, data: &ViewData) -> Result<String, ViewError>;

    /// Renders `name` and appends the result to `sink`.
    fn emit(
        &self,
        name: &str,
        data: &ViewData,
        sink: &mut dyn OutputSink,
    ) -> Result<(), ViewError> {
        let body = self.capture(name, data)?;
        sink.append(&body);
        Ok(())
    }

    /// Checks whether `name` resolves to a view.
    fn has_view(&self, name: &str) -> bool;

    /// Captures when `capture` is true, emits otherwise.
    ///
    /// Returns `Some` only in capture mode.
    fn render(
        &self,
        name: &str,
        data: &ViewData,
        capture: bool,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        if capture {
            self.capture(name, data).map(Some)
        } else {
            self.emit(name, data, sink).map(|()| None)
        }
    }
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn capture(&self, name: &str, data: &ViewData) -> Result<String, ViewError> {
        (**self).capture(name, data)
    }

    fn emit(
        &self,
        name: &str,
        data: &ViewData,
        sink: &mut dyn OutputSink,
    ) -> Result<(), ViewError> {
        (**self).emit(name, data, sink)
    }

    fn has_view(&self, name: &str) -> bool {
        (**self).has_view(name)
    }

    fn render(
        &self,
        name: &str,
        data: &ViewData,
        capture: bool,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        (**self).render(name, data, capture, sink)
    }
}

impl<E: RenderEngine + ?Sized> RenderEngine for Arc<E> {
    fn capture(&self, name: &str, data: &ViewData) -> Result<String, ViewError> {
        (**self).capture(name, data)
    }

    fn emit(
        &self,
        name: &str,
        data: &ViewData,
        sink: &mut dyn OutputSink,
    ) -> Result<(), ViewError> {
        (**self).emit(name, data, sink)
    }

    fn has_view(&self, name: &str) -> bool {
        (**self).has_view(name)
    }

    fn render(
        &self,
        name: &str,
        data: &ViewData,
        capture: bool,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<String>, ViewError> {
        (**self).render(name, data, capture, sink)
    }
}

/// MiniJinja-based render engine.
///
/// Auto-escaping is disabled so that a captured body can be dropped into a
/// layout as `{{ _BODY }}` without double escaping. Use
/// [`environment_mut`](Self::environment_mut) to turn it back on or to
/// register filters.
///
/// # Example
///
/// ```rust
/// use twostep::{MiniJinjaEngine, RenderEngine, ViewData};
///
/// let mut engine = MiniJinjaEngine::new();
/// engine.add_template("greeting", "Hello, {{ name }}!").unwrap();
///
/// let mut data = ViewData::new();
/// data.insert("name".into(), "World".into());
/// assert_eq!(engine.capture("greeting", &data).unwrap(), "Hello, World!");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    loader: ViewLoader,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self {
            env,
            loader: ViewLoader::new(),
        }
    }

    /// Creates an engine that loads views from the given directories, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if any directory does not exist.
    pub fn with_view_dirs<I, P>(dirs: I) -> Result<Self, ViewError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut engine = Self::new();
        for dir in dirs {
            engine.add_view_dir(dir)?;
        }
        Ok(engine)
    }

    /// Registers a named inline template.
    ///
    /// Inline templates shadow file-based views of the same name. The source
    /// is compiled immediately.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), ViewError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    /// Adds a directory to search for view files.
    ///
    /// Views already loaded stay cached; register directories before the
    /// first render.
    pub fn add_view_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ViewError> {
        self.loader.add_dir(path)?;
        let loader = self.loader.clone();
        self.env.set_loader(move |name| {
            loader.load(name).map_err(|err| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("failed to read view {:?}: {}", name, err),
                )
                .with_source(err)
            })
        });
        Ok(())
    }

    pub fn loader(&self) -> &ViewLoader {
        &self.loader
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters, functions or globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for MiniJinjaEngine {
    fn capture(&self, name: &str, data: &ViewData) -> Result<String, ViewError> {
        trace!("rendering view {:?}", name);
        let tmpl = self.env.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => ViewError::not_found(name),
            _ => into_view_error(err),
        })?;
        tmpl.render(Value::from_serialize(data)).map_err(into_view_error)
    }

    fn has_view(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// Recovers I/O failures raised by the view loader, which minijinja carries
/// as the error source.
fn into_view_error(err: minijinja::Error) -> ViewError {
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        if let Some(ViewError::Io(io_err)) = cause.downcast_ref::<ViewError>() {
            return ViewError::Io(io::Error::new(io_err.kind(), io_err.to_string()));
        }
        source = cause.source();
    }
    ViewError::from(err)
}

//! Test doubles for the render engine and configuration provider.
//!
//! [`MockEngine`] serves fixed output per view name and records every call,
//! so tests can assert exactly what the resolver asked for. [`MockConfig`]
//! returns a canned default layout (or failure) and counts queries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::config::ConfigurationProvider;
use crate::data::ViewData;
use crate::directive::DefaultLayout;
use crate::engine::RenderEngine;
use crate::error::ViewError;
use crate::output::OutputSink;

/// One call made to a [`MockEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub name: String,
    pub data: ViewData,
    /// `true` for capture, `false` for emit.
    pub capture: bool,
}

impl RenderCall {
    pub fn capture(name: impl Into<String>, data: ViewData) -> Self {
        Self {
            name: name.into(),
            data,
            capture: true,
        }
    }

    pub fn emit(name: impl Into<String>, data: ViewData) -> Self {
        Self {
            name: name.into(),
            data,
            capture: false,
        }
    }
}

/// Render engine returning fixed output per view.
///
/// Unknown names fail with [`ViewError::ViewNotFound`].
#[derive(Debug, Default)]
pub struct MockEngine {
    views: HashMap<String, String>,
    calls: Mutex<Vec<RenderCall>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view that always renders as `output`.
    pub fn with_view(mut self, name: impl Into<String>, output: impl Into<String>) -> Self {
        self.views.insert(name.into(), output.into());
        self
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.recorded().clone()
    }

    /// Forgets recorded calls.
    pub fn reset(&self) {
        self.recorded().clear();
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<RenderCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lookup(&self, name: &str) -> Result<String, ViewError> {
        self.views
            .get(name)
            .cloned()
            .ok_or_else(|| ViewError::not_found(name))
    }
}

impl RenderEngine for MockEngine {
    fn capture(&self, name: &str, data: &ViewData) -> Result<String, ViewError> {
        self.recorded().push(RenderCall::capture(name, data.clone()));
        self.lookup(name)
    }

    fn emit(
        &self,
        name: &str,
        data: &ViewData,
        sink: &mut dyn OutputSink,
    ) -> Result<(), ViewError> {
        self.recorded().push(RenderCall::emit(name, data.clone()));
        sink.append(&self.lookup(name)?);
        Ok(())
    }

    fn has_view(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }
}

/// Configuration provider with a canned answer.
#[derive(Debug)]
pub struct MockConfig {
    answer: Result<DefaultLayout, String>,
    queries: AtomicUsize,
}

impl MockConfig {
    /// Reports `name` as the default layout.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_answer(Ok(DefaultLayout::named(name)))
    }

    /// Reports no default layout.
    pub fn suppressed() -> Self {
        Self::with_answer(Ok(DefaultLayout::Suppressed))
    }

    /// Fails every query with [`ViewError::ConfigurationUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::with_answer(Err(message.into()))
    }

    fn with_answer(answer: Result<DefaultLayout, String>) -> Self {
        Self {
            answer,
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of times the default layout was asked for.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ConfigurationProvider for MockConfig {
    fn default_layout(&self) -> Result<DefaultLayout, ViewError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(ViewError::ConfigurationUnavailable)
    }
}

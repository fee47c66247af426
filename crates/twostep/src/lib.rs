//! # twostep - Two-Step View Rendering
//!
//! `twostep` renders a content view and then, optionally, wraps it in a
//! layout. The content is captured first and handed to the layout under the
//! reserved `_BODY` key:
//!
//! ```text
//! home.html   <h1>{{ title }}</h1>            -> <h1>Welcome</h1>
//! main.html   <body>{{ _BODY }}</body>        -> <body><h1>Welcome</h1></body>
//! ```
//!
//! ## Core Concepts
//!
//! - [`LayoutResolver`]: Decides whether and how a view is wrapped, and whether
//!   the result is returned or emitted
//! - [`LayoutDirective`]: Explicit layout, no layout, or the configured default
//! - [`RenderEngine`]: Renders a named view; [`MiniJinjaEngine`] is the default
//! - [`ConfigurationProvider`]: Supplies the default layout; see [`ViewConfig`]
//!   and [`ConfigFile`]
//! - [`OutputSink`]: Per-request destination for emitted output; see
//!   [`OutputBuffer`]
//!
//! ## Quick Start
//!
//! ```rust
//! use twostep::{LayoutResolver, MiniJinjaEngine, OutputBuffer, RenderRequest, ViewConfig};
//!
//! let mut engine = MiniJinjaEngine::new();
//! engine.add_template("home", "<h1>{{ title }}</h1>").unwrap();
//! engine.add_template("main", "<body>{{ _BODY }}</body>").unwrap();
//! engine.add_template("admin", "<div class=\"admin\">{{ _BODY }}</div>").unwrap();
//!
//! let config = ViewConfig::from_yaml("default_layout: main").unwrap();
//! let resolver = LayoutResolver::new(engine, config);
//! let mut out = OutputBuffer::new();
//!
//! // default layout, emitted
//! resolver
//!     .render(RenderRequest::new("home").var("title", "Welcome"), &mut out)
//!     .unwrap();
//! assert_eq!(out.as_str(), "<body><h1>Welcome</h1></body>");
//!
//! // explicit layout, returned
//! let html = resolver
//!     .render(
//!         RenderRequest::new("home").var("title", "Users").layout("admin").returning(),
//!         &mut out,
//!     )
//!     .unwrap();
//! assert_eq!(html.as_deref(), Some("<div class=\"admin\"><h1>Users</h1></div>"));
//!
//! // no layout
//! let html = resolver
//!     .render_to_string(RenderRequest::new("home").var("title", "Bare").no_layout())
//!     .unwrap();
//! assert_eq!(html, "<h1>Bare</h1>");
//! ```
//!
//! ## View Directories
//!
//! ```rust,ignore
//! let config = ViewConfig::load("config/views.yaml")?;
//! let engine = config.build_engine()?;
//! let resolver = LayoutResolver::new(engine, ConfigFile::new("config/views.yaml"));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockEngine`] and [`mock::MockConfig`] record what the resolver asks
//! for, without any templates on disk.

pub mod config;
mod data;
mod directive;
pub mod engine;
mod error;
pub mod loader;
pub mod mock;
mod output;
mod request;
mod resolver;

pub use config::{ConfigFile, ConfigurationProvider, LayoutSetting, ViewConfig};
pub use data::{to_view_data, ViewData, BODY_KEY};
pub use directive::{DefaultLayout, LayoutDirective};
pub use engine::{MiniJinjaEngine, RenderEngine};
pub use error::ViewError;
pub use loader::{ViewLoader, VIEW_EXTENSIONS};
pub use output::{OutputBuffer, OutputSink};
pub use request::RenderRequest;
pub use resolver::LayoutResolver;

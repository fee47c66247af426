//! Layout directives.
//!
//! A [`LayoutDirective`] tells the resolver how a view should be wrapped. It
//! is built once at the API boundary, so the resolver never has to guess what
//! an empty string, `false` or a missing argument was supposed to mean.
//!
//! | Caller passes | Directive |
//! |---------------|-----------|
//! | `"main"` / `String` | [`LayoutDirective::Explicit`] |
//! | `Some("main")` | [`LayoutDirective::Explicit`] |
//! | `None` | [`LayoutDirective::UseDefault`] |
//! | `false` | [`LayoutDirective::Suppressed`] |
//! | `true` | [`LayoutDirective::UseDefault`] |

use std::fmt;

/// How a view should be wrapped in a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirective {
    /// Wrap the view in the named layout.
    Explicit(String),
    /// Render the view on its own.
    Suppressed,
    /// Use whatever the configuration provider names as the default layout.
    #[default]
    UseDefault,
}

impl LayoutDirective {
    /// Creates an explicit layout directive.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Explicit(name.into())
    }

    /// Returns the layout name if this directive names one.
    pub fn layout_name(&self) -> Option<&str> {
        match self {
            Self::Explicit(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for LayoutDirective {
    fn from(name: &str) -> Self {
        Self::Explicit(name.to_string())
    }
}

impl From<String> for LayoutDirective {
    fn from(name: String) -> Self {
        Self::Explicit(name)
    }
}

impl From<&String> for LayoutDirective {
    fn from(name: &String) -> Self {
        Self::Explicit(name.clone())
    }
}

impl<T: Into<LayoutDirective>> From<Option<T>> for LayoutDirective {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::UseDefault)
    }
}

impl From<bool> for LayoutDirective {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::UseDefault
        } else {
            Self::Suppressed
        }
    }
}

impl fmt::Display for LayoutDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(name) => write!(f, "layout '{}'", name),
            Self::Suppressed => write!(f, "no layout"),
            Self::UseDefault => write!(f, "default layout"),
        }
    }
}

/// The default layout as reported by a configuration provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DefaultLayout {
    /// Views without an explicit layout are wrapped in this one.
    Named(String),
    /// No default layout is configured.
    #[default]
    Suppressed,
}

impl DefaultLayout {
    /// Creates a named default layout.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the layout name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Suppressed => None,
        }
    }
}

impl<T: Into<String>> From<Option<T>> for DefaultLayout {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(name) => Self::Named(name.into()),
            None => Self::Suppressed,
        }
    }
}

//! Deprecation warnings for functions and options
//!
//! Warnings are advisory. Emitting one never fails; where it ends up is up to
//! the [`WarningSink`] the caller picks.

use colored::Colorize;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Classification of an emitted warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    Deprecation,
}

impl WarningCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            WarningCategory::Deprecation => "DeprecationWarning",
        }
    }
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
}

impl Warning {
    pub fn deprecation(message: impl Into<String>) -> Self {
        Self {
            category: WarningCategory::Deprecation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Destination for emitted warnings
pub trait WarningSink {
    fn warn(&self, warning: Warning);
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn warn(&self, warning: Warning) {
        (**self).warn(warning)
    }
}

/// Prints warnings to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl WarningSink for StderrSink {
    fn warn(&self, warning: Warning) {
        eprintln!(
            "{} {}",
            format!("{}:", warning.category).yellow(),
            warning.message
        );
    }
}

/// Drops every warning
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSink;

impl WarningSink for IgnoreSink {
    fn warn(&self, _warning: Warning) {}
}

/// Keeps warnings in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for RecordingSink {
    fn warn(&self, warning: Warning) {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(warning);
    }
}

/// Metadata carried over from a wrapped function to its wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMeta {
    name: String,
    doc: String,
}

impl FunctionMeta {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }
}

/// A function that warns about its own deprecation on every call
///
/// Multi-argument functions take their arguments as a tuple.
pub struct Deprecated<F, S> {
    meta: FunctionMeta,
    func: F,
    sink: S,
}

/// Wrap `func` so each call first emits a deprecation warning naming it
pub fn deprecated<F, S>(meta: FunctionMeta, sink: S, func: F) -> Deprecated<F, S>
where
    S: WarningSink,
{
    Deprecated { meta, func, sink }
}

impl<F, S: WarningSink> Deprecated<F, S> {
    /// Warn, then delegate to the wrapped function
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        self.sink.warn(Warning::deprecation(format!(
            "Call to deprecated function {}.",
            self.meta.name()
        )));
        (self.func)(args)
    }

    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn doc(&self) -> &str {
        self.meta.doc()
    }

    pub fn meta(&self) -> &FunctionMeta {
        &self.meta
    }

    /// Turn the wrapper into a plain closure with the wrapped signature
    pub fn into_fn<A, R>(self) -> impl Fn(A) -> R
    where
        F: Fn(A) -> R,
    {
        move |args| self.call(args)
    }
}

impl<F, S> fmt::Debug for Deprecated<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecated")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Warn that a deprecated option was used
pub fn deprecated_option<S: WarningSink + ?Sized>(sink: &S, option: &str) {
    sink.warn(Warning::deprecation(format!(
        "Call to deprecated option {}.",
        option
    )));
}

/// Warn about `option` only if the caller actually set it
/// Returns whether a warning was emitted
pub fn warn_if_set<S: WarningSink + ?Sized, T>(sink: &S, option: &str, value: &Option<T>) -> bool {
    if value.is_some() {
        deprecated_option(sink, option);
        true
    } else {
        false
    }
}

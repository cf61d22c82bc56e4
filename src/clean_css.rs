//! Callback-style CSS optimizer.
//!
//! This module uses [`lightningcss`] under the hood. It reports problems the
//! way clean-css does: everything it could recover from ends up in
//! [`Minified::warnings`], everything else in [`Minified::errors`], and the
//! completion callback is always called, once.

mod options;
mod rebase;
mod source;

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::{Duration, Instant},
};

use lightningcss::{
    error::{Error as CssError, ParserError},
    rules::{CssRule, CssRuleList},
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet},
    visitor::Visit,
};
use parcel_sourcemap::{SourceMap, SourceMapError};

pub use self::options::{Inline, Options, OptionsError};
use self::{options::remote_host, rebase::Rebase, source::Source};
use crate::Value;

/// A callback-style CSS optimizer.
///
/// The callback receives the list of errors (mirroring
/// [`Minified::errors`], [`None`] when empty) and the full result.
/// Implementations must call it exactly once, either before returning or
/// later from another thread.
pub trait Optimize: Sized {
    /// Effective configuration.
    type Options: std::fmt::Debug + PartialEq;

    /// Create an optimizer from optional options.
    fn new(options: Option<&Value>) -> Result<Self, OptionsError>;

    /// Return the effective configuration.
    fn options(&self) -> &Self::Options;

    /// Optimize `input`, with an optional input source map.
    fn minify<F>(&self, input: &Value, source_map: Option<&Value>, callback: F)
    where
        F: FnOnce(Option<Vec<String>>, Minified) + Send + 'static;
}

/// Result of an optimization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Minified {
    /// Optimized CSS.
    pub styles: String,
    /// Source map, when enabled.
    pub source_map: Option<String>,
    /// Problems that prevented part of the input from being optimized.
    pub errors: Vec<String>,
    /// Problems that were recovered from.
    pub warnings: Vec<String>,
    /// Optimization statistics.
    pub stats: Stats,
}

/// Optimization statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    /// Input size, in bytes.
    pub original_size: usize,
    /// Output size, in bytes.
    pub minified_size: usize,
    /// `1 - minified_size / original_size`.
    pub efficiency: f64,
    /// Time spent optimizing.
    pub time_spent: Duration,
}

/// The default [`Optimize`] implementation.
#[derive(Clone, Debug, Default)]
pub struct CleanCss {
    options: Options,
}

impl Optimize for CleanCss {
    type Options = Options;

    fn new(options: Option<&Value>) -> Result<Self, OptionsError> {
        Ok(Self {
            options: Options::from_value(options)?,
        })
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn minify<F>(&self, input: &Value, source_map: Option<&Value>, callback: F)
    where
        F: FnOnce(Option<Vec<String>>, Minified) + Send + 'static,
    {
        let minified = self.optimize(input, source_map);
        let errors = (!minified.errors.is_empty()).then(|| minified.errors.clone());
        callback(errors, minified)
    }
}

impl CleanCss {
    /// Optimize synchronously.
    pub fn optimize(&self, input: &Value, source_map: Option<&Value>) -> Minified {
        let start = Instant::now();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let sources = source::collect(input, source_map, &mut errors);
        let original_size = sources.iter().map(|source| source.styles.len()).sum();

        let (styles, source_map) = if sources.is_empty() {
            (String::new(), None)
        } else {
            self.process(&sources, &mut errors, &mut warnings)
                .unwrap_or_default()
        };

        let minified_size = styles.len();
        let efficiency = if original_size == 0 {
            0.0
        } else {
            1.0 - minified_size as f64 / original_size as f64
        };

        tracing::trace!(
            original_size,
            minified_size,
            errors = errors.len(),
            warnings = warnings.len(),
            "optimized CSS"
        );

        Minified {
            styles,
            source_map,
            errors,
            warnings,
            stats: Stats {
                original_size,
                minified_size,
                efficiency,
                time_spent: start.elapsed(),
            },
        }
    }

    /// Parse, optimize and print all sources as one stylesheet.
    ///
    /// Returns [`None`] when an error prevents printing.
    fn process(
        &self,
        sources: &[Source],
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Option<(String, Option<String>)> {
        let recovered = Arc::new(RwLock::new(Vec::new()));
        let mut rules = Vec::new();

        for (index, source) in sources.iter().enumerate() {
            let parser_options = ParserOptions {
                filename: source.name.to_string(),
                source_index: index as u32,
                error_recovery: true,
                warnings: Some(Arc::clone(&recovered)),
                ..ParserOptions::default()
            };

            match StyleSheet::parse(source.styles, parser_options) {
                Ok(style_sheet) => rules.extend(style_sheet.rules.0),
                Err(error) => errors.push(describe(&error)),
            }
        }

        warnings.extend(
            recovered
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|error| format!("{} Ignoring.", describe(error))),
        );

        let mut style_sheet = StyleSheet::new(
            sources.iter().map(|source| source.name.to_string()).collect(),
            CssRuleList(rules),
            ParserOptions::default(),
        );

        // `@import`s must precede every rule but `@layer` statements
        let mut leading = true;

        style_sheet.rules.0.retain(|rule| match rule {
            CssRule::Import(import) if !leading => {
                warnings.push(format!(
                    "Ignoring @import of \"{}\" as it follows other rules.",
                    &*import.url
                ));
                false
            },
            CssRule::Import(import)
                if remote_host(&import.url).is_some()
                    && !self.options.inline.allows_remote(&import.url) =>
            {
                warnings.push(format!(
                    "Skipping remote @import of \"{}\" as resource is not allowed.",
                    &*import.url
                ));
                false
            },
            CssRule::Import(_) | CssRule::LayerStatement(_) | CssRule::Ignored => true,
            _ => {
                leading = false;
                true
            },
        });

        if let Some(target) = &self.options.rebase_to {
            match Rebase::to(target) {
                Some(mut rebase) => {
                    for rule in &mut style_sheet.rules.0 {
                        if let CssRule::Import(import) = rule {
                            rebase.rebase_import(import);
                        }
                    }
                    if let Err(never) = style_sheet.visit(&mut rebase) {
                        match never {}
                    }
                },
                None => warnings.push(format!(
                    "Cannot rebase URLs to \"{target}\", only relative directories without \
                     \"..\" are supported."
                )),
            }
        }

        if self.options.level > 0 {
            if let Err(error) = style_sheet.minify(MinifyOptions::default()) {
                errors.push(error.to_string());
                return None;
            }
        }

        let mut map = if self.options.source_map {
            match register(sources) {
                Ok(map) => Some(map),
                Err(error) => {
                    errors.push(format!("Cannot build source map: {error}"));
                    return None;
                },
            }
        } else {
            None
        };

        let printer_options = PrinterOptions {
            minify: true,
            source_map: map.as_mut(),
            ..PrinterOptions::default()
        };

        let result = match style_sheet.to_css(printer_options) {
            Ok(result) => result,
            Err(error) => {
                errors.push(error.to_string());
                return None;
            },
        };

        let map = match map {
            Some(mut map) => {
                let input_map = match sources {
                    [source] => source.source_map,
                    _ => {
                        if sources.iter().any(|source| source.source_map.is_some()) {
                            warnings.push(
                                "Input source maps are ignored when optimizing several sources."
                                    .to_string(),
                            );
                        }
                        None
                    },
                };

                let json = input_map
                    .map(|input_map| {
                        let mut original = SourceMap::from_json("/", input_map)?;
                        map.extends(&mut original)
                    })
                    .transpose()
                    .and_then(|_| map.to_json(None));

                match json {
                    Ok(json) => Some(json),
                    Err(error) => {
                        errors.push(format!("Cannot build source map: {error}"));
                        None
                    },
                }
            },
            None => None,
        };

        Some((result.code, map))
    }
}

/// Create a source map listing every source, in parsing order.
///
/// Printed mappings refer to sources by their parsing index.
fn register(sources: &[Source]) -> Result<SourceMap, SourceMapError> {
    let mut map = SourceMap::new("/");
    for source in sources {
        let index = map.add_source(source.name);
        map.set_source_content(index as usize, source.styles)?;
    }
    Ok(map)
}

/// Format a lightningcss error with its location.
fn describe(error: &CssError<ParserError>) -> String {
    match &error.loc {
        Some(loc) => format!("{} at {}:{}.", error.kind, loc.line + 1, loc.column),
        None => format!("{}.", error.kind),
    }
}

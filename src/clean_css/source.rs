//! Split minification input into named sources.

use crate::Value;

/// Name given to a source passed as a plain string.
pub(super) const STDIN: &str = "$stdin";

/// One stylesheet to optimize.
#[derive(Debug, PartialEq)]
pub(super) struct Source<'a> {
    pub name: &'a str,
    pub styles: &'a str,
    pub source_map: Option<&'a str>,
}

/// Collect sources from the positional inputs.
///
/// Malformed entries are reported to `errors` and skipped.
pub(super) fn collect<'a>(
    input: &'a Value,
    source_map: Option<&'a Value>,
    errors: &mut Vec<String>,
) -> Vec<Source<'a>> {
    match input {
        Value::Str(styles) => vec![Source {
            name: STDIN,
            styles,
            source_map: source_map.and_then(Value::as_str),
        }],
        Value::Map(entries) => {
            let mut sources = Vec::with_capacity(entries.len());
            for (name, entry) in entries {
                match entry {
                    Value::Str(styles) => sources.push(Source {
                        name,
                        styles,
                        source_map: None,
                    }),
                    Value::Map(fields) => match fields.get("styles").and_then(Value::as_str) {
                        Some(styles) => sources.push(Source {
                            name,
                            styles,
                            source_map: fields.get("sourceMap").and_then(Value::as_str),
                        }),
                        None => errors.push(format!("Source \"{name}\" has no `styles` string.")),
                    },
                    entry => errors.push(format!(
                        "Source \"{name}\" must be a string or an object with `styles`, but got \
                         {entry}."
                    )),
                }
            }
            sources
        },
        input => {
            errors.push(format!(
                "Expected a string or an object of sources, but got {input}."
            ));
            Vec::new()
        },
    }
}

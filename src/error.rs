//! Errors raised by [`CleanCssAsync`](crate::CleanCssAsync).
//!
//! Argument and option problems are returned synchronously, before any
//! [`Minification`](crate::Minification) exists. Diagnostics reported by
//! clean-css are only ever delivered through a rejected
//! [`Minification`](crate::Minification).

use crate::{clean_css::OptionsError, Value};

/// Enumerates adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong number of positional arguments.
    ///
    /// `received` is `0` only when at least one argument is required.
    #[error("Expected {expected}, but got {}.", count(.received))]
    ArgumentCount {
        /// Accepted arities and argument shapes.
        expected: &'static str,
        /// Number of arguments actually passed.
        received: usize,
    },
    /// Wrong shape of a positional argument or of a named option.
    #[error("Expected {expected}, but got {received} ({}).{}", .received.kind(), .hint.unwrap_or_default())]
    ArgumentType {
        /// What was expected, e.g. ``"`rebaseTo` option to be a string"``.
        expected: String,
        /// The offending value.
        received: Value,
        /// Extra sentence appended to the message.
        hint: Option<&'static str>,
    },
    /// An option that must not be configured from outside.
    #[error("{reason}, so you don't need to pass any values to `{option}` option. But {received} is provided.")]
    Configuration {
        /// Option name.
        option: &'static str,
        /// Why the option is off limits.
        reason: &'static str,
        /// The provided value.
        received: Value,
    },
    /// Options rejected by clean-css itself.
    #[error(transparent)]
    Options(#[from] OptionsError),
    /// Errors and warnings reported by clean-css while optimizing.
    #[error("{}", report(.problems))]
    Optimization {
        /// Errors followed by warnings, in reporting order.
        problems: Vec<String>,
    },
    /// clean-css dropped its completion callback without calling it.
    #[error("clean-css finished without reporting a result")]
    Abandoned,
}

/// Machine-readable classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required positional arguments are missing.
    MissingArguments,
    /// Too many positional arguments.
    TooManyArguments,
    /// A positional argument or option has the wrong type.
    InvalidArgumentType,
    /// A forbidden option was configured.
    ConfigurationConflict,
    /// clean-css rejected its options.
    InvalidOptions,
    /// clean-css reported errors or warnings.
    Optimization,
    /// clean-css never settled the minification.
    Abandoned,
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCount { received: 0, .. } => ErrorKind::MissingArguments,
            Self::ArgumentCount { .. } => ErrorKind::TooManyArguments,
            Self::ArgumentType { .. } => ErrorKind::InvalidArgumentType,
            Self::Configuration { .. } => ErrorKind::ConfigurationConflict,
            Self::Options(_) => ErrorKind::InvalidOptions,
            Self::Optimization { .. } => ErrorKind::Optimization,
            Self::Abandoned => ErrorKind::Abandoned,
        }
    }

    /// Return the error code, if this kind of error carries one.
    pub fn code(&self) -> Option<&'static str> {
        self.kind().code()
    }
}

impl ErrorKind {
    /// Return the error code associated to this kind.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::MissingArguments => Some("ERR_MISSING_ARGS"),
            Self::TooManyArguments => Some("ERR_TOO_MANY_ARGS"),
            Self::InvalidArgumentType => Some("ERR_INVALID_ARG_TYPE"),
            _ => None,
        }
    }
}

fn count(n: &usize) -> String {
    match *n {
        0 => "no arguments".to_string(),
        1 => "1 argument".to_string(),
        n => format!("{n} arguments"),
    }
}

/// Build the message of [`Error::Optimization`].
fn report(problems: &[String]) -> String {
    let (mut message, subject) = match problems {
        [problem] => (
            format!("An error occured while optimizing CSS with clean-css: {problem}"),
            "this error",
        ),
        _ => (
            problems.iter().enumerate().fold(
                format!(
                    "{} errors occured while optimizing CSS with clean-css:",
                    problems.len()
                ),
                |message, (i, problem)| format!("{message}\n  {}. {problem}", i + 1),
            ),
            "these errors",
        ),
    };

    message.push_str(&format!(
        "\n\nclean-css only reports {subject} and keeps going, so its output may silently \
         lose or break styles. Ignoring {subject} is unsafe: fix the CSS instead of \
         suppressing {subject}."
    ));

    message
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use crate::Value;

    #[test]
    fn missing_arguments() {
        let error = Error::ArgumentCount {
            expected: "1 or 2 arguments (<string|Object>[, <string>])",
            received: 0,
        };

        assert_eq!(error.kind(), ErrorKind::MissingArguments);
        assert_eq!(error.code(), Some("ERR_MISSING_ARGS"));
        assert_eq!(
            error.to_string(),
            "Expected 1 or 2 arguments (<string|Object>[, <string>]), but got no arguments."
        );
    }

    #[test]
    fn too_many_arguments() {
        let error = Error::ArgumentCount {
            expected: "0 or 1 argument (<Object>)",
            received: 2,
        };

        assert_eq!(error.kind(), ErrorKind::TooManyArguments);
        assert_eq!(error.code(), Some("ERR_TOO_MANY_ARGS"));
        assert_eq!(
            error.to_string(),
            "Expected 0 or 1 argument (<Object>), but got 2 arguments."
        );
    }

    #[test]
    fn argument_type_with_hint() {
        let error = Error::ArgumentType {
            expected: "`rebaseTo` option to be a string or undefined".into(),
            received: Value::Bool(false),
            hint: Some(" Do not pass it."),
        };

        assert_eq!(error.code(), Some("ERR_INVALID_ARG_TYPE"));
        assert_eq!(
            error.to_string(),
            "Expected `rebaseTo` option to be a string or undefined, but got false (boolean). \
             Do not pass it."
        );
    }

    #[test]
    fn single_problem() {
        let error = Error::Optimization {
            problems: vec!["Broken @import declaration of \"/foo\".".into()],
        };
        let message = error.to_string();

        assert_eq!(error.code(), None);
        assert!(message.starts_with(
            "An error occured while optimizing CSS with clean-css: \
             Broken @import declaration of \"/foo\".\n\n"
        ));
        assert!(message.contains("Ignoring this error is unsafe"));
        assert!(!message.contains("these errors"));
    }

    #[test]
    fn many_problems() {
        let error = Error::Optimization {
            problems: vec!["first".into(), "second".into()],
        };
        let message = error.to_string();

        assert!(message.starts_with(concat!(
            "2 errors occured while optimizing CSS with clean-css:\n",
            "  1. first\n",
            "  2. second\n\n",
        )));
        assert!(message.contains("Ignoring these errors is unsafe"));
        assert!(!message.contains("this error"));
    }
}

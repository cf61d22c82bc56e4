//! Future-returning wrapper around clean-css.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{channel::oneshot, FutureExt};

use crate::{
    clean_css::{CleanCss, Minified, Optimize},
    options, Error, Value,
};

/// Accepted arities of [`CleanCssAsync::minify`].
const MINIFY_ARITY: &str = "1 or 2 arguments (<string|Object>[, <string>])";

/// A clean-css optimizer whose [`minify`](Self::minify) returns a future.
///
/// Errors and warnings reported by clean-css reject the future with
/// [`Error::Optimization`] instead of being left in the result.
///
/// # Example
///
/// ```
/// use clean_css_async::CleanCssAsync;
///
/// let clean_css = CleanCssAsync::new(None)?;
/// let minified = futures::executor::block_on(clean_css.minify(&["a { color: #FF0000 }".into()])?)?;
///
/// assert_eq!(minified.styles, "a{color:red}");
/// # Ok::<(), clean_css_async::Error>(())
/// ```
#[derive(Debug)]
pub struct CleanCssAsync<O = CleanCss> {
    optimizer: O,
}

impl CleanCssAsync {
    /// Create an adapter around [`CleanCss`].
    ///
    /// `options` must be a plain object when given.
    pub fn new(options: Option<Value>) -> Result<Self, Error> {
        Self::from_args(options.as_slice())
    }
}

impl<O: Optimize> CleanCssAsync<O> {
    /// Create an adapter from positional constructor arguments.
    ///
    /// Accepts zero arguments, or one options object. `returnPromise` is
    /// forbidden and `rebaseTo` must be a string; everything else is left to
    /// the optimizer.
    pub fn from_args(args: &[Value]) -> Result<Self, Error> {
        let options = options::validate_args(args)?;
        let optimizer = O::new(options)?;

        tracing::debug!(options = ?optimizer.options(), "created clean-css adapter");

        Ok(Self { optimizer })
    }

    /// Return the effective options of the optimizer.
    pub fn options(&self) -> &O::Options {
        self.optimizer.options()
    }

    /// Return the wrapped optimizer.
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Minify CSS.
    ///
    /// Takes either a CSS string or an object of named sources, optionally
    /// followed by an input source map (only after a CSS string).
    ///
    /// Invalid arguments are reported right away; the returned
    /// [`Minification`] only fails with errors reported by clean-css.
    pub fn minify(&self, args: &[Value]) -> Result<Minification, Error> {
        let (input, source_map) = validate_args(args)?;

        let (sender, receiver) = oneshot::channel();

        tracing::debug!(
            input = input.kind(),
            source_map = source_map.is_some(),
            "minifying CSS"
        );

        // The error list mirrors `minified.errors`
        self.optimizer.minify(input, source_map, move |_, minified| {
            // The caller may have dropped the future already
            let _ = sender.send(settle(minified));
        });

        Ok(Minification { receiver })
    }
}

/// Check the positional arguments of [`CleanCssAsync::minify`].
fn validate_args(args: &[Value]) -> Result<(&Value, Option<&Value>), Error> {
    match args {
        [] | [_, _, _, ..] => Err(Error::ArgumentCount {
            expected: MINIFY_ARITY,
            received: args.len(),
        }),
        [input] if input.is_str() || input.is_map() => Ok((input, None)),
        [input] => Err(type_error("<string> or <Object> as its first argument", input)),
        [input, _] if !input.is_str() => Err(type_error(
            "<string> as its first argument when it takes 2 arguments",
            input,
        )),
        [_, source_map] if !source_map.is_str() => Err(type_error(
            "<string> as its second argument when it takes 2 arguments",
            source_map,
        )),
        [input, source_map] => Ok((input, Some(source_map))),
    }
}

fn type_error(expected: &str, received: &Value) -> Error {
    Error::ArgumentType {
        expected: format!("CleanCssAsync::minify() to receive {expected}"),
        received: received.clone(),
        hint: None,
    }
}

/// Turn a clean-css result into the outcome of a [`Minification`].
fn settle(minified: Minified) -> Result<Minified, Error> {
    let problems: Vec<_> = minified
        .errors
        .iter()
        .chain(&minified.warnings)
        .cloned()
        .collect();

    if problems.is_empty() {
        Ok(minified)
    } else {
        tracing::debug!(problems = problems.len(), "rejecting minified CSS");
        Err(Error::Optimization { problems })
    }
}

/// Future returned by [`CleanCssAsync::minify`].
///
/// Resolves once, to the clean-css result or to the aggregated diagnostics.
/// Dropping it does not stop the optimization.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Minification {
    receiver: oneshot::Receiver<Result<Minified, Error>>,
}

impl Future for Minification {
    type Output = Result<Minified, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            .map(|settled| settled.unwrap_or(Err(Error::Abandoned)))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::{settle, validate_args};
    use crate::{clean_css::Minified, ErrorKind, Map, Value};

    #[test]
    fn arity() {
        let error = validate_args(&[]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingArguments);
        assert_eq!(
            error.to_string(),
            "Expected 1 or 2 arguments (<string|Object>[, <string>]), but got no arguments."
        );

        let error = validate_args(&["".into(), "".into(), "".into()]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TooManyArguments);
        assert_eq!(
            error.to_string(),
            "Expected 1 or 2 arguments (<string|Object>[, <string>]), but got 3 arguments."
        );
    }

    #[test]
    fn single_argument() {
        assert!(validate_args(&["a{}".into()]).is_ok());
        assert!(validate_args(&[Value::Map(Map::new())]).is_ok());

        let error = validate_args(&[Value::Seq(vec![])]).unwrap_err();

        assert_eq!(error.code(), Some("ERR_INVALID_ARG_TYPE"));
        assert_eq!(
            error.to_string(),
            "Expected CleanCssAsync::minify() to receive <string> or <Object> as its first \
             argument, but got [] (array)."
        );
    }

    #[test]
    fn two_arguments() {
        let args: [Value; 2] = ["a{}".into(), "{}".into()];
        let (input, source_map) = validate_args(&args).unwrap();

        assert_eq!(input, &Value::from("a{}"));
        assert_eq!(source_map, Some(&Value::from("{}")));

        let error = validate_args(&[Value::Map(Map::new()), "".into()]).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Expected CleanCssAsync::minify() to receive <string> as its first argument when it \
             takes 2 arguments, but got {} (object)."
        );

        let error = validate_args(&["".into(), Value::F64(-0.0)]).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Expected CleanCssAsync::minify() to receive <string> as its second argument when it \
             takes 2 arguments, but got -0 (number)."
        );
    }

    #[test]
    fn settle_without_problems() {
        let minified = Minified {
            styles: "a{color:red}".into(),
            ..Minified::default()
        };

        assert_eq!(settle(minified.clone()).unwrap(), minified);
    }

    #[test]
    fn settle_errors_then_warnings() {
        let minified = Minified {
            errors: vec!["e1".into(), "e2".into()],
            warnings: vec!["w1".into()],
            ..Minified::default()
        };

        let error = settle(minified).unwrap_err();

        assert!(matches!(
            &error,
            crate::Error::Optimization { problems } if problems == &["e1", "e2", "w1"]
        ));
    }

    #[test]
    fn abandoned() {
        let (sender, receiver) = futures::channel::oneshot::channel();
        drop(sender);

        let result = block_on(super::Minification { receiver });

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Abandoned);
    }
}

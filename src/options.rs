//! Validate constructor arguments before they reach clean-css.

use crate::{Error, Value};

/// Option that is always enabled by the adapter.
const RETURN_PROMISE: &str = "returnPromise";

/// Option that must be a string when present.
const REBASE_TO: &str = "rebaseTo";

/// Check the constructor arguments.
///
/// Returns the options to forward to clean-css, unchanged.
pub(crate) fn validate_args(args: &[Value]) -> Result<Option<&Value>, Error> {
    match args {
        [] => Ok(None),
        [options] => validate(options).map(Some),
        _ => Err(Error::ArgumentCount {
            expected: "0 or 1 argument (<Object>)",
            received: args.len(),
        }),
    }
}

/// Check a single options argument.
pub(crate) fn validate(options: &Value) -> Result<&Value, Error> {
    let Some(map) = options.as_map() else {
        return Err(Error::ArgumentType {
            expected: "an <Object> to specify clean-css options".into(),
            received: options.clone(),
            hint: None,
        });
    };

    if let Some(value) = map.get(RETURN_PROMISE) {
        return Err(Error::Configuration {
            option: RETURN_PROMISE,
            reason: "clean-css-async always returns a future and `returnPromise` option is \
                     unconfigurable",
            received: value.clone(),
        });
    }

    match map.get(REBASE_TO) {
        None | Some(Value::Str(_)) => {},
        Some(value) => {
            // `false` and `null` usually mean "disable rebasing"
            let hint = matches!(value, Value::Bool(false) | Value::Unit).then_some(
                " If you want to disable `rebaseTo` option, do not pass any values to \
                 `rebaseTo`.",
            );
            return Err(Error::ArgumentType {
                expected: "`rebaseTo` option to be a string or undefined".into(),
                received: value.clone(),
                hint,
            });
        },
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::{validate, validate_args};
    use crate::{ErrorKind, Map, Value};

    fn options(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    #[test]
    fn no_arguments() {
        assert_eq!(validate_args(&[]).unwrap(), None);
    }

    #[test]
    fn forward_unchanged() {
        let value = options([
            ("level", Value::I64(2)),
            ("rebaseTo", Value::from("dist")),
            ("whatever", Value::Seq(vec![])),
        ]);

        assert_eq!(validate_args(std::slice::from_ref(&value)).unwrap(), Some(&value));
    }

    #[test]
    fn too_many_arguments() {
        let error = validate_args(&[Value::Map(Map::new()), Value::Map(Map::new())]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TooManyArguments);
        assert_eq!(
            error.to_string(),
            "Expected 0 or 1 argument (<Object>), but got 2 arguments."
        );
    }

    #[test]
    fn non_object() {
        for (value, rendered) in [
            (Value::I64(1), "1 (number)"),
            (Value::Seq(vec![]), "[] (array)"),
            (Value::Unit, "null (null)"),
            (Value::from("{}"), "'{}' (string)"),
        ] {
            let error = validate(&value).unwrap_err();

            assert_eq!(error.code(), Some("ERR_INVALID_ARG_TYPE"));
            assert_eq!(
                error.to_string(),
                format!("Expected an <Object> to specify clean-css options, but got {rendered}.")
            );
        }
    }

    #[test]
    fn return_promise() {
        for value in [Value::Bool(true), Value::Bool(false), Value::Unit] {
            let error = validate(&options([("returnPromise", value.clone())])).unwrap_err();

            assert_eq!(error.kind(), ErrorKind::ConfigurationConflict);
            assert!(error
                .to_string()
                .starts_with("clean-css-async always returns a future"));
            assert!(error.to_string().ends_with(&format!("But {value} is provided.")));
        }
    }

    #[test]
    fn rebase_to_type() {
        let error = validate(&options([("rebaseTo", Value::Seq(vec![]))])).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidArgumentType);
        assert_eq!(
            error.to_string(),
            "Expected `rebaseTo` option to be a string or undefined, but got [] (array)."
        );
    }

    #[test]
    fn rebase_to_disabled() {
        for value in [Value::Bool(false), Value::Unit] {
            let error = validate(&options([("rebaseTo", value)])).unwrap_err();

            assert!(error.to_string().ends_with(
                "If you want to disable `rebaseTo` option, do not pass any values to `rebaseTo`."
            ));
        }

        let error = validate(&options([("rebaseTo", Value::Bool(true))])).unwrap_err();

        assert!(!error.to_string().contains("If you want to disable"));
    }
}

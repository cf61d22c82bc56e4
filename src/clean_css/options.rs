//! Options understood by [`CleanCss`](super::CleanCss).

use std::collections::BTreeMap;

use serde::{de::IgnoredAny, Deserialize, Deserializer};
use thiserror::Error;

use crate::util::value::{from_value, Value, ValueError};

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Options do not match the expected structure.
    #[error("invalid clean-css options: {0}")]
    Value(#[from] ValueError),
    /// Unknown optimization level.
    #[error("`level` option must be 0, 1 or 2, but got {0}")]
    Level(u8),
}

/// Effective clean-css configuration.
///
/// Unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Optimization level.
    ///
    /// `0` only removes whitespace, `1` and `2` optimize rules too.
    ///
    /// Also accepts the object form `{ 1: {..}, 2: {..} }`, whose highest
    /// key is the level.
    #[serde(deserialize_with = "level")]
    pub level: u8,

    /// Which `@import` rules may be kept.
    pub inline: Inline,

    /// Directory relative URLs are rewritten against.
    pub rebase_to: Option<String>,

    /// Whether to build a source map.
    pub source_map: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: 1,
            inline: Inline::default(),
            rebase_to: None,
            source_map: false,
        }
    }
}

impl Options {
    /// Read options from an optional [`Value`].
    pub fn from_value(value: Option<&Value>) -> Result<Self, OptionsError> {
        let options: Self = match value {
            Some(value) => from_value(value.clone())?,
            None => Self::default(),
        };

        if options.level > 2 {
            return Err(OptionsError::Level(options.level));
        }

        for option in unsupported(value) {
            tracing::warn!(option, "clean-css option is not supported and will be ignored");
        }

        Ok(options)
    }
}

/// Options accepted for compatibility but not applied.
const UNSUPPORTED: &[&str] = &["compatibility"];

/// List the unsupported options present in `value`.
fn unsupported(value: Option<&Value>) -> Vec<&'static str> {
    let Some(map) = value.and_then(Value::as_map) else {
        return Vec::new();
    };

    UNSUPPORTED
        .iter()
        .copied()
        .filter(|option| map.contains_key(*option))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(u8),
    Keys(BTreeMap<String, IgnoredAny>),
}

fn level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match LevelRepr::deserialize(deserializer)? {
        LevelRepr::Number(level) => Ok(level),
        LevelRepr::Keys(keys) => keys.keys().try_fold(0, |max, key| {
            key.parse::<u8>()
                .map(|level| max.max(level))
                .map_err(|_| D::Error::custom(format!("unknown optimization level `{key}`")))
        }),
    }
}

/// Rules for `@import` inlining.
///
/// Accepts `false` (same as `["none"]`), a single rule, or a list of rules.
/// A rule is `"local"`, `"remote"`, `"all"`, `"none"`, or a host name.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "InlineRepr")]
pub struct Inline(pub Vec<String>);

impl Default for Inline {
    fn default() -> Self {
        Self(vec!["local".to_string()])
    }
}

impl Inline {
    /// Check whether a remote `@import` of `url` is allowed.
    pub fn allows_remote(&self, url: &str) -> bool {
        let host = remote_host(url);
        self.0.iter().any(|rule| match rule.as_str() {
            "remote" | "all" => true,
            "local" | "none" => false,
            rule => host == Some(rule),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InlineRepr {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

impl From<InlineRepr> for Inline {
    fn from(repr: InlineRepr) -> Self {
        match repr {
            InlineRepr::Flag(true) => Self::default(),
            InlineRepr::Flag(false) => Self(vec!["none".to_string()]),
            InlineRepr::One(rule) => Self(vec![rule]),
            InlineRepr::Many(rules) => Self(rules),
        }
    }
}

/// Return the host of a remote URL, or [`None`] for local URLs.
pub(super) fn remote_host(url: &str) -> Option<&str> {
    let rest = ["http://", "https://", "//"]
        .into_iter()
        .find_map(|scheme| url.strip_prefix(scheme))?;

    rest.split(['/', '?', '#']).next()
}

//! Rewrite relative URLs against the `rebaseTo` directory.

use std::convert::Infallible;

use lightningcss::{
    rules::import::ImportRule,
    values::url::Url,
    visit_types,
    visitor::{VisitTypes, Visitor},
};

/// Visitor prefixing relative `url()`s so they stay valid from `rebaseTo`.
#[derive(Debug)]
pub(super) struct Rebase {
    prefix: String,
}

impl Rebase {
    /// Create a visitor for the target directory.
    ///
    /// Only relative targets without `..` can be rebased lexically; other
    /// targets return [`None`].
    pub fn to(target: &str) -> Option<Self> {
        if target.starts_with(['/', '\\']) {
            return None;
        }

        let mut depth = 0;
        for segment in target.split(['/', '\\']) {
            match segment {
                "" | "." => {},
                ".." => return None,
                _ => depth += 1,
            }
        }

        Some(Self {
            prefix: "../".repeat(depth),
        })
    }

    fn rebase(&self, url: &str) -> Option<String> {
        (!self.prefix.is_empty() && is_relative(url)).then(|| format!("{}{url}", self.prefix))
    }

    /// Rewrite the URL of an `@import` rule.
    ///
    /// The visitor skips these, they are not `url()` values.
    pub fn rebase_import(&self, import: &mut ImportRule) {
        if let Some(rebased) = self.rebase(&import.url) {
            import.url = rebased.into();
        }
    }
}

impl<'i> Visitor<'i> for Rebase {
    type Error = Infallible;

    fn visit_types(&self) -> VisitTypes {
        visit_types!(URLS)
    }

    fn visit_url(&mut self, url: &mut Url<'i>) -> Result<(), Self::Error> {
        if let Some(rebased) = self.rebase(&url.url) {
            url.url = rebased.into();
        }
        Ok(())
    }
}

/// Check whether a URL is a relative path.
fn is_relative(url: &str) -> bool {
    !(url.is_empty()
        || url.starts_with(['/', '#'])
        || url
            .split(['/', '?', '#'])
            .next()
            .is_some_and(|segment| segment.contains(':')))
}

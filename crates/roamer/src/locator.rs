//! Element selectors used by page objects.
//!
//! A [`Selector`] only describes *how* to find elements; resolving it is the
//! job of a [`crate::session::UiSession`]. Selectors can render themselves as
//! a JavaScript expression returning every match, for sessions that drive a
//! browser through script evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g., "div.auto_sugg_tttl")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id
    Id(String),
    /// Single class name
    ClassName(String),
    /// Elements whose own text equals the value
    Text(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class-name selector
    #[must_use]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Create an exact-text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// JavaScript expression evaluating to an array of all matches
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 return Array.from({{length: r.snapshotLength}}, (_, i) => r.snapshotItem(i)); }})()"
            ),
            Self::Id(id) => format!("[document.getElementById({id:?})].filter(Boolean)"),
            Self::ClassName(c) => {
                format!("Array.from(document.getElementsByClassName({c:?}))")
            }
            Self::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.trim() === {t:?})"
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::ClassName(s) => write!(f, "class={s}"),
            Self::Text(s) => write!(f, "text={s}"),
        }
    }
}

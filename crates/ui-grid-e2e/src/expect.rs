// Expectations - single-shot assertions against locators
//
// Each expectation queries the page once and fails with
// `Error::AssertionFailed` on mismatch. There is no polling: the driver is
// responsible for waiting until the page is stable.

use crate::error::{Error, Result};
use crate::locator::Locator;
use regex::Regex;
use std::fmt;

/// Pattern a piece of element text must match.
///
/// A string pattern is compiled as a regular expression and searched anywhere
/// in the text, so `"Bob"` matches `"Bobby"` and `"^Bob$"` does not.
/// Use [`TextPattern::literal`] to match a string containing regex
/// metacharacters verbatim.
#[derive(Debug, Clone)]
pub struct TextPattern {
    regex: Regex,
}

impl TextPattern {
    /// Compiles `pattern` as a regular expression
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Matches `text` verbatim (unanchored)
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&regex::escape(text))
    }

    /// Source of the underlying regular expression
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether `text` contains a match
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.regex.as_str())
    }
}

impl From<Regex> for TextPattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

/// Conversion into a [`TextPattern`], fallible for string sources.
pub trait IntoTextPattern {
    fn into_text_pattern(self) -> Result<TextPattern>;
}

impl IntoTextPattern for TextPattern {
    fn into_text_pattern(self) -> Result<TextPattern> {
        Ok(self)
    }
}

impl IntoTextPattern for &TextPattern {
    fn into_text_pattern(self) -> Result<TextPattern> {
        Ok(self.clone())
    }
}

impl IntoTextPattern for Regex {
    fn into_text_pattern(self) -> Result<TextPattern> {
        Ok(TextPattern::from(self))
    }
}

impl IntoTextPattern for &str {
    fn into_text_pattern(self) -> Result<TextPattern> {
        TextPattern::new(self)
    }
}

impl IntoTextPattern for String {
    fn into_text_pattern(self) -> Result<TextPattern> {
        TextPattern::new(&self)
    }
}

impl IntoTextPattern for &String {
    fn into_text_pattern(self) -> Result<TextPattern> {
        TextPattern::new(self)
    }
}

/// Creates an expectation for a locator.
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::expect;
///
/// expect(grid.get_row(0, None)?).to_match("Alice").await?;
/// expect(grid.get_grid(None)?.all(By::css(".ui-grid-row"))).to_have_count(3).await?;
/// ```
pub fn expect(locator: Locator) -> Expectation {
    Expectation::new(locator)
}

/// Asserts that a computed value equals the expected one.
///
/// `what` names the value in the failure message.
pub fn expect_equal<T>(actual: T, expected: T, what: &str) -> Result<()>
where
    T: PartialEq + fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(Error::AssertionFailed(format!(
            "Expected {what} to equal {expected:?}, but was {actual:?}"
        )))
    }
}

/// Expectation wraps a locator and provides single-shot assertion methods.
pub struct Expectation {
    locator: Locator,
    message: Option<String>,
}

// to_* methods consume self, matching the chained expect API
#[allow(clippy::wrong_self_convention)]
impl Expectation {
    pub(crate) fn new(locator: Locator) -> Self {
        Self {
            locator,
            message: None,
        }
    }

    /// Appends a custom message to the failure text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, detail: String) -> Error {
        match &self.message {
            Some(message) => Error::AssertionFailed(format!("{detail} ({message})")),
            None => Error::AssertionFailed(detail),
        }
    }

    /// Asserts that the locator matches exactly `expected` elements.
    pub async fn to_have_count(self, expected: usize) -> Result<()> {
        let actual = self.locator.count().await?;
        if actual == expected {
            return Ok(());
        }
        Err(self.fail(format!(
            "Expected '{}' to have count {}, but found {}",
            self.locator, expected, actual
        )))
    }

    /// Asserts that the element's text matches the pattern.
    pub async fn to_match(self, pattern: impl IntoTextPattern) -> Result<()> {
        let pattern = pattern.into_text_pattern()?;
        let text = self.locator.text().await?;
        if pattern.is_match(&text) {
            return Ok(());
        }
        Err(self.fail(format!(
            "Expected text of '{}' to match {}, but was {:?}",
            self.locator, pattern, text
        )))
    }

    /// Asserts that exactly `expected` members of the collection are displayed.
    pub async fn to_have_displayed_count(self, expected: usize) -> Result<()> {
        let actual = self.locator.displayed_count().await?;
        if actual == expected {
            return Ok(());
        }
        Err(self.fail(format!(
            "Expected '{}' to have {} displayed, but found {}",
            self.locator, expected, actual
        )))
    }
}

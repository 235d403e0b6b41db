// Locator - lazy element chain
//
// A Locator records how to find element(s) as a list of steps and does not
// touch the page until an operation is awaited. Every operation hands the
// whole chain to the driver, so results always reflect the current DOM.
//
// Chain building mirrors the protractor idiom the grid tests were written in:
// - element(by)  first match inside the current scope
// - all(by)      every match inside the current scope
// - row(n)       nth member of the current collection (0-indexed)

use crate::driver::Driver;
use crate::error::Result;
use crate::selector::By;
use futures_util::future::try_join_all;
use std::fmt;
use std::sync::Arc;

/// One link of a locator chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// First element matching the query inside the current scope
    Element(By),
    /// Every element matching the query inside the current scope
    All(By),
    /// Element at the given position of the current collection
    Nth(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Element(by) => write!(f, "{by}"),
            Step::All(by) => write!(f, "all({by})"),
            Step::Nth(index) => write!(f, "row({index})"),
        }
    }
}

pub(crate) fn describe_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Locator represents a way to find grid element(s) at any given moment.
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::{By, Locator};
///
/// let header = Locator::root(driver, By::id("grid1"))
///     .element(By::css(".ui-grid-header"));
/// let second_column = header.repeater_row("col in colContainer.renderedColumns", 1);
/// let text = second_column.text().await?;
/// ```
#[derive(Clone)]
pub struct Locator {
    driver: Arc<dyn Driver>,
    steps: Vec<Step>,
}

impl Locator {
    /// Starts a chain at the first document element matching `by`
    pub fn root(driver: Arc<dyn Driver>, by: By) -> Self {
        Self {
            driver,
            steps: vec![Step::Element(by)],
        }
    }

    /// Starts a chain at every document element matching `by`
    pub fn root_all(driver: Arc<dyn Driver>, by: By) -> Self {
        Self {
            driver,
            steps: vec![Step::All(by)],
        }
    }

    fn push(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            driver: Arc::clone(&self.driver),
            steps,
        }
    }

    /// Steps of this chain, outermost first
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// First element matching `by` inside this element
    pub fn element(&self, by: By) -> Locator {
        self.push(Step::Element(by))
    }

    /// Every element matching `by` inside this element
    pub fn all(&self, by: By) -> Locator {
        self.push(Step::All(by))
    }

    /// The element at `index` (0-indexed) of this collection
    pub fn row(&self, index: usize) -> Locator {
        self.push(Step::Nth(index))
    }

    /// The first element of this collection
    pub fn first(&self) -> Locator {
        self.row(0)
    }

    /// Shorthand for `all(By::repeater(expression)).row(index)`
    pub fn repeater_row(&self, expression: &str, index: usize) -> Locator {
        self.all(By::repeater(expression)).row(index)
    }

    /// Human-readable chain, used in error messages
    pub fn description(&self) -> String {
        describe_steps(&self.steps)
    }

    /// Returns the number of elements matching this locator.
    pub async fn count(&self) -> Result<usize> {
        self.driver.count(&self.steps).await
    }

    /// Returns the visible text of the element.
    pub async fn text(&self) -> Result<String> {
        self.driver.text(&self.steps).await
    }

    /// Returns whether the element is displayed.
    pub async fn is_displayed(&self) -> Result<bool> {
        self.driver.is_displayed(&self.steps).await
    }

    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        self.driver.click(&self.steps).await
    }

    /// Types text into the element.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.driver.send_keys(&self.steps, text).await
    }

    /// Display flag of every member of this collection, in order.
    ///
    /// The per-member queries are issued together and joined; the first
    /// failure is returned.
    pub async fn displayed_flags(&self) -> Result<Vec<bool>> {
        let total = self.count().await?;
        let checks = (0..total).map(|index| {
            let member = self.row(index);
            async move { member.is_displayed().await }
        });
        try_join_all(checks).await
    }

    /// Number of members of this collection that are displayed.
    pub async fn displayed_count(&self) -> Result<usize> {
        let flags = self.displayed_flags().await?;
        Ok(flags.into_iter().filter(|displayed| *displayed).count())
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("steps", &self.steps)
            .finish()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// PlaywrightDriver - real-browser backend (feature "playwright")
//
// Locator chains are flattened into a single Playwright selector:
// - Element(by) -> css=<by> >> nth=0
// - All(by)     -> css=<by>
// - Nth(i)      -> nth=<i>
// joined with `>>`, so each part is evaluated inside the previous one.
//
// Mouse actions are expressed through `hover` (moves the pointer to the
// element's centre) followed by raw mouse down/up.

use crate::actions::{Action, Key};
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::locator::Step;
use async_trait::async_trait;
use playwright_rs::{Locator, Page};

/// [`Driver`] backed by a Playwright page.
///
/// # Example
///
/// ```ignore
/// use playwright_rs::Playwright;
/// use ui_grid_e2e::{GridTest, playwright::PlaywrightDriver};
///
/// let playwright = Playwright::launch().await?;
/// let browser = playwright.chromium().launch().await?;
/// let page = browser.new_page().await?;
/// page.goto("http://localhost:9000/docs/#/tutorial/101_intro", None).await?;
///
/// let grid = GridTest::new(PlaywrightDriver::new(page));
/// grid.expect_row_count(3, Some("grid1")).await?;
/// ```
#[derive(Clone)]
pub struct PlaywrightDriver {
    page: Page,
}

impl PlaywrightDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// The wrapped page
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn locator(&self, steps: &[Step]) -> Result<Locator> {
        let selector = playwright_selector(steps)?;
        tracing::trace!(%selector, "Resolving Playwright locator");
        Ok(self.page.locator(&selector).await)
    }

    async fn dispatch(
        &self,
        action: &Action,
        pressed: &mut Vec<Key>,
        mouse_held: &mut bool,
    ) -> Result<()> {
        match action {
            Action::KeyDown(key) => {
                self.page.keyboard().down(key.as_str()).await?;
                if !pressed.contains(key) {
                    pressed.push(*key);
                }
            }
            Action::KeyUp(key) => {
                self.page.keyboard().up(key.as_str()).await?;
                pressed.retain(|held| held != key);
            }
            Action::Click(target) => self.locator(target.steps()).await?.click(None).await?,
            Action::MouseDown(target) => {
                self.locator(target.steps()).await?.hover(None).await?;
                self.page.mouse().down(None).await?;
                *mouse_held = true;
            }
            Action::MouseMove(target) => self.locator(target.steps()).await?.hover(None).await?,
            Action::MouseUp => {
                self.page.mouse().up(None).await?;
                *mouse_held = false;
            }
        }
        Ok(())
    }

    // Best effort; the caller gets the failing action's error
    async fn release(&self, pressed: &[Key], mouse_held: bool) {
        tracing::debug!(?pressed, mouse_held, "Releasing input after failed action sequence");
        for key in pressed.iter().rev() {
            if let Err(err) = self.page.keyboard().up(key.as_str()).await {
                tracing::warn!(key = key.as_str(), %err, "Failed to release key");
            }
        }
        if mouse_held
            && let Err(err) = self.page.mouse().up(None).await
        {
            tracing::warn!(%err, "Failed to release mouse button");
        }
    }
}

/// Flattens a locator chain into a Playwright selector string
pub fn playwright_selector(steps: &[Step]) -> Result<String> {
    if steps.is_empty() {
        return Err(Error::Driver("empty locator chain".to_string()));
    }
    let parts: Vec<String> = steps
        .iter()
        .map(|step| match step {
            Step::Element(by) => format!("css={} >> nth=0", by.to_css()),
            Step::All(by) => format!("css={}", by.to_css()),
            Step::Nth(index) => format!("nth={index}"),
        })
        .collect();
    Ok(parts.join(" >> "))
}

#[async_trait]
impl Driver for PlaywrightDriver {
    async fn count(&self, steps: &[Step]) -> Result<usize> {
        Ok(self.locator(steps).await?.count().await?)
    }

    async fn text(&self, steps: &[Step]) -> Result<String> {
        Ok(self.locator(steps).await?.inner_text().await?)
    }

    async fn is_displayed(&self, steps: &[Step]) -> Result<bool> {
        Ok(self.locator(steps).await?.is_visible().await?)
    }

    async fn click(&self, steps: &[Step]) -> Result<()> {
        Ok(self.locator(steps).await?.click(None).await?)
    }

    async fn send_keys(&self, steps: &[Step], text: &str) -> Result<()> {
        // Focus first so the keystrokes land in the element, then type
        // without clearing, like WebDriver's sendKeys.
        self.locator(steps).await?.click(None).await?;
        Ok(self.page.keyboard().type_text(text, None).await?)
    }

    async fn perform(&self, actions: &[Action]) -> Result<()> {
        let mut pressed: Vec<Key> = Vec::new();
        let mut mouse_held = false;
        for action in actions {
            if let Err(err) = self.dispatch(action, &mut pressed, &mut mouse_held).await {
                self.release(&pressed, mouse_held).await;
                return Err(err);
            }
        }
        Ok(())
    }
}

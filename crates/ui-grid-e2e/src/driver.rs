// Driver - the browser automation seam
//
// Everything that touches a live page goes through this trait. The grid
// helpers only build locator chains and interpret results; locating elements,
// simulating input and scheduling belong to the implementation.

use crate::actions::Action;
use crate::error::Result;
use crate::locator::Step;
use async_trait::async_trait;

/// Browser automation backend used by [`Locator`](crate::Locator) and
/// [`ActionSequence`](crate::ActionSequence).
///
/// Each element method receives the full locator chain and resolves it fresh;
/// implementations must not cache element handles between calls.
///
/// Implementations in this crate:
/// - [`MockDom`](crate::mock::MockDom): in-memory element tree with an
///   interaction history
/// - `PlaywrightDriver` (feature `playwright`): a real browser page
#[async_trait]
pub trait Driver: Send + Sync {
    /// Number of elements the chain matches. A chain whose scope is missing
    /// matches nothing.
    async fn count(&self, steps: &[Step]) -> Result<usize>;

    /// Visible text of the single element the chain resolves to
    async fn text(&self, steps: &[Step]) -> Result<String>;

    /// Whether the element is displayed
    async fn is_displayed(&self, steps: &[Step]) -> Result<bool>;

    /// Click the element
    async fn click(&self, steps: &[Step]) -> Result<()>;

    /// Type text into the element
    async fn send_keys(&self, steps: &[Step], text: &str) -> Result<()>;

    /// Run an action sequence in order
    async fn perform(&self, actions: &[Action]) -> Result<()>;
}

// Actions - simulated user input sequences
//
// Mirrors the WebDriver "actions" chain: queue key-down/up, mouse-down/move/up
// and click steps, then hand the whole sequence to the driver in one
// `perform()` call.

use crate::driver::Driver;
use crate::error::Result;
use crate::locator::Locator;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Modifier keys that can be held during an action sequence
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::Key;
///
/// assert_eq!(Key::Shift.as_str(), "Shift");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Key {
    /// Alt key
    Alt,
    /// Control key
    Control,
    /// Meta key (Command on macOS, Windows key on Windows)
    Meta,
    /// Shift key
    Shift,
}

impl Key {
    /// Key name as understood by browser keyboard APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Alt => "Alt",
            Key::Control => "Control",
            Key::Meta => "Meta",
            Key::Shift => "Shift",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an action sequence
#[derive(Debug, Clone)]
pub enum Action {
    /// Press and hold a key
    KeyDown(Key),
    /// Release a held key
    KeyUp(Key),
    /// Click the element
    Click(Locator),
    /// Move the pointer onto the element and press the primary button
    MouseDown(Locator),
    /// Move the pointer onto the element
    MouseMove(Locator),
    /// Release the primary button at the current pointer position
    MouseUp,
}

/// Builder for an action sequence.
///
/// Nothing is sent to the driver until [`ActionSequence::perform`] is awaited.
///
/// # Example
///
/// ```ignore
/// grid.actions()
///     .key_down(Key::Shift)
///     .click(&header_cell)
///     .key_up(Key::Shift)
///     .perform()
///     .await?;
/// ```
#[derive(Clone)]
pub struct ActionSequence {
    driver: Arc<dyn Driver>,
    actions: Vec<Action>,
}

impl ActionSequence {
    /// Creates an empty sequence bound to a driver
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            actions: Vec::new(),
        }
    }

    /// Queue a key press
    pub fn key_down(mut self, key: Key) -> Self {
        self.actions.push(Action::KeyDown(key));
        self
    }

    /// Queue a key release
    pub fn key_up(mut self, key: Key) -> Self {
        self.actions.push(Action::KeyUp(key));
        self
    }

    /// Queue a click on the element
    pub fn click(mut self, target: &Locator) -> Self {
        self.actions.push(Action::Click(target.clone()));
        self
    }

    /// Queue a button press over the element
    pub fn mouse_down(mut self, target: &Locator) -> Self {
        self.actions.push(Action::MouseDown(target.clone()));
        self
    }

    /// Queue a pointer move onto the element
    pub fn mouse_move(mut self, target: &Locator) -> Self {
        self.actions.push(Action::MouseMove(target.clone()));
        self
    }

    /// Queue a button release
    pub fn mouse_up(mut self) -> Self {
        self.actions.push(Action::MouseUp);
        self
    }

    /// Queued actions, in order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Sends the queued actions to the driver
    pub async fn perform(self) -> Result<()> {
        tracing::trace!(steps = self.actions.len(), "Performing action sequence");
        self.driver.perform(&self.actions).await
    }
}

impl fmt::Debug for ActionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSequence")
            .field("actions", &self.actions)
            .finish()
    }
}

// MockDom - in-memory driver for testing grid helpers without a browser
//
// Holds a static element tree shaped like the rendered grid and resolves
// locator chains against it the way a browser would: document order,
// descendant-only scoping, first-match for `element`, zero-based `row`.
//
// Every interaction (clicks, typed text, action sequences) is appended to a
// history so tests can assert on what the helpers did.
//
// CSS support is deliberately small: compound selectors made of a tag name,
// `#id` and `.class` parts. Anything else is reported as a driver error.

use crate::actions::{Action, Key};
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::locator::{Step, describe_steps};
use crate::selector::By;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;

const ROOT: usize = 0;

/// Element description used to build a [`MockDom`].
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::mock::MockElement;
///
/// let header = MockElement::new("div")
///     .class("ui-grid-header")
///     .child(MockElement::new("div").repeat("col in cols").text("Name").label("name-header"));
/// ```
#[derive(Debug, Clone)]
pub struct MockElement {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    repeat: Option<String>,
    text: Option<String>,
    displayed: bool,
    label: Option<String>,
    shows_on_click: Vec<String>,
    children: Vec<MockElement>,
}

impl MockElement {
    /// New displayed element with the given tag name
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            repeat: None,
            text: None,
            displayed: true,
            label: None,
            shows_on_click: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the `id` attribute
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Set the `ng-repeat` expression
    pub fn repeat(mut self, expression: impl Into<String>) -> Self {
        self.repeat = Some(expression.into());
        self
    }

    /// Set the element's own text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Mark the element as not displayed
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Name used for this element in the interaction history
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Clicking this element displays the element with the given label
    pub fn shows_on_click(mut self, label: impl Into<String>) -> Self {
        self.shows_on_click.push(label.into());
        self
    }

    /// Append a child element
    pub fn child(mut self, child: MockElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements
    pub fn children(mut self, children: impl IntoIterator<Item = MockElement>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Something the helpers did to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Interaction {
    /// Element clicked while `modifiers` were held
    Click { target: String, modifiers: Vec<Key> },
    /// Text typed into an element
    SendKeys { target: String, text: String },
    KeyDown { key: Key },
    KeyUp { key: Key },
    MouseDown { target: String },
    MouseMove { target: String },
    MouseUp,
}

impl Interaction {
    /// A click with no modifiers held
    pub fn click(target: impl Into<String>) -> Self {
        Interaction::Click {
            target: target.into(),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    repeat: Option<String>,
    text: Option<String>,
    displayed: bool,
    label: Option<String>,
    shows_on_click: Vec<String>,
    value: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Node {
    fn name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        if let Some(id) = &self.id {
            return format!("#{id}");
        }
        match self.classes.first() {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn insert(&mut self, element: MockElement, parent: usize) {
        let index = self.nodes.len();
        self.nodes.push(Node {
            tag: element.tag,
            id: element.id,
            classes: element.classes,
            repeat: element.repeat,
            text: element.text,
            displayed: element.displayed,
            label: element.label,
            shows_on_click: element.shows_on_click,
            value: String::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        for child in element.children {
            self.insert(child, index);
        }
    }

    fn descendants(&self, scope: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[scope].children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn query(&self, scopes: &[usize], by: &By) -> Result<Vec<usize>> {
        let matcher = Matcher::parse(by)?;
        let mut found = Vec::new();
        for &scope in scopes {
            let mut candidates = Vec::new();
            self.descendants(scope, &mut candidates);
            for index in candidates {
                if matcher.matches(&self.nodes[index]) && !found.contains(&index) {
                    found.push(index);
                }
            }
        }
        Ok(found)
    }

    fn resolve(&self, steps: &[Step]) -> Result<Vec<usize>> {
        let mut current = vec![ROOT];
        for step in steps {
            current = match step {
                Step::Element(by) => self.query(&current, by)?.into_iter().take(1).collect(),
                Step::All(by) => self.query(&current, by)?,
                Step::Nth(index) => current.get(*index).copied().into_iter().collect(),
            };
            if current.is_empty() {
                break;
            }
        }
        Ok(current)
    }

    fn resolve_one(&self, steps: &[Step]) -> Result<usize> {
        self.resolve(steps)?
            .first()
            .copied()
            .ok_or_else(|| Error::ElementNotFound(describe_steps(steps)))
    }

    fn is_displayed(&self, index: usize) -> bool {
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            if !node.displayed {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    fn inner_text(&self, index: usize) -> String {
        if !self.is_displayed(index) {
            return String::new();
        }
        let node = &self.nodes[index];
        let mut parts = Vec::new();
        if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
            parts.push(text.to_string());
        }
        for &child in &node.children {
            let text = self.inner_text(child);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }

    fn interactable(&self, steps: &[Step]) -> Result<usize> {
        let index = self.resolve_one(steps)?;
        if !self.is_displayed(index) {
            return Err(Error::Driver(format!(
                "element not interactable: {} ({})",
                self.nodes[index].name(),
                describe_steps(steps)
            )));
        }
        Ok(index)
    }

    fn find_label(&self, label: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.label.as_deref() == Some(label))
    }

    fn apply_click(&mut self, index: usize) {
        let targets = self.nodes[index].shows_on_click.clone();
        for label in targets {
            if let Some(target) = self.find_label(&label) {
                self.nodes[target].displayed = true;
            }
        }
    }
}

#[derive(Debug, Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

enum Matcher {
    Id(String),
    Repeater(String),
    Css(SimpleSelector),
}

impl Matcher {
    fn parse(by: &By) -> Result<Self> {
        match by {
            By::Id(id) => Ok(Matcher::Id(id.clone())),
            By::Repeater(expr) => Ok(Matcher::Repeater(expr.clone())),
            By::Css(css) => parse_simple_selector(css).map(Matcher::Css),
        }
    }

    fn matches(&self, node: &Node) -> bool {
        match self {
            Matcher::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Matcher::Repeater(expr) => node
                .repeat
                .as_deref()
                .is_some_and(|repeat| repeat.contains(expr.as_str())),
            Matcher::Css(sel) => {
                sel.tag.as_deref().is_none_or(|tag| tag == node.tag)
                    && sel
                        .id
                        .as_deref()
                        .is_none_or(|id| node.id.as_deref() == Some(id))
                    && sel.classes.iter().all(|class| node.classes.contains(class))
            }
        }
    }
}

fn parse_simple_selector(css: &str) -> Result<SimpleSelector> {
    let unsupported = || Error::Driver(format!("MockDom does not support selector '{css}'"));
    let css = css.trim();
    if css.is_empty()
        || css
            .chars()
            .any(|ch| ch.is_whitespace() || ">+~,[]:*()".contains(ch))
    {
        return Err(unsupported());
    }

    let mut parts = Vec::new();
    let mut start = 0;
    for (offset, ch) in css.char_indices() {
        if (ch == '.' || ch == '#') && offset > start {
            parts.push(&css[start..offset]);
            start = offset;
        }
    }
    parts.push(&css[start..]);

    let mut selector = SimpleSelector::default();
    for part in parts {
        if let Some(class) = part.strip_prefix('.') {
            if class.is_empty() {
                return Err(unsupported());
            }
            selector.classes.push(class.to_string());
        } else if let Some(id) = part.strip_prefix('#') {
            if id.is_empty() || selector.id.is_some() {
                return Err(unsupported());
            }
            selector.id = Some(id.to_string());
        } else {
            selector.tag = Some(part.to_string());
        }
    }
    Ok(selector)
}

#[derive(Debug, Default)]
struct Inner {
    tree: RwLock<Tree>,
    history: Mutex<Vec<Interaction>>,
    held_keys: Mutex<Vec<Key>>,
}

/// In-memory [`Driver`] over a static element tree.
///
/// Cloning is cheap and clones share the same tree and history, so a test can
/// hand one clone to [`GridTest`](crate::GridTest) and keep another to inspect.
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    inner: Arc<Inner>,
}

/// Builder for MockDom
#[derive(Debug, Default)]
pub struct MockDomBuilder {
    children: Vec<MockElement>,
}

impl MockDomBuilder {
    /// Append a top-level element to the document
    pub fn child(mut self, element: MockElement) -> Self {
        self.children.push(element);
        self
    }

    /// Build the MockDom
    pub fn build(self) -> MockDom {
        let mut tree = Tree::default();
        tree.nodes.push(Node {
            tag: "#document".to_string(),
            id: None,
            classes: Vec::new(),
            repeat: None,
            text: None,
            displayed: true,
            label: None,
            shows_on_click: Vec::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
        });
        for child in self.children {
            tree.insert(child, ROOT);
        }
        MockDom {
            inner: Arc::new(Inner {
                tree: RwLock::new(tree),
                ..Inner::default()
            }),
        }
    }
}

impl MockDom {
    /// Create a new builder for MockDom
    pub fn builder() -> MockDomBuilder {
        MockDomBuilder::default()
    }

    /// Interactions recorded so far, oldest first
    pub fn history(&self) -> Vec<Interaction> {
        self.inner.history.lock().clone()
    }

    /// Forget recorded interactions
    pub fn clear_history(&self) {
        self.inner.history.lock().clear();
    }

    /// Text typed into the labelled element
    pub fn value_of(&self, label: &str) -> Option<String> {
        let tree = self.inner.tree.read();
        tree.find_label(label).map(|index| tree.nodes[index].value.clone())
    }

    /// Show or hide the labelled element. Returns false when no element has that label.
    pub fn set_displayed(&self, label: &str, displayed: bool) -> bool {
        let mut tree = self.inner.tree.write();
        match tree.find_label(label) {
            Some(index) => {
                tree.nodes[index].displayed = displayed;
                true
            }
            None => false,
        }
    }

    /// Replace the own text of the labelled element. Returns false when no element has that label.
    pub fn set_text(&self, label: &str, text: impl Into<String>) -> bool {
        let mut tree = self.inner.tree.write();
        match tree.find_label(label) {
            Some(index) => {
                tree.nodes[index].text = Some(text.into());
                true
            }
            None => false,
        }
    }

    fn record(&self, interaction: Interaction) {
        tracing::trace!(?interaction, "MockDom interaction");
        self.inner.history.lock().push(interaction);
    }

    fn click_node(&self, steps: &[Step]) -> Result<()> {
        let target = {
            let mut tree = self.inner.tree.write();
            let index = tree.interactable(steps)?;
            tree.apply_click(index);
            tree.nodes[index].name()
        };
        let modifiers = self.inner.held_keys.lock().clone();
        self.record(Interaction::Click { target, modifiers });
        Ok(())
    }

    fn dispatch(
        &self,
        action: &Action,
        pressed: &mut Vec<Key>,
        mouse_held: &mut bool,
    ) -> Result<()> {
        match action {
            Action::KeyDown(key) => {
                let mut held = self.inner.held_keys.lock();
                if !held.contains(key) {
                    held.push(*key);
                }
                drop(held);
                if !pressed.contains(key) {
                    pressed.push(*key);
                }
                self.record(Interaction::KeyDown { key: *key });
            }
            Action::KeyUp(key) => {
                self.inner.held_keys.lock().retain(|held| held != key);
                pressed.retain(|held| held != key);
                self.record(Interaction::KeyUp { key: *key });
            }
            Action::Click(target) => self.click_node(target.steps())?,
            Action::MouseDown(target) => {
                let target = self.target_name(target.steps())?;
                *mouse_held = true;
                self.record(Interaction::MouseDown { target });
            }
            Action::MouseMove(target) => {
                let target = self.target_name(target.steps())?;
                self.record(Interaction::MouseMove { target });
            }
            Action::MouseUp => {
                *mouse_held = false;
                self.record(Interaction::MouseUp);
            }
        }
        Ok(())
    }

    // Undo what a failed sequence left pressed, newest key first
    fn release(&self, pressed: &[Key], mouse_held: bool) {
        tracing::debug!(?pressed, mouse_held, "Releasing input after failed action sequence");
        for key in pressed.iter().rev() {
            self.inner.held_keys.lock().retain(|held| held != key);
            self.record(Interaction::KeyUp { key: *key });
        }
        if mouse_held {
            self.record(Interaction::MouseUp);
        }
    }

    fn target_name(&self, steps: &[Step]) -> Result<String> {
        let tree = self.inner.tree.read();
        let index = tree.interactable(steps)?;
        Ok(tree.nodes[index].name())
    }
}

#[async_trait]
impl Driver for MockDom {
    async fn count(&self, steps: &[Step]) -> Result<usize> {
        let count = self.inner.tree.read().resolve(steps)?.len();
        tracing::trace!(chain = %describe_steps(steps), count, "MockDom count");
        Ok(count)
    }

    async fn text(&self, steps: &[Step]) -> Result<String> {
        let tree = self.inner.tree.read();
        let index = tree.resolve_one(steps)?;
        Ok(tree.inner_text(index))
    }

    async fn is_displayed(&self, steps: &[Step]) -> Result<bool> {
        let tree = self.inner.tree.read();
        let index = tree.resolve_one(steps)?;
        Ok(tree.is_displayed(index))
    }

    async fn click(&self, steps: &[Step]) -> Result<()> {
        self.click_node(steps)
    }

    async fn send_keys(&self, steps: &[Step], text: &str) -> Result<()> {
        let target = {
            let mut tree = self.inner.tree.write();
            let index = tree.interactable(steps)?;
            tree.nodes[index].value.push_str(text);
            tree.nodes[index].name()
        };
        self.record(Interaction::SendKeys {
            target,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn perform(&self, actions: &[Action]) -> Result<()> {
        let mut pressed = Vec::new();
        let mut mouse_held = false;
        for action in actions {
            if let Err(err) = self.dispatch(action, &mut pressed, &mut mouse_held) {
                self.release(&pressed, mouse_held);
                return Err(err);
            }
        }
        Ok(())
    }
}

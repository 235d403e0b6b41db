// Selector - element query primitives
//
// A `By` describes one lookup step: by element id, by CSS selector, or by
// position in an AngularJS repeated-template collection (`ng-repeat`).
//
// The ui-grid class names and repeater expressions used by the helpers live in
// the `ui_grid` submodule so a grid template change is a one-line fix.

use std::fmt;

/// Attributes that carry a repeater expression.
pub const REPEAT_ATTRIBUTES: [&str; 4] = [
    "ng-repeat",
    "data-ng-repeat",
    "ng-repeat-start",
    "data-ng-repeat-start",
];

/// A single element query.
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::By;
///
/// let grid = By::id("grid1");
/// let header = By::css(".ui-grid-header");
/// let rows = By::repeater("(rowRenderIndex, row) in rowContainer.renderedRows");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// Element with the given `id` attribute
    Id(String),
    /// CSS selector
    Css(String),
    /// Elements whose repeat attribute contains the expression
    Repeater(String),
}

impl By {
    /// Create an id query
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a CSS query
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a repeater query
    pub fn repeater(expression: impl Into<String>) -> Self {
        Self::Repeater(expression.into())
    }

    /// Converts the query to a CSS selector for backends that only speak CSS.
    ///
    /// Repeater queries become an attribute-substring selector list covering
    /// every repeat attribute spelling.
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("[id=\"{}\"]", escape_css_string(id)),
            Self::Css(css) => css.clone(),
            Self::Repeater(expr) => {
                let expr = escape_css_string(expr);
                REPEAT_ATTRIBUTES
                    .iter()
                    .map(|attr| format!("[{attr}*=\"{expr}\"]"))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "by.id({id:?})"),
            Self::Css(css) => write!(f, "by.css({css:?})"),
            Self::Repeater(expr) => write!(f, "by.repeater({expr:?})"),
        }
    }
}

fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Class names and repeater expressions rendered by ui-grid templates.
pub mod ui_grid {
    /// Rendered rows within a row container
    pub const ROW_REPEATER: &str = "(rowRenderIndex, row) in rowContainer.renderedRows track by $index";
    /// Header and footer cells within a column container
    pub const COLUMN_REPEATER: &str = "col in colContainer.renderedColumns track by col.colDef.name";
    /// Data cells within a rendered row
    pub const CELL_REPEATER: &str =
        "(colRenderIndex, col) in colContainer.renderedColumns track by col.colDef.name";
    /// Items of the column menu and the grid menu
    pub const MENU_ITEM_REPEATER: &str = "item in menuItems";

    pub const BODY_CONTAINER: &str = ".ui-grid-render-container-body";
    pub const LEFT_CONTAINER: &str = ".ui-grid-render-container-left";
    pub const HEADER: &str = ".ui-grid-header";
    pub const FOOTER: &str = ".ui-grid-footer";
    pub const COLUMN_RESIZER: &str = ".ui-grid-column-resizer";
    pub const COLUMN_MENU_BUTTON: &str = ".ui-grid-column-menu-button";
    pub const COLUMN_MENU: &str = ".ui-grid-column-menu";
    pub const GRID_MENU_BUTTON: &str = ".ui-grid-menu-button";
    pub const MENU_ITEM: &str = ".ui-grid-menu-item";
    pub const FILTER_INPUT: &str = ".ui-grid-filter-input";
    pub const CANCEL_ICON: &str = ".ui-grid-icon-cancel";
}

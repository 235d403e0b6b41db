// Configuration - default grid id and menu layout
//
// The default grid id is process-wide: set it once in a suite's setup and
// every helper called with `grid_id: None` targets that grid. An explicit,
// non-empty id always wins over the stored default.

use crate::error::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Environment variable read by [`GridTestConfig::from_env`]
pub const GRID_ID_ENV: &str = "UI_GRID_E2E_GRID_ID";

static DEFAULT_GRID_ID: RwLock<Option<String>> = parking_lot::const_rwlock(None);

/// Stores the grid id used when a helper is called without one.
///
/// # Example
///
/// ```ignore
/// ui_grid_e2e::set_grid_id("myGrid");
/// grid.expect_row_count(2, None).await?; // checks #myGrid
/// ```
pub fn set_grid_id(grid_id: impl Into<String>) {
    let grid_id = grid_id.into();
    tracing::debug!(%grid_id, "Setting default grid id");
    *DEFAULT_GRID_ID.write() = Some(grid_id);
}

/// Forgets the stored default grid id.
pub fn clear_grid_id() {
    *DEFAULT_GRID_ID.write() = None;
}

/// The stored default grid id, if any.
pub fn grid_id() -> Option<String> {
    DEFAULT_GRID_ID.read().clone()
}

// Empty and whitespace-only ids count as "not given" everywhere
fn is_present(id: &str) -> bool {
    !id.trim().is_empty()
}

/// Picks the grid id for a call: the explicit id when given and not blank,
/// otherwise the stored default.
pub fn resolve_grid_id(explicit: Option<&str>) -> Result<String> {
    if let Some(id) = explicit.filter(|id| is_present(id)) {
        return Ok(id.to_string());
    }
    DEFAULT_GRID_ID
        .read()
        .as_deref()
        .filter(|id| is_present(id))
        .map(str::to_string)
        .ok_or(Error::GridIdNotSet)
}

/// Positions of the stock column-menu items.
///
/// ui-grid renders sort ascending, sort descending and remove sort as the
/// first three column-menu items. Suites that register their own items ahead
/// of these can shift the positions here instead of in every test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnMenuLayout {
    pub sort_ascending: usize,
    pub sort_descending: usize,
    pub remove_sort: usize,
}

impl Default for ColumnMenuLayout {
    fn default() -> Self {
        Self {
            sort_ascending: 0,
            sort_descending: 1,
            remove_sort: 2,
        }
    }
}

/// Settings for a [`GridTest`](crate::GridTest).
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::{ColumnMenuLayout, GridTestConfig};
///
/// let config = GridTestConfig::builder()
///     .grid_id("grid1")
///     .column_menu(ColumnMenuLayout { sort_ascending: 1, sort_descending: 2, remove_sort: 3 })
///     .build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridTestConfig {
    /// Grid id stored as the process-wide default when the config is applied
    pub grid_id: Option<String>,
    /// Column-menu item positions
    pub column_menu: ColumnMenuLayout,
}

impl GridTestConfig {
    /// Create a new builder for GridTestConfig
    pub fn builder() -> GridTestConfigBuilder {
        GridTestConfigBuilder::default()
    }

    /// Default config with `grid_id` taken from `UI_GRID_E2E_GRID_ID`
    pub fn from_env() -> Self {
        let grid_id = std::env::var(GRID_ID_ENV)
            .ok()
            .filter(|id| is_present(id));
        Self {
            grid_id,
            ..Self::default()
        }
    }

    /// Parses a JSON config, e.g. `{"gridId": "grid1", "columnMenu": {"removeSort": 3}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for GridTestConfig
#[derive(Debug, Clone, Default)]
pub struct GridTestConfigBuilder {
    grid_id: Option<String>,
    column_menu: Option<ColumnMenuLayout>,
}

impl GridTestConfigBuilder {
    /// Set the default grid id
    pub fn grid_id(mut self, grid_id: impl Into<String>) -> Self {
        self.grid_id = Some(grid_id.into());
        self
    }

    /// Set the column-menu item positions
    pub fn column_menu(mut self, layout: ColumnMenuLayout) -> Self {
        self.column_menu = Some(layout);
        self
    }

    /// Build the GridTestConfig
    pub fn build(self) -> GridTestConfig {
        GridTestConfig {
            grid_id: self.grid_id,
            column_menu: self.column_menu.unwrap_or_default(),
        }
    }
}

/// Serializes unit tests that touch the process-wide default.
#[cfg(test)]
pub(crate) static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_id_wins_over_default() {
        let _guard = TEST_LOCK.lock();
        set_grid_id("stored");
        assert_eq!(resolve_grid_id(Some("explicit")).unwrap(), "explicit");
        assert_eq!(resolve_grid_id(None).unwrap(), "stored");
        clear_grid_id();
    }

    #[test]
    fn test_empty_explicit_id_falls_back() {
        let _guard = TEST_LOCK.lock();
        set_grid_id("stored");
        assert_eq!(resolve_grid_id(Some("")).unwrap(), "stored");
        assert_eq!(resolve_grid_id(Some("  \t")).unwrap(), "stored");
        clear_grid_id();
    }

    #[test]
    fn test_blank_default_is_not_set() {
        let _guard = TEST_LOCK.lock();
        set_grid_id(" ");
        assert!(matches!(resolve_grid_id(None), Err(Error::GridIdNotSet)));
        clear_grid_id();
    }

    #[test]
    fn test_from_env() {
        let _guard = TEST_LOCK.lock();

        // SAFETY: TEST_LOCK serializes every test that touches this variable
        unsafe { std::env::set_var(GRID_ID_ENV, "envGrid") };
        let config = GridTestConfig::from_env();
        assert_eq!(config.grid_id.as_deref(), Some("envGrid"));
        assert_eq!(config.column_menu, ColumnMenuLayout::default());

        unsafe { std::env::set_var(GRID_ID_ENV, "   ") };
        assert_eq!(GridTestConfig::from_env().grid_id, None);

        unsafe { std::env::remove_var(GRID_ID_ENV) };
        assert_eq!(GridTestConfig::from_env(), GridTestConfig::default());
    }

    #[test]
    fn test_no_id_anywhere() {
        let _guard = TEST_LOCK.lock();
        clear_grid_id();
        assert!(matches!(resolve_grid_id(None), Err(Error::GridIdNotSet)));
        assert!(grid_id().is_none());
    }

    #[test]
    fn test_builder_defaults_layout() {
        let config = GridTestConfig::builder().grid_id("g").build();
        assert_eq!(config.grid_id.as_deref(), Some("g"));
        assert_eq!(config.column_menu, ColumnMenuLayout::default());
    }

    #[test]
    fn test_from_json_partial_layout() {
        let config =
            GridTestConfig::from_json(r#"{"gridId": "grid1", "columnMenu": {"removeSort": 3}}"#)
                .unwrap();
        assert_eq!(config.grid_id.as_deref(), Some("grid1"));
        assert_eq!(config.column_menu.sort_ascending, 0);
        assert_eq!(config.column_menu.sort_descending, 1);
        assert_eq!(config.column_menu.remove_sort, 3);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GridTestConfig::from_json("{not json"),
            Err(Error::Config(_))
        ));
    }
}

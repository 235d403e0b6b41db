// GridTest - locator and assertion helpers for a rendered ui-grid
//
// Every helper takes an optional grid id as its last argument. `None` (or an
// empty string) targets the grid stored with `set_grid_id`; anything else
// targets that grid for this call only.
//
// Row and column numbers are positions within the *rendered* rows/columns.
// ui-grid virtualises rows, so with more than a screenful of data only the
// rendered slice is reachable.

use crate::actions::{ActionSequence, Key};
use crate::config::{self, GridTestConfig};
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::expect::{IntoTextPattern, expect, expect_equal};
use crate::locator::Locator;
use crate::selector::{By, ui_grid};
use std::sync::Arc;

/// Helpers for end-to-end tests of one or more ui-grids on a page.
///
/// # Example
///
/// ```ignore
/// use ui_grid_e2e::{GridTest, mock::MockDom};
///
/// let grid = GridTest::new(driver);
/// grid.set_grid_id("myGrid");
///
/// grid.expect_row_count(2, None).await?;
/// grid.expect_header_cell_value_match(0, "Name", None).await?;
/// grid.expect_row_values_match(0, ["Alice", "^3\\d$"], None).await?;
/// grid.click_column_menu_sort_desc(1, Some("otherGrid")).await?;
/// ```
#[derive(Clone)]
pub struct GridTest {
    driver: Arc<dyn Driver>,
    config: GridTestConfig,
}

impl GridTest {
    /// Helpers over `driver` with the default configuration
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self::with_config(driver, GridTestConfig::default())
    }

    /// Helpers over `driver`; a `grid_id` in the config becomes the stored default
    pub fn with_config(driver: impl Driver + 'static, config: GridTestConfig) -> Self {
        Self::from_shared(Arc::new(driver), config)
    }

    /// Helpers over an already shared driver
    pub fn from_shared(driver: Arc<dyn Driver>, config: GridTestConfig) -> Self {
        if let Some(grid_id) = config.grid_id.as_deref() {
            config::set_grid_id(grid_id);
        }
        Self { driver, config }
    }

    /// The underlying driver
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Active configuration
    pub fn config(&self) -> &GridTestConfig {
        &self.config
    }

    /// Stores the default grid id (process-wide, see [`config::set_grid_id`]).
    pub fn set_grid_id(&self, grid_id: impl Into<String>) {
        config::set_grid_id(grid_id);
    }

    /// A fresh action sequence on this driver
    pub fn actions(&self) -> ActionSequence {
        ActionSequence::new(Arc::clone(&self.driver))
    }

    // Locators

    /// The grid element.
    pub fn get_grid(&self, grid_id: Option<&str>) -> Result<Locator> {
        let grid_id = config::resolve_grid_id(grid_id)?;
        Ok(Locator::root(Arc::clone(&self.driver), By::id(grid_id)))
    }

    /// A rendered row of the grid.
    pub fn get_row(&self, row: usize, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .get_grid(grid_id)?
            .repeater_row(ui_grid::ROW_REPEATER, row))
    }

    /// A header cell of the body render container.
    pub fn header_cell(&self, col: usize, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .header(ui_grid::BODY_CONTAINER, grid_id)?
            .repeater_row(ui_grid::COLUMN_REPEATER, col))
    }

    /// A footer cell.
    pub fn footer_cell(&self, col: usize, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .get_grid(grid_id)?
            .element(By::css(ui_grid::FOOTER))
            .repeater_row(ui_grid::COLUMN_REPEATER, col))
    }

    /// A data cell, addressed by rendered row then rendered column.
    pub fn data_cell(&self, row: usize, col: usize, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .get_row(row, grid_id)?
            .repeater_row(ui_grid::CELL_REPEATER, col))
    }

    fn header(&self, container: &str, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .get_grid(grid_id)?
            .element(By::css(container))
            .element(By::css(ui_grid::HEADER)))
    }

    fn column_menu(&self, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self.get_grid(grid_id)?.element(By::css(ui_grid::COLUMN_MENU)))
    }

    fn grid_menu_button(&self, grid_id: Option<&str>) -> Result<Locator> {
        Ok(self
            .get_grid(grid_id)?
            .element(By::css(ui_grid::GRID_MENU_BUTTON)))
    }

    // Count assertions

    /// Checks the number of rendered rows.
    ///
    /// Only rendered rows are counted, so this is reliable for small data
    /// sets; with more than roughly ten rows virtualisation hides some.
    pub async fn expect_row_count(&self, expected: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(expected, ?grid_id, "expect_row_count");
        let rows = self
            .get_grid(grid_id)?
            .all(By::repeater(ui_grid::ROW_REPEATER));
        expect(rows).to_have_count(expected).await
    }

    /// Checks the number of header columns in the body render container.
    ///
    /// Pinned columns live in other containers; see
    /// [`expect_header_left_column_count`](Self::expect_header_left_column_count).
    pub async fn expect_header_column_count(
        &self,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(expected, ?grid_id, "expect_header_column_count");
        let columns = self
            .header(ui_grid::BODY_CONTAINER, grid_id)?
            .all(By::repeater(ui_grid::COLUMN_REPEATER));
        expect(columns).to_have_count(expected).await
    }

    /// Checks the number of header columns in the left (pinned) render container.
    pub async fn expect_header_left_column_count(
        &self,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(expected, ?grid_id, "expect_header_left_column_count");
        let columns = self
            .header(ui_grid::LEFT_CONTAINER, grid_id)?
            .all(By::repeater(ui_grid::COLUMN_REPEATER));
        expect(columns).to_have_count(expected).await
    }

    /// Checks the number of footer columns.
    pub async fn expect_footer_column_count(
        &self,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(expected, ?grid_id, "expect_footer_column_count");
        let columns = self
            .get_grid(grid_id)?
            .element(By::css(ui_grid::FOOTER))
            .all(By::repeater(ui_grid::COLUMN_REPEATER));
        expect(columns).to_have_count(expected).await
    }

    // Text assertions

    /// Checks a header cell's text against a regex or string pattern.
    pub async fn expect_header_cell_value_match(
        &self,
        col: usize,
        pattern: impl IntoTextPattern,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, ?grid_id, "expect_header_cell_value_match");
        expect(self.header_cell(col, grid_id)?).to_match(pattern).await
    }

    /// Checks a footer cell's text against a regex or string pattern.
    pub async fn expect_footer_cell_value_match(
        &self,
        col: usize,
        pattern: impl IntoTextPattern,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, ?grid_id, "expect_footer_cell_value_match");
        expect(self.footer_cell(col, grid_id)?).to_match(pattern).await
    }

    /// Checks a data cell's text against a regex or string pattern.
    pub async fn expect_cell_value_match(
        &self,
        row: usize,
        col: usize,
        pattern: impl IntoTextPattern,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(row, col, ?grid_id, "expect_cell_value_match");
        expect(self.data_cell(row, col, grid_id)?)
            .to_match(pattern)
            .await
    }

    /// Checks every cell of a row, pattern `i` against column `i`.
    ///
    /// All columns are checked; mismatches are reported together in one
    /// `AssertionFailed`. Other failures (missing cell, bad pattern) stop at once.
    pub async fn expect_row_values_match<I, P>(
        &self,
        row: usize,
        patterns: I,
        grid_id: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: IntoTextPattern,
    {
        tracing::debug!(row, ?grid_id, "expect_row_values_match");
        let row_locator = self.get_row(row, grid_id)?;
        let mut failures = Vec::new();

        for (col, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.into_text_pattern()?;
            let cell = row_locator.repeater_row(ui_grid::CELL_REPEATER, col);
            let outcome = expect(cell)
                .with_message(format!("Expected to match: {pattern} in column: {col}"))
                .to_match(pattern)
                .await;
            match outcome {
                Ok(()) => {}
                Err(Error::AssertionFailed(message)) => failures.push(message),
                Err(other) => return Err(other),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::AssertionFailed(failures.join("; ")))
        }
    }

    // Header actions

    /// Clicks a header cell, which usually sorts by that column.
    pub async fn click_header_cell(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(col, ?grid_id, "click_header_cell");
        self.header_cell(col, grid_id)?.click().await
    }

    /// Drags the column's left resizer onto its menu button, widening the
    /// column before it.
    pub async fn resize_header_cell(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(col, ?grid_id, "resize_header_cell");
        let header_cell = self.header_cell(col, grid_id)?;
        let resizer = header_cell
            .all(By::css(ui_grid::COLUMN_RESIZER))
            .first();
        let menu_button = header_cell.element(By::css(ui_grid::COLUMN_MENU_BUTTON));

        self.actions()
            .mouse_down(&resizer)
            .mouse_move(&menu_button)
            .mouse_up()
            .perform()
            .await
    }

    /// Shift-clicks a header cell, which usually adds the column to the sort.
    pub async fn shift_click_header_cell(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(col, ?grid_id, "shift_click_header_cell");
        let header_cell = self.header_cell(col, grid_id)?;

        self.actions()
            .key_down(Key::Shift)
            .click(&header_cell)
            .key_up(Key::Shift)
            .perform()
            .await
    }

    // Column menu

    /// Opens a column's menu and clicks the item at `item` position.
    ///
    /// Positions shift whenever menu items are added or reordered, so prefer
    /// the named wrappers ([`click_column_menu_sort_asc`](Self::click_column_menu_sort_asc)
    /// and friends) or adjust [`ColumnMenuLayout`](crate::ColumnMenuLayout).
    pub async fn click_column_menu(
        &self,
        col: usize,
        item: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, item, ?grid_id, "click_column_menu");
        self.open_column_menu(col, grid_id).await?;
        self.column_menu(grid_id)?
            .repeater_row(ui_grid::MENU_ITEM_REPEATER, item)
            .click()
            .await
    }

    async fn open_column_menu(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        self.header_cell(col, grid_id)?
            .element(By::css(ui_grid::COLUMN_MENU_BUTTON))
            .click()
            .await
    }

    /// Sorts ascending through the column menu.
    pub async fn click_column_menu_sort_asc(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        let item = self.config.column_menu.sort_ascending;
        self.click_column_menu(col, item, grid_id).await
    }

    /// Sorts descending through the column menu.
    pub async fn click_column_menu_sort_desc(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        let item = self.config.column_menu.sort_descending;
        self.click_column_menu(col, item, grid_id).await
    }

    /// Removes the column's sort through the column menu.
    pub async fn click_column_menu_remove_sort(
        &self,
        col: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        let item = self.config.column_menu.remove_sort;
        self.click_column_menu(col, item, grid_id).await
    }

    /// Opens a column's menu and counts the displayed items.
    pub async fn visible_column_menu_item_count(
        &self,
        col: usize,
        grid_id: Option<&str>,
    ) -> Result<usize> {
        self.open_column_menu(col, grid_id).await?;
        self.column_menu(grid_id)?
            .all(By::css(ui_grid::MENU_ITEM))
            .displayed_count()
            .await
    }

    /// Opens a column's menu and checks how many items are displayed.
    pub async fn expect_visible_column_menu_items(
        &self,
        col: usize,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, expected, ?grid_id, "expect_visible_column_menu_items");
        let displayed = self.visible_column_menu_item_count(col, grid_id).await?;
        expect_equal(
            displayed,
            expected,
            &format!("displayed column menu items for column {col}"),
        )
    }

    // Filters

    /// Checks the number of filter inputs in a column header: 0 for none,
    /// 1 for a plain filter, 2 for a greater-than / less-than pair.
    pub async fn expect_filter_box_in_column(
        &self,
        col: usize,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, expected, ?grid_id, "expect_filter_box_in_column");
        let inputs = self
            .header_cell(col, grid_id)?
            .all(By::css(ui_grid::FILTER_INPUT));
        expect(inputs).to_have_count(expected).await
    }

    /// Clears a column's filter with its cancel icon.
    pub async fn cancel_filter_in_column(&self, col: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(col, ?grid_id, "cancel_filter_in_column");
        self.header_cell(col, grid_id)?
            .element(By::css(ui_grid::CANCEL_ICON))
            .click()
            .await
    }

    /// Types `value` into a column's (first) filter input.
    pub async fn enter_filter_in_column(
        &self,
        col: usize,
        value: &str,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(col, value, ?grid_id, "enter_filter_in_column");
        self.header_cell(col, grid_id)?
            .element(By::css(ui_grid::FILTER_INPUT))
            .send_keys(value)
            .await
    }

    // Grid menu

    /// Opens the grid menu and counts the displayed items.
    pub async fn visible_grid_menu_item_count(&self, grid_id: Option<&str>) -> Result<usize> {
        let button = self.grid_menu_button(grid_id)?;
        button.click().await?;
        button
            .all(By::css(ui_grid::MENU_ITEM))
            .displayed_count()
            .await
    }

    /// Opens the grid menu and checks how many items are displayed.
    pub async fn expect_visible_grid_menu_items(
        &self,
        expected: usize,
        grid_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(expected, ?grid_id, "expect_visible_grid_menu_items");
        let displayed = self.visible_grid_menu_item_count(grid_id).await?;
        expect_equal(displayed, expected, "displayed grid menu items")
    }

    /// Opens the grid menu and clicks the item at `item` position.
    ///
    /// The position counts every item in the underlying repeater, hidden ones
    /// included, so it can differ from the position seen on screen.
    pub async fn click_grid_menu_item(&self, item: usize, grid_id: Option<&str>) -> Result<()> {
        tracing::debug!(item, ?grid_id, "click_grid_menu_item");
        let button = self.grid_menu_button(grid_id)?;
        button.click().await?;
        button
            .repeater_row(ui_grid::MENU_ITEM_REPEATER, item)
            .click()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Step;
    use crate::mock::MockDom;

    fn grid() -> GridTest {
        GridTest::new(MockDom::builder().build())
    }

    #[test]
    fn test_header_cell_chain() {
        let cell = grid().header_cell(2, Some("g")).unwrap();
        assert_eq!(
            cell.steps(),
            &[
                Step::Element(By::id("g")),
                Step::Element(By::css(ui_grid::BODY_CONTAINER)),
                Step::Element(By::css(ui_grid::HEADER)),
                Step::All(By::repeater(ui_grid::COLUMN_REPEATER)),
                Step::Nth(2),
            ]
        );
    }

    #[test]
    fn test_data_cell_chain() {
        let cell = grid().data_cell(3, 1, Some("g")).unwrap();
        assert_eq!(
            cell.steps(),
            &[
                Step::Element(By::id("g")),
                Step::All(By::repeater(ui_grid::ROW_REPEATER)),
                Step::Nth(3),
                Step::All(By::repeater(ui_grid::CELL_REPEATER)),
                Step::Nth(1),
            ]
        );
    }

    #[test]
    fn test_footer_cell_chain() {
        let cell = grid().footer_cell(0, Some("g")).unwrap();
        assert_eq!(
            cell.description(),
            format!(
                "by.id(\"g\") > by.css(\".ui-grid-footer\") > all(by.repeater({:?})) > row(0)",
                ui_grid::COLUMN_REPEATER
            )
        );
    }

    #[test]
    fn test_default_and_override() {
        let _guard = config::TEST_LOCK.lock();
        let grid = grid();
        grid.set_grid_id("stored");

        let default = grid.get_grid(None).unwrap();
        assert_eq!(default.steps(), &[Step::Element(By::id("stored"))]);

        let explicit = grid.get_grid(Some("other")).unwrap();
        assert_eq!(explicit.steps(), &[Step::Element(By::id("other"))]);

        config::clear_grid_id();
        assert!(matches!(grid.get_row(0, None), Err(Error::GridIdNotSet)));
    }

    #[test]
    fn test_config_grid_id_becomes_default() {
        let _guard = config::TEST_LOCK.lock();
        let config = GridTestConfig::builder().grid_id("configured").build();
        let grid = GridTest::with_config(MockDom::builder().build(), config);

        assert_eq!(
            grid.get_grid(None).unwrap().steps(),
            &[Step::Element(By::id("configured"))]
        );
        config::clear_grid_id();
    }
}

//! ui-grid-e2e: locator and assertion helpers for end-to-end tests of ui-grid
//!
//! Each helper maps a test intent ("row 3", "header column 2's menu") onto a
//! chain of id, CSS and repeater lookups, then returns the located element or
//! asserts against it. The browser itself sits behind the [`Driver`] trait.
//!
//! # Examples
//!
//! ## Default grid id and per-call override
//!
//! ```ignore
//! use ui_grid_e2e::{GridTest, set_grid_id};
//!
//! let grid = GridTest::new(driver);
//! set_grid_id("grid1");
//!
//! // Targets #grid1
//! grid.expect_row_count(3, None).await?;
//! // Targets #grid2 for this call only
//! grid.expect_row_count(5, Some("grid2")).await?;
//! ```
//!
//! ## Cell text, sorting and filtering
//!
//! ```ignore
//! grid.expect_header_cell_value_match(0, "Name", None).await?;
//! grid.expect_row_values_match(0, ["Ethel Price", "female", "^Enersol$"], None).await?;
//!
//! grid.click_column_menu_sort_desc(0, None).await?;
//! grid.shift_click_header_cell(1, None).await?;
//!
//! grid.enter_filter_in_column(2, "Ener", None).await?;
//! grid.expect_row_count(1, None).await?;
//! grid.cancel_filter_in_column(2, None).await?;
//! ```
//!
//! ## Testing without a browser
//!
//! ```ignore
//! use ui_grid_e2e::mock::{MockDom, MockElement};
//!
//! let dom = MockDom::builder()
//!     .child(MockElement::new("div").id("grid1") /* ... */)
//!     .build();
//! let grid = GridTest::new(dom.clone());
//! grid.click_header_cell(0, Some("grid1")).await?;
//! assert_eq!(dom.history().len(), 1);
//! ```

pub mod actions;
pub mod config;
pub mod driver;
pub mod error;
pub mod expect;
pub mod grid;
pub mod locator;
pub mod mock;
#[cfg(feature = "playwright")]
pub mod playwright;
pub mod selector;

// Re-export error types
pub use error::{Error, Result};

// Re-export the helper entry point and configuration
pub use config::{ColumnMenuLayout, GridTestConfig, clear_grid_id, grid_id, set_grid_id};
pub use grid::GridTest;

// Re-export query and action building blocks
pub use actions::{Action, ActionSequence, Key};
pub use driver::Driver;
pub use locator::{Locator, Step};
pub use selector::{By, ui_grid};

// Re-export expectations
pub use expect::{Expectation, IntoTextPattern, TextPattern, expect, expect_equal};

// Shared fixtures for integration tests
//
// Builds a MockDom shaped like two rendered ui-grids:
//
// #grid1: 3 body columns (Name, Gender, Company), 1 pinned-left column,
//         3 rows, footer, column menu with 4 items (one hidden), grid menu
//         with 5 items (two hidden)
// #grid2: 2 body columns, 2 rows
//
// Note: Functions appear "unused" because each test binary compiles separately.
#![allow(dead_code)]

use parking_lot::{Mutex, MutexGuard};
use std::sync::Once;
use ui_grid_e2e::mock::{MockDom, MockElement};
use ui_grid_e2e::ui_grid;

static INIT: Once = Once::new();
static DEFAULT_ID_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Installs a tracing subscriber once per test binary (RUST_LOG controls output)
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Serializes tests that read or write the process-wide default grid id
pub fn default_id_lock() -> MutexGuard<'static, ()> {
    DEFAULT_ID_LOCK.lock()
}

pub const ROWS: [[&str; 3]; 3] = [
    ["Ethel Price", "female", "Enersol"],
    ["Claudine Neal", "female", "Sealoud"],
    ["Beryl Rice", "female", "Velity"],
];

fn class_of(selector: &str) -> &str {
    selector.trim_start_matches('.')
}

fn header_cell(grid: &str, index: usize, title: &str, filters: usize) -> MockElement {
    let label = format!("{grid}-header-{index}");
    let mut cell = MockElement::new("div")
        .class("ui-grid-header-cell")
        .repeat(ui_grid::COLUMN_REPEATER)
        .label(label.clone())
        .child(MockElement::new("span").class("ui-grid-header-cell-label").text(title))
        .child(
            MockElement::new("div")
                .class(class_of(ui_grid::COLUMN_MENU_BUTTON))
                .label(format!("{label}-menu-button"))
                .shows_on_click(format!("{grid}-column-menu")),
        )
        .child(
            MockElement::new("div")
                .class(class_of(ui_grid::COLUMN_RESIZER))
                .class("left")
                .label(format!("{label}-resizer-left")),
        )
        .child(
            MockElement::new("div")
                .class(class_of(ui_grid::COLUMN_RESIZER))
                .class("right")
                .label(format!("{label}-resizer-right")),
        );
    for filter in 0..filters {
        cell = cell.child(
            MockElement::new("input")
                .class(class_of(ui_grid::FILTER_INPUT))
                .label(format!("{label}-filter-{filter}")),
        );
    }
    if filters > 0 {
        cell = cell.child(
            MockElement::new("i")
                .class(class_of(ui_grid::CANCEL_ICON))
                .label(format!("{label}-cancel")),
        );
    }
    cell
}

fn header(grid: &str, titles: &[&str], filters: &[usize]) -> MockElement {
    MockElement::new("div").class(class_of(ui_grid::HEADER)).children(
        titles
            .iter()
            .zip(filters)
            .enumerate()
            .map(|(index, (title, filters))| header_cell(grid, index, title, *filters)),
    )
}

fn row(grid: &str, index: usize, values: &[&str]) -> MockElement {
    MockElement::new("div")
        .class("ui-grid-row")
        .repeat(ui_grid::ROW_REPEATER)
        .label(format!("{grid}-row-{index}"))
        .children(values.iter().enumerate().map(|(col, value)| {
            MockElement::new("div")
                .class("ui-grid-cell")
                .repeat(ui_grid::CELL_REPEATER)
                .label(format!("{grid}-cell-{index}-{col}"))
                .child(MockElement::new("div").class("ui-grid-cell-contents").text(*value))
        }))
}

fn menu_item(label: String, text: &str, displayed: bool) -> MockElement {
    let item = MockElement::new("li")
        .repeat(ui_grid::MENU_ITEM_REPEATER)
        .label(label.clone())
        .child(
            MockElement::new("button")
                .class(class_of(ui_grid::MENU_ITEM))
                .text(text)
                .label(format!("{label}-button")),
        );
    if displayed { item } else { item.hidden() }
}

fn grid1() -> MockElement {
    let left = MockElement::new("div")
        .class(class_of(ui_grid::LEFT_CONTAINER))
        .child(header("grid1-left", &["#"], &[0]));

    let body = MockElement::new("div")
        .class(class_of(ui_grid::BODY_CONTAINER))
        .child(header("grid1", &["Name", "Gender", "Company"], &[1, 2, 0]))
        .child(
            MockElement::new("div")
                .class("ui-grid-viewport")
                .children(ROWS.iter().enumerate().map(|(index, values)| row("grid1", index, values))),
        );

    let footer = MockElement::new("div").class(class_of(ui_grid::FOOTER)).children(
        ["3 people", "3 female", "3 companies"]
            .iter()
            .enumerate()
            .map(|(index, text)| {
                MockElement::new("div")
                    .class("ui-grid-footer-cell")
                    .repeat(ui_grid::COLUMN_REPEATER)
                    .label(format!("grid1-footer-{index}"))
                    .text(*text)
            }),
    );

    let column_menu = MockElement::new("div")
        .class(class_of(ui_grid::COLUMN_MENU))
        .label("grid1-column-menu")
        .hidden()
        .children([
            menu_item("column-menu-asc".to_string(), "Sort Ascending", true),
            menu_item("column-menu-desc".to_string(), "Sort Descending", true),
            menu_item("column-menu-remove".to_string(), "Remove Sort", true),
            menu_item("column-menu-hide".to_string(), "Hide Column", false),
        ]);

    let grid_menu_button = MockElement::new("div")
        .class(class_of(ui_grid::GRID_MENU_BUTTON))
        .label("grid1-menu-button")
        .shows_on_click("grid1-grid-menu")
        .child(
            MockElement::new("ul")
                .class("ui-grid-menu-items")
                .label("grid1-grid-menu")
                .hidden()
                .children([
                    menu_item("grid-menu-clear".to_string(), "Clear all filters", true),
                    menu_item("grid-menu-export".to_string(), "Export", false),
                    menu_item("grid-menu-name".to_string(), "Name", true),
                    menu_item("grid-menu-gender".to_string(), "Gender", false),
                    menu_item("grid-menu-company".to_string(), "Company", true),
                ]),
        );

    MockElement::new("div")
        .id("grid1")
        .class("ui-grid")
        .child(left)
        .child(body)
        .child(footer)
        .child(column_menu)
        .child(grid_menu_button)
}

fn grid2() -> MockElement {
    MockElement::new("div").id("grid2").class("ui-grid").child(
        MockElement::new("div")
            .class(class_of(ui_grid::BODY_CONTAINER))
            .child(header("grid2", &["Id", "Label"], &[0, 0]))
            .child(
                MockElement::new("div")
                    .class("ui-grid-viewport")
                    .child(row("grid2", 0, &["1", "first"]))
                    .child(row("grid2", 1, &["2", "second"])),
            ),
    )
}

/// Page with #grid1 and #grid2
pub fn grid_page() -> MockDom {
    MockDom::builder().child(grid1()).child(grid2()).build()
}

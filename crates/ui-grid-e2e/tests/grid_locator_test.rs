// Integration tests for grid locators and count assertions
//
// Tests cover:
// - default grid id vs explicit override
// - zero-based row / column addressing
// - row, header, pinned header and footer column counts
// - failure messages for count mismatches

mod common;

use ui_grid_e2e::{Error, GridTest, clear_grid_id, set_grid_id};

// ============================================================================
// Grid id resolution
// ============================================================================

#[tokio::test]
async fn test_default_grid_id_is_used_without_explicit_id() {
    common::init_tracing();
    let _guard = common::default_id_lock();
    let grid = GridTest::new(common::grid_page());

    set_grid_id("grid1");
    grid.expect_row_count(3, None)
        .await
        .expect("grid1 should have 3 rows");

    set_grid_id("grid2");
    grid.expect_row_count(2, None)
        .await
        .expect("grid2 should have 2 rows");

    clear_grid_id();
}

#[tokio::test]
async fn test_explicit_grid_id_overrides_default() {
    common::init_tracing();
    let _guard = common::default_id_lock();
    let grid = GridTest::new(common::grid_page());

    set_grid_id("grid1");
    grid.expect_row_count(2, Some("grid2"))
        .await
        .expect("explicit grid2 should win over default grid1");
    grid.expect_header_cell_value_match(1, "^Label$", Some("grid2"))
        .await
        .expect("explicit grid2 header");

    // An empty id counts as "not given"
    grid.expect_row_count(3, Some(""))
        .await
        .expect("empty id falls back to grid1");

    clear_grid_id();
}

#[tokio::test]
async fn test_missing_grid_id_is_an_error() {
    common::init_tracing();
    let _guard = common::default_id_lock();
    clear_grid_id();
    let grid = GridTest::new(common::grid_page());

    let result = grid.expect_row_count(3, None).await;
    assert!(matches!(result, Err(Error::GridIdNotSet)));
}

// ============================================================================
// Addressing
// ============================================================================

#[tokio::test]
async fn test_rows_and_cells_are_zero_indexed() {
    common::init_tracing();
    let grid = GridTest::new(common::grid_page());

    for (row, values) in common::ROWS.iter().enumerate() {
        let text = grid
            .get_row(row, Some("grid1"))
            .unwrap()
            .text()
            .await
            .expect("row text");
        assert_eq!(text, values.join(" "));

        for (col, value) in values.iter().enumerate() {
            let cell = grid.data_cell(row, col, Some("grid1")).unwrap();
            assert_eq!(cell.text().await.unwrap(), *value);
        }
    }

    assert_eq!(
        grid.header_cell(0, Some("grid1")).unwrap().text().await.unwrap(),
        "Name"
    );
    assert_eq!(
        grid.footer_cell(2, Some("grid1")).unwrap().text().await.unwrap(),
        "3 companies"
    );
}

#[tokio::test]
async fn test_out_of_range_row_is_not_found() {
    common::init_tracing();
    let grid = GridTest::new(common::grid_page());

    let row = grid.get_row(3, Some("grid1")).unwrap();
    assert_eq!(row.count().await.unwrap(), 0);
    assert!(matches!(row.text().await, Err(Error::ElementNotFound(_))));
}

#[tokio::test]
async fn test_get_grid_targets_the_grid_element() {
    common::init_tracing();
    let grid = GridTest::new(common::grid_page());

    assert_eq!(grid.get_grid(Some("grid2")).unwrap().count().await.unwrap(), 1);
    assert_eq!(grid.get_grid(Some("grid9")).unwrap().count().await.unwrap(), 0);
}

// ============================================================================
// Counts
// ============================================================================

#[tokio::test]
async fn test_column_counts() {
    common::init_tracing();
    let grid = GridTest::new(common::grid_page());

    grid.expect_header_column_count(3, Some("grid1"))
        .await
        .expect("body header columns");
    grid.expect_header_left_column_count(1, Some("grid1"))
        .await
        .expect("pinned left header columns");
    grid.expect_footer_column_count(3, Some("grid1"))
        .await
        .expect("footer columns");

    grid.expect_header_column_count(2, Some("grid2"))
        .await
        .expect("grid2 header columns");
    grid.expect_header_left_column_count(0, Some("grid2"))
        .await
        .expect("grid2 has no pinned container");
    grid.expect_footer_column_count(0, Some("grid2"))
        .await
        .expect("grid2 has no footer");
}

#[tokio::test]
async fn test_count_mismatch_reports_expected_and_actual() {
    common::init_tracing();
    let grid = GridTest::new(common::grid_page());

    let err = grid
        .expect_row_count(5, Some("grid1"))
        .await
        .expect_err("grid1 has 3 rows, not 5");

    assert!(err.is_assertion());
    let message = err.to_string();
    assert!(message.contains("to have count 5"), "{message}");
    assert!(message.contains("found 3"), "{message}");
    assert!(message.contains("by.id(\"grid1\")"), "{message}");
}

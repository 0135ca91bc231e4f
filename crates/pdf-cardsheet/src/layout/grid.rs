//! Grid layout calculation
//!
//! This module decides how many cards fit on a page and where the grid sits.
//! Two rules shape every sheet:
//! - the margin is a horizontal floor, not a fixed value, and is dropped
//!   when not even one column fits with it
//! - the horizontal gap is reused as the vertical gap, so spacing is even
//!   in both directions

use crate::options::LayoutConfig;
use crate::types::{CardSheetError, CardSpec, PageSpec, Result, check_positive};

use super::Grid;

/// Slack for float noise accumulated over several cards and gaps, in inches.
/// A single card is compared against the page exactly.
const FIT_TOLERANCE: f32 = 1e-4;

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute the card grid for a page.
///
/// # Arguments
/// * `page` - Page dimensions in inches
/// * `card` - Unscaled card dimensions in inches
/// * `config` - Margin, scale and optional fixed row/column counts
///
/// # Errors
/// * `InvalidDimension` - a non-positive dimension or scale, a negative
///   margin, or a scaled card larger than the page
/// * `LayoutOverflow` - fixed rows or columns that cannot fit, or a grid with
///   more slots than can be counted
pub fn compute_grid(page: &PageSpec, card: &CardSpec, config: &LayoutConfig) -> Result<Grid> {
    page.validate()?;
    card.validate()?;
    config.validate_geometry()?;

    let card_width = card.width * config.scale;
    let card_height = card.height * config.scale;
    check_positive("scaled card width", card_width)?;
    check_positive("scaled card height", card_height)?;

    if card_width > page.width || card_height > page.height {
        return Err(CardSheetError::InvalidDimension(format!(
            "a {card_width:.3}x{card_height:.3} in card does not fit on a {:.3}x{:.3} in page",
            page.width, page.height
        )));
    }

    let cols = resolve_cols(page.width, card_width, config)?;
    let gap = even_gap(page.width, card_width, cols);
    let rows = resolve_rows(page.height, card_height, gap, config.rows)?;

    if rows == 0 || cols == 0 {
        return Err(CardSheetError::LayoutOverflow(format!(
            "no card fits on the page ({rows} rows x {cols} columns)"
        )));
    }
    if rows.checked_mul(cols).is_none() {
        return Err(CardSheetError::LayoutOverflow(format!(
            "a {rows} x {cols} grid has too many slots"
        )));
    }

    let grid_height = span(rows, card_height, gap);
    let offset_y = ((page.height - grid_height) / 2.0).max(0.0);

    log::debug!(
        "Grid {cols}x{rows}: card {card_width:.3}x{card_height:.3} in, gap {gap:.4} in, offset ({gap:.4}, {offset_y:.4}) in"
    );

    Ok(Grid {
        rows,
        cols,
        card_width,
        card_height,
        gap_x: gap,
        gap_y: gap,
        offset_x: gap,
        offset_y,
    })
}

// =============================================================================
// Row / Column Resolution
// =============================================================================

/// Resolve the column count, honouring the margin floor when possible.
fn resolve_cols(page_width: f32, card_width: f32, config: &LayoutConfig) -> Result<usize> {
    if config.cols > 0 {
        if config.cols as f32 * card_width > page_width + FIT_TOLERANCE {
            return Err(CardSheetError::LayoutOverflow(format!(
                "{} columns of {card_width:.3} in cards do not fit on a {page_width:.3} in wide page",
                config.cols
            )));
        }
        return Ok(config.cols);
    }

    let margins = 2.0 * config.margin;
    let with_margin = max_fitting(estimate(page_width - margins, card_width), |n| {
        n as f32 * card_width + margins <= page_width + FIT_TOLERANCE
    });
    if with_margin > 0 {
        return Ok(with_margin);
    }

    log::debug!(
        "Margin of {:.3} in leaves no room for a card; placing columns without it",
        config.margin
    );
    Ok(max_fitting(estimate(page_width, card_width), |n| {
        n as f32 * card_width <= page_width + FIT_TOLERANCE
    }))
}

/// Resolve the row count. The vertical gap equals the horizontal one, so it
/// counts against the page height too.
fn resolve_rows(page_height: f32, card_height: f32, gap: f32, rows: usize) -> Result<usize> {
    if rows == 0 {
        // n cards and n - 1 gaps fit when n * (card + gap) <= page + gap
        let upper = estimate(page_height + gap, card_height + gap);
        return Ok(max_fitting(upper, |n| {
            span(n, card_height, gap) <= page_height + FIT_TOLERANCE
        }));
    }

    if rows as f32 * card_height > page_height + FIT_TOLERANCE {
        return Err(CardSheetError::LayoutOverflow(format!(
            "{rows} rows of {card_height:.3} in cards do not fit on a {page_height:.3} in tall page"
        )));
    }
    let height = span(rows, card_height, gap);
    if height > page_height + FIT_TOLERANCE {
        return Err(CardSheetError::LayoutOverflow(format!(
            "{rows} rows with a {gap:.4} in gap need {height:.3} in, page is {page_height:.3} in tall"
        )));
    }
    Ok(rows)
}

/// Largest `n` in `1..=upper` for which `fits(n)` holds, or 0 if even one
/// does not fit.
///
/// `fits` must be monotonic: once false, false for every larger `n`. The
/// search walks down from `upper`, so it takes a few steps when `upper` is
/// a close estimate.
fn max_fitting(upper: usize, fits: impl Fn(usize) -> bool) -> usize {
    let mut n = upper;
    while n > 0 && !fits(n) {
        n -= 1;
    }
    n
}

/// Upper bound for how many `size` pieces fit in `length`: one more than
/// the floor of the quotient, to cover rounding.
fn estimate(length: f32, size: f32) -> usize {
    let quotient = (f64::from(length) + f64::from(FIT_TOLERANCE)) / f64::from(size);
    if quotient.is_nan() || quotient < 0.0 {
        return 0;
    }
    (quotient.floor() as usize).saturating_add(1)
}

// =============================================================================
// Spacing
// =============================================================================

/// Spacing between columns and at both outer edges. With a single column this
/// is plain centering.
fn even_gap(page_width: f32, card_width: f32, cols: usize) -> f32 {
    ((page_width - cols as f32 * card_width) / (cols + 1) as f32).max(0.0)
}

/// Length of `count` cards laid end to end with `gap` between neighbours.
fn span(count: usize, card: f32, gap: f32) -> f32 {
    count as f32 * card + count.saturating_sub(1) as f32 * gap
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn letter() -> PageSpec {
        PageSpec::new(8.5, 11.0)
    }

    fn poker() -> CardSpec {
        CardSpec::new(2.5, 3.5)
    }

    #[test]
    fn test_letter_poker_default() {
        let grid = compute_grid(&letter(), &poker(), &LayoutConfig::default()).unwrap();

        assert_eq!(grid.cols, 3);
        assert_eq!(grid.rows, 3);
        assert!(approx(grid.card_width, 2.45));
        assert!(approx(grid.card_height, 3.43));
        assert!(approx(grid.gap_x, (8.5 - 3.0 * 2.45) / 4.0));
        assert_eq!(grid.gap_x, grid.gap_y);
        assert_eq!(grid.offset_x, grid.gap_x);

        let grid_height = 3.0 * 3.43 + 2.0 * grid.gap_x;
        assert!(approx(grid.offset_y, (11.0 - grid_height) / 2.0));
    }

    #[test]
    fn test_card_equal_to_page() {
        let config = LayoutConfig {
            scale: 1.0,
            ..Default::default()
        };
        let grid = compute_grid(&letter(), &CardSpec::new(8.5, 11.0), &config).unwrap();

        assert_eq!((grid.cols, grid.rows), (1, 1));
        assert_eq!(grid.gap_x, 0.0);
        assert_eq!(grid.gap_y, 0.0);
        assert_eq!(grid.offset_x, 0.0);
        assert_eq!(grid.offset_y, 0.0);
    }

    #[test]
    fn test_card_wider_than_page() {
        let config = LayoutConfig {
            scale: 1.0,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &CardSpec::new(9.0, 3.5), &config);
        assert!(matches!(result, Err(CardSheetError::InvalidDimension(_))));
    }

    #[test]
    fn test_card_slightly_wider_than_page() {
        let config = LayoutConfig {
            scale: 1.0,
            margin: 0.0,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &CardSpec::new(8.5001, 3.5), &config);
        assert!(matches!(result, Err(CardSheetError::InvalidDimension(_))));

        let result = compute_grid(&letter(), &CardSpec::new(2.5, 11.0001), &config);
        assert!(matches!(result, Err(CardSheetError::InvalidDimension(_))));
    }

    #[test]
    fn test_tiny_cards_resolve_quickly() {
        let config = LayoutConfig {
            scale: 1.0,
            margin: 0.0,
            ..Default::default()
        };
        let grid = compute_grid(&letter(), &CardSpec::new(1e-6, 1e-6), &config).unwrap();
        assert!(grid.cols > 1_000_000);
        assert!(grid.rows > 1_000_000);
        assert!(grid.gap_x >= 0.0);
        assert!(grid.grid_width() <= 8.501);
        assert!(grid.grid_height() <= 11.001);
    }

    #[test]
    fn test_uncountable_grid_is_rejected() {
        let config = LayoutConfig {
            scale: 1.0,
            margin: 0.0,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &CardSpec::new(1e-12, 1e-12), &config);
        assert!(matches!(result, Err(CardSheetError::LayoutOverflow(_))));
    }

    #[test]
    fn test_max_fitting_walks_down() {
        assert_eq!(max_fitting(10, |n| n <= 3), 3);
        assert_eq!(max_fitting(3, |n| n <= 3), 3);
        assert_eq!(max_fitting(5, |_| false), 0);
        assert_eq!(max_fitting(0, |_| true), 0);
        assert_eq!(estimate(8.5, 2.45), 4);
        assert_eq!(estimate(-1.0, 2.5), 0);
    }

    #[test]
    fn test_non_positive_inputs() {
        let zero_scale = LayoutConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            compute_grid(&letter(), &poker(), &zero_scale),
            Err(CardSheetError::InvalidDimension(_))
        ));

        let negative_scale = LayoutConfig {
            scale: -1.0,
            ..Default::default()
        };
        assert!(compute_grid(&letter(), &poker(), &negative_scale).is_err());

        let config = LayoutConfig::default();
        assert!(compute_grid(&PageSpec::new(0.0, 11.0), &poker(), &config).is_err());
        assert!(compute_grid(&letter(), &CardSpec::new(2.5, -3.5), &config).is_err());
    }

    #[test]
    fn test_margin_relaxed_when_infeasible() {
        let config = LayoutConfig {
            margin: 4.0,
            scale: 1.0,
            ..Default::default()
        };
        let grid = compute_grid(&letter(), &poker(), &config).unwrap();

        // 2.5 + 8.0 > 8.5, so the margin is dropped and three columns fit
        assert_eq!(grid.cols, 3);
        assert!(approx(grid.gap_x, 0.25));
    }

    #[test]
    fn test_margin_limits_columns() {
        let config = LayoutConfig {
            margin: 0.0,
            scale: 1.0,
            ..Default::default()
        };
        let grid = compute_grid(&PageSpec::new(10.0, 11.0), &poker(), &config).unwrap();
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.gap_x, 0.0);

        let config = LayoutConfig {
            margin: 0.25,
            scale: 1.0,
            ..Default::default()
        };
        let grid = compute_grid(&PageSpec::new(10.0, 11.0), &poker(), &config).unwrap();
        assert_eq!(grid.cols, 3);
    }

    #[test]
    fn test_explicit_cols_ignore_margin() {
        let config = LayoutConfig {
            margin: 5.0,
            cols: 3,
            ..Default::default()
        };
        let grid = compute_grid(&letter(), &poker(), &config).unwrap();
        assert_eq!(grid.cols, 3);

        let config = LayoutConfig {
            cols: 4,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &poker(), &config);
        assert!(matches!(result, Err(CardSheetError::LayoutOverflow(_))));
    }

    #[test]
    fn test_single_column_is_centered() {
        let config = LayoutConfig {
            scale: 1.0,
            cols: 1,
            ..Default::default()
        };
        let grid = compute_grid(&letter(), &poker(), &config).unwrap();

        assert!(approx(grid.offset_x, (8.5 - 2.5) / 2.0));
        assert!(approx(grid.gap_y, 3.0));
        // 2 * 3.5 + 3.0 = 10.0 fits, 3 * 3.5 + 6.0 does not
        assert_eq!(grid.rows, 2);
        assert!(approx(grid.offset_y, 0.5));
    }

    #[test]
    fn test_explicit_rows_overflow() {
        let config = LayoutConfig {
            scale: 1.0,
            rows: 4,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &poker(), &config);
        assert!(matches!(result, Err(CardSheetError::LayoutOverflow(_))));

        // Cards alone fit, but not with the reused horizontal gap
        let config = LayoutConfig {
            scale: 1.0,
            rows: 3,
            cols: 1,
            ..Default::default()
        };
        let result = compute_grid(&letter(), &poker(), &config);
        assert!(matches!(result, Err(CardSheetError::LayoutOverflow(_))));
    }

    #[test]
    fn test_idempotent() {
        let config = LayoutConfig::default();
        let a = compute_grid(&letter(), &poker(), &config).unwrap();
        let b = compute_grid(&letter(), &poker(), &config).unwrap();
        assert_eq!(a.gap_x.to_bits(), b.gap_x.to_bits());
        assert_eq!(a.offset_y.to_bits(), b.offset_y.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_always_fits() {
        let pages = [(8.5, 11.0), (11.0, 8.5), (8.27, 11.69), (5.0, 7.0)];
        let cards = [(2.5, 3.5), (2.25, 3.5), (1.0, 1.0), (4.0, 6.0)];
        let margins = [0.0, 0.25, 0.5, 2.0];
        let scales = [0.5, 0.98, 1.0];

        for &(pw, ph) in &pages {
            for &(cw, ch) in &cards {
                for &margin in &margins {
                    for &scale in &scales {
                        let page = PageSpec::new(pw, ph);
                        let config = LayoutConfig {
                            margin,
                            scale,
                            ..Default::default()
                        };
                        let result = compute_grid(&page, &CardSpec::new(cw, ch), &config);
                        if cw * scale > pw || ch * scale > ph {
                            assert!(result.is_err());
                            continue;
                        }

                        let grid = result.unwrap();
                        assert!(grid.rows >= 1 && grid.cols >= 1);
                        assert_eq!(grid.gap_x, grid.gap_y);
                        assert!(grid.offset_x >= 0.0 && grid.offset_y >= 0.0);
                        assert!(grid.offset_x + grid.grid_width() <= pw + EPS);
                        assert!(grid.offset_y + grid.grid_height() <= ph + EPS);
                    }
                }
            }
        }
    }
}

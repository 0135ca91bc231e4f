//! Layout data types for card sheets
//!
//! These types represent the intermediate layout calculations between
//! the sheet options and PDF rendering. All lengths are in inches and
//! positions are measured from the top-left corner of the page.

/// Grid geometry for one page
///
/// Computed once by [`compute_grid`](super::compute_grid) and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Number of rows in the card grid
    pub rows: usize,
    /// Number of columns in the card grid
    pub cols: usize,
    /// Scaled card width
    pub card_width: f32,
    /// Scaled card height
    pub card_height: f32,
    /// Horizontal spacing between cards (and before the first column)
    pub gap_x: f32,
    /// Vertical spacing between cards, always equal to `gap_x`
    pub gap_y: f32,
    /// Distance from the left page edge to the first column
    pub offset_x: f32,
    /// Distance from the top page edge to the first row
    pub offset_y: f32,
}

impl Grid {
    /// Number of cards on a full page
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Width spanned by the cards and the gaps between them
    pub fn grid_width(&self) -> f32 {
        self.cols as f32 * self.card_width + self.cols.saturating_sub(1) as f32 * self.gap_x
    }

    /// Height spanned by the cards and the gaps between them
    pub fn grid_height(&self) -> f32 {
        self.rows as f32 * self.card_height + self.rows.saturating_sub(1) as f32 * self.gap_y
    }
}

/// Final placement of one image on one output page
#[derive(Debug, PartialEq)]
pub struct Placement<'a, T> {
    /// Output page index (0-based)
    pub page_index: usize,
    /// Row within the page grid (0 = top row)
    pub row: usize,
    /// Column within the page grid (0 = leftmost column)
    pub col: usize,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// The caller's image reference
    pub source: &'a T,
}

impl<T> Clone for Placement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Placement<'_, T> {}

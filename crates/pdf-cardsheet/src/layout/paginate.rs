//! Distribution of images across pages
//!
//! Images are placed in reading order (left to right, top to bottom) and
//! pages are filled in input order. Nothing is sorted or reordered here.

use crate::types::{CardSheetError, Result};

use super::{Grid, Placement};

/// Lay out `images` on pages of `grid`.
///
/// Returns a lazy, restartable sequence: clone it to walk the placements
/// again. Fails with `EmptyInput` when there is nothing to place and with
/// `LayoutOverflow` when the grid has no slots.
pub fn paginate<'a, T>(images: &'a [T], grid: &Grid) -> Result<Placements<'a, T>> {
    if images.is_empty() {
        return Err(CardSheetError::EmptyInput);
    }
    if grid.capacity() == 0 {
        return Err(CardSheetError::LayoutOverflow(format!(
            "a {} x {} grid has no slots",
            grid.rows, grid.cols
        )));
    }

    Ok(Placements {
        images,
        grid: *grid,
        next: 0,
    })
}

/// Number of pages needed for `count` images at `capacity` cards per page.
pub fn page_count(count: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    count.div_ceil(capacity)
}

/// Iterator over the placements produced by [`paginate`]
#[derive(Debug)]
pub struct Placements<'a, T> {
    images: &'a [T],
    grid: Grid,
    next: usize,
}

impl<T> Clone for Placements<'_, T> {
    fn clone(&self) -> Self {
        Self {
            images: self.images,
            grid: self.grid,
            next: self.next,
        }
    }
}

impl<'a, T> Placements<'a, T> {
    /// Total number of pages this sequence spans
    pub fn page_count(&self) -> usize {
        page_count(self.images.len(), self.grid.capacity())
    }

    /// The grid the placements are computed from
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn place(&self, index: usize) -> Placement<'a, T> {
        let grid = &self.grid;
        let capacity = grid.capacity();
        let slot = index % capacity;
        let row = slot / grid.cols;
        let col = slot % grid.cols;

        Placement {
            page_index: index / capacity,
            row,
            col,
            x: grid.offset_x + col as f32 * (grid.card_width + grid.gap_x),
            y: grid.offset_y + row as f32 * (grid.card_height + grid.gap_y),
            width: grid.card_width,
            height: grid.card_height,
            source: &self.images[index],
        }
    }
}

impl<'a, T> Iterator for Placements<'a, T> {
    type Item = Placement<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.images.len() {
            return None;
        }
        let placement = self.place(self.next);
        self.next += 1;
        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.images.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Placements<'_, T> {}

use crate::layout::{Grid, page_count};
use crate::types::*;

/// Calculate page and slot usage for placing `images` cards on `grid`
pub fn calculate_statistics(images: usize, grid: &Grid) -> Result<SheetStatistics> {
    if images == 0 {
        return Err(CardSheetError::EmptyInput);
    }

    let cards_per_page = grid.capacity();
    if cards_per_page == 0 {
        return Err(CardSheetError::LayoutOverflow(format!(
            "a {} x {} grid has no slots",
            grid.rows, grid.cols
        )));
    }
    let pages = page_count(images, cards_per_page);
    let empty_slots = pages * cards_per_page - images;

    Ok(SheetStatistics {
        images,
        cards_per_page,
        pages,
        empty_slots,
    })
}

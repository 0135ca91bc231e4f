//! Layout calculation modules for card sheets
//!
//! This module handles all the geometric calculations for a card sheet:
//! - Grid layout (row/column count, gap, centering offsets)
//! - Pagination (which image lands where on which page)

mod grid;
mod paginate;
mod types;

pub use grid::*;
pub use paginate::*;
pub use types::*;

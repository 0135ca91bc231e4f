pub mod images;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use images::{CardImage, discover_images};
pub use layout::{Grid, Placement, Placements, compute_grid, page_count, paginate};
pub use options::*;
pub use render::{generate_pdf, generate_pdf_bytes, generate_pdf_with_progress};
pub use stats::calculate_statistics;
pub use types::*;

//! PDF rendering for card sheets
//!
//! This module handles all PDF-specific operations:
//! - Preparing card rasters at the output resolution
//! - Placing image XObjects at the computed grid positions
//! - Writing the finished document

mod page;
mod raster;

pub use page::{generate_pdf, generate_pdf_bytes, generate_pdf_with_progress};
pub use raster::target_pixels;

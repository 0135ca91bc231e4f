//! Card image discovery

use crate::types::*;
use image::ImageReader;
use std::path::{Path, PathBuf};

/// An image file found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
}

/// Scan `dir` for card images, sorted by file name.
///
/// Files that do not fully decode as images are skipped. The result may be
/// empty.
pub async fn discover_images(dir: impl AsRef<Path>) -> Result<Vec<CardImage>> {
    let dir = dir.as_ref().to_owned();

    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(CardSheetError::InputNotFound(dir)),
    }

    log::info!("Scanning '{}' for images...", dir.display());

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(&dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    // Decoding is blocking I/O and CPU work
    let images = tokio::task::spawn_blocking(move || {
        files
            .into_iter()
            .filter_map(|path| match decode_dimensions(&path) {
                Ok((width_px, height_px)) => Some(CardImage {
                    path,
                    width_px,
                    height_px,
                }),
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect::<Vec<_>>()
    })
    .await?;

    log::info!("Found {} images", images.len());
    Ok(images)
}

/// Decode the whole image and return its pixel dimensions.
///
/// A valid header is not enough: truncated or corrupt pixel data would only
/// fail later, while the PDF is being rendered.
fn decode_dimensions(path: &Path) -> Result<(u32, u32)> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok((image.width(), image.height()))
}

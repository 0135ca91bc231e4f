//! Thumbnails of the input folder

use pdf_cardsheet::CardImage;
use std::path::Path;

/// Longest edge of a preview thumbnail, in pixels
pub const THUMBNAIL_SIZE: u32 = 150;

/// Decoded thumbnail ready to upload as a texture
pub struct Thumbnail {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Discover the card images in `dir` and shrink each to a thumbnail.
///
/// Files that fail to decode here are logged and left out of the preview.
pub async fn load_thumbnails(dir: impl AsRef<Path>) -> pdf_cardsheet::Result<Vec<Thumbnail>> {
    let images = pdf_cardsheet::discover_images(dir).await?;

    let thumbnails = tokio::task::spawn_blocking(move || {
        images
            .iter()
            .filter_map(|image| match make_thumbnail(image) {
                Ok(thumbnail) => Some(thumbnail),
                Err(e) => {
                    log::warn!("Could not load thumbnail for {}: {}", image.path.display(), e);
                    None
                }
            })
            .collect::<Vec<_>>()
    })
    .await?;

    Ok(thumbnails)
}

fn make_thumbnail(image: &CardImage) -> image::ImageResult<Thumbnail> {
    let mut decoded = image::open(&image.path)?;
    if decoded.width() > THUMBNAIL_SIZE || decoded.height() > THUMBNAIL_SIZE {
        decoded = decoded.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    }
    let rgba = decoded.to_rgba8();

    Ok(Thumbnail {
        name: image
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

//! Card sheet PDF assembly
//!
//! One output page per page index, each card drawn as an image XObject
//! at its placement. Placements use a top-left origin; PDF uses bottom-left.

use crate::images::CardImage;
use crate::layout::{Grid, Placement, paginate};
use crate::types::{CardSheetError, PageSpec, Result, in_to_pt};
use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::raster::{prepare_raster, target_pixels};

/// Render `images` onto pages of `grid` and write the PDF to `output_path`.
pub async fn generate_pdf(
    images: &[CardImage],
    grid: &Grid,
    page: &PageSpec,
    dpi: u32,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    generate_pdf_with_progress(images, grid, page, dpi, output_path, |_, _| {}).await
}

/// Like [`generate_pdf`], calling `on_page(current, total)` as each page
/// starts. `current` counts from 1.
pub async fn generate_pdf_with_progress<F>(
    images: &[CardImage],
    grid: &Grid,
    page: &PageSpec,
    dpi: u32,
    output_path: impl AsRef<Path>,
    mut on_page: F,
) -> Result<()>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    let images = images.to_vec();
    let grid = *grid;
    let page = *page;
    let output_path = output_path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || {
        render_document(&images, &grid, &page, dpi, &mut on_page)
    })
    .await??;

    log::info!("Saving output PDF to '{}'...", output_path.display());
    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

/// Render `images` onto pages of `grid` and return the PDF bytes.
pub fn generate_pdf_bytes(
    images: &[CardImage],
    grid: &Grid,
    page: &PageSpec,
    dpi: u32,
) -> Result<Vec<u8>> {
    render_document(images, grid, page, dpi, &mut |_, _| {})
}

fn render_document(
    images: &[CardImage],
    grid: &Grid,
    page: &PageSpec,
    dpi: u32,
    on_page: &mut dyn FnMut(usize, usize),
) -> Result<Vec<u8>> {
    if dpi == 0 {
        return Err(CardSheetError::InvalidDimension(
            "dpi must be greater than zero".to_string(),
        ));
    }

    let placements = paginate(images, grid)?;
    let total_pages = placements.page_count();

    let mut doc = PdfDocument::new("Card Sheet");
    let mut cache: HashMap<PathBuf, (XObjectId, usize, usize)> = HashMap::new();
    let mut page_ops: Vec<Vec<Op>> = (0..total_pages).map(|_| Vec::new()).collect();

    for placement in placements {
        if placement.row == 0 && placement.col == 0 {
            log::info!(
                "Generating page {}/{}...",
                placement.page_index + 1,
                total_pages
            );
            on_page(placement.page_index + 1, total_pages);
        }

        let (id, width_px, height_px) =
            embed_image(&mut doc, &mut cache, placement.source, grid, dpi)?;
        page_ops[placement.page_index].push(draw_op(&placement, page, id, width_px, height_px));
    }

    doc.pages = page_ops
        .into_iter()
        .map(|ops| PdfPage::new(Mm(page.width * 25.4), Mm(page.height * 25.4), ops))
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

/// Add the card raster to the document once per distinct file.
fn embed_image(
    doc: &mut PdfDocument,
    cache: &mut HashMap<PathBuf, (XObjectId, usize, usize)>,
    image: &CardImage,
    grid: &Grid,
    dpi: u32,
) -> Result<(XObjectId, usize, usize)> {
    if let Some(cached) = cache.get(&image.path) {
        return Ok(cached.clone());
    }

    let png = prepare_raster(
        &image.path,
        target_pixels(grid.card_width, dpi),
        target_pixels(grid.card_height, dpi),
    )?;

    let mut warnings = Vec::new();
    let raw_image = RawImage::decode_from_bytes(&png, &mut warnings).map_err(|e| {
        CardSheetError::Pdf(format!(
            "Failed to embed {}: {}",
            image.path.display(),
            e
        ))
    })?;
    let (width_px, height_px) = (raw_image.width, raw_image.height);

    let id = XObjectId::new();
    doc.resources
        .xobjects
        .map
        .insert(id.clone(), XObject::Image(raw_image));

    let entry = (id, width_px, height_px);
    cache.insert(image.path.clone(), entry.clone());
    Ok(entry)
}

/// Draw an embedded raster so it covers the placement rectangle exactly.
fn draw_op(
    placement: &Placement<'_, CardImage>,
    page: &PageSpec,
    id: XObjectId,
    width_px: usize,
    height_px: usize,
) -> Op {
    let width_pt = in_to_pt(placement.width);
    let height_pt = in_to_pt(placement.height);
    let bottom = page.height - (placement.y + placement.height);

    // At 72 dpi one pixel is one point, so the scale maps pixels to points
    let transform = XObjectTransform {
        translate_x: Some(Pt(in_to_pt(placement.x))),
        translate_y: Some(Pt(in_to_pt(bottom))),
        scale_x: Some(width_pt / width_px as f32),
        scale_y: Some(height_pt / height_px as f32),
        rotate: None,
        dpi: Some(72.0),
    };

    Op::UseXobject { id, transform }
}

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::Document;
use pdf_cardsheet::*;
use std::path::Path;
use tempfile::TempDir;

const TEST_DPI: u32 = 20;

fn create_cards(dir: &Path, count: usize) {
    for i in 0..count {
        let shade = (i * 20 % 256) as u8;
        RgbImage::from_pixel(25, 35, Rgb([shade, 100, 200]))
            .save(dir.join(format!("card_{i:02}.png")))
            .unwrap();
    }
}

fn default_grid(options: &SheetOptions) -> Grid {
    compute_grid(&options.page, &options.card, &options.layout).unwrap()
}

#[tokio::test]
async fn test_generate_pdf_page_count() {
    let dir = TempDir::new().unwrap();
    create_cards(dir.path(), 10);

    let images = discover_images(dir.path()).await.unwrap();
    let options = SheetOptions::default();
    let grid = default_grid(&options);

    let output = dir.path().join("deck.pdf");
    generate_pdf(&images, &grid, &options.page, TEST_DPI, &output)
        .await
        .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_generate_pdf_bytes_single_page() {
    let dir = TempDir::new().unwrap();
    create_cards(dir.path(), 3);
    RgbaImage::from_pixel(20, 28, Rgba([0, 255, 0, 64]))
        .save(dir.path().join("transparent.png"))
        .unwrap();

    let images: Vec<CardImage> = ["card_00.png", "card_01.png", "card_02.png", "transparent.png"]
        .iter()
        .map(|name| CardImage {
            path: dir.path().join(name),
            width_px: 25,
            height_px: 35,
        })
        .collect();

    let options = SheetOptions::default();
    let grid = default_grid(&options);
    let bytes = generate_pdf_bytes(&images, &grid, &options.page, TEST_DPI).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_generate_pdf_repeated_image() {
    let dir = TempDir::new().unwrap();
    create_cards(dir.path(), 1);
    let card = CardImage {
        path: dir.path().join("card_00.png"),
        width_px: 25,
        height_px: 35,
    };
    let images = vec![card; 12];

    let options = SheetOptions::default();
    let grid = default_grid(&options);
    let bytes = generate_pdf_bytes(&images, &grid, &options.page, TEST_DPI).unwrap();

    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_generate_pdf_empty_input() {
    let options = SheetOptions::default();
    let grid = default_grid(&options);

    let result = generate_pdf_bytes(&[], &grid, &options.page, TEST_DPI);
    assert!(matches!(result, Err(CardSheetError::EmptyInput)));
}

#[test]
fn test_generate_pdf_unreadable_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let images = vec![CardImage {
        path,
        width_px: 25,
        height_px: 35,
    }];
    let options = SheetOptions::default();
    let grid = default_grid(&options);

    let result = generate_pdf_bytes(&images, &grid, &options.page, TEST_DPI);
    assert!(matches!(result, Err(CardSheetError::Image(_))));
}

#[tokio::test]
async fn test_generate_pdf_reports_progress() {
    let dir = TempDir::new().unwrap();
    create_cards(dir.path(), 20);

    let images = discover_images(dir.path()).await.unwrap();
    let options = SheetOptions::default();
    let grid = default_grid(&options);

    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    let output = dir.path().join("deck.pdf");
    generate_pdf_with_progress(
        &images,
        &grid,
        &options.page,
        TEST_DPI,
        &output,
        move |current, total| sink.lock().unwrap().push((current, total)),
    )
    .await
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    assert!(output.exists());
}

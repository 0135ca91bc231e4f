use pdf_cardsheet::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::Letter.dimensions_in(), (8.5, 11.0));
    assert_eq!(PaperSize::Legal.dimensions_in(), (8.5, 14.0));
    assert_eq!(PaperSize::Tabloid.dimensions_in(), (11.0, 17.0));

    let (w, h) = PaperSize::A4.dimensions_in();
    assert!(approx(w, 8.268));
    assert!(approx(h, 11.693));

    let custom = PaperSize::Custom {
        width_in: 4.0,
        height_in: 6.0,
    };
    assert_eq!(custom.dimensions_in(), (4.0, 6.0));
}

#[test]
fn test_orientation_swaps_dimensions() {
    let portrait = PaperSize::Letter.page_spec(Orientation::Portrait);
    let landscape = PaperSize::Letter.page_spec(Orientation::Landscape);
    assert_eq!(portrait, PageSpec::new(8.5, 11.0));
    assert_eq!(landscape, PageSpec::new(11.0, 8.5));
}

#[test]
fn test_card_size_presets() {
    assert_eq!(CardSize::Poker.card_spec(), CardSpec::new(2.5, 3.5));
    assert_eq!(CardSize::Bridge.card_spec(), CardSpec::new(2.25, 3.5));
    assert_eq!(CardSize::Tarot.card_spec(), CardSpec::new(2.75, 4.75));
}

#[test]
fn test_spec_validation() {
    assert!(PageSpec::new(8.5, 11.0).validate().is_ok());
    assert!(matches!(
        PageSpec::new(-1.0, 11.0).validate(),
        Err(CardSheetError::InvalidDimension(_))
    ));
    assert!(CardSpec::new(2.5, f32::INFINITY).validate().is_err());
}

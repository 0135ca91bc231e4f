use pdf_cardsheet::{
    CardSize, Grid, Orientation, PaperSize, SheetOptions, SheetStatistics, calculate_statistics,
    compute_grid,
};
use std::path::PathBuf;

/// Everything the settings form edits
pub struct SheetForm {
    pub input_dir: String,
    pub output_path: String,
    pub options: SheetOptions,
}

impl Default for SheetForm {
    fn default() -> Self {
        Self {
            input_dir: "cards".to_string(),
            output_path: "output_deck.pdf".to_string(),
            options: SheetOptions::default(),
        }
    }
}

impl SheetForm {
    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(self.input_dir.trim())
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_path.trim())
    }

    pub fn apply_paper(&mut self, paper: PaperSize, orientation: Orientation) {
        self.options.page = paper.page_spec(orientation);
    }

    pub fn apply_card(&mut self, card: CardSize) {
        self.options.card = card.card_spec();
    }

    /// Swap page width and height
    pub fn rotate_page(&mut self) {
        let page = &mut self.options.page;
        std::mem::swap(&mut page.width, &mut page.height);
    }

    /// Grid for the current settings, or the reason there is none
    pub fn layout(&self) -> Result<Grid, String> {
        let options = &self.options;
        options.validate().map_err(|e| e.to_string())?;
        compute_grid(&options.page, &options.card, &options.layout).map_err(|e| e.to_string())
    }

    /// Check the form before starting a run
    pub fn check_ready(&self) -> Result<(), String> {
        if self.input_dir.trim().is_empty() {
            return Err("Please select an input folder".to_string());
        }
        if self.output_path.trim().is_empty() {
            return Err("Please select an output file".to_string());
        }
        self.layout().map(|_| ())
    }
}

/// Layout summary for the current form and preview count
pub struct LayoutSummary {
    pub grid: Grid,
    pub stats: Option<SheetStatistics>,
}

impl LayoutSummary {
    pub fn new(grid: Grid, images: usize) -> Self {
        Self {
            grid,
            stats: calculate_statistics(images, &grid).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_cardsheet::{CardSpec, PageSpec};

    #[test]
    fn test_default_form_lays_out() {
        let form = SheetForm::default();
        let grid = form.layout().unwrap();
        assert_eq!((grid.cols, grid.rows), (3, 3));
        assert!(form.check_ready().is_ok());
    }

    #[test]
    fn test_presets_and_rotation() {
        let mut form = SheetForm::default();
        form.apply_paper(PaperSize::Letter, Orientation::Landscape);
        assert_eq!(form.options.page, PageSpec::new(11.0, 8.5));

        form.rotate_page();
        assert_eq!(form.options.page, PageSpec::new(8.5, 11.0));

        form.apply_card(CardSize::Bridge);
        assert_eq!(form.options.card, CardSpec::new(2.25, 3.5));
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let mut form = SheetForm::default();
        form.options.card = CardSpec::new(9.0, 3.5);
        form.options.layout.scale = 1.0;
        assert!(form.layout().is_err());

        let mut form = SheetForm::default();
        form.input_dir = "  ".to_string();
        assert!(form.check_ready().is_err());
    }

    #[test]
    fn test_summary_without_images() {
        let grid = SheetForm::default().layout().unwrap();
        assert!(LayoutSummary::new(grid, 0).stats.is_none());

        let stats = LayoutSummary::new(grid, 10).stats.unwrap();
        assert_eq!((stats.pages, stats.empty_slots), (2, 8));
    }
}

use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid sizing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Minimum horizontal margin (left and right) in inches.
    /// Advisory: dropped when not even one column fits with it.
    pub margin: f32,
    /// Uniform card scale factor (0.98 = 98% size)
    pub scale: f32,
    /// Grid rows, 0 = auto
    pub rows: usize,
    /// Grid columns, 0 = auto
    pub cols: usize,
    /// Output raster resolution for embedded images
    pub dpi: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 0.5,
            scale: 0.98,
            rows: 0,
            cols: 0,
            dpi: 300,
        }
    }
}

impl LayoutConfig {
    /// Validate scalar ranges. Fit against the page is checked by `compute_grid`.
    pub fn validate(&self) -> Result<()> {
        self.validate_geometry()?;
        if self.dpi == 0 {
            return Err(CardSheetError::InvalidDimension(
                "dpi must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Scale and margin checks shared with `compute_grid`
    pub(crate) fn validate_geometry(&self) -> Result<()> {
        check_positive("scale", self.scale)?;
        check_non_negative("margin", self.margin)
    }
}

/// Complete configuration for one card sheet run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetOptions {
    pub page: PageSpec,
    pub card: CardSpec,
    pub layout: LayoutConfig,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            page: PaperSize::Letter.page_spec(Orientation::Portrait),
            card: CardSize::Poker.card_spec(),
            layout: LayoutConfig::default(),
        }
    }
}

impl SheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CardSheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CardSheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.page.validate()?;
        self.card.validate()?;
        self.layout.validate()
    }
}

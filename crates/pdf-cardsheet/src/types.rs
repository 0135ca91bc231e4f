use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardSheetError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Layout overflow: {0}")]
    LayoutOverflow(String),
    #[error("No images to place")]
    EmptyInput,
    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CardSheetError>;

/// Physical page size in inches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
}

impl PageSpec {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check that both dimensions are finite and positive
    pub fn validate(&self) -> Result<()> {
        check_positive("page width", self.width)?;
        check_positive("page height", self.height)
    }
}

/// Physical card size in inches, before scaling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSpec {
    pub width: f32,
    pub height: f32,
}

impl CardSpec {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check that both dimensions are finite and positive
    pub fn validate(&self) -> Result<()> {
        check_positive("card width", self.width)?;
        check_positive("card height", self.height)
    }
}

pub(crate) fn check_positive(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CardSheetError::InvalidDimension(format!(
            "{what} must be a positive number, got {value}"
        )))
    }
}

pub(crate) fn check_non_negative(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CardSheetError::InvalidDimension(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_in: f32, height_in: f32 },
}

impl PaperSize {
    /// Get base dimensions in inches (always portrait for standard sizes)
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (mm_to_in(297.0), mm_to_in(420.0)),
            PaperSize::A4 => (mm_to_in(210.0), mm_to_in(297.0)),
            PaperSize::A5 => (mm_to_in(148.0), mm_to_in(210.0)),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Tabloid => (11.0, 17.0),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Page spec with orientation applied
    pub fn page_spec(self, orientation: Orientation) -> PageSpec {
        let (w, h) = self.dimensions_in();
        match orientation {
            Orientation::Portrait => PageSpec::new(w, h),
            Orientation::Landscape => PageSpec::new(h, w),
        }
    }
}

/// Common trading and playing card formats
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardSize {
    /// 2.5" x 3.5", the usual TCG and poker deck size
    Poker,
    Bridge,
    Tarot,
    MiniAmerican,
    Custom { width_in: f32, height_in: f32 },
}

impl CardSize {
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            CardSize::Poker => (2.5, 3.5),
            CardSize::Bridge => (2.25, 3.5),
            CardSize::Tarot => (2.75, 4.75),
            CardSize::MiniAmerican => (mm_to_in(41.0), mm_to_in(63.0)),
            CardSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    pub fn card_spec(self) -> CardSpec {
        let (w, h) = self.dimensions_in();
        CardSpec::new(w, h)
    }
}

/// Convert millimeters to inches
pub fn mm_to_in(mm: f32) -> f32 {
    mm / 25.4
}

/// Convert inches to PDF points
pub fn in_to_pt(inches: f32) -> f32 {
    inches * 72.0
}

/// Statistics about a card sheet run
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Number of images to place
    pub images: usize,
    /// Grid capacity of a single page
    pub cards_per_page: usize,
    /// Number of output pages
    pub pages: usize,
    /// Unused grid slots on the last page
    pub empty_slots: usize,
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use pdf_cardsheet::{CardSize, CardSpec, Orientation, PageSpec, PaperSize, SheetOptions};
use std::path::PathBuf;

/// Arrange card images into a printable PDF grid.
#[derive(Parser)]
#[command(name = "cardsheet", version)]
struct Cli {
    /// Input folder containing image files
    #[arg(short, long, default_value = "cards")]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long, default_value = "output_deck.pdf")]
    output: PathBuf,

    /// Base options from a JSON file; explicit flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output paper size [default: letter]
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation [default: portrait]
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Page width in inches (overrides --paper)
    #[arg(long)]
    page_width: Option<f32>,

    /// Page height in inches (overrides --paper)
    #[arg(long)]
    page_height: Option<f32>,

    /// Card size preset [default: poker]
    #[arg(long, value_enum)]
    card: Option<CardArg>,

    /// Actual card width in inches (overrides --card)
    #[arg(long)]
    card_width: Option<f32>,

    /// Actual card height in inches (overrides --card)
    #[arg(long)]
    card_height: Option<f32>,

    /// Minimum horizontal margin (left/right) in inches [default: 0.5]
    #[arg(short, long)]
    margin: Option<f32>,

    /// Scale factor (0.98 = 98% size) [default: 0.98]
    #[arg(short, long)]
    scale: Option<f32>,

    /// Grid rows, 0 = auto-calculate [default: 0]
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns, 0 = auto-calculate [default: 0]
    #[arg(long)]
    cols: Option<usize>,

    /// Output resolution (DPI) [default: 300]
    #[arg(long)]
    dpi: Option<u32>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum CardArg {
    Poker,
    Bridge,
    Tarot,
    MiniAmerican,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<CardArg> for CardSize {
    fn from(arg: CardArg) -> Self {
        match arg {
            CardArg::Poker => Self::Poker,
            CardArg::Bridge => Self::Bridge,
            CardArg::Tarot => Self::Tarot,
            CardArg::MiniAmerican => Self::MiniAmerican,
        }
    }
}

impl Cli {
    /// Layer explicit flags over the base options
    fn apply(&self, mut options: SheetOptions) -> SheetOptions {
        if self.paper.is_some() || self.orientation.is_some() {
            let paper = self.paper.map(PaperSize::from).unwrap_or(PaperSize::Letter);
            let orientation = self.orientation.map(Orientation::from).unwrap_or_default();
            options.page = paper.page_spec(orientation);
        }
        options.page = PageSpec::new(
            self.page_width.unwrap_or(options.page.width),
            self.page_height.unwrap_or(options.page.height),
        );

        if let Some(card) = self.card {
            options.card = CardSize::from(card).card_spec();
        }
        options.card = CardSpec::new(
            self.card_width.unwrap_or(options.card.width),
            self.card_height.unwrap_or(options.card.height),
        );

        let layout = &mut options.layout;
        layout.margin = self.margin.unwrap_or(layout.margin);
        layout.scale = self.scale.unwrap_or(layout.scale);
        layout.rows = self.rows.unwrap_or(layout.rows);
        layout.cols = self.cols.unwrap_or(layout.cols);
        layout.dpi = self.dpi.unwrap_or(layout.dpi);

        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => SheetOptions::load(path).await?,
        None => SheetOptions::default(),
    };
    let options = cli.apply(base);
    options.validate()?;

    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        log::info!("Saved options to '{}'", path.display());
    }

    let grid = pdf_cardsheet::compute_grid(&options.page, &options.card, &options.layout)?;
    let images = pdf_cardsheet::discover_images(&cli.input).await?;
    let stats = pdf_cardsheet::calculate_statistics(images.len(), &grid)?;

    println!("Card Sheet Layout:");
    println!("  Grid: {} cols x {} rows", grid.cols, grid.rows);
    println!(
        "  Card: {:.3} x {:.3} in ({}% scale)",
        grid.card_width,
        grid.card_height,
        (options.layout.scale * 100.0).round()
    );
    println!("  Gap: {:.4} in", grid.gap_x);
    println!("  Images: {}", stats.images);
    println!("  Pages: {}", stats.pages);
    println!("  Empty slots on last page: {}", stats.empty_slots);

    if cli.stats_only {
        return Ok(());
    }

    pdf_cardsheet::generate_pdf(
        &images,
        &grid,
        &options.page,
        options.layout.dpi,
        &cli.output,
    )
    .await?;
    println!(
        "Generated {} cards on {} pages → {}",
        stats.images,
        stats.pages,
        cli.output.display()
    );

    Ok(())
}

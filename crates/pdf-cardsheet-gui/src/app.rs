use eframe::egui;
use pdf_cardsheet::{CardSize, Orientation, PaperSize};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::preview::{THUMBNAIL_SIZE, Thumbnail};
use crate::state::{LayoutSummary, SheetForm};
use crate::ui_components::{DragValueBuilder, inch_pair, preset_selector};
use crate::worker::{Command, Update};

const PAPER_PRESETS: [(PaperSize, &str); 6] = [
    (PaperSize::Letter, "Letter"),
    (PaperSize::Legal, "Legal"),
    (PaperSize::Tabloid, "Tabloid"),
    (PaperSize::A3, "A3"),
    (PaperSize::A4, "A4"),
    (PaperSize::A5, "A5"),
];

const CARD_PRESETS: [(CardSize, &str); 4] = [
    (CardSize::Poker, "Poker"),
    (CardSize::Bridge, "Bridge"),
    (CardSize::Tarot, "Tarot"),
    (CardSize::MiniAmerican, "Mini American"),
];

struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

struct PreviewCard {
    name: String,
    texture: egui::TextureHandle,
}

pub struct CardSheetApp {
    form: SheetForm,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<Command>,
    update_rx: mpsc::UnboundedReceiver<Update>,

    progress: Option<ProgressState>,
    generating: bool,
    loading_preview: bool,
    preview: Vec<PreviewCard>,

    // Dialogs
    completed: Option<PathBuf>,
    error: Option<String>,

    logger: AppLogger,
    _tokio_handle: tokio::runtime::Handle,
}

impl CardSheetApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let mut app = Self {
            form: SheetForm::default(),
            status: String::new(),
            command_tx,
            update_rx,
            progress: None,
            generating: false,
            loading_preview: false,
            preview: Vec::new(),
            completed: None,
            error: None,
            logger,
            _tokio_handle: tokio_handle,
        };

        if app.form.input_dir().is_dir() {
            app.request_preview();
        }
        app
    }

    fn request_preview(&mut self) {
        let input_dir = self.form.input_dir();
        if input_dir.as_os_str().is_empty() {
            return;
        }
        if self.command_tx.send(Command::LoadPreview { input_dir }).is_ok() {
            self.loading_preview = true;
        }
    }

    fn request_generate(&mut self) {
        if let Err(message) = self.form.check_ready() {
            self.error = Some(message);
            return;
        }

        let command = Command::Generate {
            input_dir: self.form.input_dir(),
            output_path: self.form.output_path(),
            options: self.form.options,
        };
        if self.command_tx.send(command).is_ok() {
            log::info!("Generating '{}'...", self.form.output_path().display());
            self.generating = true;
            self.progress = Some(ProgressState {
                operation: "Preparing cards".to_string(),
                current: 0,
                total: 1,
            });
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                Update::PreviewLoaded { thumbnails } => {
                    self.preview = thumbnails
                        .into_iter()
                        .enumerate()
                        .map(|(index, thumbnail)| upload_thumbnail(ctx, index, thumbnail))
                        .collect();
                    self.loading_preview = false;
                    self.status = format!("Loaded {} card previews", self.preview.len());
                }
                Update::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint();
                }
                Update::GenerateComplete { path, cards, pages } => {
                    self.status = format!("Generated {cards} cards on {pages} pages");
                    self.generating = false;
                    self.progress = None;
                    self.completed = Some(path);
                }
                Update::Error { message } => {
                    log::error!("{message}");
                    self.status = format!("Error: {message}");
                    self.generating = false;
                    self.loading_preview = false;
                    self.progress = None;
                    self.error = Some(message);
                }
            }
        }
    }

    fn show_paths(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Input folder:");
            let response = ui.text_edit_singleline(&mut self.form.input_dir);
            if response.lost_focus() {
                self.request_preview();
            }
            if ui.button("Browse…").clicked() {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.form.input_dir = folder.display().to_string();
                    self.request_preview();
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Output PDF:");
            ui.text_edit_singleline(&mut self.form.output_path);
            if ui.button("Browse…").clicked() {
                if let Some(file) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .set_file_name("output_deck.pdf")
                    .save_file()
                {
                    self.form.output_path = file.display().to_string();
                }
            }
        });
    }

    fn show_dimensions(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("📐 Page and Card")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if let Some(paper) = preset_selector(ui, "paper_preset", &PAPER_PRESETS) {
                        self.form.apply_paper(paper, Orientation::Portrait);
                    }
                    if ui.button("⟲ Rotate").clicked() {
                        self.form.rotate_page();
                    }
                });
                let page = &mut self.form.options.page;
                inch_pair(ui, "Page:", &mut page.width, &mut page.height, 1.0..=50.0);
                ui.add_space(5.0);

                if let Some(card) = preset_selector(ui, "card_preset", &CARD_PRESETS) {
                    self.form.apply_card(card);
                }
                let card = &mut self.form.options.card;
                inch_pair(ui, "Card:", &mut card.width, &mut card.height, 0.1..=10.0);
            });
    }

    fn show_layout_settings(&mut self, ui: &mut egui::Ui) {
        let layout = &mut self.form.options.layout;
        egui::CollapsingHeader::new("🔲 Grid")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Min margin:");
                    DragValueBuilder::new(&mut layout.margin)
                        .range(0.0..=5.0)
                        .suffix(" in")
                        .speed(0.01)
                        .show(ui);
                });
                ui.horizontal(|ui| {
                    ui.label("Scale:");
                    DragValueBuilder::new(&mut layout.scale)
                        .range(0.1..=2.0)
                        .speed(0.01)
                        .show(ui);
                });
                ui.horizontal(|ui| {
                    ui.label("Rows:");
                    DragValueBuilder::new(&mut layout.rows)
                        .range(0..=100)
                        .show(ui);
                    ui.label("Cols:");
                    DragValueBuilder::new(&mut layout.cols)
                        .range(0..=100)
                        .show(ui);
                    ui.weak("(0 = auto)");
                });
                ui.horizontal(|ui| {
                    ui.label("DPI:");
                    DragValueBuilder::new(&mut layout.dpi)
                        .range(72..=1200)
                        .show(ui);
                });
            });
    }

    fn show_summary(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("📊 Layout")
            .default_open(true)
            .show(ui, |ui| match self.form.layout() {
                Ok(grid) => {
                    let summary = LayoutSummary::new(grid, self.preview.len());
                    let grid = summary.grid;
                    ui.label(format!("Grid: {} cols x {} rows", grid.cols, grid.rows));
                    ui.label(format!(
                        "Card: {:.3} x {:.3} in",
                        grid.card_width, grid.card_height
                    ));
                    ui.label(format!("Gap: {:.4} in", grid.gap_x));
                    if let Some(stats) = summary.stats {
                        ui.label(format!("Images: {}", stats.images));
                        ui.label(format!("Pages: {}", stats.pages));
                        ui.label(format!("Empty slots on last page: {}", stats.empty_slots));
                    } else {
                        ui.label("No images loaded");
                    }
                }
                Err(message) => {
                    ui.colored_label(egui::Color32::RED, message);
                }
            });
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Card Preview");
            if ui.button("🔄 Refresh").clicked() {
                self.request_preview();
            }
            if self.loading_preview {
                ui.spinner();
                ui.label("Loading preview...");
            }
        });
        ui.separator();

        if self.preview.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No card images found in the input folder");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for card in &self.preview {
                    ui.vertical(|ui| {
                        ui.set_width(THUMBNAIL_SIZE as f32);
                        ui.image((card.texture.id(), card.texture.size_vec2()));
                        ui.small(&card.name);
                    });
                }
            });
        });
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        if let Some(progress) = &self.progress {
            ui.label(&progress.operation);
            ui.add(
                egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                    .show_percentage(),
            );
            ui.ctx().request_repaint();
        }

        if !self.status.is_empty() {
            ui.label(&self.status);
        }

        egui::CollapsingHeader::new("Log").show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(120.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in self.logger.entries() {
                        ui.monospace(format!(
                            "{} {:<5} {}",
                            entry.timestamp.format("%H:%M:%S"),
                            entry.level,
                            entry.message
                        ));
                    }
                });
            if ui.small_button("Clear").clicked() {
                self.logger.clear();
            }
        });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = &self.error {
            let mut dismissed = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    dismissed = ui.button("OK").clicked();
                });
            if dismissed {
                self.error = None;
            }
        }

        if let Some(path) = &self.completed {
            let mut dismissed = false;
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(format!("PDF saved to {}", display_path(path)));
                    ui.horizontal(|ui| {
                        if ui.button("Open PDF").clicked() {
                            ctx.open_url(egui::OpenUrl::new_tab(file_url(path)));
                            dismissed = true;
                        }
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
            if dismissed {
                self.completed = None;
            }
        }
    }
}

impl eframe::App for CardSheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_updates(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.show_status(ui);
        });

        egui::SidePanel::left("settings")
            .min_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Card Sheet");
                    ui.separator();

                    self.show_paths(ui);
                    ui.add_space(10.0);
                    self.show_dimensions(ui);
                    ui.add_space(10.0);
                    self.show_layout_settings(ui);
                    ui.add_space(10.0);
                    self.show_summary(ui);
                    ui.add_space(10.0);
                    ui.separator();

                    let generate = ui.add_enabled(
                        !self.generating,
                        egui::Button::new("🖨 Generate PDF").min_size(egui::vec2(160.0, 32.0)),
                    );
                    if generate.clicked() {
                        self.request_generate();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_preview(ui);
        });

        self.show_dialogs(ctx);

        if self.generating || self.loading_preview {
            ctx.request_repaint();
        }
    }
}

fn upload_thumbnail(ctx: &egui::Context, index: usize, thumbnail: Thumbnail) -> PreviewCard {
    let image =
        egui::ColorImage::from_rgba_unmultiplied([thumbnail.width, thumbnail.height], &thumbnail.rgba);
    let texture = ctx.load_texture(
        format!("card_preview_{index}"),
        image,
        egui::TextureOptions::default(),
    );
    PreviewCard {
        name: thumbnail.name,
        texture,
    }
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_owned())
        .display()
        .to_string()
}

fn file_url(path: &Path) -> String {
    format!("file://{}", display_path(path))
}

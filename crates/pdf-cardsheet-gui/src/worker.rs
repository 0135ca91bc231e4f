use pdf_cardsheet::SheetOptions;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::preview::{Thumbnail, load_thumbnails};

/// Requests from the UI thread
pub enum Command {
    LoadPreview {
        input_dir: PathBuf,
    },
    Generate {
        input_dir: PathBuf,
        output_path: PathBuf,
        options: SheetOptions,
    },
}

/// Results sent back to the UI thread
pub enum Update {
    PreviewLoaded {
        thumbnails: Vec<Thumbnail>,
    },
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    GenerateComplete {
        path: PathBuf,
        cards: usize,
        pages: usize,
    },
    Error {
        message: String,
    },
}

/// Async worker task that processes commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    update_tx: mpsc::UnboundedSender<Update>,
) {
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            Command::LoadPreview { mut input_dir } => {
                // Only the most recent folder matters when several are queued
                let mut pending = None;
                while let Ok(next_cmd) = command_rx.try_recv() {
                    match next_cmd {
                        Command::LoadPreview { input_dir: newer } => {
                            log::debug!("Discarding queued preview load, using newer request");
                            input_dir = newer;
                        }
                        other => {
                            pending = Some(other);
                            break;
                        }
                    }
                }

                handle_load_preview(input_dir, &update_tx).await;
                if let Some(Command::Generate {
                    input_dir,
                    output_path,
                    options,
                }) = pending
                {
                    handle_generate(input_dir, output_path, options, &update_tx).await;
                }
            }
            Command::Generate {
                input_dir,
                output_path,
                options,
            } => {
                handle_generate(input_dir, output_path, options, &update_tx).await;
            }
        }
    }
}

async fn handle_load_preview(input_dir: PathBuf, update_tx: &mpsc::UnboundedSender<Update>) {
    match load_thumbnails(&input_dir).await {
        Ok(thumbnails) => {
            let _ = update_tx.send(Update::PreviewLoaded { thumbnails });
        }
        Err(e) => {
            let _ = update_tx.send(Update::Error {
                message: format!("Failed to load preview: {e}"),
            });
        }
    }
}

async fn handle_generate(
    input_dir: PathBuf,
    output_path: PathBuf,
    options: SheetOptions,
    update_tx: &mpsc::UnboundedSender<Update>,
) {
    if let Err(e) = generate(input_dir, output_path, options, update_tx).await {
        let _ = update_tx.send(Update::Error {
            message: format!("Failed to generate PDF: {e}"),
        });
    }
}

async fn generate(
    input_dir: PathBuf,
    output_path: PathBuf,
    options: SheetOptions,
    update_tx: &mpsc::UnboundedSender<Update>,
) -> pdf_cardsheet::Result<()> {
    options.validate()?;
    let grid = pdf_cardsheet::compute_grid(&options.page, &options.card, &options.layout)?;
    let images = pdf_cardsheet::discover_images(&input_dir).await?;
    let stats = pdf_cardsheet::calculate_statistics(images.len(), &grid)?;

    let progress_tx = update_tx.clone();
    pdf_cardsheet::generate_pdf_with_progress(
        &images,
        &grid,
        &options.page,
        options.layout.dpi,
        &output_path,
        move |current, total| {
            let _ = progress_tx.send(Update::Progress {
                operation: format!("Generating page {current}/{total}"),
                current,
                total,
            });
        },
    )
    .await?;

    log::info!(
        "Generated {} cards on {} pages → {}",
        stats.images,
        stats.pages,
        output_path.display()
    );
    let _ = update_tx.send(Update::GenerateComplete {
        path: output_path,
        cards: stats.images,
        pages: stats.pages,
    });
    Ok(())
}

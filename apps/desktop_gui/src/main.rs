mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::AbsentFieldPolicy;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{StartupConfig, TodoAiApp};

#[derive(Parser, Debug)]
#[command(about = "Title/memo form with AI consultation")]
struct Args {
    /// Base url of the proposal service.
    #[arg(long)]
    server_url: Option<String>,
    /// Keep existing form values when a proposal omits a field.
    #[arg(long)]
    preserve_absent: bool,
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.preserve_absent {
        settings.absent_fields = AbsentFieldPolicy::Preserve;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bootstrap = client_core::initialize(settings).context("failed to start editor")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, bootstrap.client);

    let startup = StartupConfig {
        settings: bootstrap.settings,
    };
    let editor = bootstrap.editor;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TODO AI Demo")
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TODO AI Demo",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TodoAiApp::bootstrap(
                cmd_tx, ui_rx, editor, startup,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}

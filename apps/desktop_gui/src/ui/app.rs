use std::time::Duration;

use client_core::{ClientSettings, Editor};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::submit_consultation;
use crate::controller::reducer::{apply_ui_event, ShellStatus};

const CONSULTATION_MODAL_ID: &str = "consultation_modal";

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub settings: ClientSettings,
}

pub struct TodoAiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    editor: Editor,
    status: ShellStatus,
    server_url: String,
}

impl TodoAiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        editor: Editor,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            editor,
            status: ShellStatus::default(),
            server_url: startup.settings.server_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.editor, &mut self.status, event);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(error) = &self.status.error {
                    let context = match error.context() {
                        UiErrorContext::BackendStartup => "backend",
                        UiErrorContext::Consultation => "consultation",
                    };
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{} ({context}): {}", err_label(error.category()), error.message()),
                    );
                    if ui.small_button("Dismiss").clicked() {
                        self.status.error = None;
                    }
                } else {
                    ui.weak(&self.status.info);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.server_url);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("TODO AI Demo");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Consult AI").clicked() {
                        self.editor.consultation.open();
                    }
                });
            });
            ui.separator();

            let form = self.editor.form_state();

            ui.label("Title");
            let mut title = form.title;
            let title_edit = egui::TextEdit::singleline(&mut title)
                .hint_text("e.g. Plan the potato harvest")
                .desired_width(f32::INFINITY);
            if ui.add(title_edit).changed() {
                self.editor.form.set_title(title);
            }

            ui.add_space(12.0);

            ui.label("Memo");
            let mut memo = form.memo;
            let memo_edit = egui::TextEdit::multiline(&mut memo)
                .hint_text("Additional notes")
                .desired_rows(6)
                .desired_width(f32::INFINITY);
            if ui.add(memo_edit).changed() {
                self.editor.form.set_memo(memo);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.editor.form.reset();
                }
                ui.add_enabled(false, egui::Button::new("Save (not implemented)"));
            });
        });
    }

    fn show_consultation_modal(&mut self, ctx: &egui::Context) {
        let state = self.editor.consultation.snapshot();
        let mut cancel = false;
        let mut submit = false;

        let modal = egui::Modal::new(egui::Id::new(CONSULTATION_MODAL_ID)).show(ctx, |ui| {
            ui.set_width(440.0);
            ui.heading("Consult AI");
            ui.label("What would you like to do?");

            let mut draft = state.draft_text.clone();
            let draft_edit = egui::TextEdit::multiline(&mut draft)
                .hint_text("e.g. I want to dig potatoes")
                .desired_rows(4)
                .desired_width(f32::INFINITY);
            if ui.add(draft_edit).changed() {
                self.editor.consultation.update_draft(draft);
            }

            ui.horizontal(|ui| {
                cancel = ui
                    .add_enabled(!state.is_loading, egui::Button::new("Cancel"))
                    .clicked();
                submit = ui
                    .add_enabled(self.editor.consultation.can_submit(), egui::Button::new("Send"))
                    .clicked();
            });

            if state.is_loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Thinking...");
                });
            }
            if let Some(error) = &state.error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
        });

        if cancel || modal.should_close() {
            self.editor.consultation.close();
        } else if submit {
            submit_consultation(&mut self.editor, &self.cmd_tx, &mut self.status);
        }
    }
}

impl eframe::App for TodoAiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_form(ctx);
        let consultation = self.editor.consultation.snapshot();
        if consultation.is_open {
            self.show_consultation_modal(ctx);
        }

        if consultation.is_loading {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

use eframe::egui;

use crate::egui_app::screens::Dialog;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::{GateState, Screen, ScreenKind};

pub mod auth_view;
pub mod product_form_view;
pub mod product_list_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    if state.gate_state() != GateState::Authenticated {
        return;
    }

    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let on_form = matches!(state.current_screen(), Some(Screen::ProductForm { .. }));
                if on_form && ui.button("←").clicked() {
                    state.go_back();
                }

                let title = if on_form { "Produto" } else { "Produtos" };
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(title).size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.is_signing_out() {
                        ui.spinner();
                    } else if ui.button("Sair").clicked() {
                        state.handle_sign_out();
                    }
                    if let Some(email) = state.gate().user().and_then(|u| u.email.as_deref()) {
                        ui.colored_label(colors::TEXT_LIGHT, email);
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let screen = state.current_screen().map(Screen::kind);
    egui::CentralPanel::default()
        .frame(styles::screen_frame())
        .show(ctx, |ui| match screen {
            None => render_loading(ui),
            Some(ScreenKind::Login) => auth_view::render_login(ui, state),
            Some(ScreenKind::SignUp) => auth_view::render_signup(ui, state),
            Some(ScreenKind::ProductList) => product_list_view::render(ui, state),
            Some(ScreenKind::ProductForm) => product_form_view::render(ui, state),
        });
}

fn render_loading(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.add(egui::Spinner::new().size(36.0).color(colors::ACCENT));
    });
}

/// Show at most one dialog: the delete confirmation first, then any alert
pub fn render_dialogs(ctx: &egui::Context, state: &mut AppState) {
    if let Some(confirmation) = state.list.confirmation() {
        match confirm_window(ctx, &confirmation, "Cancelar", "Excluir") {
            Some(true) => state.confirm_delete(),
            Some(false) => state.list.cancel_delete(),
            None => {}
        }
        return;
    }

    if let Some(dialog) = state.notice.as_ref() {
        if message_window(ctx, dialog) {
            state.notice = None;
        }
        return;
    }
    if let Some(dialog) = state.login.dialog() {
        if message_window(ctx, dialog) {
            state.login.dismiss_dialog();
        }
        return;
    }
    if let Some(dialog) = state.signup.dialog() {
        if message_window(ctx, dialog) {
            state.signup.dismiss_dialog();
        }
        return;
    }
    if let Some(dialog) = state.list.dialog() {
        if message_window(ctx, dialog) {
            state.list.dismiss_dialog();
        }
        return;
    }
    if let Some(form) = state.form.as_mut() {
        if let Some(dialog) = form.dialog() {
            if message_window(ctx, dialog) {
                form.dismiss_dialog();
            }
        }
    }
}

/// Returns true once the user presses OK
fn message_window(ctx: &egui::Context, dialog: &Dialog) -> bool {
    let mut dismissed = false;
    dialog_window(ctx, dialog, |ui| {
        dismissed = ui.button("OK").clicked();
    });
    dismissed
}

/// `Some(true)` on confirm, `Some(false)` on cancel
fn confirm_window(ctx: &egui::Context, dialog: &Dialog, cancel: &str, confirm: &str) -> Option<bool> {
    let mut answer = None;
    dialog_window(ctx, dialog, |ui| {
        if ui.add(styles::filled_button(confirm, colors::DANGER)).clicked() {
            answer = Some(true);
        }
        if ui.button(cancel).clicked() {
            answer = Some(false);
        }
    });
    answer
}

fn dialog_window(ctx: &egui::Context, dialog: &Dialog, buttons: impl FnOnce(&mut egui::Ui)) {
    egui::Window::new(dialog.title.as_str())
        .id(egui::Id::new("dialog"))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .frame(styles::modal_frame())
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            ui.label(egui::RichText::new(&dialog.title).size(17.0).strong().color(colors::TEXT_PRIMARY));
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&dialog.message).color(colors::TEXT_SECONDARY));
            ui.add_space(16.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), buttons);
        });
}

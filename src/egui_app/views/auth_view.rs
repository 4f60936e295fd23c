use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const FORM_WIDTH: f32 = 320.0;

pub fn render_login(ui: &mut egui::Ui, state: &mut AppState) {
    centered_form(ui, 300.0, |ui| {
        heading(ui, "Bem-vindo de volta 👋", "Entre com sua conta");

        let busy = state.login.is_in_flight();
        let login = &mut state.login;
        text_field(ui, &mut login.email, "Seu e-mail", false, busy);
        password_field(ui, &mut login.password, &mut login.show_password, "Sua senha", busy);
        ui.add_space(16.0);

        if submit_button(ui, "Entrar", busy) {
            state.handle_login();
        }
        ui.add_space(12.0);
        if ui.link("Não tem uma conta? Cadastre-se").clicked() && !busy {
            state.open_signup();
        }
    });
}

pub fn render_signup(ui: &mut egui::Ui, state: &mut AppState) {
    centered_form(ui, 360.0, |ui| {
        heading(ui, "Crie sua conta 📝", "Cadastre-se com seu e-mail");

        let busy = state.signup.is_in_flight();
        let signup = &mut state.signup;
        text_field(ui, &mut signup.email, "Seu e-mail", false, busy);
        password_field(ui, &mut signup.password, &mut signup.show_password, "Sua senha", busy);
        password_field(
            ui,
            &mut signup.confirm_password,
            &mut signup.show_confirm_password,
            "Confirme a senha",
            busy,
        );
        ui.add_space(16.0);

        if submit_button(ui, "Cadastrar", busy) {
            state.handle_signup();
        }
        ui.add_space(12.0);
        if ui.link("Já tem uma conta? Entrar").clicked() && !busy {
            state.go_back();
        }
    });
}

fn centered_form(ui: &mut egui::Ui, content_height: f32, add_contents: impl FnOnce(&mut egui::Ui)) {
    let available = ui.available_rect_before_wrap();
    ui.vertical_centered(|ui| {
        ui.add_space(((available.height() - content_height) / 2.0).max(0.0));
        ui.set_max_width(FORM_WIDTH);
        add_contents(ui);
    });
}

fn heading(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.label(egui::RichText::new(title).size(26.0).strong().color(colors::TEXT_PRIMARY));
    ui.add_space(4.0);
    ui.label(egui::RichText::new(subtitle).size(15.0).color(colors::TEXT_SECONDARY));
    ui.add_space(24.0);
}

fn text_field(ui: &mut egui::Ui, value: &mut String, hint: &str, password: bool, busy: bool) {
    ui.add_enabled(
        !busy,
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .password(password)
            .text_color(colors::TEXT_DARK)
            .desired_width(FORM_WIDTH),
    );
    ui.add_space(10.0);
}

/// Password input with a show/hide toggle
fn password_field(ui: &mut egui::Ui, value: &mut String, visible: &mut bool, hint: &str, busy: bool) {
    ui.horizontal(|ui| {
        ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .password(!*visible)
                .text_color(colors::TEXT_DARK)
                .desired_width(FORM_WIDTH - 36.0),
        );
        let icon = if *visible { "🙈" } else { "👁" };
        if ui.small_button(icon).clicked() {
            *visible = !*visible;
        }
    });
    ui.add_space(10.0);
}

/// Primary action; shows a spinner instead while `busy`
fn submit_button(ui: &mut egui::Ui, label: &str, busy: bool) -> bool {
    if busy {
        ui.add(egui::Spinner::new().color(colors::ACCENT));
        return false;
    }
    ui.add_sized([FORM_WIDTH, 36.0], styles::filled_button(label, colors::ACCENT))
        .clicked()
}

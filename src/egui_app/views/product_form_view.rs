use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const FIELD_WIDTH: f32 = 420.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(form) = state.form.as_mut() else {
        return;
    };

    let busy = form.is_in_flight();
    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.set_max_width(FIELD_WIDTH);
        ui.label(egui::RichText::new(form.title()).size(24.0).strong().color(colors::TEXT_PRIMARY));
        ui.add_space(20.0);

        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            field(ui, "Descrição", &mut form.description, "Descrição do produto", busy);
            field(ui, "Preço (R$)", &mut form.price, "Ex: 19.90", busy);
            field(ui, "URL da Imagem", &mut form.image, "https://exemplo.com/imagem.jpg", busy);
        });
        ui.add_space(12.0);

        if busy {
            ui.add(egui::Spinner::new().color(colors::ACCENT));
        } else {
            submit = ui
                .add_sized([FIELD_WIDTH, 36.0], styles::filled_button(form.submit_label(), colors::ACCENT))
                .clicked();
        }
    });

    if submit {
        state.handle_save();
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str, busy: bool) {
    ui.label(egui::RichText::new(label).color(colors::TEXT_PRIMARY).strong());
    ui.add_space(4.0);
    ui.add_enabled(
        !busy,
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .text_color(colors::TEXT_DARK)
            .desired_width(FIELD_WIDTH),
    );
    ui.add_space(12.0);
}

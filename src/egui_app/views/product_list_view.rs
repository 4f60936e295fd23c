use eframe::egui;

use crate::egui_app::screens::product_list::EMPTY_MESSAGE;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::Product;

enum RowAction {
    Edit(Product),
    Delete(Product),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.add(styles::filled_button("+ Novo produto", colors::ACCENT)).clicked() {
            state.open_product_form(None);
        }
        if state.list.is_loading() {
            ui.spinner();
        }
    });
    ui.add_space(16.0);

    if state.list.products().is_empty() {
        if !state.list.is_loading() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new(EMPTY_MESSAGE).size(16.0).color(colors::TEXT_SECONDARY));
            });
        }
        return;
    }

    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for product in state.list.products() {
                let deleting = state.list.is_deleting(&product.id);
                if let Some(a) = render_card(ui, product, deleting) {
                    action = Some(a);
                }
                ui.add_space(12.0);
            }
        });

    match action {
        Some(RowAction::Edit(product)) => state.open_product_form(Some(product)),
        Some(RowAction::Delete(product)) => state.list.request_delete(product.id),
        None => {}
    }
}

fn render_card(ui: &mut egui::Ui, product: &Product, deleting: bool) -> Option<RowAction> {
    let mut action = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&product.description).size(16.0).strong().color(colors::TEXT_PRIMARY));
                ui.label(egui::RichText::new(product.formatted_price()).size(15.0).color(colors::ACCENT));
                if !product.image.is_empty() {
                    ui.hyperlink_to(
                        egui::RichText::new(&product.image).small(),
                        &product.image,
                    );
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if deleting {
                    ui.spinner();
                    return;
                }
                if ui.add(egui::Button::new(egui::RichText::new("🗑").color(colors::DANGER))).clicked() {
                    action = Some(RowAction::Delete(product.clone()));
                }
                if ui.add(egui::Button::new(egui::RichText::new("✏").color(colors::ACCENT))).clicked() {
                    action = Some(RowAction::Edit(product.clone()));
                }
            });
        });
    });
    action
}

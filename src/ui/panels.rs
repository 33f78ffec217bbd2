use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::selectors::{Choice, LengthCategory};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    // Edit copies; the state recomputes once if anything changed.
    let mut selection = state.selection.clone();
    let mut view_mode = state.view_mode;
    let options = &state.options;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            choice_combo(ui, "Escolha a Empresa", "empresa", &options.companies, &mut selection.company);
            choice_combo(ui, "Escolha o Local", "local", &options.locations, &mut selection.location);
            choice_combo(ui, "Selecione o Status", "status", &options.statuses, &mut selection.status);
            ui.separator();

            ui.strong("Menu de Navegação");
            for mode in options.view_modes {
                ui.radio_value(&mut view_mode, mode, mode.label());
            }
            ui.separator();

            ui.strong("Selecione a categoria do tamanho do texto da descrição");
            for band in options.length_bands.iter() {
                let response = ui.radio_value(&mut selection.length, band.category, band.category.label());
                // (300, N] only reads sensibly when N is past 300.
                if band.category == LengthCategory::VeryLong && options.length_bands.has_very_long() {
                    response.on_hover_text(format!("maior descrição: {} caracteres", band.upper));
                }
            }
        });

    state.update(selection, view_mode);
}

fn choice_combo(ui: &mut Ui, label: &str, id: &str, choices: &[Choice], current: &mut Choice) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                ui.selectable_value(current, choice.clone(), choice.to_string());
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Exportar gráfico (JSON)…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} reclamações carregadas, {} visíveis",
            state.table.len(),
            state.visible_count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar gráfico")
        .add_filter("JSON", &["json"])
        .set_file_name("grafico.json")
        .save_file();

    if let Some(path) = file {
        match state.export_chart(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                state.status_message = Some(format!("Erro: {e:#}"));
            }
        }
    }
}

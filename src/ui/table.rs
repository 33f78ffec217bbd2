use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::chart::ChartSpec;

const ROW_HEIGHT: f32 = 18.0;

/// Render the aggregated rows behind the current chart.
pub fn aggregate_table(ui: &mut Ui, spec: &ChartSpec) {
    let tab = spec.tabulate();
    if tab.rows.is_empty() {
        ui.label("Sem dados agregados.");
        return;
    }

    let numeric = tab.headers.len() - 1;
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(90.0), numeric)
        .header(20.0, |mut header| {
            for h in &tab.headers {
                header.col(|ui| {
                    ui.strong(*h);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, tab.rows.len(), |mut row| {
                let cells = &tab.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.as_str());
                    });
                }
            });
        });
}

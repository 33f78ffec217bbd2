use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{ChartSpec, build_chart};
use crate::config::DashboardConfig;
use crate::data::filter::{Selection, filter_complaints};
use crate::data::model::ComplaintTable;
use crate::data::selectors::{SelectorOptions, ViewMode};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, read-only afterwards.
    pub table: ComplaintTable,

    /// Choices offered by the side panel.
    pub options: SelectorOptions,

    /// Current filter choices.
    pub selection: Selection,

    /// Which chart is shown.
    pub view_mode: ViewMode,

    /// Chart for the current selection and view mode (cached).
    pub chart: ChartSpec,

    /// Number of complaints passing the current filters.
    pub visible_count: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    histogram_bins: usize,
}

impl AppState {
    /// Derive selectors from the loaded table and compute the first chart.
    pub fn new(table: ComplaintTable, config: &DashboardConfig) -> Self {
        let options = SelectorOptions::from_table(&table);
        let selection = Selection::default();
        let view_mode = ViewMode::default();
        let view = filter_complaints(&table, &selection, &options.length_bands);
        let visible_count = view.len();
        let chart = build_chart(&view, view_mode, config.histogram_bins);

        AppState {
            table,
            options,
            selection,
            view_mode,
            chart,
            visible_count,
            status_message: None,
            histogram_bins: config.histogram_bins,
        }
    }

    /// Recompute filter, aggregation and chart from the base table.
    pub fn recompute(&mut self) {
        let view = filter_complaints(&self.table, &self.selection, &self.options.length_bands);
        self.visible_count = view.len();
        if view.is_empty() {
            log::debug!("No complaints match {:?}", self.selection);
        }
        self.chart = build_chart(&view, self.view_mode, self.histogram_bins);
        log::debug!(
            "{:?} with {:?}: {} of {} complaints",
            self.view_mode,
            self.selection,
            self.visible_count,
            self.table.len()
        );
    }

    /// Apply a new selection / view mode; recomputes only on change.
    pub fn update(&mut self, selection: Selection, view_mode: ViewMode) {
        if selection != self.selection || view_mode != self.view_mode {
            self.selection = selection;
            self.view_mode = view_mode;
            self.recompute();
        }
    }

    /// Write the current chart spec as JSON.
    pub fn export_chart(&self, path: &Path) -> Result<()> {
        let json = self.chart.to_json().context("serializing chart")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {:?} chart to {}", self.view_mode, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartData;
    use crate::data::model::tests::complaint;
    use crate::data::selectors::Choice;

    fn state() -> AppState {
        let table = ComplaintTable::new(
            vec![
                complaint("Hapvida", "SP", "Resolvido", "Demora no atendimento"),
                complaint("Hapvida", "SP", "Pendente", "Consulta cancelada"),
                complaint("Ibyte", "RJ", "Resolvido", "Produto com defeito"),
            ],
            Vec::new(),
        );
        AppState::new(table, &DashboardConfig::default())
    }

    #[test]
    fn starts_unfiltered_on_the_time_series() {
        let state = state();
        assert_eq!(state.visible_count, 3);
        assert_eq!(state.view_mode, ViewMode::TimeSeries);
        assert!(matches!(state.chart.data, ChartData::Area { .. }));
    }

    #[test]
    fn update_refilters_and_switches_chart() {
        let mut state = state();
        let selection = Selection {
            location: Choice::Only("SP".into()),
            ..Selection::default()
        };
        state.update(selection, ViewMode::ByStatus);

        assert_eq!(state.visible_count, 2);
        let ChartData::Bar { bars } = &state.chart.data else {
            panic!("expected bar chart");
        };
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.group.count == 1));
        // the base table is untouched
        assert_eq!(state.table.len(), 3);
    }

    #[test]
    fn export_writes_json() {
        let state = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grafico.json");

        state.export_chart(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"kind\": \"area\""));
    }
}

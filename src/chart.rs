//! Chart specifications: the aggregated data plus the encoding and layout
//! needed to draw it. The UI draws a [`ChartSpec`] with egui_plot and the
//! File menu can export it as JSON.

use serde::Serialize;

use crate::color::{self, Rgb};
use crate::data::aggregate::{
    self, GroupCount, HistogramBin, SourceSeries, count_by_location, count_by_status,
};
use crate::data::filter::FilteredView;
use crate::data::selectors::ViewMode;

const COUNT_AXIS: &str = "Número de Reclamações";

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: &'static str,
    pub size: u32,
    pub color: Rgb,
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec {
            family: "Arial, sans-serif",
            size: 12,
            color: color::FONT_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSeries {
    #[serde(flatten)]
    pub data: SourceSeries,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    #[serde(flatten)]
    pub group: GroupCount,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// One series per source, drawn as stacked areas.
    Area { stacked: bool, series: Vec<AreaSeries> },
    Bar { bars: Vec<BarSpec> },
    Histogram { bins: Vec<HistogramBin> },
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub mode: ViewMode,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    pub font: FontSpec,
    pub data: ChartData,
}

/// The aggregated data as plain rows, for the table under the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabulated {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ChartSpec {
    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Area { series, .. } => series.is_empty(),
            ChartData::Bar { bars } => bars.is_empty(),
            ChartData::Histogram { bins } => bins.is_empty(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn tabulate(&self) -> Tabulated {
        match &self.data {
            ChartData::Area { series, .. } => Tabulated {
                headers: vec!["Empresa", "Mês", "Contagem"],
                rows: series
                    .iter()
                    .flat_map(|s| {
                        s.data.points.iter().map(move |p| {
                            vec![
                                s.data.source.clone(),
                                p.month.format("%Y-%m").to_string(),
                                p.count.to_string(),
                            ]
                        })
                    })
                    .collect(),
            },
            ChartData::Bar { bars } => Tabulated {
                headers: vec![self.group_header(), "Contagem"],
                rows: bars
                    .iter()
                    .map(|b| vec![b.group.label.clone(), b.group.count.to_string()])
                    .collect(),
            },
            ChartData::Histogram { bins } => Tabulated {
                headers: vec!["Caracteres", "Quantidade"],
                rows: bins
                    .iter()
                    .filter(|b| b.count > 0)
                    .map(|b| vec![format!("{:.0}–{:.0}", b.start, b.end), b.count.to_string()])
                    .collect(),
            },
        }
    }

    fn group_header(&self) -> &'static str {
        match self.mode {
            ViewMode::ByLocation => "Estado",
            ViewMode::ByStatus => "Status",
            _ => "Grupo",
        }
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Aggregate the filtered view for `mode` and describe the chart to draw.
pub fn build_chart(view: &FilteredView<'_>, mode: ViewMode, histogram_bins: usize) -> ChartSpec {
    let (x_title, y_title, legend_title, data) = match mode {
        ViewMode::TimeSeries => {
            let series = aggregate::monthly_counts(view.iter())
                .into_iter()
                .map(|data| AreaSeries {
                    color: color::company_color(&data.source).unwrap_or(color::FALLBACK_COLOR),
                    data,
                })
                .collect();
            (
                "Data",
                COUNT_AXIS,
                Some("Empresa"),
                ChartData::Area {
                    stacked: true,
                    series,
                },
            )
        }
        ViewMode::ByLocation => {
            let bars = count_by_location(view.iter())
                .into_iter()
                .map(|group| BarSpec {
                    group,
                    color: color::DEFAULT_BAR_COLOR,
                })
                .collect();
            ("Estado", COUNT_AXIS, None, ChartData::Bar { bars })
        }
        ViewMode::ByStatus => {
            let groups = count_by_status(view.iter());
            let palette = color::qualitative(groups.len());
            let bars = groups
                .into_iter()
                .zip(palette)
                .map(|(group, color)| BarSpec { group, color })
                .collect();
            ("Status", COUNT_AXIS, Some("STATUS"), ChartData::Bar { bars })
        }
        ViewMode::TextLength => {
            let bins = aggregate::length_histogram(view.iter(), histogram_bins);
            (
                "Tamanho do Texto (número de caracteres)",
                "Quantidade de Reclamações",
                None,
                ChartData::Histogram { bins },
            )
        }
    };

    ChartSpec {
        mode,
        title: mode.label().to_string(),
        x_title: x_title.to_string(),
        y_title: y_title.to_string(),
        legend_title: legend_title.map(str::to_string),
        font: FontSpec::default(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilteredView;
    use crate::data::model::ComplaintTable;
    use crate::data::model::tests::complaint;

    fn table() -> ComplaintTable {
        ComplaintTable::new(
            vec![
                complaint("Hapvida", "SP", "Resolvido", "Demora no atendimento"),
                complaint("Hapvida", "SP", "Pendente", "Consulta cancelada"),
                complaint("Ibyte", "RJ", "Resolvido", "Produto com defeito"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn status_chart_colors_each_status() {
        let table = table();
        let chart = build_chart(&FilteredView::all(&table), ViewMode::ByStatus, 50);

        let ChartData::Bar { bars } = &chart.data else {
            panic!("expected bars, got {:?}", chart.data);
        };
        let counts: Vec<(&str, usize)> = bars
            .iter()
            .map(|b| (b.group.label.as_str(), b.group.count))
            .collect();
        assert_eq!(counts, [("Resolvido", 2), ("Pendente", 1)]);
        assert_ne!(bars[0].color, bars[1].color);
        assert_eq!(chart.title, "Frequência de Cada Tipo de Status");
    }

    #[test]
    fn time_series_uses_company_colors() {
        let table = table();
        let chart = build_chart(&FilteredView::all(&table), ViewMode::TimeSeries, 50);

        let ChartData::Area { stacked, series } = &chart.data else {
            panic!("expected area chart");
        };
        assert!(*stacked);
        let sources: Vec<(&str, Rgb)> = series
            .iter()
            .map(|s| (s.data.source.as_str(), s.color))
            .collect();
        assert_eq!(
            sources,
            [
                ("Hapvida", Rgb::from_hex(0xff7f0e)),
                ("Ibyte", Rgb::from_hex(0x2ca02c)),
            ]
        );
        assert_eq!(series[0].data.points[0].count, 2);
    }

    #[test]
    fn empty_view_renders_an_empty_chart() {
        let table = ComplaintTable::default();
        for mode in ViewMode::ALL {
            let chart = build_chart(&FilteredView::all(&table), mode, 50);
            assert!(chart.is_empty(), "{mode:?} should be empty");
            assert!(chart.tabulate().rows.is_empty());
        }
    }

    #[test]
    fn json_export_carries_kind_and_colors() {
        let table = table();
        let chart = build_chart(&FilteredView::all(&table), ViewMode::ByLocation, 50);
        let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();

        assert_eq!(json["mode"], "by_location");
        assert_eq!(json["data"]["kind"], "bar");
        assert_eq!(json["data"]["bars"][0]["label"], "SP");
        assert_eq!(json["data"]["bars"][0]["count"], 2);
        assert_eq!(json["data"]["bars"][0]["color"], "#636efa");
        assert_eq!(json["font"]["color"], "#663399");
    }

    #[test]
    fn histogram_table_skips_empty_bins() {
        let table = table();
        let chart = build_chart(&FilteredView::all(&table), ViewMode::TextLength, 50);
        let tab = chart.tabulate();
        assert_eq!(tab.headers, ["Caracteres", "Quantidade"]);
        let total: usize = tab.rows.iter().map(|r| r[1].parse::<usize>().unwrap()).sum();
        assert_eq!(total, 3);
    }
}

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::chart::{AreaSeries, BarSpec, ChartData, ChartSpec};
use crate::color::Rgb;
use crate::data::aggregate::{HistogramBin, Month};

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.label(
        RichText::new(&spec.title)
            .heading()
            .color(color32(spec.font.color)),
    );
    if spec.is_empty() {
        ui.label("Nenhuma reclamação para os filtros selecionados.");
    }

    let plot = Plot::new("complaint_chart")
        .x_axis_label(spec.x_title.clone())
        .y_axis_label(spec.y_title.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    match &spec.data {
        ChartData::Area { stacked, series } => area_plot(ui, plot, series, *stacked),
        ChartData::Bar { bars } => bar_plot(ui, plot, bars, spec.legend_title.is_some()),
        ChartData::Histogram { bins } => histogram_plot(ui, plot, bins),
    }
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

fn month_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract() != 0.0 {
        return String::new();
    }
    let m = Month::from_ordinal(mark.value as i64);
    format!("{}-{:02}", m.year, m.month)
}

/// Plot coordinates for each series. Every series is drawn over the union
/// of observed months, absent months counting as zero, and with `stacked`
/// each layer sits on the running total of the ones before it.
fn area_layers(series: &[AreaSeries], stacked: bool) -> Vec<Vec<[f64; 2]>> {
    let months: BTreeSet<i64> = series
        .iter()
        .flat_map(|s| s.data.points.iter().map(|p| Month::of(p.month).ordinal()))
        .collect();

    let mut baseline: BTreeMap<i64, f64> = months.iter().map(|&m| (m, 0.0)).collect();
    series
        .iter()
        .map(|s| {
            let counts: BTreeMap<i64, f64> = s
                .data
                .points
                .iter()
                .map(|p| (Month::of(p.month).ordinal(), p.count as f64))
                .collect();
            baseline
                .iter_mut()
                .map(|(&m, total)| {
                    let count = counts.get(&m).copied().unwrap_or(0.0);
                    let y = if stacked {
                        *total += count;
                        *total
                    } else {
                        count
                    };
                    [m as f64, y]
                })
                .collect()
        })
        .collect()
}

fn area_plot(ui: &mut Ui, plot: Plot, series: &[AreaSeries], stacked: bool) {
    let layers = area_layers(series, stacked);

    plot.legend(Legend::default())
        .x_axis_formatter(month_axis)
        .show(ui, |plot_ui| {
            // Topmost layer first so lower ones are painted over it.
            for (s, points) in series.iter().zip(layers).rev() {
                let line = Line::new(PlotPoints::from(points))
                    .name(&s.data.source)
                    .color(color32(s.color))
                    .fill(0.0)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, plot: Plot, bars: &[BarSpec], per_bar_legend: bool) {
    let labels: Vec<String> = bars.iter().map(|b| b.group.label.clone()).collect();
    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        if mark.value.fract() != 0.0 || mark.value < 0.0 {
            return String::new();
        }
        labels.get(mark.value as usize).cloned().unwrap_or_default()
    };

    let plot = if per_bar_legend {
        plot.legend(Legend::default())
    } else {
        plot
    };

    plot.x_axis_formatter(formatter).show(ui, |plot_ui| {
        if per_bar_legend {
            // One chart per bar so each group gets a legend entry.
            for (i, b) in bars.iter().enumerate() {
                let bar = Bar::new(i as f64, b.group.count as f64)
                    .width(0.8)
                    .name(&b.group.label);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&b.group.label)
                        .color(color32(b.color)),
                );
            }
        } else {
            let chart_bars: Vec<Bar> = bars
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    Bar::new(i as f64, b.group.count as f64)
                        .width(0.8)
                        .name(&b.group.label)
                        .fill(color32(b.color))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(chart_bars));
        }
    });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, plot: Plot, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.0}–{:.0}", b.start, b.end))
        })
        .collect();

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(color32(crate::color::DEFAULT_BAR_COLOR)));
    });
}

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::model::ComplaintTable;

/// Label of the catch-all entry in every selector.
pub const ALL_LABEL: &str = "Todos";

// ---------------------------------------------------------------------------
// Choice – one selector entry
// ---------------------------------------------------------------------------

/// A company / location / status selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Choice {
    /// Do not filter on this dimension.
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Exact, case-sensitive match. `All` matches everything.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

#[cfg(test)]
impl Choice {
    /// Parse a selector label; [`ALL_LABEL`] maps to [`Choice::All`].
    pub(crate) fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Choice::All
        } else {
            Choice::Only(label.to_string())
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL_LABEL),
            Choice::Only(v) => f.write_str(v),
        }
    }
}

// ---------------------------------------------------------------------------
// View modes
// ---------------------------------------------------------------------------

/// The four charts the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    TimeSeries,
    ByLocation,
    ByStatus,
    TextLength,
}

impl ViewMode {
    /// Menu order.
    pub const ALL: [ViewMode; 4] = [
        ViewMode::TimeSeries,
        ViewMode::ByLocation,
        ViewMode::ByStatus,
        ViewMode::TextLength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::TimeSeries => "Série Temporal do Número de Reclamações",
            ViewMode::ByLocation => "Frequência de Reclamações por Estado",
            ViewMode::ByStatus => "Frequência de Cada Tipo de Status",
            ViewMode::TextLength => "Distribuição do Tamanho do Texto",
        }
    }
}

// ---------------------------------------------------------------------------
// Text-length bands
// ---------------------------------------------------------------------------

/// Description length categories, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCategory {
    #[default]
    Short,
    Medium,
    Long,
    VeryLong,
}

impl LengthCategory {
    pub const ALL: [LengthCategory; 4] = [
        LengthCategory::Short,
        LengthCategory::Medium,
        LengthCategory::Long,
        LengthCategory::VeryLong,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LengthCategory::Short => "Curto (< 50 caracteres)",
            LengthCategory::Medium => "Médio (50-150 caracteres)",
            LengthCategory::Long => "Longo (150-300 caracteres)",
            LengthCategory::VeryLong => "Muito Longo (> 300 caracteres)",
        }
    }
}

/// Fixed upper thresholds in characters. `VeryLong` has none: its shown
/// threshold is the longest description in the table.
const FIXED_THRESHOLDS: [(LengthCategory, usize); 3] = [
    (LengthCategory::Short, 50),
    (LengthCategory::Medium, 150),
    (LengthCategory::Long, 300),
];

/// Half-open length range `(lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBand {
    pub category: LengthCategory,
    pub lower: usize,
    pub upper: usize,
    /// Ignore `upper` when filtering.
    pub open_ended: bool,
}

impl LengthBand {
    pub fn contains(&self, len: usize) -> bool {
        len > self.lower && (self.open_ended || len <= self.upper)
    }
}

/// Ordered list of the four bands. Each lower bound is the previous
/// band's upper threshold; the first starts at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthBands {
    bands: Vec<LengthBand>,
}

impl LengthBands {
    /// Build the bands given the longest description observed.
    pub fn new(max_observed: usize) -> Self {
        let mut bands = Vec::with_capacity(LengthCategory::ALL.len());
        let mut lower = 0;
        for (category, upper) in FIXED_THRESHOLDS {
            bands.push(LengthBand {
                category,
                lower,
                upper,
                open_ended: false,
            });
            lower = upper;
        }
        bands.push(LengthBand {
            category: LengthCategory::VeryLong,
            lower,
            upper: max_observed,
            open_ended: true,
        });
        LengthBands { bands }
    }

    pub fn for_table(table: &ComplaintTable) -> Self {
        Self::new(table.max_description_len())
    }

    pub fn band(&self, category: LengthCategory) -> LengthBand {
        // Every category has exactly one band, built in `new`.
        self.bands
            .iter()
            .copied()
            .find(|b| b.category == category)
            .unwrap_or(LengthBand {
                category,
                lower: 0,
                upper: 0,
                open_ended: true,
            })
    }

    /// The category a description length falls in, if any.
    pub fn classify(&self, len: usize) -> Option<LengthCategory> {
        self.bands
            .iter()
            .find(|b| b.contains(len))
            .map(|b| b.category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LengthBand> {
        self.bands.iter()
    }

    /// Whether the longest observed description is itself very long.
    pub fn has_very_long(&self) -> bool {
        let longest = self.band(LengthCategory::VeryLong).upper;
        self.classify(longest) == Some(LengthCategory::VeryLong)
    }
}

// ---------------------------------------------------------------------------
// SelectorOptions – everything the side panel offers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SelectorOptions {
    pub companies: Vec<Choice>,
    pub locations: Vec<Choice>,
    pub statuses: Vec<Choice>,
    pub view_modes: [ViewMode; 4],
    pub length_bands: LengthBands,
}

impl SelectorOptions {
    pub fn from_table(table: &ComplaintTable) -> Self {
        SelectorOptions {
            companies: choices(table.iter().map(|c| c.source.as_str())),
            locations: choices(table.iter().map(|c| c.location.as_str())),
            statuses: choices(table.iter().map(|c| c.status.as_str())),
            view_modes: ViewMode::ALL,
            length_bands: LengthBands::for_table(table),
        }
    }
}

/// `All` followed by the distinct values in order of first appearance.
fn choices<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Choice> {
    let mut seen = HashSet::new();
    let mut out = vec![Choice::All];
    for v in values {
        if seen.insert(v) {
            out.push(Choice::Only(v.to_string()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::complaint;

    #[test]
    fn boundaries_are_inclusive_on_the_high_end() {
        let bands = LengthBands::new(900);
        assert_eq!(bands.classify(50), Some(LengthCategory::Short));
        assert_eq!(bands.classify(51), Some(LengthCategory::Medium));
        assert_eq!(bands.classify(150), Some(LengthCategory::Medium));
        assert_eq!(bands.classify(300), Some(LengthCategory::Long));
        assert_eq!(bands.classify(301), Some(LengthCategory::VeryLong));
        assert_eq!(bands.classify(0), None);
    }

    #[test]
    fn lower_bounds_chain_from_previous_band() {
        let bands = LengthBands::new(412);
        let ranges: Vec<(usize, usize)> = bands.iter().map(|b| (b.lower, b.upper)).collect();
        assert_eq!(ranges, [(0, 50), (50, 150), (150, 300), (300, 412)]);
    }

    #[test]
    fn very_long_exists_only_past_the_long_threshold() {
        assert!(LengthBands::new(301).has_very_long());
        assert!(!LengthBands::new(300).has_very_long());
        assert!(!LengthBands::new(0).has_very_long());
    }

    #[test]
    fn very_long_ignores_the_observed_max() {
        let band = LengthBands::new(120).band(LengthCategory::VeryLong);
        assert_eq!(band.upper, 120);
        assert!(band.contains(5000));
        assert!(!band.contains(300));
    }

    #[test]
    fn options_are_distinct_in_appearance_order() {
        let table = ComplaintTable::new(
            vec![
                complaint("Ibyte", "RJ", "Resolvido", "a"),
                complaint("Hapvida", "SP", "Pendente", "bb"),
                complaint("Ibyte", "SP", "Resolvido", "cccc"),
            ],
            Vec::new(),
        );
        let opts = SelectorOptions::from_table(&table);

        fn labels(v: &[Choice]) -> Vec<String> {
            v.iter().map(Choice::to_string).collect()
        }
        assert_eq!(labels(&opts.companies), ["Todos", "Ibyte", "Hapvida"]);
        assert_eq!(labels(&opts.locations), ["Todos", "RJ", "SP"]);
        assert_eq!(labels(&opts.statuses), ["Todos", "Resolvido", "Pendente"]);
        assert_eq!(opts.view_modes, ViewMode::ALL);
        assert_eq!(opts.length_bands.band(LengthCategory::VeryLong).upper, 4);
    }

    #[test]
    fn todos_label_is_the_sentinel() {
        assert_eq!(Choice::from_label("Todos"), Choice::All);
        assert_eq!(Choice::from_label("SP"), Choice::Only("SP".into()));
        assert!(Choice::All.matches("anything"));
        assert!(!Choice::Only("sp".into()).matches("SP"));
    }
}

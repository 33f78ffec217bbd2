use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::model::Complaint;

// ---------------------------------------------------------------------------
// Calendar month buckets
// ---------------------------------------------------------------------------

/// A calendar month. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Months since year 0, handy as a plot coordinate.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Month {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Last day of the month; buckets are labelled by their end date.
    pub fn last_day(self) -> Option<NaiveDate> {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)?.pred_opt()
    }
}

// ---------------------------------------------------------------------------
// Aggregated rows
// ---------------------------------------------------------------------------

/// Complaints of one source in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// End of the month bucket.
    pub month: NaiveDate,
    pub count: usize,
}

/// Monthly counts of one source, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSeries {
    pub source: String,
    pub points: Vec<MonthCount>,
}

/// One group of a group-by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Count complaints per (source, month). Only groups that occur are
/// returned, sources alphabetically and months chronologically.
pub fn monthly_counts<'a>(rows: impl IntoIterator<Item = &'a Complaint>) -> Vec<SourceSeries> {
    let mut counts: BTreeMap<&str, BTreeMap<Month, usize>> = BTreeMap::new();
    for c in rows {
        *counts
            .entry(c.source.as_str())
            .or_default()
            .entry(Month::of(c.date))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(source, per_month)| SourceSeries {
            source: source.to_string(),
            points: per_month
                .into_iter()
                .filter_map(|(month, count)| {
                    Some(MonthCount {
                        month: month.last_day()?,
                        count,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Group by `key`, count, and sort by count descending. Ties keep
/// alphabetical order so the output is deterministic.
pub fn count_by<'a, F>(rows: impl IntoIterator<Item = &'a Complaint>, key: F) -> Vec<GroupCount>
where
    F: Fn(&'a Complaint) -> &'a str,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for c in rows {
        *counts.entry(key(c)).or_default() += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(label, count)| GroupCount {
            label: label.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the BTreeMap's alphabetical order among equal counts.
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

pub fn count_by_location<'a>(rows: impl IntoIterator<Item = &'a Complaint>) -> Vec<GroupCount> {
    count_by(rows, |c| c.location.as_str())
}

pub fn count_by_status<'a>(rows: impl IntoIterator<Item = &'a Complaint>) -> Vec<GroupCount> {
    count_by(rows, |c| c.status.as_str())
}

/// Equal-width histogram of description lengths over the observed range.
/// The last bin is closed on the right so the maximum is counted.
pub fn length_histogram<'a>(
    rows: impl IntoIterator<Item = &'a Complaint>,
    bins: usize,
) -> Vec<HistogramBin> {
    let lengths: Vec<usize> = rows.into_iter().map(Complaint::description_len).collect();
    let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let start = min as f64;
    // A single distinct length still gets a visible, unit-wide range.
    let span = ((max - min) as f64).max(1.0);
    let width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for len in lengths {
        let idx = (((len as f64) - start) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + i as f64 * width,
            end: start + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ComplaintTable;
    use crate::data::model::tests::complaint;

    fn dated(source: &str, y: i32, m: u32, d: u32) -> Complaint {
        let mut c = complaint(source, "SP", "Resolvido", "texto");
        c.date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        c
    }

    #[test]
    fn status_counts_on_unfiltered_table() {
        let table = ComplaintTable::new(
            vec![
                complaint("Hapvida", "SP", "Resolvido", "a"),
                complaint("Hapvida", "SP", "Pendente", "b"),
                complaint("Ibyte", "RJ", "Resolvido", "c"),
            ],
            Vec::new(),
        );

        let counts = count_by_status(&table);
        assert_eq!(
            counts,
            [
                GroupCount { label: "Resolvido".into(), count: 2 },
                GroupCount { label: "Pendente".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn location_counts_sort_descending_then_by_label() {
        let rows = vec![
            complaint("Nagem", "PE", "Resolvido", "a"),
            complaint("Nagem", "CE", "Resolvido", "a"),
            complaint("Nagem", "CE", "Resolvido", "a"),
            complaint("Nagem", "BA", "Resolvido", "a"),
        ];
        let labels: Vec<String> = count_by_location(&rows).into_iter().map(|g| g.label).collect();
        assert_eq!(labels, ["CE", "BA", "PE"]);
    }

    #[test]
    fn monthly_counts_emit_only_observed_groups() {
        let rows = vec![
            dated("Hapvida", 2021, 11, 3),
            dated("Hapvida", 2021, 11, 28),
            dated("Hapvida", 2022, 1, 15),
            dated("Ibyte", 2021, 12, 31),
        ];
        let series = monthly_counts(&rows);
        assert_eq!(series.len(), 2);

        let hapvida = &series[0];
        assert_eq!(hapvida.source, "Hapvida");
        let points: Vec<(NaiveDate, usize)> =
            hapvida.points.iter().map(|p| (p.month, p.count)).collect();
        assert_eq!(
            points,
            [
                (NaiveDate::from_ymd_opt(2021, 11, 30).unwrap(), 2),
                (NaiveDate::from_ymd_opt(2022, 1, 31).unwrap(), 1),
            ]
        );

        let ibyte: Vec<usize> = series[1].points.iter().map(|p| p.count).collect();
        assert_eq!(ibyte, [1]);
    }

    #[test]
    fn distant_months_do_not_create_empty_groups() {
        let rows = vec![dated("Hapvida", 2021, 1, 10), dated("Ibyte", 2021, 12, 5)];
        let groups: usize = monthly_counts(&rows).iter().map(|s| s.points.len()).sum();
        assert_eq!(groups, 2);
    }

    #[test]
    fn month_ordinal_round_trips_across_years() {
        let dec = Month { year: 2021, month: 12 };
        assert_eq!(dec.next(), Month { year: 2022, month: 1 });
        assert_eq!(Month::from_ordinal(dec.ordinal()), dec);
        assert_eq!(
            Month { year: 2024, month: 2 }.last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn histogram_counts_every_row() {
        let rows: Vec<Complaint> = (1..=100)
            .map(|n| complaint("Ibyte", "RJ", "Resolvido", &"y".repeat(n)))
            .collect();
        let bins = length_histogram(&rows, 50);
        assert_eq!(bins.len(), 50);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].start, 1.0);
        assert!((bins[49].end - 100.0).abs() < 1e-9);
        // the maximum lands in the closed last bin
        assert!(bins[49].count >= 1);
    }

    #[test]
    fn empty_input_gives_empty_aggregates() {
        let rows: Vec<Complaint> = Vec::new();
        assert!(monthly_counts(&rows).is_empty());
        assert!(count_by_status(&rows).is_empty());
        assert!(length_histogram(&rows, 50).is_empty());
    }

    #[test]
    fn single_length_histogram_has_unit_span() {
        let rows = vec![complaint("Ibyte", "RJ", "Resolvido", "abc"); 4];
        let bins = length_histogram(&rows, 50);
        assert_eq!(bins[0].count, 4);
        assert!((bins[49].end - 4.0).abs() < 1e-9);
    }
}

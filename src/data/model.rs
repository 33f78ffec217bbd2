use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Date construction
// ---------------------------------------------------------------------------

/// ISO-8601 text for the raw `ANO` / `MES` / `DIA` integers.
/// Month and day are zero-padded; nothing is validated here.
pub fn date_string(year: i64, month: i64, day: i64) -> String {
    format!("{year}-{month:02}-{day:02}")
}

/// Build the normalized date of a complaint by formatting the three
/// integers and parsing the result strictly as `YYYY-MM-DD`.
pub fn complaint_date(year: i64, month: i64, day: i64) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&date_string(year, month, day), "%Y-%m-%d")
}

// ---------------------------------------------------------------------------
// Complaint – one row of the unified table
// ---------------------------------------------------------------------------

/// A single complaint record.
#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    /// Company the record was exported for. Set once by the loader.
    pub source: String,
    pub location: String,
    pub status: String,
    pub description: String,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    /// Derived from `year`, `month` and `day` at load time.
    pub date: NaiveDate,
    /// Remaining columns of the source file, kept verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Complaint {
    /// Description length in characters (not bytes).
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }
}

// ---------------------------------------------------------------------------
// ComplaintTable – the unified dataset
// ---------------------------------------------------------------------------

/// All loaded complaints plus the union of the source columns.
#[derive(Debug, Clone, Default)]
pub struct ComplaintTable {
    complaints: Vec<Complaint>,
    column_names: Vec<String>,
}

impl ComplaintTable {
    pub fn new(complaints: Vec<Complaint>, column_names: Vec<String>) -> Self {
        ComplaintTable {
            complaints,
            column_names,
        }
    }

    /// Concatenate per-source tables, keeping row order and the ordered
    /// union of their columns.
    pub fn concat(parts: Vec<ComplaintTable>) -> Self {
        let mut seen = HashSet::new();
        let mut column_names = Vec::new();
        let mut complaints = Vec::with_capacity(parts.iter().map(ComplaintTable::len).sum());

        for part in parts {
            for col in part.column_names {
                if seen.insert(col.clone()) {
                    column_names.push(col);
                }
            }
            complaints.extend(part.complaints);
        }

        ComplaintTable {
            complaints,
            column_names,
        }
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complaint> {
        self.complaints.iter()
    }

    /// Number of complaints.
    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }

    /// Longest description in characters, 0 for an empty table.
    pub fn max_description_len(&self) -> usize {
        self.complaints
            .iter()
            .map(Complaint::description_len)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a ComplaintTable {
    type Item = &'a Complaint;
    type IntoIter = std::slice::Iter<'a, Complaint>;

    fn into_iter(self) -> Self::IntoIter {
        self.complaints.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Test helper shared by the other data modules.
    pub(crate) fn complaint(source: &str, location: &str, status: &str, description: &str) -> Complaint {
        Complaint {
            source: source.to_string(),
            location: location.to_string(),
            status: status.to_string(),
            description: description.to_string(),
            year: 2022,
            month: 3,
            day: 7,
            date: NaiveDate::from_ymd_opt(2022, 3, 7).unwrap(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn date_is_zero_padded_then_parsed() {
        assert_eq!(date_string(2022, 3, 7), "2022-03-07");
        assert_eq!(
            complaint_date(2022, 3, 7).unwrap(),
            NaiveDate::from_ymd_opt(2022, 3, 7).unwrap()
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(complaint_date(2022, 13, 1).is_err());
        assert!(complaint_date(2022, 2, 30).is_err());
        assert!(complaint_date(2022, 0, 10).is_err());
        assert!(complaint_date(2024, 2, 29).is_ok());
    }

    #[test]
    fn description_len_counts_characters() {
        let c = complaint("Hapvida", "SP", "Resolvido", "não é só isso");
        assert_eq!(c.description_len(), 13);
    }

    #[test]
    fn concat_keeps_rows_and_column_union() {
        let a = ComplaintTable::new(
            vec![complaint("Hapvida", "SP", "Resolvido", "a")],
            vec!["LOCAL".into(), "STATUS".into(), "TEMA".into()],
        );
        let b = ComplaintTable::new(
            vec![
                complaint("Ibyte", "RJ", "Pendente", "b"),
                complaint("Ibyte", "CE", "Resolvido", "c"),
            ],
            vec!["LOCAL".into(), "CASOS".into()],
        );

        let table = ComplaintTable::concat(vec![a, b]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), ["LOCAL", "STATUS", "TEMA", "CASOS"]);
        assert_eq!(table.complaints()[0].source, "Hapvida");
        assert_eq!(table.complaints()[2].location, "CE");
    }

    #[test]
    fn max_description_len_of_empty_table_is_zero() {
        assert_eq!(ComplaintTable::default().max_description_len(), 0);
    }
}

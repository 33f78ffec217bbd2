use super::model::{Complaint, ComplaintTable};
use super::selectors::{Choice, LengthBands, LengthCategory};

// ---------------------------------------------------------------------------
// Selection – the filter parameters of one interaction
// ---------------------------------------------------------------------------

/// Current side-panel choices, passed by value into [`filter_complaints`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub company: Choice,
    pub location: Choice,
    pub status: Choice,
    pub length: LengthCategory,
}

impl Selection {
    /// Whether a complaint passes every active filter.
    pub fn matches(&self, complaint: &Complaint, bands: &LengthBands) -> bool {
        self.company.matches(&complaint.source)
            && self.location.matches(&complaint.location)
            && self.status.matches(&complaint.status)
            && bands.band(self.length).contains(complaint.description_len())
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows of the base table that passed
// ---------------------------------------------------------------------------

/// Indices into a borrowed table. The table itself is never touched.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a ComplaintTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Complaint> + '_ {
        let rows = self.table.complaints();
        self.indices.iter().map(move |&i| &rows[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
impl<'a> FilteredView<'a> {
    /// A view over every row.
    pub(crate) fn all(table: &'a ComplaintTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Copy the visible rows into a standalone table.
    pub(crate) fn to_table(&self) -> ComplaintTable {
        ComplaintTable::new(
            self.iter().cloned().collect(),
            self.table.column_names().to_vec(),
        )
    }
}

/// Apply `selection` to `table`.
///
/// Company, location and status are exact matches unless set to
/// [`Choice::All`]. The description length must fall in the selected band.
pub fn filter_complaints<'a>(
    table: &'a ComplaintTable,
    selection: &Selection,
    bands: &LengthBands,
) -> FilteredView<'a> {
    let indices = table
        .iter()
        .enumerate()
        .filter(|(_, c)| selection.matches(c, bands))
        .map(|(i, _)| i)
        .collect();
    FilteredView { table, indices }
}

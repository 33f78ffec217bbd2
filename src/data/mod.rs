/// Data layer: complaint records, loading, selectors, filtering and
/// aggregation.
///
/// Architecture:
/// ```text
///  RECLAMEAQUI_*.csv (one per company)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse, tag source, derive date → ComplaintTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selectors │  distinct values, view modes, length bands
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  Selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  monthly / grouped counts, length histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod selectors;

/// Data layer: core types, fetching, parsing and filtering.
///
/// Architecture:
/// ```text
///  GET <origin>/force-curves2/data/...
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  CurveSource::fetch_text → body text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parse    │  header-less CSV → SwitchMeta / SwitchCurve
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  metadata list, SwitchCurves per switch
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  select metadata by switch kind
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parse;
pub mod source;

/// Data layer: core types, loading, aggregation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchDataset (once, at start-up)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, payload bounds, sites
///   └───────────────┘
///        │                         │
///        ▼                         ▼
///   ┌───────────┐           ┌──────────┐
///   │ aggregate  │ → pie     │  filter   │ → scatter
///   └───────────┘           └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

//! Data layer: dataset types, loading, and statistics.
//!
//! Architecture:
//! ```text
//!  data/sales_data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SalesDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ SalesDataset │  units, prices (Array1<f64>)
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  stats    │  aggregates, reshape, top-N
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod stats;

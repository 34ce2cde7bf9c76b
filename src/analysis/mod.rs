//! The portfolio aggregation and query engine.
//!
//! Pure, synchronous computation over a loaded catalog: filtering,
//! scalar aggregation, grouping, profile normalization, and ranking.
//! Nothing in this module performs I/O or mutates its inputs.

pub mod aggregate;
pub mod filter;
pub mod grouping;
pub mod normalize;
pub mod ranking;

pub use aggregate::{aggregate, PortfolioTotals};
pub use filter::{filter_records, FilterConstraints};
pub use grouping::{group_by_status, group_by_tier, group_by_vertical, GroupAggregate};
pub use normalize::{normalize, NormalizedProfile};
pub use ranking::{bottom_n, display_density, top_n, RankedRecord, DENSITY_SIZE_FLOOR};

//! Table access, polars conversions, and the shared fixture.

pub mod fixture;
pub mod frame;
pub mod table;

pub use fixture::sample_bars;
pub use frame::bars_to_frame;
pub use table::OhlcvTable;

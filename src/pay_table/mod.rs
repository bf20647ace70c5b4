//! Pay-table storage and forecast projection.
//!
//! Published tables are loaded verbatim; forecast years are derived from the
//! last published year by the stages in [`projection`], and every table is
//! served from the immutable [`PayTableRegistry`].

mod ladder;
pub mod projection;
mod registry;
mod table;

pub use ladder::StepLadder;
pub use registry::PayTableRegistry;
pub use table::{PayTable, SeatRows, TableSource};

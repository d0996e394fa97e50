//! gridfit
//!
//! Column width auto-sizing for data grids, with a terminal table viewer.
//!
//! The sizing core lives in [`sizing`]: sample cell values, measure them,
//! resolve one width per column from its strategy and clamps, then reconcile
//! the total against the viewport. [`sizing::AutoColumnSize`] drives a pass
//! over anything implementing [`sizing::GridHost`]; [`view::TableHost`] is
//! the terminal implementation.

pub mod config;
pub mod logging;
pub mod model;
pub mod sizing;
pub mod source;
pub mod view;

#[cfg(test)]
mod test_harness;

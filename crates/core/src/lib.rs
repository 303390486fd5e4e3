//! PCM
//!
//! Maintenance metrics for planned-maintenance control: equipment health scoring, fleet
//! statistics, technician performance and reliability figures computed from equipment and
//! work-order records.
//!
//! Every calculation in this crate is a pure function of its inputs and a reference "now".
//! Nothing here performs I/O or keeps state between calls.

pub mod equipment;
pub mod failures;
pub mod fixtures;
pub mod fleet;
pub mod health;
pub mod policy;
pub mod prelude;
pub mod reliability;
pub mod report;
pub mod technicians;
pub mod utils;
pub mod work_orders;

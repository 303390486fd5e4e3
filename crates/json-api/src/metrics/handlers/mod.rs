//! Metric Handlers

pub(crate) mod equipment_health;
pub(crate) mod fleet;
pub(crate) mod report;
pub(crate) mod technicians;

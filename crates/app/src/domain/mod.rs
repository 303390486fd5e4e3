//! PCM Domain Concerns

pub mod companies;
pub mod equipment;
pub mod metrics;
pub mod work_orders;

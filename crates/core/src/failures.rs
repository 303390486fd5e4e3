//! Failure Ranking

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::work_orders::WorkOrder;

/// Number of rankings shown on reports.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Corrective order count for one equipment name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentFailures {
    /// Equipment name as recorded on the orders.
    pub equipment_name: String,

    /// Corrective orders raised against it.
    pub failures: usize,
}

/// Rank equipment by corrective order count, most failures first.
///
/// Orders of any status count. Names with equal counts keep the order in which they first
/// appear in `orders`.
pub fn rank_equipment_failures(orders: &[WorkOrder]) -> Vec<EquipmentFailures> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut ranking: Vec<EquipmentFailures> = Vec::new();

    for order in orders.iter().filter(|order| order.is_corrective()) {
        let position = *positions
            .entry(order.equipment_name.as_str())
            .or_insert_with(|| {
                ranking.push(EquipmentFailures {
                    equipment_name: order.equipment_name.clone(),
                    failures: 0,
                });
                ranking.len() - 1
            });

        if let Some(entry) = ranking.get_mut(position) {
            entry.failures += 1;
        }
    }

    // `sort_by` is stable, which keeps first-seen order between ties.
    ranking.sort_by(|a, b| b.failures.cmp(&a.failures));
    ranking
}

/// The `limit` most failing equipment names.
pub fn top_equipment_failures(orders: &[WorkOrder], limit: usize) -> Vec<EquipmentFailures> {
    let mut ranking = rank_equipment_failures(orders);
    ranking.truncate(limit);
    ranking
}

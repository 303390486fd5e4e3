//! Test Helpers

use jiff::{Timestamp, ToSpan};
use pcm::equipment::MaintenanceType;

use crate::{
    domain::{
        companies::records::CompanyUuid,
        equipment::{
            EquipmentService, EquipmentServiceError,
            data::NewEquipment,
            records::EquipmentUuid,
        },
    },
    test::TestContext,
};

/// Register preventive equipment installed a year ago.
pub(crate) async fn create_equipment(
    ctx: &TestContext,
    tenant: CompanyUuid,
    name: &str,
) -> Result<EquipmentUuid, EquipmentServiceError> {
    let installed_at = Timestamp::now()
        .checked_sub(8760.hours())
        .unwrap_or(Timestamp::UNIX_EPOCH);

    ctx.equipment
        .create_equipment(
            tenant,
            NewEquipment {
                uuid: EquipmentUuid::new(),
                name: name.to_string(),
                location: "Plant 1".to_string(),
                maintenance_type: MaintenanceType::Preventive,
                installed_at,
            },
        )
        .await
        .map(|equipment| equipment.uuid)
}

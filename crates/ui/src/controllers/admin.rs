use models::admin::{BloodUnit, EmergencyAlert, UnitAction, DEFAULT_ALERT_MESSAGE};
use tracing::{debug, warn};

use super::{load_page, message_or, PageContext, UiError};
use crate::tables;
use crate::view::{Element, FormData, Region};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this blood unit?";

/// stats, then units, then requests
pub(crate) async fn load(ctx: &PageContext) -> Result<(), UiError> {
    let stats = ctx.call(ctx.api.admin.get_dashboard_stats()).await?;
    ctx.view.render(Region::Stats, tables::stats(&stats));

    let units = ctx.call(ctx.api.admin.get_blood_units()).await?;
    ctx.view.render(Region::BloodUnits, tables::blood_units(&units));

    let requests = ctx.call(ctx.api.admin.get_requests()).await?;
    ctx.view.render(Region::Requests, tables::requests(&requests));
    Ok(())
}

pub(crate) async fn delete_unit(ctx: &PageContext, unit_id: &str) {
    if !ctx.view.confirm(DELETE_CONFIRMATION) {
        debug!(unit_id, "delete not confirmed");
        return;
    }
    let result = {
        let _busy = ctx.loading();
        ctx.call(ctx.api.admin.delete_blood_unit(unit_id)).await
    };
    match result {
        Ok(reply) => {
            ctx.notifier.success(message_or(reply.msg.as_deref(), "Blood unit deleted"));
            load_page(ctx).await;
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(unit_id, error = %e, "delete failed");
            ctx.notifier.error("Failed to delete blood unit");
        }
    }
}

fn unit_from_form(form: &FormData) -> (BloodUnit, UnitAction) {
    let id = form.get_any(&["_id", "id"]).map(str::to_string);
    let action = match form.get("action") {
        Some(a) => UnitAction::parse(a),
        None if id.is_some() => UnitAction::Update,
        None => UnitAction::Create,
    };
    let unit = BloodUnit {
        id,
        bag_id: form.text_any(&["bagId", "bag_id"]),
        blood_type: form.text_any(&["bloodType", "blood_type"]),
        collection_date: form.get_any(&["collectionDate", "collection_date"]).map(str::to_string),
        expiry_date: form.get_any(&["expiryDate", "expiry_date"]).map(str::to_string),
        location: form.text("location"),
        status: form.owned("status").unwrap_or_else(|| "Available".to_string()),
    };
    (unit, action)
}

pub(crate) async fn save_unit(ctx: &PageContext, form: &FormData) {
    let (unit, action) = unit_from_form(form);
    let result = {
        let _busy = ctx.loading();
        ctx.call(ctx.api.admin.manage_blood_unit(&unit, action)).await
    };
    match result {
        Ok(reply) => {
            ctx.notifier.success(message_or(reply.msg.as_deref(), "Blood unit saved"));
            ctx.view.reset_form(Element::UnitForm);
            load_page(ctx).await;
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(bag_id = %unit.bag_id, ?action, error = %e, "saving unit failed");
            ctx.notifier.error(format!("Failed to save blood unit: {e}"));
        }
    }
}

pub(crate) async fn set_request_status(ctx: &PageContext, request_id: &str, status: &str) {
    let result = {
        let _busy = ctx.loading();
        ctx.call(ctx.api.admin.update_request_status(request_id, status)).await
    };
    match result {
        Ok(_) => {
            ctx.notifier.success(format!("Request marked {status}"));
            load_page(ctx).await;
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(request_id, status, error = %e, "status update failed");
            ctx.notifier.error("Failed to update request status");
        }
    }
}

pub(crate) async fn send_alert(ctx: &PageContext, form: &FormData) {
    let alert = EmergencyAlert {
        blood_type: form.text("bloodType"),
        region: form.text("region"),
        message: form.owned("message").unwrap_or_else(|| DEFAULT_ALERT_MESSAGE.to_string()),
    };
    let _busy = ctx.loading();
    match ctx.call(ctx.api.admin.send_emergency_alert(&alert)).await {
        Ok(_) => {
            ctx.notifier.success("Emergency alert sent successfully");
            ctx.view.reset_form(Element::AlertForm);
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(region = %alert.region, error = %e, "emergency alert failed");
            ctx.notifier.error("Failed to send emergency alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_form_infers_update_from_id() {
        let form = FormData::new().with("_id", "u1").with("bagId", "BAG-1").with("bloodType", "O+");
        let (unit, action) = unit_from_form(&form);
        assert_eq!(action, UnitAction::Update);
        assert_eq!(unit.id.as_deref(), Some("u1"));
        assert_eq!(unit.status, "Available");

        let (_, action) = unit_from_form(&FormData::new().with("bag_id", "B").with("action", "create"));
        assert_eq!(action, UnitAction::Create);
    }
}

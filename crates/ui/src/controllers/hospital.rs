use models::hospital::{BloodStockFilter, NewBloodRequest, DEFAULT_URGENCY};
use tracing::{debug, warn};

use super::{PageContext, UiError};
use crate::tables;
use crate::view::{Element, FormData, Region};

pub(crate) async fn load(ctx: &PageContext) -> Result<(), UiError> {
    let stock = ctx.call(ctx.api.hospital.get_blood_stock(&BloodStockFilter::default())).await?;
    ctx.view.render(Region::BloodStock, tables::blood_stock(&stock));

    let requests = ctx.call(ctx.api.hospital.get_requests()).await?;
    ctx.view.render(Region::Requests, tables::requests(&requests));
    Ok(())
}

/// Debounced `stock-search` handler. Failures are only logged.
pub(crate) async fn search(ctx: &PageContext, query: &str) {
    match ctx.call(ctx.api.hospital.get_blood_stock(&BloodStockFilter::search(query))).await {
        Ok(items) => {
            debug!(query, hits = items.len(), "stock search");
            ctx.view.render(Region::BloodStock, tables::blood_stock(&items));
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => warn!(query, error = %e, "stock search failed"),
    }
}

/// Leading decimal digits of a form field; anything else counts as zero.
fn parse_units(raw: Option<&str>) -> u32 {
    let digits: String = raw.unwrap_or_default().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

pub(crate) async fn request_blood(ctx: &PageContext, form: &FormData) {
    let request = NewBloodRequest {
        hospital_name: form.text("hospitalName"),
        blood_type: form.text("bloodType"),
        units: parse_units(form.get("units")),
        urgency: form.owned("urgency").unwrap_or_else(|| DEFAULT_URGENCY.to_string()),
    };
    let _busy = ctx.loading();
    match ctx.call(ctx.api.hospital.request_blood(&request)).await {
        Ok(_) => {
            ctx.notifier.success("Blood request submitted successfully");
            ctx.view.reset_form(Element::BloodRequestForm);
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(blood_type = %request.blood_type, error = %e, "blood request failed");
            ctx.notifier.error("Failed to submit blood request");
        }
    }
}

use models::donor::{AppointmentRequest, EligibilityInput};
use tracing::warn;

use super::{message_or, PageContext, UiError};
use crate::modal::Modal;
use crate::tables;
use crate::view::{Element, FormData, Region};

/// profile, then appointments, then donation history
pub(crate) async fn load(ctx: &PageContext) -> Result<(), UiError> {
    let profile = ctx.call(ctx.api.donor.get_profile()).await?;
    ctx.view.render(Region::Profile, tables::profile_card(&profile));

    let appointments = ctx.call(ctx.api.donor.get_appointments()).await?;
    ctx.view.render(Region::Appointments, tables::appointments(&appointments));

    let history = ctx.call(ctx.api.donor.get_donation_history()).await?;
    ctx.view.render(Region::DonationHistory, tables::donations(&history));
    Ok(())
}

pub(crate) async fn book_appointment(ctx: &PageContext, form: &FormData) {
    let (Some(date), Some(location)) = (form.owned("date"), form.owned("location")) else {
        ctx.notifier.error("Please choose a date and location");
        return;
    };
    let request = AppointmentRequest { date, location };
    let _busy = ctx.loading();
    match ctx.call(ctx.api.donor.book_appointment(&request)).await {
        Ok(reply) => {
            ctx.notifier
                .success(message_or(reply.msg.as_deref(), "Appointment booked successfully"));
            ctx.view.reset_form(Element::AppointmentForm);
        }
        Err(UiError::Cancelled(_)) => return,
        Err(e) => {
            warn!(error = %e, "booking failed");
            ctx.notifier.error("Failed to book appointment");
            return;
        }
    }
    match ctx.call(ctx.api.donor.get_appointments()).await {
        Ok(items) => ctx.view.render(Region::Appointments, tables::appointments(&items)),
        Err(e) => warn!(error = %e, "appointments refresh failed"),
    }
}

pub(crate) fn open_eligibility_checker(ctx: &PageContext) {
    ctx.open_modal(&Modal::eligibility_checker());
}

pub(crate) async fn check_eligibility(ctx: &PageContext, form: &FormData) {
    let answers = EligibilityInput { health: form.text("health"), last_donation: form.text("lastDonation") };
    match ctx.call(ctx.api.donor.check_eligibility(&answers)).await {
        Ok(result) if result.eligible => {
            ctx.notifier.success("You are eligible to donate blood!");
            ctx.close_modal();
        }
        Ok(result) => {
            let reason = result.reason.as_deref().unwrap_or("no reason given");
            ctx.notifier.warning(format!("You are not eligible: {reason}"));
            ctx.close_modal();
        }
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(error = %e, "eligibility check failed");
            ctx.notifier.error("Failed to check eligibility");
        }
    }
}

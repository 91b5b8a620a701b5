use models::auth::{AuthResponse, LoginInput, SignupInput};
use models::{Page, Role, Session};
use service::errors::FALLBACK_ERROR_MESSAGE;
use tracing::{info, warn};

use super::{message_or, PageContext, UiError};
use crate::view::FormData;

/// Role picked on the form; donor when absent or unknown.
fn requested_role(form: &FormData) -> Role {
    form.get_any(&["userType", "role"])
        .and_then(|r| r.parse().ok())
        .unwrap_or(Role::Donor)
}

pub(crate) async fn login(ctx: &PageContext, form: &FormData) {
    let input = LoginInput { email: form.text("email"), password: form.text("password") };
    let requested = requested_role(form);
    let result = {
        let _busy = ctx.loading();
        ctx.call(ctx.api.auth.login(&input)).await
    };
    match result {
        Ok(resp) => match resp.token.clone().filter(|t| !t.is_empty()) {
            Some(token) => start_session(ctx, token, &resp, requested).await,
            None => ctx.view.alert(&message_or(resp.msg.as_deref(), FALLBACK_ERROR_MESSAGE)),
        },
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(email = %input.email, error = %e, "login failed");
            ctx.view.alert(&e.to_string());
        }
    }
}

pub(crate) async fn signup(ctx: &PageContext, form: &FormData) {
    let input = SignupInput {
        name: form.text("name"),
        email: form.text("email"),
        password: form.text("password"),
        blood_type: form.get_any(&["bloodType", "blood_type"]).map(str::to_string),
        phone: form.owned("phone"),
        address: form.owned("address"),
        role: requested_role(form),
    };
    let result = {
        let _busy = ctx.loading();
        ctx.call(ctx.api.auth.signup(&input)).await
    };
    match result {
        Ok(resp) => match resp.token.clone().filter(|t| !t.is_empty()) {
            Some(token) => start_session(ctx, token, &resp, input.role).await,
            None => {
                // account created but no auto sign-in
                ctx.notifier
                    .success(message_or(resp.msg.as_deref(), "Registration successful. Please log in."));
                ctx.navigate_to(Page::Login).await;
            }
        },
        Err(UiError::Cancelled(_)) => {}
        Err(e) => {
            warn!(email = %input.email, error = %e, "signup failed");
            ctx.view.alert(&e.to_string());
        }
    }
}

async fn start_session(ctx: &PageContext, token: String, resp: &AuthResponse, requested: Role) {
    let session = Session::new(token, resp.resolved_role(requested));
    if let Err(e) = ctx.api.session().save(&session).await {
        warn!(error = %e, "could not persist session");
        ctx.view.alert(&e.to_string());
        return;
    }
    info!(role = %session.role, "signed in");
    ctx.navigate_to(session.role.dashboard()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_form() {
        assert_eq!(requested_role(&FormData::new()), Role::Donor);
        assert_eq!(requested_role(&FormData::new().with("userType", "hospital")), Role::Hospital);
        assert_eq!(requested_role(&FormData::new().with("role", "Admin")), Role::Admin);
        assert_eq!(requested_role(&FormData::new().with("userType", "nurse")), Role::Donor);
    }
}

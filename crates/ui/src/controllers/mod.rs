//! Page controllers.
//!
//! [`PageController::boot`] resolves the page from a path, checks the
//! session, wires the elements the view actually has and runs the page's
//! loader. Later UI events go through [`PageController::dispatch`].
//!
//! State per page: `Unauthenticated -> Authenticated -> Loaded | LoadFailed`,
//! and `Redirected` once the page is left. A dashboard booted without a
//! session goes straight to `Redirected` (login).

pub mod admin;
pub mod auth;
pub mod donor;
pub mod hospital;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use configs::UiConfig;
use models::{Page, Session};
use service::{Api, ClientError, Navigator};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::debounce::Debouncer;
use crate::lifecycle::{Cancelled, PageLifecycle};
use crate::modal::Modal;
use crate::notify::Notifier;
use crate::view::{Element, FormData, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Unauthenticated,
    Authenticated,
    Loaded,
    LoadFailed,
    Redirected,
}

#[derive(Debug, Error)]
pub enum UiError {
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Clicks that are not form submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Logout,
    OpenEligibilityChecker,
    /// Click on the modal overlay.
    CloseModal,
    DeleteUnit(String),
    SetRequestStatus { id: String, status: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit(Element, FormData),
    Input(Element, String),
    Click(Action),
}

/// Process-wide collaborators shared by every page.
#[derive(Clone)]
pub struct Shell {
    pub api: Api,
    pub view: Arc<dyn View>,
    pub navigator: Arc<dyn Navigator>,
    pub ui: UiConfig,
}

/// Per-page state handed to every loader and handler.
pub struct PageContext {
    pub page: Page,
    pub api: Api,
    pub view: Arc<dyn View>,
    pub notifier: Notifier,
    session: Option<Session>,
    navigator: Arc<dyn Navigator>,
    lifecycle: PageLifecycle,
    transition: Duration,
    state: Mutex<PageState>,
    modal_open: AtomicBool,
}

/// Shows the loading indicator until dropped.
pub struct LoadingGuard<'a> {
    view: &'a dyn View,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_loading(false);
    }
}

impl PageContext {
    fn new(shell: &Shell, page: Page, session: Option<Session>) -> Self {
        let state = if session.is_some() { PageState::Authenticated } else { PageState::Unauthenticated };
        Self {
            page,
            api: shell.api.clone(),
            view: Arc::clone(&shell.view),
            notifier: Notifier::new(Arc::clone(&shell.view), shell.ui.notification_ttl()),
            session,
            navigator: Arc::clone(&shell.navigator),
            lifecycle: PageLifecycle::new(),
            transition: shell.ui.transition(),
            state: Mutex::new(state),
            modal_open: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> PageState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// `Redirected` is terminal.
    fn set_state(&self, next: PageState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == PageState::Redirected || *state == next {
            return;
        }
        debug!(page = %self.page, from = ?*state, to = ?next, "page state");
        *state = next;
    }

    /// Run a facade call under this page's lifecycle.
    pub async fn call<T, F>(&self, fut: F) -> Result<T, UiError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        Ok(self.lifecycle.run(fut).await??)
    }

    pub fn loading(&self) -> LoadingGuard<'_> {
        self.view.set_loading(true);
        LoadingGuard { view: self.view.as_ref() }
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle.is_torn_down()
    }

    fn teardown(&self) {
        self.lifecycle.teardown();
        self.set_state(PageState::Redirected);
    }

    /// Leave immediately (auth redirects).
    fn redirect(&self, page: Page) {
        self.teardown();
        info!(from = %self.page, to = %page, "redirect");
        self.navigator.navigate(page);
    }

    /// Leave after the page transition delay.
    pub async fn navigate_to(&self, page: Page) {
        self.teardown();
        if !self.transition.is_zero() {
            tokio::time::sleep(self.transition).await;
        }
        info!(from = %self.page, to = %page, "navigate");
        self.navigator.navigate(page);
    }

    pub async fn logout(&self) {
        self.teardown();
        self.api.auth.logout(self.navigator.as_ref()).await;
    }

    pub fn open_modal(&self, modal: &Modal) {
        self.view.show_modal(modal);
        self.modal_open.store(true, Ordering::SeqCst);
    }

    pub fn close_modal(&self) {
        if self.modal_open.swap(false, Ordering::SeqCst) {
            self.view.close_modal();
        }
    }

    pub fn modal_is_open(&self) -> bool {
        self.modal_open.load(Ordering::SeqCst)
    }
}

/// Run the page's loader with the loading indicator on. The first failure
/// stops the loader; regions rendered before it stay as they are.
pub(crate) async fn load_page(ctx: &PageContext) {
    let outcome = {
        let _busy = ctx.loading();
        match ctx.page {
            Page::DonorDashboard => donor::load(ctx).await,
            Page::HospitalDashboard => hospital::load(ctx).await,
            Page::AdminPanel => admin::load(ctx).await,
            _ => return,
        }
    };
    match outcome {
        Ok(()) => ctx.set_state(PageState::Loaded),
        Err(UiError::Cancelled(_)) => debug!(page = %ctx.page, "loader cancelled"),
        Err(e) => {
            warn!(page = %ctx.page, error = %e, "page load failed");
            ctx.notifier.error(load_failure_message(ctx.page));
            ctx.set_state(PageState::LoadFailed);
        }
    }
}

fn load_failure_message(page: Page) -> &'static str {
    match page {
        Page::HospitalDashboard => "Failed to load hospital dashboard",
        Page::AdminPanel => "Failed to load admin panel",
        _ => "Failed to load dashboard data",
    }
}

/// Elements a page listens on. Anything the view lacks is skipped.
fn listeners(page: Page) -> &'static [Element] {
    match page {
        Page::Login => &[Element::LoginForm],
        Page::Signup => &[Element::SignupForm],
        Page::DonorDashboard => &[Element::AppointmentForm, Element::EligibilityButton, Element::Logout],
        Page::HospitalDashboard => &[Element::StockSearch, Element::BloodRequestForm, Element::Logout],
        Page::AdminPanel => &[Element::UnitForm, Element::AlertForm, Element::Logout],
        Page::Index => &[Element::Logout],
    }
}

pub struct PageController {
    ctx: Arc<PageContext>,
    wired: BTreeSet<Element>,
    search: Option<Debouncer<String>>,
}

impl PageController {
    #[instrument(skip(shell))]
    pub async fn boot(shell: &Shell, path: &str) -> Result<Self, UiError> {
        let page = Page::from_path(path).ok_or_else(|| UiError::UnknownPage(path.to_string()))?;
        let session = shell.api.session().load().await;
        let ctx = Arc::new(PageContext::new(shell, page, session));

        if page.requires_auth() && ctx.session.is_none() {
            ctx.redirect(Page::Login);
            return Ok(Self { ctx, wired: BTreeSet::new(), search: None });
        }
        if let (Some(s), Some(owner)) = (ctx.session(), page.role()) {
            if s.role != owner {
                debug!(role = %s.role, page = %page, "session role differs from page role");
            }
        }

        let wired: BTreeSet<Element> = listeners(page)
            .iter()
            .copied()
            .filter(|el| {
                let present = shell.view.has_element(*el);
                if !present {
                    debug!(element = %el, page = %page, "element missing; not wired");
                }
                present
            })
            .collect();

        let search = wired.contains(&Element::StockSearch).then(|| {
            let ctx = Arc::clone(&ctx);
            Debouncer::new(shell.ui.debounce(), move |query: String| {
                let ctx = Arc::clone(&ctx);
                async move { hospital::search(&ctx, &query).await }
            })
        });

        info!(page = %page, role = ?ctx.session().map(|s| s.role), wired = wired.len(), "page booted");
        load_page(&ctx).await;
        Ok(Self { ctx, wired, search })
    }

    pub fn page(&self) -> Page {
        self.ctx.page
    }

    pub fn state(&self) -> PageState {
        self.ctx.state()
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn is_wired(&self, element: Element) -> bool {
        self.wired.contains(&element)
    }

    /// Reload the page's data regions.
    pub async fn reload(&self) {
        if !self.ctx.is_torn_down() {
            load_page(&self.ctx).await;
        }
    }

    /// Handle one UI event. Returns `false` when nothing on this page
    /// listens for it.
    pub async fn dispatch(&self, event: Event) -> bool {
        let ctx = self.ctx.as_ref();
        if ctx.is_torn_down() {
            debug!(page = %ctx.page, ?event, "event after teardown ignored");
            return false;
        }
        match event {
            Event::Submit(Element::EligibilityForm, data) => {
                if !ctx.modal_is_open() {
                    return false;
                }
                donor::check_eligibility(ctx, &data).await;
            }
            Event::Submit(form, data) => {
                if !self.is_wired(form) {
                    return false;
                }
                match form {
                    Element::LoginForm => auth::login(ctx, &data).await,
                    Element::SignupForm => auth::signup(ctx, &data).await,
                    Element::AppointmentForm => donor::book_appointment(ctx, &data).await,
                    Element::BloodRequestForm => hospital::request_blood(ctx, &data).await,
                    Element::UnitForm => admin::save_unit(ctx, &data).await,
                    Element::AlertForm => admin::send_alert(ctx, &data).await,
                    _ => return false,
                }
            }
            Event::Input(Element::StockSearch, query) => match &self.search {
                Some(debouncer) => debouncer.call(query),
                None => return false,
            },
            Event::Input(..) => return false,
            Event::Click(action) => match action {
                Action::Logout if self.is_wired(Element::Logout) => ctx.logout().await,
                Action::OpenEligibilityChecker if self.is_wired(Element::EligibilityButton) => {
                    donor::open_eligibility_checker(ctx)
                }
                Action::CloseModal if ctx.modal_is_open() => ctx.close_modal(),
                Action::DeleteUnit(id) if ctx.page == Page::AdminPanel => admin::delete_unit(ctx, &id).await,
                Action::SetRequestStatus { id, status } if ctx.page == Page::AdminPanel => {
                    admin::set_request_status(ctx, &id, &status).await
                }
                _ => return false,
            },
        }
        true
    }

    /// Wait for a pending debounced search to fire and finish.
    pub async fn settle(&self) {
        if let Some(d) = &self.search {
            d.flush().await;
        }
    }

    pub fn teardown(&self) {
        if let Some(d) = &self.search {
            d.cancel();
        }
        self.ctx.teardown();
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.ctx.lifecycle.teardown();
    }
}

pub(crate) fn message_or(msg: Option<&str>, default: &str) -> String {
    msg.filter(|m| !m.trim().is_empty()).unwrap_or(default).to_string()
}

//! Stub backend plus a view and navigator that record what pages do.

#![allow(dead_code)]

#[path = "../../../service/tests/support/stub.rs"]
mod stub;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use configs::UiConfig;
use models::{Page, Role};
use service::storage::{MemoryStorage, AUTH_TOKEN_KEY, USER_TYPE_KEY};
use service::{Api, ApiClient, Navigator};
use ui::modal::Modal;
use ui::notify::{Level, Notification};
use ui::view::{Content, Element, Region, Table, View};
use ui::Shell;
use uuid::Uuid;

pub use stub::{Recorded, Stub};

#[derive(Default)]
pub struct RecordingView {
    missing: BTreeSet<Element>,
    answer: AtomicBool,
    pub renders: Mutex<Vec<(Region, Content)>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub resets: Mutex<Vec<Element>>,
    pub loading: Mutex<Vec<bool>>,
    pub modals: Mutex<Vec<&'static str>>,
    pub closed_modals: Mutex<usize>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, element: Element) -> Self {
        self.missing.insert(element);
        self
    }

    pub fn confirming(self, answer: bool) -> Self {
        self.answer.store(answer, Ordering::SeqCst);
        self
    }

    pub fn last(&self, region: Region) -> Option<Content> {
        self.renders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(r, _)| *r == region)
            .map(|(_, c)| c.clone())
    }

    pub fn last_table(&self, region: Region) -> Option<Table> {
        match self.last(region)? {
            Content::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn renders_of(&self, region: Region) -> usize {
        self.renders.lock().unwrap().iter().filter(|(r, _)| *r == region).count()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl View for RecordingView {
    fn has_element(&self, element: Element) -> bool {
        !self.missing.contains(&element)
    }
    fn render(&self, region: Region, content: Content) {
        self.renders.lock().unwrap().push((region, content));
    }
    fn set_loading(&self, on: bool) {
        self.loading.lock().unwrap().push(on);
    }
    fn show_notification(&self, n: &Notification) {
        self.notifications.lock().unwrap().push(n.clone());
    }
    fn dismiss_notification(&self, _id: Uuid) {}
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer.load(Ordering::SeqCst)
    }
    fn reset_form(&self, form: Element) {
        self.resets.lock().unwrap().push(form);
    }
    fn show_modal(&self, modal: &Modal) {
        self.modals.lock().unwrap().push(modal.title);
    }
    fn close_modal(&self) {
        *self.closed_modals.lock().unwrap() += 1;
    }
}

#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<Page>>);

impl RecordingNavigator {
    pub fn pages(&self) -> Vec<Page> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, page: Page) {
        self.0.lock().unwrap().push(page);
    }
}

pub struct Harness {
    pub shell: Shell,
    pub view: Arc<RecordingView>,
    pub nav: Arc<RecordingNavigator>,
    pub storage: Arc<MemoryStorage>,
}

pub fn ui_config() -> UiConfig {
    UiConfig { debounce_ms: 50, notification_ttl_ms: 3000, transition_ms: 0 }
}

pub fn harness(stub: &Stub, view: RecordingView, role: Option<Role>) -> Harness {
    let storage = Arc::new(match role {
        Some(r) => MemoryStorage::with_items([(AUTH_TOKEN_KEY, "jwt-test"), (USER_TYPE_KEY, r.as_str())]),
        None => MemoryStorage::new(),
    });
    let view = Arc::new(view);
    let nav = Arc::new(RecordingNavigator::default());
    let shell = Shell {
        api: Api::new(ApiClient::new(&stub.base_url, storage.clone())),
        view: view.clone(),
        navigator: nav.clone(),
        ui: ui_config(),
    };
    Harness { shell, view, nav, storage }
}

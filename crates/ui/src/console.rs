//! Terminal rendering of pages, used by the `jeevandhara` binary.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use models::Page;
use service::Navigator;
use tracing::info;
use uuid::Uuid;

use crate::controllers::{Action, Event};
use crate::modal::Modal;
use crate::notify::Notification;
use crate::view::{Content, Element, FormData, Region, View};

pub const USAGE: &str = "usage: jeevandhara <page> [key=value ...] [--yes] [--metrics]\n\
  pages: login.html signup.html donor-dashboard.html hospital-dashboard.html admin-panel.html\n\
  e.g.   jeevandhara login.html email=a@b.in password=secret\n\
         jeevandhara hospital-dashboard.html search=O+\n\
         jeevandhara admin-panel.html delete=<unit id> --yes\n\
         jeevandhara donor-dashboard.html logout";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub path: String,
    pub fields: Vec<(String, String)>,
    pub assume_yes: bool,
    pub show_metrics: bool,
}

impl Invocation {
    /// `<page> [key=value ...] [--yes] [--metrics]`; a bare word is a key
    /// with no value.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut path = None;
        let mut fields = Vec::new();
        let mut assume_yes = false;
        let mut show_metrics = false;
        for arg in args {
            match arg.as_str() {
                "--yes" | "-y" => assume_yes = true,
                "--metrics" => show_metrics = true,
                "--help" | "-h" => return Err(USAGE.to_string()),
                _ if path.is_none() => path = Some(arg.clone()),
                _ => match arg.split_once('=') {
                    Some((k, v)) => fields.push((k.to_string(), v.to_string())),
                    None => fields.push((arg.clone(), String::new())),
                },
            }
        }
        let path = path.ok_or_else(|| USAGE.to_string())?;
        Ok(Self { path, fields, assume_yes, show_metrics })
    }

    fn has(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    fn form(&self) -> FormData {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Events to dispatch on `page`, in order.
    pub fn events(&self, page: Page) -> Vec<Event> {
        if self.fields.is_empty() {
            return Vec::new();
        }
        if self.has("logout") {
            return vec![Event::Click(Action::Logout)];
        }
        let form = self.form();
        match page {
            Page::Login => vec![Event::Submit(Element::LoginForm, form)],
            Page::Signup => vec![Event::Submit(Element::SignupForm, form)],
            Page::DonorDashboard if self.has("health") => vec![
                Event::Click(Action::OpenEligibilityChecker),
                Event::Submit(Element::EligibilityForm, form),
            ],
            Page::DonorDashboard => vec![Event::Submit(Element::AppointmentForm, form)],
            Page::HospitalDashboard => match form.get("search") {
                Some(q) => vec![Event::Input(Element::StockSearch, q.to_string())],
                None => vec![Event::Submit(Element::BloodRequestForm, form)],
            },
            Page::AdminPanel => {
                if let Some(id) = form.get("delete") {
                    vec![Event::Click(Action::DeleteUnit(id.to_string()))]
                } else if let (Some(id), Some(status)) = (form.get("request"), form.get("status")) {
                    vec![Event::Click(Action::SetRequestStatus { id: id.to_string(), status: status.to_string() })]
                } else if self.has("region") {
                    vec![Event::Submit(Element::AlertForm, form)]
                } else {
                    vec![Event::Submit(Element::UnitForm, form)]
                }
            }
            Page::Index => Vec::new(),
        }
    }
}

/// Prints every render to stdout. Confirmation prompts read a line from
/// stdin unless `assume_yes` is set.
pub struct ConsoleView {
    elements: BTreeSet<Element>,
    assume_yes: bool,
}

impl ConsoleView {
    /// A page that has every element.
    pub fn new(assume_yes: bool) -> Self {
        Self { elements: Element::ALL.into_iter().collect(), assume_yes }
    }
}

fn print_content(region: Region, content: &Content) -> String {
    let mut out = format!("== {region:?} ==\n");
    match content {
        Content::Profile(card) => {
            out.push_str(&format!(
                "{}\nBlood Type: {}\nTotal Donations: {}\n",
                card.greeting, card.blood_type, card.total_donations
            ));
        }
        Content::Stats(pairs) => {
            for (label, value) in pairs {
                out.push_str(&format!("{label}: {value}\n"));
            }
        }
        Content::Table(table) => {
            out.push_str(&table.headers.join(" | "));
            out.push('\n');
            if table.rows.is_empty() {
                out.push_str("(no rows)\n");
            }
            for row in &table.rows {
                out.push_str(&row.cells.join(" | "));
                if let Some(key) = &row.key {
                    out.push_str(&format!("  [{key}]"));
                }
                out.push('\n');
            }
        }
    }
    out
}

impl View for ConsoleView {
    fn has_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    fn render(&self, region: Region, content: Content) {
        print!("{}", print_content(region, &content));
    }

    fn set_loading(&self, on: bool) {
        if on {
            println!("...");
        }
    }

    fn show_notification(&self, n: &Notification) {
        println!("[{}] {}", n.level, n.message);
    }

    fn dismiss_notification(&self, _id: Uuid) {}

    fn alert(&self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn reset_form(&self, _form: Element) {}

    fn show_modal(&self, modal: &Modal) {
        println!("== {} ==", modal.title);
        for f in &modal.fields {
            println!("{} ({})", f.label, f.name);
        }
    }

    fn close_modal(&self) {}
}

/// Records where the page asked to go; the binary boots that page next.
#[derive(Default)]
pub struct ConsoleNavigator {
    target: Mutex<Option<Page>>,
}

impl ConsoleNavigator {
    pub fn take(&self) -> Option<Page> {
        self.target.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, page: Page) {
        info!(to = %page, "navigate");
        *self.target.lock().unwrap_or_else(|e| e.into_inner()) = Some(page);
    }
}

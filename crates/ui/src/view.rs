//! The rendering surface the controllers talk to.
//!
//! A [`View`] is the page surface: controllers ask whether an
//! element exists before wiring it, push whole regions to it, and raise
//! notifications, alerts and modals through it. Implementations decide how
//! any of that is shown.

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::modal::Modal;
use crate::notify::Notification;

/// Interactive elements a page may or may not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    LoginForm,
    SignupForm,
    BloodRequestForm,
    AlertForm,
    AppointmentForm,
    UnitForm,
    EligibilityForm,
    EligibilityButton,
    StockSearch,
    Logout,
}

impl Element {
    pub const ALL: [Element; 10] = [
        Element::LoginForm,
        Element::SignupForm,
        Element::BloodRequestForm,
        Element::AlertForm,
        Element::AppointmentForm,
        Element::UnitForm,
        Element::EligibilityForm,
        Element::EligibilityButton,
        Element::StockSearch,
        Element::Logout,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Element::LoginForm => "loginForm",
            Element::SignupForm => "signupForm",
            Element::BloodRequestForm => "bloodRequestForm",
            Element::AlertForm => "alertForm",
            Element::AppointmentForm => "appointmentForm",
            Element::UnitForm => "unitForm",
            Element::EligibilityForm => "eligibilityForm",
            Element::EligibilityButton => "check-eligibility",
            Element::StockSearch => "stock-search",
            Element::Logout => "logout",
        }
    }

    pub fn from_id(id: &str) -> Option<Element> {
        Element::ALL.into_iter().find(|e| e.id() == id)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Page areas that loaders re-render as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Profile,
    Stats,
    Appointments,
    DonationHistory,
    BloodStock,
    Requests,
    BloodUnits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub greeting: String,
    pub blood_type: String,
    pub total_donations: String,
}

/// One table row. `key` is the backend id that row actions (delete, status
/// change) refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: Option<String>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Values of one column, by header name.
    pub fn column(&self, header: &str) -> Vec<&str> {
        let Some(idx) = self.headers.iter().position(|h| *h == header) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(idx).map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Profile(ProfileCard),
    Stats(Vec<(String, String)>),
    Table(Table),
}

/// Submitted form values keyed by field name. Blank values read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// First present value among several spellings of the same field.
    pub fn get_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|n| self.get(n))
    }

    pub fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Value or empty string.
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn text_any(&self, names: &[&str]) -> String {
        self.get_any(names).unwrap_or_default().to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

pub trait View: Send + Sync {
    fn has_element(&self, element: Element) -> bool;
    fn render(&self, region: Region, content: Content);
    fn set_loading(&self, on: bool);
    fn show_notification(&self, notification: &Notification);
    fn dismiss_notification(&self, id: Uuid);
    /// Blocking alert.
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    fn reset_form(&self, form: Element);
    fn show_modal(&self, modal: &Modal);
    fn close_modal(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_round_trip() {
        for e in Element::ALL {
            assert_eq!(Element::from_id(e.id()), Some(e));
        }
        assert_eq!(Element::from_id("nope"), None);
    }

    #[test]
    fn blank_form_values_are_absent() {
        let f: FormData = [("units", " 3 "), ("urgency", "  ")].into_iter().collect();
        assert_eq!(f.get("units"), Some("3"));
        assert_eq!(f.get("urgency"), None);
        assert_eq!(f.text("missing"), "");
        assert_eq!(f.get_any(&["bloodType", "units"]), Some("3"));
    }

    #[test]
    fn table_column_lookup() {
        let t = Table {
            headers: vec!["Blood Type", "Units"],
            rows: vec![Row { key: None, cells: vec!["O+".into(), "4".into()] }],
        };
        assert_eq!(t.column("Units"), vec!["4"]);
        assert!(t.column("Location").is_empty());
    }
}

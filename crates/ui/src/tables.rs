//! Builders turning facade results into view content.

use models::admin::{BloodUnit, DashboardStats};
use models::donor::{Appointment, Donation, UserProfile};
use models::hospital::{BloodRequest, BloodStockItem};

use crate::format::{format_date, format_opt_date};
use crate::view::{Content, ProfileCard, Row, Table};

pub fn profile_card(p: &UserProfile) -> Content {
    Content::Profile(ProfileCard {
        greeting: format!("Welcome, {}", p.name),
        blood_type: p.blood_type.clone().unwrap_or_else(|| "-".into()),
        total_donations: p.total_donations.to_string(),
    })
}

pub fn stats(s: &DashboardStats) -> Content {
    Content::Stats(s.entries())
}

pub fn appointments(items: &[Appointment]) -> Content {
    let rows = items
        .iter()
        .map(|a| Row {
            key: a.id.clone(),
            cells: vec![format_date(&a.date), a.location.clone(), a.status.label().to_string()],
        })
        .collect();
    Content::Table(Table { headers: vec!["Date", "Location", "Status"], rows })
}

pub fn donations(items: &[Donation]) -> Content {
    let rows = items
        .iter()
        .map(|d| Row {
            key: d.id.clone(),
            cells: vec![
                format_date(&d.date),
                d.location.clone().unwrap_or_default(),
                d.units.map(|u| u.to_string()).unwrap_or_else(|| "1".into()),
            ],
        })
        .collect();
    Content::Table(Table { headers: vec!["Date", "Location", "Units"], rows })
}

pub fn blood_stock(items: &[BloodStockItem]) -> Content {
    let rows = items
        .iter()
        .map(|s| Row {
            key: s.id.clone(),
            cells: vec![s.blood_type.clone(), s.units.to_string(), s.location.clone()],
        })
        .collect();
    Content::Table(Table { headers: vec!["Blood Type", "Units", "Location"], rows })
}

pub fn requests(items: &[BloodRequest]) -> Content {
    let rows = items
        .iter()
        .map(|r| Row {
            key: r.id.clone(),
            cells: vec![
                r.hospital_name.clone(),
                r.blood_type.clone(),
                r.units.to_string(),
                r.urgency.clone(),
                r.status.clone(),
            ],
        })
        .collect();
    Content::Table(Table { headers: vec!["Hospital", "Blood Type", "Units", "Urgency", "Status"], rows })
}

/// Admin inventory; each row is keyed by the unit's `_id` for the delete action.
pub fn blood_units(items: &[BloodUnit]) -> Content {
    let rows = items
        .iter()
        .map(|u| Row {
            key: u.id.clone(),
            cells: vec![
                u.bag_id.clone(),
                u.blood_type.clone(),
                format_opt_date(u.collection_date.as_deref()),
                format_opt_date(u.expiry_date.as_deref()),
                u.location.clone(),
                u.status.clone(),
            ],
        })
        .collect();
    Content::Table(Table {
        headers: vec!["Bag ID", "Blood Type", "Collected", "Expires", "Location", "Status"],
        rows,
    })
}

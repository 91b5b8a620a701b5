use std::fmt;

use crate::session::Role;

/// Page identity, derived from the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    Login,
    Signup,
    DonorDashboard,
    HospitalDashboard,
    AdminPanel,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Index,
        Page::Login,
        Page::Signup,
        Page::DonorDashboard,
        Page::HospitalDashboard,
        Page::AdminPanel,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Login => "login.html",
            Page::Signup => "signup.html",
            Page::DonorDashboard => "donor-dashboard.html",
            Page::HospitalDashboard => "hospital-dashboard.html",
            Page::AdminPanel => "admin-panel.html",
        }
    }

    /// Resolve a path or URL such as `/app/admin-panel.html?x=1`.
    /// An empty last segment maps to the index page.
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let last = path.rsplit('/').next().unwrap_or_default();
        if last.is_empty() {
            return Some(Page::Index);
        }
        Page::ALL.into_iter().find(|p| p.file_name() == last)
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Page::DonorDashboard | Page::HospitalDashboard | Page::AdminPanel)
    }

    /// The role a dashboard belongs to, if any.
    pub fn role(self) -> Option<Role> {
        match self {
            Page::DonorDashboard => Some(Role::Donor),
            Page::HospitalDashboard => Some(Role::Hospital),
            Page::AdminPanel => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_last_segment() {
        assert_eq!(Page::from_path("/static/admin-panel.html"), Some(Page::AdminPanel));
        assert_eq!(Page::from_path("login.html?next=x#top"), Some(Page::Login));
        assert_eq!(Page::from_path("/"), Some(Page::Index));
        assert_eq!(Page::from_path("/about.html"), None);
    }

    #[test]
    fn only_dashboards_require_auth() {
        let gated: Vec<_> = Page::ALL.into_iter().filter(|p| p.requires_auth()).collect();
        assert_eq!(gated, vec![Page::DonorDashboard, Page::HospitalDashboard, Page::AdminPanel]);
        for p in gated {
            assert_eq!(p.role().map(|r| r.dashboard()), Some(p));
        }
    }
}

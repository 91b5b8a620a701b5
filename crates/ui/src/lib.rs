//! Page controller layer of the JeevanDhara client.
//!
//! Controllers map UI events to facade calls and facade results to view
//! updates. Rendering goes through the [`View`] trait; helpers cover
//! debounce, notifications, modals, dates and page lifecycle.

pub mod console;
pub mod controllers;
pub mod debounce;
pub mod format;
pub mod lifecycle;
pub mod modal;
pub mod notify;
pub mod tables;
pub mod view;

pub use controllers::{Action, Event, PageController, PageState, Shell, UiError};
pub use view::{Content, Element, FormData, Region, View};

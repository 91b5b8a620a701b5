use models::Page;

/// Full-page navigation. Implementations tear down the current page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, page: Page);
}

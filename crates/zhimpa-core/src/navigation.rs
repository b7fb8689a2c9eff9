//! Navigation seam.

use crate::page::Page;

/// Receives page navigations issued by the session gate.
///
/// Navigation is not followed immediately: the target is held until the
/// owner of the page lifecycle takes it and loads the next page.
pub trait Navigator: Send + Sync {
    /// Requests navigation to `target`.
    fn navigate(&self, target: Page);

    /// Takes the most recent navigation request not yet followed.
    fn take_pending(&self) -> Option<Page>;
}

/// Navigation collaborator of the hosting shell.
///
/// Both calls are fire-and-forget: the form never observes a result.
pub trait Navigator: Send + Sync {
    /// Route to `path`.
    fn navigate_to(&self, path: &str);

    /// Reload the data of the current route.
    fn refresh_current_route(&self);
}

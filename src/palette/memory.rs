/// Cross-session memory of the last meaningfully-visited command id per
/// logical group ("root", "themes", ...). Backed by the settings layer;
/// writes are best-effort and must never block or fail the interaction path,
/// so the API is infallible — implementations swallow and log persistence
/// errors, and a failed read is simply "no memory available".
#[cfg_attr(test, mockall::automock)]
pub trait SelectionStore: Send + Sync {
    fn last_visited(&self, group: &str) -> Option<String>;

    fn set_last_visited(&self, group: &str, id: &str);
}

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The external surface whose state the palette previews and commits.
/// For skiff this is the theme service; the palette only ever talks to it
/// through this trait.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewTarget: Send + Sync {
    /// Apply the target identified by `id` to the live view without touching
    /// persisted state.
    fn preview_only(&self, id: &str) -> Result<()>;

    /// Apply `id` and persist it as the new baseline.
    fn apply_and_persist(&self, id: &str) -> Result<()>;

    /// Re-apply whatever was last persisted, discarding any live preview.
    fn restore_last_persisted(&self) -> Result<()>;

    /// The id currently showing on the live view.
    fn current_id(&self) -> String;
}

/// Ticket handed to the runtime when a hover preview is scheduled. The
/// runtime sleeps for `delay` and then calls back with `generation`; the
/// controller decides at that point whether the ticket is still the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverPreview {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Open,
    Committed,
    RolledBack,
}

/// Coordinates preview application against a user-driven selection stream.
///
/// Every cancellation point (newer hover, immediate preview, commit,
/// rollback) bumps `generation`; a scheduled application is only honored if
/// its generation still equals the controller's. That check, not timer
/// cancellation, is what guarantees only-latest-wins even when a stale timer
/// fires after a newer one was scheduled.
pub struct PreviewController {
    target: Arc<dyn PreviewTarget>,
    original_id: String,
    outcome: SessionOutcome,
    generation: u64,
    pending: Option<(u64, String)>,
    previewed: bool,
    debounce: Duration,
}

impl PreviewController {
    /// Captures the target's current id as the rollback baseline.
    pub fn begin(target: Arc<dyn PreviewTarget>, debounce: Duration) -> Self {
        let original_id = target.current_id();
        Self {
            target,
            original_id,
            outcome: SessionOutcome::Open,
            generation: 0,
            pending: None,
            previewed: false,
            debounce,
        }
    }

    #[must_use]
    pub fn original_id(&self) -> &str {
        &self.original_id
    }

    #[must_use]
    pub fn outcome(&self) -> SessionOutcome {
        self.outcome
    }

    /// Apply a preview immediately (keyboard selection change). Cancels any
    /// pending hover preview first.
    pub fn preview_now(&mut self, id: &str) {
        if self.outcome != SessionOutcome::Open {
            return;
        }
        self.generation += 1;
        self.pending = None;
        self.apply(id);
    }

    /// Schedule a debounced preview (hover). A new hover replaces any
    /// outstanding one; the previous timer becomes stale the moment the
    /// generation advances.
    pub fn schedule_hover(&mut self, id: &str) -> Option<HoverPreview> {
        if self.outcome != SessionOutcome::Open {
            return None;
        }
        self.generation += 1;
        self.pending = Some((self.generation, id.to_string()));
        Some(HoverPreview {
            generation: self.generation,
            delay: self.debounce,
        })
    }

    /// Called by the runtime when a hover timer fires. Applies the pending
    /// preview only if `generation` is still the latest.
    pub fn hover_elapsed(&mut self, generation: u64) {
        if self.outcome != SessionOutcome::Open {
            return;
        }
        let Some((pending_gen, id)) = self.pending.clone() else {
            return;
        };
        if pending_gen != generation || generation != self.generation {
            debug!(generation, current = self.generation, "stale hover preview ignored");
            return;
        }
        self.pending = None;
        self.apply(&id);
    }

    /// Finalize the session. Any pending preview is cancelled; rollback is
    /// disabled from here on.
    pub fn commit(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.outcome = SessionOutcome::Committed;
    }

    /// Restore the pre-session state, once, and only if the session was
    /// never committed. Calling this again is a no-op.
    pub fn rollback(&mut self) {
        if self.outcome != SessionOutcome::Open {
            return;
        }
        self.generation += 1;
        self.pending = None;
        self.outcome = SessionOutcome::RolledBack;
        if !self.previewed {
            return;
        }
        if let Err(err) = self.target.restore_last_persisted() {
            warn!(error = %err, "failed to restore pre-palette state");
        }
    }

    /// Drop any scheduled hover preview without ending the session.
    pub fn cancel_pending(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn apply(&mut self, id: &str) {
        if self.target.current_id() == id {
            return;
        }
        match self.target.preview_only(id) {
            Ok(()) => self.previewed = true,
            // A failed preview leaves the target at its last-known-good
            // state and never surfaces into the selection flow.
            Err(err) => warn!(id, error = %err, "preview failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use mockall::predicate::eq;

    fn target_showing(id: &str) -> MockPreviewTarget {
        let mut mock = MockPreviewTarget::new();
        mock.expect_current_id().return_const(id.to_string());
        mock
    }

    #[test]
    fn only_latest_hover_applies() {
        let mut mock = target_showing("light");
        mock.expect_preview_only()
            .with(eq("ocean"))
            .times(1)
            .returning(|_| Ok(()));

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        let first = ctl.schedule_hover("dark").unwrap();
        let second = ctl.schedule_hover("nord").unwrap();
        let third = ctl.schedule_hover("ocean").unwrap();
        assert!(first.generation < second.generation && second.generation < third.generation);

        // Stale timers fire in order; only the last one may apply.
        ctl.hover_elapsed(first.generation);
        ctl.hover_elapsed(second.generation);
        ctl.hover_elapsed(third.generation);
        // A duplicate firing of the winning generation is also inert.
        ctl.hover_elapsed(third.generation);
    }

    #[test]
    fn commit_cancels_pending_hover() {
        let mut mock = target_showing("light");
        mock.expect_preview_only().times(0);

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        let ticket = ctl.schedule_hover("dark").unwrap();
        ctl.commit();
        ctl.hover_elapsed(ticket.generation);
        assert_eq!(ctl.outcome(), SessionOutcome::Committed);
    }

    #[test]
    fn rollback_runs_once_and_only_after_a_preview() {
        let mut mock = target_showing("light");
        mock.expect_preview_only().returning(|_| Ok(()));
        mock.expect_restore_last_persisted()
            .times(1)
            .returning(|| Ok(()));

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        ctl.preview_now("dark");
        ctl.rollback();
        ctl.rollback();
    }

    #[test]
    fn rollback_without_preview_makes_no_external_call() {
        let mut mock = target_showing("light");
        mock.expect_restore_last_persisted().times(0);

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        ctl.rollback();
        assert_eq!(ctl.outcome(), SessionOutcome::RolledBack);
    }

    #[test]
    fn rollback_after_commit_is_refused() {
        let mut mock = target_showing("light");
        mock.expect_preview_only().returning(|_| Ok(()));
        mock.expect_restore_last_persisted().times(0);

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        ctl.preview_now("dark");
        ctl.commit();
        ctl.rollback();
        assert_eq!(ctl.outcome(), SessionOutcome::Committed);
    }

    #[test]
    fn preview_matching_live_state_is_skipped() {
        let mut mock = target_showing("light");
        mock.expect_preview_only().times(0);

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        ctl.preview_now("light");
    }

    #[test]
    fn failed_preview_is_contained_and_does_not_mark_previewed() {
        let mut mock = target_showing("light");
        mock.expect_preview_only()
            .with(eq("dark"))
            .times(1)
            .returning(|_| Err(anyhow!("theme resources unavailable")));
        // Nothing was ever applied, so rollback has nothing to restore.
        mock.expect_restore_last_persisted().times(0);

        let mut ctl = PreviewController::begin(Arc::new(mock), Duration::from_millis(50));
        ctl.preview_now("dark");
        ctl.rollback();
    }
}

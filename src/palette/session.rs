use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::filter;
use super::memory::SelectionStore;
use super::navigator::NavContext;
use super::preview::{HoverPreview, PreviewController, PreviewTarget, SessionOutcome};
use super::registry::CommandRegistry;
use super::{PaletteAction, PaletteCommand};
use crate::app::action::Action;

/// Result of confirming the current selection.
#[derive(Debug, Clone)]
pub enum Confirmed {
    /// The session committed; the host should close the palette and run the
    /// returned action through the reducer.
    Dispatched(Action),
    /// The selection opened a submenu; the palette stays open and no commit
    /// or rollback bookkeeping was touched.
    SubmenuOpened,
    NoSelection,
}

/// One palette-open worth of state: the registry, the navigation context,
/// the derived visible list and selection, and the preview session. Created
/// when the palette opens, dropped when it closes; nothing here survives
/// across opens except what the selection store persists externally.
pub struct PaletteSession {
    registry: CommandRegistry,
    nav: NavContext,
    query: String,
    /// Indices into the active command source (registry or submenu).
    visible: Vec<usize>,
    /// Index into `visible`; `None` only when `visible` is empty.
    selected: Option<usize>,
    controller: PreviewController,
    memory: Arc<dyn SelectionStore>,
    last_recorded: Option<String>,
}

impl PaletteSession {
    pub fn open(
        target: Arc<dyn PreviewTarget>,
        memory: Arc<dyn SelectionStore>,
        initial: Vec<PaletteCommand>,
        hover_debounce: Duration,
    ) -> Self {
        let mut registry = CommandRegistry::default();
        registry.register_batch(initial);
        let mut session = Self {
            registry,
            nav: NavContext::Root,
            query: String::new(),
            visible: Vec::new(),
            selected: None,
            controller: PreviewController::begin(target, hover_debounce),
            memory,
            last_recorded: None,
        };
        session.refilter_with(None);
        session
    }

    // --- registry passthroughs ---

    pub fn register(&mut self, command: PaletteCommand) {
        self.registry.register(command);
        if self.nav.is_root() {
            self.refilter();
        }
    }

    /// Registers many commands with a single re-filter, so a partial batch
    /// never becomes briefly visible with a wrong default selection.
    pub fn register_batch(&mut self, commands: Vec<PaletteCommand>) {
        self.registry.register_batch(commands);
        if self.nav.is_root() {
            self.refilter();
        }
    }

    pub fn clear(&mut self) {
        self.registry.clear();
        if self.nav.is_root() {
            self.refilter();
        }
    }

    // --- queries and selection ---

    pub fn set_query(&mut self, query: String) {
        if query != self.query {
            self.query = query;
            self.refilter();
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let prev = self.selected_source_index();
        let len = self.visible.len() as isize;
        let current = self.selected.unwrap_or(0) as isize;
        self.selected = Some((current + delta).rem_euclid(len) as usize);
        self.after_selection_change(prev);
    }

    pub fn select_index(&mut self, pos: usize) {
        if pos >= self.visible.len() {
            return;
        }
        let prev = self.selected_source_index();
        self.selected = Some(pos);
        self.after_selection_change(prev);
    }

    // --- submenu navigation ---

    pub fn enter_submenu(&mut self, title: String, commands: Vec<PaletteCommand>) {
        if !self.nav.is_root() {
            debug!(title = %title, "submenu entry ignored: a submenu is already active");
            return;
        }
        let saved_selection = self.selected_source_index();
        self.nav = NavContext::Submenu {
            title,
            commands,
            saved_selection,
        };
        self.last_recorded = None;
        self.refilter_with(None);
    }

    pub fn exit_submenu(&mut self) {
        let saved = match &self.nav {
            NavContext::Root => return,
            NavContext::Submenu {
                saved_selection, ..
            } => *saved_selection,
        };
        self.nav = NavContext::Root;
        self.last_recorded = None;
        self.visible = filter::filter_indices(self.source(), &self.query);
        // Prefer the selection that was active when the submenu was entered;
        // fall back to the standard precedence when it filtered away.
        let restored = saved.and_then(|src| self.visible.iter().position(|&v| v == src));
        self.selected = match restored {
            Some(pos) => Some(pos),
            None => self.default_selection(),
        };
        self.after_selection_change(None);
    }

    // --- preview triggers ---

    /// Hover moves no selection; it only schedules a debounced preview for
    /// previewable rows. Hovering an inert row leaves any pending preview
    /// untouched.
    pub fn on_hover(&mut self, pos: usize) -> Option<HoverPreview> {
        let idx = *self.visible.get(pos)?;
        let id = self.source()[idx].id.clone()?;
        self.controller.schedule_hover(&id)
    }

    pub fn hover_elapsed(&mut self, generation: u64) {
        self.controller.hover_elapsed(generation);
    }

    // --- commit / rollback ---

    pub fn confirm(&mut self) -> Confirmed {
        self.controller.cancel_pending();
        let Some(cmd) = self.selected_command() else {
            return Confirmed::NoSelection;
        };
        match cmd.action.clone() {
            PaletteAction::Submenu { title, commands } => {
                self.enter_submenu(title, commands);
                Confirmed::SubmenuOpened
            }
            PaletteAction::App(action) => {
                self.controller.commit();
                Confirmed::Dispatched(action)
            }
        }
    }

    /// Close without committing. Idempotent; a committed session is left
    /// alone.
    pub fn cancel(&mut self) {
        self.controller.rollback();
    }

    // --- accessors ---

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn in_submenu(&self) -> bool {
        !self.nav.is_root()
    }

    #[must_use]
    pub fn context_title(&self) -> Option<&str> {
        self.nav.title()
    }

    #[must_use]
    pub fn visible_commands(&self) -> Vec<&PaletteCommand> {
        let source = self.source();
        self.visible.iter().map(|&i| &source[i]).collect()
    }

    #[must_use]
    pub fn selected_pos(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_command(&self) -> Option<&PaletteCommand> {
        let source = self.source();
        self.selected_source_index().map(|i| &source[i])
    }

    #[must_use]
    pub fn outcome(&self) -> SessionOutcome {
        self.controller.outcome()
    }

    // --- internals ---

    fn source(&self) -> &[PaletteCommand] {
        match &self.nav {
            NavContext::Root => self.registry.commands(),
            NavContext::Submenu { commands, .. } => commands,
        }
    }

    fn selected_source_index(&self) -> Option<usize> {
        self.selected.map(|pos| self.visible[pos])
    }

    fn default_selection(&self) -> Option<usize> {
        let group = self.nav.group_key();
        let last = self.memory.last_visited(&group);
        filter::choose_selection(
            self.source(),
            &self.visible,
            last.as_deref(),
            Some(self.controller.original_id()),
        )
    }

    fn refilter(&mut self) {
        let prev = self.selected_source_index();
        self.refilter_with(prev);
    }

    fn refilter_with(&mut self, prev: Option<usize>) {
        self.visible = filter::filter_indices(self.source(), &self.query);
        self.selected = self.default_selection();
        self.after_selection_change(prev);
    }

    /// Runs whenever the selection may have moved: records id-bearing
    /// selections into the selection memory and applies an immediate
    /// preview. `prev` is the previously selected source index within the
    /// same context, or `None` when the context itself changed.
    fn after_selection_change(&mut self, prev: Option<usize>) {
        if self.selected_source_index() == prev {
            return;
        }
        let Some(id) = self.selected_command().and_then(|c| c.id.clone()) else {
            return;
        };
        if self.last_recorded.as_deref() != Some(id.as_str()) {
            let group = self.nav.group_key();
            self.memory.set_last_visited(&group, &id);
            self.last_recorded = Some(id.clone());
        }
        self.controller.preview_now(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::memory::MockSelectionStore;
    use crate::palette::preview::MockPreviewTarget;
    use mockall::predicate::eq;

    const DEBOUNCE: Duration = Duration::from_millis(50);

    fn theme_commands() -> Vec<PaletteCommand> {
        vec![
            PaletteCommand::previewable("Light", "Theme", "light", Action::Quit),
            PaletteCommand::previewable("Dark", "Theme", "dark", Action::ToggleHelp),
            PaletteCommand::new("Open Site Manager", "Sites", Action::NewSiteIntent),
        ]
    }

    fn quiet_target(current: &str) -> MockPreviewTarget {
        let mut mock = MockPreviewTarget::new();
        mock.expect_current_id().return_const(current.to_string());
        mock
    }

    fn quiet_memory() -> MockSelectionStore {
        let mut mock = MockSelectionStore::new();
        mock.expect_last_visited().returning(|_| None);
        mock.expect_set_last_visited().returning(|_, _| ());
        mock
    }

    fn open(target: MockPreviewTarget, memory: MockSelectionStore) -> PaletteSession {
        PaletteSession::open(
            Arc::new(target),
            Arc::new(memory),
            theme_commands(),
            DEBOUNCE,
        )
    }

    #[test]
    fn open_selects_the_currently_active_target() {
        let session = open(quiet_target("light"), quiet_memory());
        assert_eq!(session.selected_command().unwrap().name, "Light");
    }

    #[test]
    fn last_visited_outranks_the_active_target() {
        let mut memory = MockSelectionStore::new();
        memory
            .expect_last_visited()
            .with(eq("root"))
            .returning(|_| Some("dark".to_string()));
        memory.expect_set_last_visited().returning(|_, _| ());

        let mut target = quiet_target("light");
        target
            .expect_preview_only()
            .with(eq("dark"))
            .returning(|_| Ok(()));

        let session = open(target, memory);
        assert_eq!(session.selected_command().unwrap().name, "Dark");
    }

    #[test]
    fn query_filters_and_previews_the_new_selection() {
        let mut target = quiet_target("light");
        target
            .expect_preview_only()
            .with(eq("dark"))
            .times(1)
            .returning(|_| Ok(()));

        let mut memory = MockSelectionStore::new();
        memory.expect_last_visited().returning(|_| None);
        memory
            .expect_set_last_visited()
            .with(eq("root"), eq("light"))
            .times(1)
            .returning(|_, _| ());
        memory
            .expect_set_last_visited()
            .with(eq("root"), eq("dark"))
            .times(1)
            .returning(|_, _| ());

        let mut session = open(target, memory);
        session.set_query("dark".to_string());
        let names: Vec<_> = session
            .visible_commands()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, ["Dark"]);
        assert_eq!(session.selected_pos(), Some(0));
    }

    #[test]
    fn no_matches_leaves_nothing_selected() {
        let mut session = open(quiet_target("light"), quiet_memory());
        session.set_query("zzz".to_string());
        assert!(session.visible_commands().is_empty());
        assert!(session.selected_command().is_none());
    }

    #[test]
    fn register_batch_refilters_once() {
        let mut memory = MockSelectionStore::new();
        // One lookup at open, exactly one more for the whole batch.
        memory.expect_last_visited().times(2).returning(|_| None);
        memory.expect_set_last_visited().returning(|_, _| ());

        let mut session = PaletteSession::open(
            Arc::new(quiet_target("light")),
            Arc::new(memory),
            Vec::new(),
            DEBOUNCE,
        );
        session.register_batch(theme_commands());
        assert_eq!(session.visible_commands().len(), 3);
    }

    #[test]
    fn submenu_round_trip_restores_root_list_and_selection() {
        let mut target = quiet_target("light");
        target.expect_preview_only().returning(|_| Ok(()));

        let root = vec![
            PaletteCommand::submenu("Themes...", "Theme", "Themes", theme_commands()),
            PaletteCommand::new("New Site", "Sites", Action::NewSiteIntent),
            PaletteCommand::new("Quit", "App", Action::Quit),
        ];
        let mut session =
            PaletteSession::open(Arc::new(target), Arc::new(quiet_memory()), root, DEBOUNCE);

        session.move_selection(2);
        assert_eq!(session.selected_command().unwrap().name, "Quit");

        session.enter_submenu("Themes".to_string(), theme_commands());
        assert!(session.in_submenu());
        assert_eq!(session.context_title(), Some("Themes"));
        assert_eq!(session.visible_commands().len(), 3);

        session.exit_submenu();
        assert!(!session.in_submenu());
        let names: Vec<_> = session
            .visible_commands()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, ["Themes...", "New Site", "Quit"]);
        assert_eq!(session.selected_command().unwrap().name, "Quit");
    }

    #[test]
    fn nested_submenu_entry_is_ignored_and_exit_at_root_is_a_noop() {
        let mut target = quiet_target("light");
        target.expect_preview_only().returning(|_| Ok(()));
        let mut session = open(target, quiet_memory());

        session.exit_submenu();
        assert!(!session.in_submenu());

        session.enter_submenu("Themes".to_string(), theme_commands());
        session.enter_submenu("Other".to_string(), Vec::new());
        assert_eq!(session.context_title(), Some("Themes"));
    }

    #[test]
    fn query_applies_inside_a_submenu() {
        let mut target = quiet_target("light");
        target.expect_preview_only().returning(|_| Ok(()));
        let mut session = open(target, quiet_memory());

        session.set_query("dar".to_string());
        session.enter_submenu("Themes".to_string(), theme_commands());
        let names: Vec<_> = session
            .visible_commands()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, ["Dark"]);
        assert_eq!(session.query(), "dar");
    }

    #[test]
    fn hover_over_inert_row_leaves_pending_preview_untouched() {
        let mut target = quiet_target("light");
        target
            .expect_preview_only()
            .with(eq("dark"))
            .times(1)
            .returning(|_| Ok(()));

        let mut session = open(target, quiet_memory());
        let ticket = session.on_hover(1).unwrap();
        // "Open Site Manager" has no id: no ticket, no cancellation.
        assert!(session.on_hover(2).is_none());
        session.hover_elapsed(ticket.generation);
    }

    #[test]
    fn confirm_commits_and_returns_the_action() {
        let mut target = quiet_target("light");
        target.expect_preview_only().returning(|_| Ok(()));

        let mut session = open(target, quiet_memory());
        session.move_selection(1);
        match session.confirm() {
            Confirmed::Dispatched(Action::ToggleHelp) => {}
            other => panic!("expected the Dark command's action, got {other:?}"),
        }
        assert_eq!(session.outcome(), SessionOutcome::Committed);
    }

    #[test]
    fn confirming_a_submenu_command_keeps_the_session_open() {
        let root = vec![PaletteCommand::submenu(
            "Themes...",
            "Theme",
            "Themes",
            theme_commands(),
        )];
        let mut target = quiet_target("light");
        target.expect_preview_only().returning(|_| Ok(()));
        let mut session =
            PaletteSession::open(Arc::new(target), Arc::new(quiet_memory()), root, DEBOUNCE);

        match session.confirm() {
            Confirmed::SubmenuOpened => {}
            other => panic!("expected submenu, got {other:?}"),
        }
        assert_eq!(session.outcome(), SessionOutcome::Open);
        assert!(session.in_submenu());

        // A later cancel still rolls back normally.
        session.cancel();
        assert_eq!(session.outcome(), SessionOutcome::RolledBack);
    }

    #[test]
    fn end_to_end_hover_then_escape() {
        let mut target = MockPreviewTarget::new();
        target.expect_current_id().return_const("light".to_string());
        target
            .expect_preview_only()
            .with(eq("dark"))
            .times(1)
            .returning(|_| Ok(()));
        target
            .expect_restore_last_persisted()
            .times(1)
            .returning(|| Ok(()));

        let mut session = open(target, quiet_memory());
        assert_eq!(session.selected_command().unwrap().name, "Light");

        let ticket = session.on_hover(1).unwrap();
        session.hover_elapsed(ticket.generation);

        session.cancel();
        session.cancel();
        assert_eq!(session.outcome(), SessionOutcome::RolledBack);
    }

    #[test]
    fn confirm_cancels_a_pending_hover_preview() {
        let mut target = quiet_target("light");
        // Only the committed action matters; the hovered preview never lands.
        target.expect_preview_only().times(0);

        let mut session = open(target, quiet_memory());
        let ticket = session.on_hover(1).unwrap();
        // Selection is still "Light", whose preview is skipped as current.
        match session.confirm() {
            Confirmed::Dispatched(Action::Quit) => {}
            other => panic!("expected Light's action, got {other:?}"),
        }
        session.hover_elapsed(ticket.generation);
    }
}

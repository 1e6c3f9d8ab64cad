//! The interactive command palette: a searchable, hierarchical action picker
//! that applies live previews (e.g. theme switches) as the user navigates and
//! rolls them back if the palette is dismissed without confirming.
//!
//! The palette owns no timers and spawns no tasks. Debounced hover previews
//! are scheduled by returning a [`preview::HoverPreview`] ticket to the
//! runtime, which arranges for `hover_elapsed` to be called back with the
//! ticket's generation. Stale generations are ignored at apply time, so a
//! timer that fires after a newer request can never clobber it.

pub mod filter;
pub mod memory;
pub mod navigator;
pub mod preview;
pub mod registry;
pub mod session;

pub use memory::SelectionStore;
pub use preview::{HoverPreview, PreviewTarget};
pub use registry::CommandRegistry;
pub use session::{Confirmed, PaletteSession};

use crate::app::action::Action;

/// One invocable entry in the palette.
///
/// `id` is present only for commands that stand for a previewable target
/// (e.g. a theme); the id is what gets handed to the preview target and the
/// selection memory. Commands are immutable once registered.
#[derive(Debug, Clone)]
pub struct PaletteCommand {
    pub name: String,
    pub category: String,
    pub id: Option<String>,
    pub action: PaletteAction,
}

#[derive(Debug, Clone)]
pub enum PaletteAction {
    /// Dispatched through the reducer when the command is confirmed.
    App(Action),
    /// Drill into a named group of commands; keeps the palette open.
    Submenu {
        title: String,
        commands: Vec<PaletteCommand>,
    },
}

impl PaletteCommand {
    pub fn new(name: impl Into<String>, category: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            id: None,
            action: PaletteAction::App(action),
        }
    }

    /// A leaf command whose effect can be shown live before committing.
    pub fn previewable(
        name: impl Into<String>,
        category: impl Into<String>,
        id: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            id: Some(id.into()),
            action: PaletteAction::App(action),
        }
    }

    pub fn submenu(
        name: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        commands: Vec<PaletteCommand>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            id: None,
            action: PaletteAction::Submenu {
                title: title.into(),
                commands,
            },
        }
    }
}

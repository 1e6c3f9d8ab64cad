use super::PaletteCommand;

/// Where the palette is looking: the root registry or a single drilled-into
/// group. Submenus do not nest; entering one from inside another is ignored
/// by the session. `saved_selection` holds the root source index that was
/// selected when the submenu was entered, so exiting restores it exactly.
pub enum NavContext {
    Root,
    Submenu {
        title: String,
        commands: Vec<PaletteCommand>,
        saved_selection: Option<usize>,
    },
}

impl NavContext {
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, NavContext::Root)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            NavContext::Root => None,
            NavContext::Submenu { title, .. } => Some(title),
        }
    }

    /// Key under which selection memory is recorded for this context.
    #[must_use]
    pub fn group_key(&self) -> String {
        match self {
            NavContext::Root => "root".to_string(),
            NavContext::Submenu { title, .. } => title.to_lowercase(),
        }
    }
}

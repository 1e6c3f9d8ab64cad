use super::PaletteCommand;

/// Insertion-ordered set of commands available at the palette root.
///
/// Duplicate names are legal; lookups by id resolve to the first match in
/// registration order. The registry stores, it does not filter — deriving
/// the visible subset is the session's job.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<PaletteCommand>,
}

impl CommandRegistry {
    pub fn register(&mut self, command: PaletteCommand) {
        self.commands.push(command);
    }

    /// Appends many commands at once so callers can re-filter a single time
    /// instead of once per item.
    pub fn register_batch(&mut self, commands: impl IntoIterator<Item = PaletteCommand>) {
        self.commands.extend(commands);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn commands(&self) -> &[PaletteCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;

    #[test]
    fn preserves_registration_order() {
        let mut reg = CommandRegistry::default();
        reg.register(PaletteCommand::new("b", "x", Action::Quit));
        reg.register_batch(vec![
            PaletteCommand::new("a", "x", Action::Quit),
            PaletteCommand::new("c", "x", Action::Quit),
        ]);
        let names: Vec<_> = reg.commands().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn duplicate_names_are_permitted() {
        let mut reg = CommandRegistry::default();
        reg.register(PaletteCommand::new("dup", "x", Action::Quit));
        reg.register(PaletteCommand::new("dup", "y", Action::Quit));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut reg = CommandRegistry::default();
        reg.register(PaletteCommand::new("a", "x", Action::Quit));
        reg.clear();
        assert!(reg.is_empty());
    }
}

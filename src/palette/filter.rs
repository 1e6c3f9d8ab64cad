use super::PaletteCommand;

/// Stable substring filter: a command is visible when the lowercased query is
/// contained in its lowercased name or category. The empty query matches
/// everything. Returned indices point into `commands` and preserve its order.
#[must_use]
pub fn filter_indices(commands: &[PaletteCommand], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..commands.len()).collect();
    }

    commands
        .iter()
        .enumerate()
        .filter(|(_, cmd)| {
            cmd.name.to_lowercase().contains(&query)
                || cmd.category.to_lowercase().contains(&query)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Default-selection policy, applied after every recomputation of the
/// visible list. First match wins:
///   1. the command whose id equals the last-visited id for this context,
///   2. the command whose id equals the currently active target id,
///   3. the first visible command,
///   4. nothing, when the list is empty.
///
/// Returns an index into `visible`.
#[must_use]
pub fn choose_selection(
    commands: &[PaletteCommand],
    visible: &[usize],
    last_visited: Option<&str>,
    active_id: Option<&str>,
) -> Option<usize> {
    for want in [last_visited, active_id].into_iter().flatten() {
        if let Some(pos) = visible
            .iter()
            .position(|&i| commands[i].id.as_deref() == Some(want))
        {
            return Some(pos);
        }
    }

    if visible.is_empty() {
        None
    } else {
        Some(0)
    }
}

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use skiff::app::{r#loop::run_loop, state::AppState};
use skiff::infrastructure;
use skiff::infrastructure::paths::AppPaths;
use skiff::infrastructure::settings::{
    SettingsSaver, SettingsSelectionStore, SettingsStore, SharedSettings,
};
use skiff::infrastructure::sites::{SiteStore, TomlSiteStore};
use skiff::palette::SelectionStore;
use skiff::theme::ThemeService;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    // Filesystem and logging come up BEFORE the terminal switches to raw
    // mode, so a failed bootstrap still prints a readable error.
    let paths = AppPaths::new()?;
    if let Err(err) = infrastructure::logging::init(&paths) {
        eprintln!("warning: file logging disabled: {err}");
    }
    setup_panic_hook();

    let settings_store = Arc::new(SettingsStore::new(&paths));
    let mut settings = settings_store.load();
    settings.last_run_utc = Utc::now();
    let shared: SharedSettings = Arc::new(Mutex::new(settings));

    let saver = SettingsSaver::spawn(settings_store.clone(), shared.clone());
    saver.request_save(); // persist the run stamp

    let theme_service = Arc::new(ThemeService::new(shared.clone(), saver.clone()));
    let selection_store: Arc<dyn SelectionStore> =
        Arc::new(SettingsSelectionStore::new(shared.clone(), saver));
    let store: Arc<dyn SiteStore> = Arc::new(TomlSiteStore::new(paths.sites_path()));

    let app_state = AppState::new(shared, theme_service, selection_store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

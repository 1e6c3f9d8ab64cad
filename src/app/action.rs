use crate::app::command::Command;
use crate::domain::models::SiteProfile;
use crate::theme::ThemeId;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,
    CancelMode, // ESC key (close modal/mode)
    ToggleHelp,

    // --- Site list & form ---
    SelectNextSite,
    SelectPrevSite,
    SelectSiteIndex(usize),
    NewSiteIntent,    // open an empty site form
    EditSiteIntent,   // open the form for the selected site
    DeleteSiteIntent, // delete the selected site
    SubmitSiteForm,
    FormNextField,
    FormPrevField,
    FormCycleProtocol,
    RefreshSites,
    TextAreaInput(crossterm::event::KeyEvent),

    // --- Command palette ---
    OpenPalette,
    PaletteNext,
    PalettePrev,
    PaletteConfirm,
    PaletteCancel,
    PaletteExitSubmenu,
    PaletteHover(usize),
    PaletteClick(usize),
    /// A hover debounce timer fired; carries the generation it was armed with.
    PaletteHoverElapsed(u64),

    // --- Themes ---
    ApplyTheme(ThemeId),

    // --- Async Results ---
    // Dispatched by async workers back to the main loop
    SitesLoaded(Vec<SiteProfile>),
    OperationStarted(String),
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
    ExternalChangeDetected, // sites.toml changed on disk
}

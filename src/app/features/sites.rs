use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, FormField, SiteFormState},
};
use crate::infrastructure::sites::SiteStore;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SelectNextSite => {
            move_selection(state, 1);
            UpdateResult::Handled(None)
        }
        Action::SelectPrevSite => {
            move_selection(state, -1);
            UpdateResult::Handled(None)
        }
        Action::SelectSiteIndex(idx) => {
            if *idx < state.sites.len() {
                state.selected = Some(*idx);
            }
            UpdateResult::Handled(None)
        }
        Action::NewSiteIntent => {
            state.form = Some(SiteFormState::new());
            state.mode = AppMode::SiteForm;
            UpdateResult::Handled(None)
        }
        Action::EditSiteIntent => {
            if let Some(site) = state.selected_site() {
                state.form = Some(SiteFormState::from_site(site));
                state.mode = AppMode::SiteForm;
            }
            UpdateResult::Handled(None)
        }
        Action::DeleteSiteIntent => {
            if let Some(site) = state.selected_site() {
                let id = site.id.clone();
                return UpdateResult::Handled(Some(Command::DeleteSite(id)));
            }
            UpdateResult::Handled(None)
        }
        Action::SubmitSiteForm => {
            let Some(form) = state.form.as_ref() else {
                return UpdateResult::Handled(None);
            };
            match form.to_profile() {
                Ok(profile) => {
                    state.form = None;
                    state.mode = AppMode::Normal;
                    state.last_error = None;
                    UpdateResult::Handled(Some(Command::SaveSite(profile)))
                }
                Err(message) => {
                    state.last_error = Some(message);
                    UpdateResult::Handled(None)
                }
            }
        }
        Action::FormNextField => {
            if let Some(form) = state.form.as_mut() {
                form.focus_next();
            }
            UpdateResult::Handled(None)
        }
        Action::FormPrevField => {
            if let Some(form) = state.form.as_mut() {
                form.focus_prev();
            }
            UpdateResult::Handled(None)
        }
        Action::FormCycleProtocol => {
            if let Some(form) = state.form.as_mut() {
                if form.focused == FormField::Protocol {
                    form.cycle_protocol();
                }
            }
            UpdateResult::Handled(None)
        }
        Action::TextAreaInput(key) if state.mode == AppMode::SiteForm => {
            if let Some(form) = state.form.as_mut() {
                form.input(*key);
            }
            UpdateResult::Handled(None)
        }
        Action::RefreshSites => UpdateResult::Handled(Some(Command::LoadSites)),
        Action::SitesLoaded(sites) => {
            state.sites = sites.clone();
            state.is_loading = false;
            state.selected = if state.sites.is_empty() {
                None
            } else {
                Some(
                    state
                        .selected
                        .unwrap_or(0)
                        .min(state.sites.len() - 1),
                )
            };
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn move_selection(state: &mut AppState, delta: isize) {
    if state.sites.is_empty() {
        state.selected = None;
        return;
    }
    let len = state.sites.len() as isize;
    let current = state.selected.unwrap_or(0) as isize;
    state.selected = Some((current + delta).rem_euclid(len) as usize);
}

pub fn handle_command(
    command: Command,
    store: Arc<dyn SiteStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::LoadSites => {
            tokio::spawn(async move {
                match store.load_sites().await {
                    Ok(sites) => {
                        let _ = tx.send(Action::SitesLoaded(sites)).await;
                    }
                    Err(err) => {
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to load sites: {err}")))
                            .await;
                    }
                }
            });
        }
        Command::SaveSite(profile) => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted(format!("Saving {}...", profile.name)))
                    .await;
                match store.save_site(&profile).await {
                    Ok(()) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok(format!(
                                "Saved {}",
                                profile.name
                            ))))
                            .await;
                        refresh(&store, &tx).await;
                    }
                    Err(err) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {err}"))))
                            .await;
                    }
                }
            });
        }
        Command::DeleteSite(id) => {
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted("Deleting site...".to_string()))
                    .await;
                match store.delete_site(&id).await {
                    Ok(()) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Ok("Site deleted".to_string())))
                            .await;
                        refresh(&store, &tx).await;
                    }
                    Err(err) => {
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {err}"))))
                            .await;
                    }
                }
            });
        }
        // Owned by the runtime loop, never reaches this handler.
        Command::SchedulePreview { .. } => {}
    }
    Ok(())
}

async fn refresh(store: &Arc<dyn SiteStore>, tx: &mpsc::Sender<Action>) {
    match store.load_sites().await {
        Ok(sites) => {
            let _ = tx.send(Action::SitesLoaded(sites)).await;
        }
        Err(err) => {
            let _ = tx
                .send(Action::ErrorOccurred(format!("Failed to reload sites: {err}")))
                .await;
        }
    }
}

use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::state::test_support::state_with_tempdir;
use crate::domain::models::{Protocol, SiteProfile};
use crate::infrastructure::sites::MockSiteStore;
use crate::theme::ThemeId;
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn sample_site(id: &str, name: &str) -> SiteProfile {
    let now = Utc::now();
    SiteProfile {
        id: id.to_string(),
        name: name.to_string(),
        protocol: Protocol::Sftp,
        host: "example.com".to_string(),
        port: 22,
        username: "deploy".to_string(),
        default_remote_path: "/srv".to_string(),
        default_local_path: String::new(),
        created_utc: now,
        updated_utc: now,
    }
}

#[tokio::test]
async fn test_handle_command_error_propagation() {
    let mut mock = MockSiteStore::new();
    mock.expect_load_sites()
        .returning(|| Err(anyhow::anyhow!("disk on fire")));

    let store = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::LoadSites, store, tx).unwrap();

    let action = rx.recv().await.unwrap();
    if let Action::ErrorOccurred(message) = action {
        assert!(message.contains("disk on fire"));
    } else {
        panic!("Expected Action::ErrorOccurred, got {action:?}");
    }
}

#[tokio::test]
async fn test_handle_command_success() {
    let mut mock = MockSiteStore::new();
    mock.expect_load_sites()
        .returning(|| Ok(vec![sample_site("a", "staging")]));

    let store = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::LoadSites, store, tx).unwrap();

    let action = rx.recv().await.unwrap();
    if let Action::SitesLoaded(sites) = action {
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "staging");
    } else {
        panic!("Expected Action::SitesLoaded, got {action:?}");
    }
}

#[tokio::test]
async fn test_save_site_reports_progress_and_reloads() {
    let mut mock = MockSiteStore::new();
    mock.expect_save_site().returning(|_| Ok(()));
    mock.expect_load_sites()
        .returning(|| Ok(vec![sample_site("a", "staging")]));

    let store = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(4);

    handle_command(Command::SaveSite(sample_site("a", "staging")), store, tx).unwrap();

    let started = rx.recv().await.unwrap();
    assert!(matches!(started, Action::OperationStarted(_)));

    let completed = rx.recv().await.unwrap();
    match completed {
        Action::OperationCompleted(Ok(msg)) => assert!(msg.contains("staging")),
        other => panic!("Expected success, got {other:?}"),
    }

    let reloaded = rx.recv().await.unwrap();
    assert!(matches!(reloaded, Action::SitesLoaded(_)));
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}

/// Full pipeline: open the palette, enter the theme submenu, hover a theme
/// until the debounce timer fires through the action channel, then click it
/// to commit. The persisted theme must match the clicked one afterwards.
#[tokio::test]
async fn test_palette_theme_commit_through_the_loop() {
    let mut mock = MockSiteStore::new();
    mock.expect_load_sites().returning(|| Ok(Vec::new()));
    mock.expect_watch_path().returning(|| None);

    let (state, _dir, settings_store) = state_with_tempdir();
    state.settings.lock().hover_preview_ms = 5;
    let theme_service = state.theme_service.clone();

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(16);

    // "Ocean" sits at position 2 in the theme submenu.
    let list = ui::palette_list_area(Rect::new(0, 0, 80, 24));
    let (col, row) = (list.x + 1, list.y + 2);

    let feeder = tokio::spawn(async move {
        let _ = event_tx.send(Ok(ctrl_key('k'))).await;
        let _ = event_tx.send(Ok(key_event(KeyCode::Enter))).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = event_tx.send(Ok(mouse(MouseEventKind::Moved, col, row))).await;
        // Give the debounce timer room to fire and deliver the preview.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = event_tx
            .send(Ok(mouse(
                MouseEventKind::Down(crossterm::event::MouseButton::Left),
                col,
                row,
            )))
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = event_tx.send(Ok(key_event(KeyCode::Char('q')))).await;
    });

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        run_loop_with_events(&mut terminal, state, Arc::new(mock), event_rx),
    )
    .await;
    result.expect("loop timed out").unwrap();
    feeder.await.unwrap();

    assert_eq!(theme_service.live_id(), ThemeId::Ocean);

    // The settings writer persists asynchronously.
    for _ in 0..50 {
        if settings_store.load().active_theme == ThemeId::Ocean {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("committed theme was never persisted");
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let mut mock = MockSiteStore::new();
    mock.expect_load_sites()
        .returning(|| Ok(vec![sample_site("a", "staging"), sample_site("b", "prod")]));
    mock.expect_save_site().returning(|_| Ok(()));
    mock.expect_delete_site().returning(|_| Ok(()));
    mock.expect_watch_path().returning(|| None);

    let (state, _dir, _settings_store) = state_with_tempdir();

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(100);

    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=20 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Whatever modal the fuzzer left open, two escapes reach Normal
        // mode; then quit.
        let _ = event_tx.send(Ok(key_event(KeyCode::Esc))).await;
        let _ = event_tx.send(Ok(key_event(KeyCode::Esc))).await;
        let _ = event_tx.send(Ok(key_event(KeyCode::Char('q')))).await;
    });

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, state, Arc::new(mock), event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::PageUp,
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::MouseButton;
    let kind = match rng.gen_range(0..5) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Down(MouseButton::Right),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}

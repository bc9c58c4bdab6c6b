use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FormField};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.on_tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // A notice blocks the form until acknowledged
    if app.notice.is_some() {
        app.dismiss_notice();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit();
            return;
        }
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        FormField::CustomerName | FormField::Description => handle_text_input(app, key),
        FormField::InteractionType => handle_type_selector(app, key),
        FormField::Tags => handle_tags(app, key),
    }
}

fn handle_text_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit();
        return;
    }

    let Some(input) = app.active_input() else {
        return;
    };

    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

fn handle_type_selector(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.interaction_type = app.interaction_type.next();
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            app.interaction_type = app.interaction_type.prev();
        }
        KeyCode::Enter => app.submit(),
        _ => {}
    }
}

fn handle_tags(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.tag_left(),
        KeyCode::Right | KeyCode::Char('l') => app.tag_right(),
        KeyCode::Up | KeyCode::Char('k') => app.tag_up(),
        KeyCode::Down | KeyCode::Char('j') => app.tag_down(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_focused_tag(),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    if app.notice.is_some() {
        app.dismiss_notice();
        return;
    }

    let hit = app
        .tag_areas
        .iter()
        .find(|(rect, _)| point_in_rect(mouse.column, mouse.row, *rect))
        .map(|(_, idx)| *idx);

    if let Some(idx) = hit {
        app.focus = FormField::Tags;
        app.toggle_tag(idx);
    }
}

use crossterm::event::KeyCode;

use crate::app::state::{App, AppScreen, DashTab};

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => handle_dashboard_input(app, key),
        AppScreen::SelectSellers => handle_seller_select_input(app, key),
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || key == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Tab => {
            app.tab = app.tab.next();
        }
        KeyCode::BackTab => {
            app.tab = app.tab.prev();
        }
        KeyCode::Char(digit @ '1'..='3') => {
            let index = digit as usize - '1' as usize;
            if let Some(tab) = DashTab::from_index(index) {
                app.tab = tab;
            }
        }
        KeyCode::Char('r') => {
            app.cycle_region(1);
        }
        KeyCode::Char('R') => {
            app.cycle_region(-1);
        }
        KeyCode::Char('a') => {
            app.toggle_all_period();
        }
        KeyCode::Up => {
            app.adjust_year(1);
        }
        KeyCode::Down => {
            app.adjust_year(-1);
        }
        KeyCode::Char('s') => {
            app.screen = AppScreen::SelectSellers;
            app.seller_cursor = 0;
        }
        KeyCode::Char('+' | '=') => {
            app.adjust_top_sellers(1);
        }
        KeyCode::Char('-') => {
            app.adjust_top_sellers(-1);
        }
        KeyCode::Char('f') | KeyCode::F(5) => {
            app.needs_fetch = true;
        }
        _ => {}
    }
}

fn handle_seller_select_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter => {
            app.screen = AppScreen::Dashboard;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Up => {
            app.seller_cursor_up();
        }
        KeyCode::Down => {
            app.seller_cursor_down();
        }
        KeyCode::Home => {
            app.seller_cursor = 0;
        }
        KeyCode::End => {
            if !app.seller_names.is_empty() {
                app.seller_cursor = app.seller_names.len() - 1;
            }
        }
        KeyCode::Char(' ') => {
            app.toggle_seller_at_cursor();
        }
        KeyCode::Char('c') => {
            app.clear_seller_selection();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_mark_toggles_help_everywhere() {
        let mut app = App::new();
        handle_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn digits_jump_to_tabs() {
        let mut app = App::new();
        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, DashTab::Sellers);
        handle_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.tab, DashTab::Revenue);
    }

    #[test]
    fn seller_screen_keys_do_not_leak_into_dashboard() {
        let mut app = App::new();
        app.screen = AppScreen::SelectSellers;
        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.filters.region_index, 0);
        handle_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Dashboard);
    }
}

pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::CURRENT_AUTHOR;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    let labels = Section::ALL.map(Section::label);
    let active = Section::ALL
        .iter()
        .position(|s| *s == state.section)
        .unwrap_or(0);
    components::tabs::render_tabs(frame, layout[1], &labels, active, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state),
        Section::Expenses => screens::expenses::render(frame, layout[2], state),
        Section::Learning => screens::learning::render(frame, layout[2], state),
    }

    frame.render_widget(Paragraph::new(bottom_bar(state, &theme)), layout[3]);

    if state.chat.open {
        let chat_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        screens::chat::render(frame, chat_area, &state.chat);
    }
    if let Some(modal) = &state.modal {
        components::modal::render(frame, area, modal, &state.engine);
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.engine.loans().summary();
    let line = Line::from(vec![
        Span::styled(
            " FinTrack ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Долг", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", summary.remaining)),
        Span::styled("Расходы", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.engine.expenses().total())),
        Span::styled("👤 ", Style::default().fg(theme.text_muted)),
        Span::raw(CURRENT_AUTHOR),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn key(text: &'static str, theme: &Theme) -> Span<'static> {
    Span::styled(text, Style::default().fg(theme.accent))
}

fn separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

fn bottom_bar(state: &AppState, theme: &Theme) -> Line<'static> {
    if state.modal.is_some() {
        return Line::from(vec![
            key("Tab", theme),
            Span::raw(" поле  "),
            key("Enter", theme),
            Span::raw(" подтвердить  "),
            key("Esc", theme),
            Span::raw(" отмена"),
        ]);
    }
    if state.chat.open {
        return Line::from(vec![
            key("Esc", theme),
            Span::raw(" закрыть чат  "),
            key("Ctrl+C", theme),
            Span::raw(" выход"),
        ]);
    }

    let mut parts = vec![key("1/2/3", theme), Span::raw(" разделы")];
    parts.push(separator(theme));
    parts.extend(context_hints(state.section, theme));
    parts.push(separator(theme));
    parts.push(key("c", theme));
    parts.push(Span::raw(" AI-помощник  "));
    parts.push(key("q", theme));
    parts.push(Span::raw(" выход"));
    Line::from(parts)
}

fn context_hints(section: Section, theme: &Theme) -> Vec<Span<'static>> {
    match section {
        Section::Dashboard => vec![
            key("↑/↓", theme),
            Span::raw(" выбор  "),
            key("a", theme),
            Span::raw(" добавить займ"),
        ],
        Section::Expenses => vec![
            key("a", theme),
            Span::raw(" добавить расход  "),
            key("p", theme),
            Span::raw(" период"),
        ],
        Section::Learning => vec![
            key("←/→", theme),
            Span::raw(" вкладки  "),
            key("↑/↓", theme),
            Span::raw(" лента  "),
            key("n", theme),
            Span::raw(" пост"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use engine::Engine;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::ui::keymap::AppAction;

    fn state() -> AppState {
        AppState::new(Engine::builder().sample_data(true).build(), false)
    }

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn every_section_renders() {
        let mut state = state();
        for ch in ['1', '2', '3'] {
            state.handle_action(AppAction::Input(ch));
            let text = screen_text(&state);
            assert!(text.contains("Главная"));
        }
    }

    #[test]
    fn dashboard_shows_summary() {
        let text = screen_text(&state());
        assert!(text.contains("Все кредиты"));
        assert!(text.contains("Осталось погасить"));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut state = state();
        state.handle_action(AppAction::Input('m'));
        assert!(screen_text(&state).contains("Подтверждение платежа"));

        state.handle_action(AppAction::Cancel);
        state.handle_action(AppAction::Input('c'));
        assert!(screen_text(&state).contains("AI-помощник"));
    }

    #[test]
    fn hints_follow_the_section() {
        let theme = Theme::default();
        let text = |section| -> String {
            context_hints(section, &theme)
                .iter()
                .map(|s| s.content.to_string())
                .collect()
        };
        assert!(text(Section::Expenses).contains("период"));
        assert!(text(Section::Learning).contains("пост"));
    }
}

use assistant::{ChatMessage, SUGGESTIONS, Sender};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{app::ChatState, ui::theme::Theme};

const PANEL_WIDTH: u16 = 56;

/// Chat panel docked on the right, or covering the screen in fullscreen.
pub fn render(frame: &mut Frame<'_>, area: Rect, chat: &ChatState) {
    let theme = Theme::default();
    let rect = panel_area(area, chat.fullscreen);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(Span::styled(
            " AI-помощник ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Messages
            Constraint::Length(1), // Input
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let lines = message_lines(chat, &theme);
    // Keep the newest messages in view.
    let scroll = lines_height(&lines, parts[0].width).saturating_sub(parts[0].height);
    let messages = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(messages, parts[0]);

    frame.render_widget(Paragraph::new(input_line(chat, &theme)), parts[1]);
    frame.render_widget(Paragraph::new(hint_line(&theme)), parts[2]);
}

fn panel_area(area: Rect, fullscreen: bool) -> Rect {
    if fullscreen {
        return area;
    }
    let width = PANEL_WIDTH.min(area.width);
    Rect {
        x: area.x + area.width - width,
        width,
        ..area
    }
}

fn message_lines(chat: &ChatState, theme: &Theme) -> Vec<Line<'static>> {
    let messages = chat.session.messages();
    let mut lines: Vec<Line<'static>> = messages
        .iter()
        .flat_map(|message| render_message(message, theme))
        .collect();

    if chat.session.is_loading() {
        lines.push(Line::from(Span::styled(
            "Помощник печатает…",
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Only the greeting so far: offer the canned questions.
    if messages.len() == 1 && !chat.session.is_loading() {
        lines.push(Line::from(Span::styled(
            "Популярные вопросы (Tab):",
            Style::default().fg(theme.text_muted),
        )));
        for suggestion in SUGGESTIONS {
            lines.push(Line::from(Span::styled(
                format!("  • {suggestion}"),
                Style::default().fg(theme.accent),
            )));
        }
    }
    lines
}

fn render_message(message: &ChatMessage, theme: &Theme) -> Vec<Line<'static>> {
    let (who, color) = match message.sender {
        Sender::User => ("Вы", theme.accent),
        Sender::Assistant => ("Помощник", theme.positive),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", message.sent_at.format("%H:%M")),
            Style::default().fg(theme.dim),
        ),
    ])];
    lines.extend(
        message
            .text
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text)))),
    );
    lines.push(Line::default());
    lines
}

fn input_line(chat: &ChatState, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("› ", Style::default().fg(theme.accent))];
    if chat.input.value.is_empty() {
        spans.push(Span::styled(
            "Задайте вопрос...",
            Style::default().fg(theme.dim),
        ));
    } else {
        spans.push(Span::raw(chat.input.value.clone()));
    }
    spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    Line::from(spans)
}

fn hint_line(theme: &Theme) -> Line<'static> {
    let key = Style::default().fg(theme.accent);
    let muted = Style::default().fg(theme.text_muted);
    Line::from(vec![
        Span::styled("Enter", key),
        Span::styled(" отправить  ", muted),
        Span::styled("Tab", key),
        Span::styled(" подсказка  ", muted),
        Span::styled("Ctrl+F", key),
        Span::styled(" во весь экран  ", muted),
        Span::styled("Esc", key),
        Span::styled(" закрыть", muted),
    ])
}

/// Rough wrapped height, used to pin the scroll to the bottom.
fn lines_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use assistant::GREETING;

    use super::*;

    fn chat(has_credential: bool) -> ChatState {
        let mut chat = ChatState::new(has_credential);
        chat.open = true;
        chat
    }

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn greeting_comes_with_suggestions() {
        let lines = plain(&message_lines(&chat(true), &Theme::default()));
        assert!(lines[0].starts_with("Помощник"));
        assert_eq!(lines[1], GREETING);
        assert_eq!(lines.last().unwrap(), &format!("  • {}", SUGGESTIONS[3]));
    }

    #[test]
    fn loading_indicator_replaces_suggestions() {
        let mut chat = chat(true);
        chat.session.submit("Как погасить ипотеку?");
        let lines = plain(&message_lines(&chat, &Theme::default()));

        assert_eq!(lines.last().unwrap(), "Помощник печатает…");
        assert!(lines.iter().any(|l| l == "Как погасить ипотеку?"));
        assert!(!lines.iter().any(|l| l.starts_with("  • ")));
    }

    #[test]
    fn panel_docks_right_unless_fullscreen() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(panel_area(area, false), Rect::new(64, 0, 56, 40));
        assert_eq!(panel_area(area, true), area);
    }

    #[test]
    fn wrapped_height_counts_rows() {
        let lines = vec![Line::from("a".repeat(25)), Line::default()];
        assert_eq!(lines_height(&lines, 10), 4);
    }
}

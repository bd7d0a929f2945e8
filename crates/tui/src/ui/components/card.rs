use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded panel every screen section is drawn in.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    highlighted: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            highlighted: false,
        }
    }

    /// Accent border, used for the panel that owns the keyboard.
    pub fn focused(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    fn block(&self) -> Block<'a> {
        let border = if self.highlighted {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.surface_bright))
    }

    /// Draws the frame and returns the area left for content.
    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

/// Headline figure with an optional caption, e.g. a summary amount.
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    caption: Option<String>,
    tone: Option<Color>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.into(),
            caption: None,
            tone: None,
            theme,
        }
    }

    pub fn subtitle(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Colors the value, e.g. green for money already repaid.
    pub fn tone(mut self, color: Color) -> Self {
        self.tone = Some(color);
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let value_style = Style::default()
            .fg(self.tone.unwrap_or(self.theme.text))
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled(self.value.clone(), value_style))];
        if let Some(caption) = &self.caption {
            lines.push(Line::from(Span::styled(
                caption.clone(),
                Style::default().fg(self.theme.dim),
            )));
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let inner = Card::new(self.title, self.theme).render_frame(frame, area);
        frame.render_widget(Paragraph::new(self.lines()), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_card_value_then_caption() {
        let theme = Theme::default();
        let card = StatCard::new("Выплачено", "4 850 000 ₸", &theme)
            .subtitle("23% от суммы")
            .tone(theme.positive);
        let lines = card.lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "4 850 000 ₸");
        assert_eq!(lines[0].spans[0].style.fg, Some(theme.positive));
        assert_eq!(lines[1].spans[0].content, "23% от суммы");
    }
}

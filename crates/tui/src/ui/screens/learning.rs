use engine::{LearningCatalog, LearningTab, Post};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, tabs::render_tabs},
        theme::{Theme, hex_color},
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(columns[0]);

    let labels = LearningTab::ALL.map(LearningTab::label);
    render_tabs(frame, left[0], &labels, state.learning_tab.index(), &theme);

    let tab = state.learning_tab;
    let inner = Card::new(tab.label(), &theme).render_frame(frame, left[1]);
    let catalog = Paragraph::new(catalog_lines(state.engine.catalog(), tab, &theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(catalog, inner);

    let inner = Card::new("Сообщество", &theme).render_frame(frame, columns[1]);
    let posts = &state.engine.feed().posts()[state.feed_offset.min(state.engine.feed().posts().len())..];
    let feed = Paragraph::new(feed_lines(posts, &theme)).wrap(Wrap { trim: true });
    frame.render_widget(feed, inner);
}

fn catalog_lines(catalog: &LearningCatalog, tab: LearningTab, theme: &Theme) -> Vec<Line<'static>> {
    let title = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
    };
    let body = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.text_muted),
        ))
    };
    let meta = |text: String| Line::from(Span::styled(text, Style::default().fg(theme.accent)));

    let mut lines = Vec::new();
    match tab {
        LearningTab::Courses => {
            for course in &catalog.courses {
                lines.push(title(&course.title));
                lines.push(body(&course.description));
                lines.push(meta(format!("📅 {}   ⏱ {}", course.date, course.duration)));
                lines.push(Line::default());
            }
        }
        LearningTab::Streams => {
            for stream in &catalog.streams {
                lines.push(title(&stream.title));
                lines.push(body(&stream.description));
                lines.push(meta(format!(
                    "🔴 {}   👥 {} участников",
                    stream.starts, stream.participants
                )));
                lines.push(Line::default());
            }
        }
        LearningTab::Articles => {
            for article in &catalog.articles {
                lines.push(title(&article.title));
                lines.push(body(&article.summary));
                lines.push(Line::default());
            }
        }
    }

    if lines.is_empty() {
        lines.push(body("Скоро здесь появятся материалы"));
    }
    lines
}

fn feed_lines(posts: &[Post], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("n", Style::default().fg(theme.accent)),
        Span::styled(" Создать пост", Style::default().fg(theme.text_muted)),
    ])];
    lines.push(Line::default());

    for post in posts {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", post.initials),
                Style::default()
                    .fg(theme.text)
                    .bg(hex_color(&post.avatar_color))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", post.author),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" · {}", post.posted), Style::default().fg(theme.dim)),
        ]));
        lines.push(Line::from(post.content.clone()));
        lines.push(Line::from(Span::styled(
            format!("♥ {}   💬 {}", post.likes, post.comments),
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use engine::Engine;

    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn each_tab_lists_its_catalog() {
        let engine = Engine::builder().build();
        let catalog = engine.catalog();
        let theme = Theme::default();

        let courses = plain(&catalog_lines(catalog, LearningTab::Courses, &theme));
        assert_eq!(courses[0], catalog.courses[0].title);
        let articles = plain(&catalog_lines(catalog, LearningTab::Articles, &theme));
        assert_eq!(articles.len(), catalog.articles.len() * 3);
    }

    #[test]
    fn empty_catalog_has_placeholder() {
        let lines = plain(&catalog_lines(
            &LearningCatalog::default(),
            LearningTab::Streams,
            &Theme::default(),
        ));
        assert_eq!(lines, vec!["Скоро здесь появятся материалы".to_string()]);
    }

    #[test]
    fn posts_show_author_and_reactions() {
        let engine = Engine::builder().sample_data(true).build();
        let lines = plain(&feed_lines(engine.feed().posts(), &Theme::default()));

        assert_eq!(lines[2], " AH  Асем Нурланова · 2 часа назад");
        assert_eq!(lines[4], "♥ 24   💬 8");
    }
}

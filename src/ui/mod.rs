pub mod help;
pub mod meters;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::format::truncate_unicode;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    meters::render(frame, chunks[1], &app.reading, &app.cpu_history, &app.theme);
    render_statusbar(frame, chunks[2], app);

    // Help overlay — rendered last to appear on top
    if app.show_help {
        help::render(
            frame,
            frame.area(),
            &app.keybinds.help_entries(),
            &app.theme,
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " perch ",
        Style::default()
            .fg(app.theme.header_accent_fg)
            .bg(app.theme.header_accent_bg)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(host) = &app.hostname {
        let max = area.width.saturating_sub(18) as usize;
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            truncate_unicode(host, max),
            Style::default().fg(app.theme.text_secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_statusbar(frame: &mut Frame, area: Rect, app: &App) {
    let (state, color) = if app.paused {
        ("paused", app.theme.status_paused)
    } else {
        ("sampling", app.theme.status_ok)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {state} "), Style::default().fg(color)),
        Span::styled(
            "  ? for help",
            Style::default().fg(app.theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

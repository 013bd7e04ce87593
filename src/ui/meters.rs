use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Sparkline};

use crate::format::{format_gb_pair, format_gb_whole, format_percent};
use crate::system::snapshot::UsageReading;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    reading: &UsageReading,
    cpu_history: &std::collections::VecDeque<u64>,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_cpu_row(frame, rows[0], reading, cpu_history, theme);
    render_memory_gauge(frame, rows[1], reading, theme);
    render_disk_gauge(frame, rows[2], reading, theme);
}

fn meter_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_cpu_row(
    frame: &mut Frame,
    area: Rect,
    reading: &UsageReading,
    cpu_history: &std::collections::VecDeque<u64>,
    theme: &Theme,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let gauge = Gauge::default()
        .block(meter_block(" CPU ", theme))
        .gauge_style(
            Style::default()
                .fg(theme.heat_color(reading.cpu_percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(reading.cpu_ratio())
        .label(format_percent(reading.cpu_percent));
    frame.render_widget(gauge, halves[0]);

    let data: Vec<u64> = cpu_history.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(meter_block(" history ", theme))
        .data(&data)
        .max(10_000)
        .style(Style::default().fg(theme.sparkline_color));
    frame.render_widget(sparkline, halves[1]);
}

fn render_memory_gauge(frame: &mut Frame, area: Rect, reading: &UsageReading, theme: &Theme) {
    let percent = reading.memory_ratio() * 100.0;
    let gauge = Gauge::default()
        .block(meter_block(" Memory ", theme))
        .gauge_style(
            Style::default()
                .fg(theme.heat_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(reading.memory_ratio())
        .label(format_gb_pair(
            reading.memory_used_gb,
            reading.memory_total_gb,
        ));
    frame.render_widget(gauge, area);
}

fn render_disk_gauge(frame: &mut Frame, area: Rect, reading: &UsageReading, theme: &Theme) {
    let percent = reading.disk_ratio() * 100.0;
    let label = format!(
        "{} / {} ({} free)",
        format_gb_whole(reading.disk_used_gb),
        format_gb_whole(reading.disk_total_gb),
        format_gb_whole(reading.disk_free_gb),
    );
    let gauge = Gauge::default()
        .block(meter_block(" Disk ", theme))
        .gauge_style(
            Style::default()
                .fg(theme.heat_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(reading.disk_ratio())
        .label(label);
    frame.render_widget(gauge, area);
}

//! Order dashboard for the tracked exhibitor.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table},
};

use crate::client::OrderSource;
use crate::models::{NotificationKind, Order, OrderStatus};
use crate::session::Session;
use crate::taxonomy;
use crate::tui::app::App;
use crate::tui::components::status_bar;

/// Width of the textual progress bar in the order table.
const BAR_WIDTH: usize = 10;

/// Renders the dashboard screen.
pub fn render<S: OrderSource + 'static>(frame: &mut Frame, app: &App, session: &Session<S>) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Exhibitor header
            Constraint::Length(3), // Stats
            Constraint::Min(8),    // Orders + notifications
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    status_bar::render(frame, main_layout[0], app, session);
    render_header(frame, main_layout[1], session);
    render_stats(frame, main_layout[2], session);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main_layout[3]);

    render_orders(frame, content[0], session);
    render_notifications(frame, content[1], session);

    let help = if session.is_synchronizing() {
        "[b]back [q]quit   refresh unavailable while syncing"
    } else {
        "[r]refresh [b]back [q]quit"
    };
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, main_layout[4]);
}

fn render_header<S: OrderSource + 'static>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    let content = match session.selected_exhibitor() {
        Some(exhibitor) => {
            let mut spans = vec![
                Span::styled(
                    format!(" [{}] ", exhibitor.initials()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    exhibitor.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  Booth {}", exhibitor.booth)),
            ];
            if let Some(parts) = exhibitor.booth_parts() {
                spans.push(Span::styled(
                    format!(" (section {}, no. {})", parts.section, parts.number),
                    Style::default().fg(Color::Gray),
                ));
            }
            if session.snapshot().is_some_and(|s| s.is_fallback()) {
                spans.push(Span::styled(
                    "  SAMPLE DATA ",
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            " No exhibitor selected, press [b] to choose one",
            Style::default().fg(Color::Yellow),
        )),
    };
    let para = Paragraph::new(content).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_stats<S: OrderSource + 'static>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    let summary = session.summary();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let stats = [
        (" Total ", summary.total, Color::White),
        (" Delivered ", summary.delivered, Color::Green),
        (" Pending ", summary.pending, Color::Yellow),
    ];
    for (i, (title, value, color)) in stats.into_iter().enumerate() {
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Span::styled(
            format!(" {value}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        frame.render_widget(para, columns[i]);
    }

    let ratio = if summary.total == 0 {
        0.0
    } else {
        summary.delivered as f64 / summary.total as f64
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Delivery progress ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, columns[3]);
}

fn render_orders<S: OrderSource + 'static>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    let orders = session.orders();
    let block = Block::default()
        .title(format!(" Orders ({}) ", orders.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if orders.is_empty() {
        let text = if session.snapshot().is_some() {
            " No orders yet for this exhibitor"
        } else {
            " Loading orders..."
        };
        let para = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let header = Row::new(["Item", "Qty", "Color", "Status", "Progress", "Date", "Section"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = orders.iter().map(order_row).collect();
    let widths = [
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Length(BAR_WIDTH as u16 + 5),
        Constraint::Length(10),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn order_row(order: &Order) -> Row<'_> {
    let descriptor = taxonomy::describe(order.status);
    let color = status_color(order.status);
    let date = order
        .order_day()
        .map_or_else(|| order.order_date.clone(), |d| d.format("%Y-%m-%d").to_string());
    Row::new(vec![
        Cell::from(order.item.as_str()),
        Cell::from(order.quantity.to_string()),
        Cell::from(order.color.as_str()),
        Cell::from(Span::styled(descriptor.label, Style::default().fg(color))),
        Cell::from(Span::styled(
            progress_bar(descriptor.progress_percent),
            Style::default().fg(color),
        )),
        Cell::from(date),
        Cell::from(order.section.as_str()),
    ])
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Delivered => Color::Green,
        OrderStatus::OutForDelivery => Color::Blue,
        OrderStatus::InRoute => Color::Yellow,
        OrderStatus::Cancelled => Color::Red,
        OrderStatus::InProcess | OrderStatus::Unrecognized => Color::Magenta,
    }
}

fn render_notifications<S: OrderSource + 'static>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
) {
    let block = Block::default()
        .title(" Recent activity ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = session
        .notifications()
        .iter()
        .map(|n| {
            let color = match n.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Delivery => Color::Yellow,
            };
            ListItem::new(vec![
                Line::from(Span::styled(n.message.as_str(), Style::default().fg(color))),
                Line::from(Span::styled(
                    format!("  {}", n.time_label),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░   0%");
        assert_eq!(progress_bar(50), "█████░░░░░  50%");
        assert_eq!(progress_bar(100), "██████████ 100%");
    }
}

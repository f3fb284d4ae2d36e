//! Exhibitor picker screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::client::OrderSource;
use crate::models::Exhibitor;
use crate::session::Session;
use crate::tui::app::App;
use crate::tui::components::status_bar;

const SEARCH_PROMPT: &str = "Search: ";

/// Renders the picker screen.
pub fn render<S: OrderSource + 'static>(frame: &mut Frame, app: &App, session: &Session<S>) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Exhibitor list
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    status_bar::render(frame, main_layout[0], app, session);

    let title = Paragraph::new(Line::from(Span::styled(
        " Select your company ",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, main_layout[1]);

    render_search(frame, main_layout[2], app);

    let accounts = session.filtered_accounts();
    render_list(frame, main_layout[3], app, &accounts, session.directory().len());

    let help = Paragraph::new("[type]search [Up/Down]move [Enter]track [Esc]clear/quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, main_layout[4]);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = format!("{SEARCH_PROMPT}{}", app.search.as_str());
    frame.render_widget(Paragraph::new(text), inner);

    let cursor_x = inner.x + SEARCH_PROMPT.len() as u16 + app.search.cursor_column();
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, accounts: &[&Exhibitor], total: usize) {
    let block = Block::default()
        .title(format!(" {} of {} companies ", accounts.len(), total))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if accounts.is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No companies match your search",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = accounts.iter().map(|e| ListItem::new(account_line(e))).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.list_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn account_line(exhibitor: &Exhibitor) -> Line<'_> {
    let mut spans = vec![
        Span::styled(
            format!("[{}] ", exhibitor.initials()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            exhibitor.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  Booth {}", exhibitor.booth)),
    ];
    if let (Some(total), Some(delivered)) = (exhibitor.total_orders, exhibitor.delivered_orders) {
        spans.push(Span::styled(
            format!("  {delivered}/{total} delivered"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

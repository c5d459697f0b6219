use crate::game::{Board, Cell, Game, PlayerColor, Shape, Side};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game: &Game,
    selected_column: usize,
    column_input: &str,
    message: Option<&str>,
) {
    let board_rows = game.board().height() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(board_rows),    // Board
            Constraint::Length(3),          // Message
            Constraint::Length(3),          // Controls
        ])
        .split(frame.area());

    render_header(frame, game, column_input, chunks[0]);
    render_board(frame, game, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn color_of(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Green => Color::Green,
        PlayerColor::Magenta => Color::Magenta,
        PlayerColor::Cyan => Color::Cyan,
        PlayerColor::White => Color::White,
    }
}

fn render_header(frame: &mut Frame, game: &Game, column_input: &str, area: Rect) {
    let player = game.current();
    let kind = match player.difficulty() {
        Some(d) => format!("{d} AI"),
        None => "Human".to_string(),
    };

    let mut status = if game.is_over() {
        "Game Over".to_string()
    } else {
        format!("Current Player: {} ({kind})", player.name())
    };
    if !column_input.is_empty() {
        status.push_str(&format!("  |  Column: {column_input}"));
    }

    let board = game.board();
    let title = format!(
        "Connect {}  |  {}x{} {}",
        game.winning_length(),
        board.height(),
        board.width(),
        board.shape()
    );

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(color_of(player.color()))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &Game, selected_column: usize, area: Rect) {
    let board = game.board();
    let width = board.width();
    // A cylinder's side walls are drawn open to show the wrap.
    let (left, right) = match board.shape() {
        Shape::Rectangle => ("║", "║"),
        Shape::Cylinder => ("┆", "┆"),
    };

    let mut lines = Vec::new();

    let mut col_line = vec![Span::raw(" ")];
    for col in 0..width {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("╔{}╗", "═".repeat(width * 3))));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw(left)];
        for col in 0..width {
            row_spans.push(cell_span(game, board, row, col));
        }
        row_spans.push(Span::raw(right));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("╚{}╝", "═".repeat(width * 3))));

    let mut indicator_line = vec![Span::raw(" ")];
    for col in 0..width {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw(" "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn cell_span(game: &Game, board: &Board, row: usize, col: usize) -> Span<'static> {
    let side = match board.get(row as isize, col as isize) {
        Cell::Empty => return Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::First => Side::First,
        Cell::Second => Side::Second,
    };
    Span::styled(
        " ● ",
        Style::default().fg(color_of(game.player(side).color())),
    )
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "←/→: Move  |  1-9: Column  |  Enter: Drop  |  S: Save  |  R: Restart  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

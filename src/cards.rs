use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::tui::Palette;

pub const CARD_HEIGHT: u16 = 5;

/// A bordered catalog card for a theme or uniform. The border takes the
/// primary tint when selected.
pub struct SelectableCard<'a> {
    pub image: &'a str,
    pub title: &'a str,
    pub price: Option<&'a str>,
    pub selected: bool,
    pub focused: bool,
    pub palette: &'a Palette,
}

impl Widget for SelectableCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(self.selected, self.focused, self.palette);
        let mut lines = vec![
            Line::from(Span::styled(
                self.title.to_string(),
                Style::new().fg(self.palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                image_label(self.image),
                Style::new().fg(self.palette.muted),
            )),
        ];
        if let Some(price) = self.price {
            lines.push(Line::from(Span::styled(
                price.to_string(),
                Style::new().fg(self.palette.primary).add_modifier(Modifier::BOLD),
            )));
        }
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// A bordered card for a model: name and height.
pub struct ModelCard<'a> {
    pub image: &'a str,
    pub name: &'a str,
    pub height: &'a str,
    pub selected: bool,
    pub focused: bool,
    pub palette: &'a Palette,
}

impl Widget for ModelCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(self.selected, self.focused, self.palette);
        let lines = vec![
            Line::from(Span::styled(
                self.name.to_string(),
                Style::new().fg(self.palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Height: {}", self.height),
                Style::new().fg(self.palette.muted),
            )),
            Line::from(Span::styled(
                image_label(self.image),
                Style::new().fg(self.palette.muted),
            )),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

fn card_block(selected: bool, focused: bool, palette: &Palette) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_for(selected));
    if focused {
        block = block.border_type(BorderType::Thick);
    }
    if selected {
        block = block.title(Span::styled(" \u{2713} ", Style::new().fg(palette.primary)));
    }
    block
}

/// Last path segment of an image reference, shown in place of the picture.
pub fn image_label(image: &str) -> String {
    let name = image.rsplit('/').next().unwrap_or(image);
    if name.is_empty() {
        String::new()
    } else {
        format!("\u{25a3} {name}")
    }
}

/// What a key press on a card grid asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Select the card at this index.
    Press(usize),
    /// Open the detail view for the card at this index.
    View(usize),
    /// Focus left the grid past its last row.
    LeaveDown,
}

/// Cursor over a grid of `len` cards laid out `columns` wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardGrid {
    pub cursor: usize,
}

impl CardGrid {
    pub fn handle_key(&mut self, code: KeyCode, len: usize, columns: usize) -> Option<CardAction> {
        if len == 0 {
            return match code {
                KeyCode::Down | KeyCode::Tab => Some(CardAction::LeaveDown),
                _ => None,
            };
        }
        let columns = columns.max(1);
        self.cursor = self.cursor.min(len - 1);
        match code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len - 1),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(columns),
            KeyCode::Down => {
                if self.cursor + columns < len {
                    self.cursor += columns;
                } else if self.cursor / columns < (len - 1) / columns {
                    // partial last row
                    self.cursor = len - 1;
                } else {
                    return Some(CardAction::LeaveDown);
                }
            }
            KeyCode::Tab => return Some(CardAction::LeaveDown),
            KeyCode::Enter | KeyCode::Char(' ') => return Some(CardAction::Press(self.cursor)),
            KeyCode::Char('v') => return Some(CardAction::View(self.cursor)),
            _ => {}
        }
        None
    }
}

/// Split `area` into card cells for `count` cards, `columns` wide, scrolled so
/// the row holding `cursor` is visible. Returns `(card_index, rect)` pairs.
pub fn grid_cells(area: Rect, count: usize, columns: usize, cursor: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    let col_constraints = vec![Constraint::Fill(1); columns];
    let mut cells = Vec::new();
    for (row_offset, row) in (first_row..).take(visible_rows).enumerate() {
        let y = area.y + row_offset as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let row_rect = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        let cols = Layout::horizontal(col_constraints.clone())
            .spacing(1)
            .split(row_rect);
        for (col, rect) in cols.iter().enumerate() {
            let idx = row * columns + col;
            if idx < count {
                cells.push((idx, *rect));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn grid_moves_by_rows_and_columns() {
        let mut grid = CardGrid::default();
        assert_eq!(grid.handle_key(KeyCode::Right, 5, 2), None);
        assert_eq!(grid.cursor, 1);
        grid.handle_key(KeyCode::Down, 5, 2);
        assert_eq!(grid.cursor, 3);
        grid.handle_key(KeyCode::Up, 5, 2);
        assert_eq!(grid.cursor, 1);
        grid.handle_key(KeyCode::Left, 5, 2);
        grid.handle_key(KeyCode::Left, 5, 2);
        assert_eq!(grid.cursor, 0);
    }

    #[test]
    fn down_into_partial_last_row_then_leaves() {
        let mut grid = CardGrid { cursor: 3 };
        assert_eq!(grid.handle_key(KeyCode::Down, 5, 2), None);
        assert_eq!(grid.cursor, 4);
        assert_eq!(grid.handle_key(KeyCode::Down, 5, 2), Some(CardAction::LeaveDown));
    }

    #[test]
    fn press_and_view_report_cursor() {
        let mut grid = CardGrid { cursor: 2 };
        assert_eq!(grid.handle_key(KeyCode::Enter, 4, 1), Some(CardAction::Press(2)));
        assert_eq!(grid.handle_key(KeyCode::Char('v'), 4, 1), Some(CardAction::View(2)));
    }

    #[test]
    fn cursor_is_clamped_when_list_shrinks() {
        let mut grid = CardGrid { cursor: 9 };
        assert_eq!(grid.handle_key(KeyCode::Enter, 3, 2), Some(CardAction::Press(2)));
    }

    #[test]
    fn cells_scroll_to_cursor_row() {
        let area = Rect::new(0, 0, 40, CARD_HEIGHT * 2);
        let cells = grid_cells(area, 6, 2, 5);
        let indices: Vec<usize> = cells.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![2, 3, 4, 5]);
    }

    #[test]
    fn selected_card_uses_primary_border() {
        let palette = Palette::default();
        let area = Rect::new(0, 0, 24, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        SelectableCard {
            image: "https://cdn.crewbook.in/themes/gala.jpg",
            title: "Gala",
            price: Some("\u{20b9}44,499"),
            selected: true,
            focused: false,
            palette: &palette,
        }
        .render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, palette.primary);

        let mut buf = Buffer::empty(area);
        ModelCard {
            image: "",
            name: "Meera Iyer",
            height: "5'6\"",
            selected: false,
            focused: false,
            palette: &palette,
        }
        .render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, palette.border);
        assert_ne!(buf[(0, 0)].fg, Color::Reset);
    }
}

//! Board rendering for the Gobang GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::rules::{is_legal_move, WinLine};
use crate::{Board, Pos, Session, Stone, BOARD_SIZE};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any.
    ///
    /// Clicks are reported only when `interactive` and only on cells legal
    /// for the side to move.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        session: &Session,
        suggested_move: Option<Pos>,
        interactive: bool,
    ) -> Option<Pos> {
        let board = session.board();
        let current_turn = session.current_player();
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(
            Vec2::new(board_size, board_size),
            Sense::click(),
        );

        self.board_rect = response.rect;

        // Draw board background
        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        // Draw grid lines
        self.draw_grid(&painter);

        // Draw star points
        self.draw_star_points(&painter);

        // Draw coordinate labels
        self.draw_coordinates(&painter);

        // Draw placed stones
        self.draw_stones(&painter, board);

        // Draw last move marker
        if let Some(pos) = board.last_move() {
            self.draw_last_move_marker(&painter, pos);
        }

        // Draw winning line highlight
        if let Some(line) = session.winning_line() {
            self.draw_winning_line(&painter, line);
        }

        // Draw suggested move
        if let Some(pos) = suggested_move {
            self.draw_suggestion(&painter, pos, current_turn);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if interactive {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = is_legal_move(board, board_pos, current_turn, session.rules());

                    self.draw_hover_preview(&painter, board_pos, current_turn, is_valid);

                    // Check for click
                    if response.clicked() && is_valid {
                        clicked_pos = Some(board_pos);
                    }
                }
            }
        }

        clicked_pos
    }

    /// Draw the grid lines
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + (BOARD_SIZE as f32 - 1.0) * self.cell_size);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + (BOARD_SIZE as f32 - 1.0) * self.cell_size, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw star points (hoshi)
    fn draw_star_points(&self, painter: &Painter) {
        for (row, col) in STAR_POINTS {
            let center = self.board_to_screen(Pos::new(row, col));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels (A-O, 1-15)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        // Column labels
        for col in 0..BOARD_SIZE {
            let letter = (b'A' + col as u8) as char;
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;

            // Top
            let pos = Pos2::new(x - 4.0, self.board_rect.min.y + 8.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);

            // Bottom
            let pos = Pos2::new(x - 4.0, self.board_rect.max.y - 12.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        // Row labels, numbered bottom-up
        for row in 0..BOARD_SIZE {
            let num = BOARD_SIZE - row;
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;

            // Left
            let pos = Pos2::new(self.board_rect.min.x + 12.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, format!("{}", num), font.clone(), GRID_LINE);

            // Right
            let pos = Pos2::new(self.board_rect.max.x - 12.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, format!("{}", num), font.clone(), GRID_LINE);
        }
    }

    /// Draw all placed stones
    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for color in [Stone::Black, Stone::White] {
            for pos in board.stones(color) {
                self.draw_stone(painter, pos, color);
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        match stone {
            Stone::Black => {
                // Shadow
                let shadow_offset = Vec2::new(2.0, 2.0);
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );

                // Main stone
                painter.circle_filled(center, radius, BLACK_STONE);

                // Highlight
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(
                    center + highlight_offset,
                    radius * 0.2,
                    BLACK_STONE_HIGHLIGHT,
                );
            }
            Stone::White => {
                // Shadow
                let shadow_offset = Vec2::new(2.0, 2.0);
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );

                // Main stone
                painter.circle_filled(center, radius, WHITE_STONE);

                // Inner shadow for depth
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    /// Draw last move marker
    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Draw winning line highlight
    fn draw_winning_line(&self, painter: &Painter, line: WinLine) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        painter.line_segment(
            [self.board_to_screen(line.start), self.board_to_screen(line.end)],
            stroke,
        );

        // Circle every stone of the run, walking from start to end
        let dr = (line.end.row as i32 - line.start.row as i32).signum();
        let dc = (line.end.col as i32 - line.start.col as i32).signum();
        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        let mut cur = Some(line.start);
        while let Some(pos) = cur {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
            if pos == line.end {
                break;
            }
            cur = pos.offset(dr, dc, 1);
        }
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = match turn {
            Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 100),
            Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 100),
            Stone::Empty => return,
        };

        painter.circle_filled(center, radius, color);

        // Draw "?" marker
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            if turn == Stone::Black { WHITE_STONE } else { BLACK_STONE },
        );
    }

    /// Draw hover preview
    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, is_valid: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_valid {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty => return,
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        Pos::checked(y.floor() as i32, x.floor() as i32)
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}

//! Main application for the Gobang GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::warn;

use super::board_view::BoardView;
use super::game_state::{GameMode, GameState};
use super::theme::*;
use crate::{GameResult, Stone};

/// Main Gobang application
pub struct GobangApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    /// Rule choice applied to the next new game
    strict: bool,
}

impl Default for GobangApp {
    fn default() -> Self {
        Self {
            state: GameState::new(GameMode::default(), false),
            board_view: BoardView::default(),
            show_debug: true,
            strict: false,
        }
    }
}

impl GobangApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn new_game(&mut self, mode: GameMode) {
        self.state = GameState::new(mode, self.strict);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - Black)").clicked() {
                        self.new_game(GameMode::PvE { human_color: Stone::Black });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - White)").clicked() {
                        self.new_game(GameMode::PvE { human_color: Stone::White });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.checkbox(&mut self.strict, "Strict rules (next game)");
                    ui.separator();
                    if ui.add_enabled(self.state.can_undo(), egui::Button::new("Undo")).clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    if ui.button("Copy game record").clicked() {
                        match self.state.session.to_json() {
                            Ok(json) => ui.ctx().copy_text(json),
                            Err(e) => warn!(error = %e, "could not serialize session"),
                        }
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_color } => format!("PvE - You: {}", human_color.name()),
                        GameMode::PvP => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);
                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_rules_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.session.result() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOBANG").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("five in a row, 15x15").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();
            let is_black = turn == Stone::Black;
            let (stone_char, accent) = if is_black {
                ("●", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black { TEXT_PRIMARY } else { egui::Color32::from_rgb(30, 30, 35) };

                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(turn.name()).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...".to_string(), TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game Over".to_string(), WIN_HIGHLIGHT)
                    } else {
                        (format!("{} to move", self.state.name_of(turn)), TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        let budget = self.state.session_budget_secs();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Players and rule variant
    fn render_rules_card(&self, ui: &mut egui::Ui) {
        let rules = self.state.session.rules();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PLAYERS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for (symbol, color) in [("●", Stone::Black), ("○", Stone::White)] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(symbol).size(16.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(self.state.name_of(color)).size(12.0).color(TEXT_SECONDARY));
                });
            }
            ui.add_space(6.0);
            let text = if rules.strict {
                format!("Strict: {} restricted", rules.restricted.name())
            } else {
                "Free-style".to_string()
            };
            ui.label(RichText::new(text).size(11.0).color(TEXT_SECONDARY));
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(BUTTON_BG)
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                if self.state.can_undo() {
                    btn_frame.show(ui, |ui| {
                        let undo = egui::Label::new(RichText::new("↩ Undo").size(12.0).color(TEXT_PRIMARY))
                            .sense(egui::Sense::click());
                        if ui.add(undo).clicked() {
                            self.state.undo();
                        }
                    });
                    ui.add_space(4.0);
                }

                if self.state.mode == GameMode::PvP {
                    btn_frame.show(ui, |ui| {
                        let hint = egui::Label::new(RichText::new("Hint").size(12.0).color(TEXT_PRIMARY))
                            .sense(egui::Sense::click());
                        if ui.add(hint).clicked() {
                            self.state.request_suggestion();
                        }
                    });
                }
            });

            ui.add_space(8.0);
            let moves = self.state.session.board().move_count();
            ui.label(RichText::new(format!("Move #{moves}")).size(11.0).color(TEXT_SECONDARY));
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("Depth: {}", result.depth)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    let col = (b'A' + pos.col) as char;
                    let row = crate::BOARD_SIZE - pos.row as usize;
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("→ {col}{row}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: GameResult) {
        let (headline, symbol) = match result {
            GameResult::Win { winner: Stone::Black, .. } => ("WINS!", "●"),
            GameResult::Win { .. } => ("WINS!", "○"),
            GameResult::Draw => ("DRAW", "●○"),
        };
        let who = match result {
            GameResult::Win { winner, .. } => format!("{} ({})", winner.name(), self.state.name_of(winner)),
            GameResult::Draw => "No five in a row".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(symbol).size(32.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(who).size(16.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(headline).size(14.0).color(WIN_HIGHLIGHT));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let again = egui::Label::new(RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY))
                                .sense(egui::Sense::click());
                            if ui.add(again).clicked() {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let interactive =
                !self.state.is_game_over() && !self.state.is_ai_thinking() && self.state.is_human_turn();
            let clicked = self.board_view.show(ui, &self.state.session, self.state.suggested_move, interactive);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Get hint (PvP mode)
            if i.key_pressed(egui::Key::H) && self.state.mode == GameMode::PvP {
                self.state.request_suggestion();
            }

            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for GobangApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.session.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() || !self.state.is_game_over() {
            ctx.request_repaint();
        }
    }
}

//! TUI (Terminal User Interface) module for the word building game
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # State Machine
//! - `ChoosingSide` → `EnteringLetter` → back to `ChoosingSide` on the next human turn
//! - `Waiting` while the computer moves, `GameOver` once an outcome is shown

use crate::cli::outcome_message;
use crate::fragment::{Fragment, Side};
use crate::game_state::{ComputerMove, EndReason, GameInterface, GameOutcome, Player, StartInfo};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_HISTORY_DISPLAY: usize = 12;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, Debug, PartialEq)]
enum TuiState {
    ChoosingSide,
    EnteringLetter(Side),
    Waiting,
    GameOver,
}

/// What a key press means in the current state.
#[derive(Debug, PartialEq)]
enum KeyAction {
    Side(Side),
    Letter(String),
    Quit,
    Rejected(&'static str),
    Ignored,
}

fn interpret_key(state: TuiState, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignored;
    }
    // Raw mode swallows the terminal's own Ctrl+C handling.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return KeyAction::Ignored;
    }
    match (state, key.code) {
        (_, KeyCode::Esc) => KeyAction::Quit,
        (TuiState::ChoosingSide, KeyCode::Char(c)) => match Side::parse(&c.to_string()) {
            Some(side) => KeyAction::Side(side),
            None => KeyAction::Rejected("Press B for beginning or E for end."),
        },
        (TuiState::ChoosingSide, _) => KeyAction::Rejected("Press B for beginning or E for end."),
        (TuiState::EnteringLetter(_), KeyCode::Char(c)) => {
            KeyAction::Letter(c.to_lowercase().collect())
        }
        _ => KeyAction::Ignored,
    }
}

/// A player who quit has already asked to leave, so only finished games wait for a key.
fn holds_result_on_screen(outcome: &GameOutcome) -> bool {
    outcome.reason != EndReason::InputClosed
}

/// One row of the move history panel.
#[derive(Debug, Clone)]
struct HistoryEntry {
    player: Player,
    description: String,
    fragment: String,
}

/// Moves shown in the history panel. A human move waits in `pending` until the game
/// loop has accepted it.
#[derive(Debug, Default)]
struct MoveHistory {
    entries: Vec<HistoryEntry>,
    pending: Option<HistoryEntry>,
}

impl MoveHistory {
    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    fn propose(&mut self, entry: HistoryEntry) {
        self.pending = Some(entry);
    }

    fn settle(&mut self, accepted: bool) {
        if let Some(entry) = self.pending.take()
            && accepted
        {
            self.entries.push(entry);
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    fragment: &'a str,
    pending_side: Option<Side>,
    history: &'a [HistoryEntry],
    target: Option<&'a str>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
    state: TuiState,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    fragment: Fragment,
    history: MoveHistory,
    target: Option<String>,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            fragment: Fragment::default(),
            history: MoveHistory::default(),
            target: None,
            state: TuiState::Waiting,
            message: String::new(),
            error_message: String::new(),
            status: "Loading".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let pending_side = match self.state {
            TuiState::EnteringLetter(side) => Some(side),
            _ => None,
        };
        let ctx = RenderContext {
            fragment: self.fragment.as_str(),
            pending_side,
            history: &self.history.entries,
            target: self.target.as_deref(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            state: self.state,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Fragment
                Constraint::Min(8),    // History and messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_fragment(f, chunks[1], ctx.fragment, ctx.pending_side);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORD BUILDER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_fragment(f: &mut Frame, area: Rect, fragment: &str, pending_side: Option<Side>) {
        let tile = |c: char| {
            Span::styled(
                format!(" {} ", c.to_ascii_uppercase()),
                Style::default().fg(Color::Black).bg(Color::Green),
            )
        };
        let slot = Span::styled(" ? ", Style::default().fg(Color::White).bg(Color::DarkGray));

        let mut spans = vec![Span::raw("  ")];
        if pending_side == Some(Side::Begin) {
            spans.push(slot.clone());
            spans.push(Span::raw(" "));
        }
        for c in fragment.chars() {
            spans.push(tile(c));
            spans.push(Span::raw(" "));
        }
        if pending_side == Some(Side::End) {
            spans.push(slot);
        }
        if fragment.is_empty() && pending_side.is_none() {
            spans.push(Span::styled("(empty)", Style::default().fg(Color::Gray)));
        }

        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
            .block(Block::default().title("Fragment").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.history.is_empty() {
            lines.push(Line::from(vec![Span::styled("Moves:", HEADER_STYLE)]));
            let skip = ctx.history.len().saturating_sub(MAX_HISTORY_DISPLAY);
            for (i, entry) in ctx.history.iter().enumerate().skip(skip) {
                let who = match entry.player {
                    Player::Human => "You",
                    Player::Computer => "Computer",
                };
                lines.push(Line::from(format!(
                    "  {:>2}. {who:<8} {} -> '{}'",
                    i + 1,
                    entry.description,
                    entry.fragment
                )));
            }
            lines.push(Line::from(""));
        }

        if let Some(target) = ctx.target {
            lines.push(Line::from(vec![Span::styled(
                format!("Computer is aiming for: {target}"),
                INFO_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            let style = if ctx.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::ChoosingSide => "B: Add at beginning | E: Add at end | ESC: Quit",
            TuiState::EnteringLetter(_) => "Type a letter | ESC: Quit",
            TuiState::Waiting => "Computer is thinking...",
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Block until a key press that means something in the current state.
    fn next_action(&mut self) -> Result<KeyAction, io::Error> {
        loop {
            self.draw()?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            debug_log!("next_action() - {:?} in {:?}", key, self.state);
            match interpret_key(self.state, key) {
                KeyAction::Ignored => {}
                KeyAction::Rejected(reason) => self.error_message = reason.to_string(),
                action => return Ok(action),
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_start(&mut self, info: &StartInfo) {
        self.message = format!(
            "Loaded {} words from the {}.",
            info.word_count,
            info.origin.describe()
        );
        self.status = match info.first_player {
            Player::Human => "You move first".to_string(),
            Player::Computer => "The computer moves first".to_string(),
        };
        self.draw_or_log();
    }

    fn display_fragment(&mut self, fragment: &Fragment, to_move: Player) {
        // The loop only moves on once the last move was accepted.
        self.history.settle(true);
        self.fragment = fragment.clone();
        self.state = match to_move {
            Player::Human => TuiState::ChoosingSide,
            Player::Computer => TuiState::Waiting,
        };
        self.status = match to_move {
            Player::Human => "Your turn".to_string(),
            Player::Computer => "Computer's turn".to_string(),
        };
        self.draw_or_log();
    }

    fn read_side(&mut self) -> Option<Side> {
        self.state = TuiState::ChoosingSide;
        self.error_message.clear();
        match self.next_action() {
            Ok(KeyAction::Side(side)) => {
                self.state = TuiState::EnteringLetter(side);
                Some(side)
            }
            Ok(_) => None,
            Err(e) => {
                info_log!("read_side() - Input error: {}", e);
                None
            }
        }
    }

    fn read_letter(&mut self, side: Side) -> Option<String> {
        self.state = TuiState::EnteringLetter(side);
        self.error_message.clear();
        self.status = format!("Type a letter to add at the {}", side.describe());
        let letter = match self.next_action() {
            Ok(KeyAction::Letter(letter)) => letter,
            Ok(_) => return None,
            Err(e) => {
                info_log!("read_letter() - Input error: {}", e);
                return None;
            }
        };
        self.history.propose(HistoryEntry {
            player: Player::Human,
            description: format!("'{letter}' at the {}", side.describe()),
            fragment: match side {
                Side::Begin => format!("{letter}{}", self.fragment),
                Side::End => format!("{}{letter}", self.fragment),
            },
        });
        self.state = TuiState::Waiting;
        Some(letter)
    }

    fn display_computer_move(&mut self, chosen: &ComputerMove) {
        self.history.push(HistoryEntry {
            player: Player::Computer,
            description: chosen.mv.to_string(),
            fragment: chosen.fragment.to_string(),
        });
        self.fragment = chosen.fragment.clone();
        self.target.clone_from(&chosen.target);
        self.message = format!("Computer chose to add {}.", chosen.mv);
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &GameOutcome) {
        self.history.settle(outcome.reason == EndReason::DeadFragment);
        self.state = TuiState::GameOver;
        self.fragment = outcome.fragment.clone();
        self.message = outcome_message(outcome);
        self.status = "Game Over".to_string();
        self.error_message.clear();
        if !holds_result_on_screen(outcome) {
            self.draw_or_log();
            return;
        }
        // Keep the result on screen until a key is pressed.
        loop {
            if self.draw().is_err() {
                return;
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return,
                Ok(_) => {}
                Err(e) => {
                    debug_log!("display_outcome() - Input error: {}", e);
                    return;
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

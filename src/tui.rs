//! Terminal interface for wordle-filter.
//!
//! The player types a guess, marks every letter with `1` (right position),
//! `2` (elsewhere) or `3` (absent), and confirms; the surviving candidates
//! are listed under the board.
//!
//! # State Machine
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → `FeedbackReady`
//! - `GameOver` after a game ends, until `N` or `Esc`

use crate::error::FilterError;
use crate::filter::Feedback;
use crate::game_state::{GameInterface, MAX_ROUNDS, SessionInfo, UserAction};
use crate::wordbank::DEFAULT_WORD_LENGTH;
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
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Unmarked,
    Marked(Feedback),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Unmarked => (Color::DarkGray, Color::White),
            Self::Marked(Feedback::Exact) => (Color::Green, Color::Black),
            Self::Marked(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Marked(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug)]
struct GuessRow {
    letters: Vec<char>,
    states: Vec<LetterState>,
}

impl GuessRow {
    fn from_guess(guess: &str) -> Self {
        let letters: Vec<char> = guess.chars().collect();
        let states = vec![LetterState::Unmarked; letters.len()];
        Self { letters, states }
    }

    /// Feedback for every letter, once all are marked.
    fn feedback(&self) -> Option<Vec<Feedback>> {
        self.states
            .iter()
            .map(|state| match state {
                LetterState::Marked(feedback) => Some(*feedback),
                LetterState::Unmarked => None,
            })
            .collect()
    }
}

#[derive(Debug, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    FeedbackReady,
    GameOver,
}

struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    current_input: &'a str,
    state: &'a TuiState,
    word_length: usize,
    candidates: &'a [String],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    word_length: usize,
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    candidates: Vec<String>,
    message: String,
    error_message: String,
    status: String,
    exit_requested: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("TuiInterface::new() - Terminal ready");

        Ok(Self {
            terminal,
            word_length: DEFAULT_WORD_LENGTH,
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            candidates: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
            exit_requested: false,
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
        let ctx = RenderContext {
            guesses: &self.guesses,
            current_input: &self.current_input,
            state: &self.state,
            word_length: self.word_length,
            candidates: &self.candidates,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait for one key press. `Ok(None)` when the poll timed out or the
    /// event was not a plain key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                    debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c)
                if c.is_ascii_alphabetic() && self.current_input.len() < self.word_length =>
            {
                self.current_input.push(c.to_ascii_lowercase());
            }
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == self.word_length => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Guess submitted: '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message =
                    format!("Guess must be exactly {} letters!", self.word_length);
            }
            KeyCode::Esc => return Some(UserAction::Exit),
            _ => {}
        }
        None
    }

    fn handle_feedback_input(&mut self, key: KeyEvent, marking_index: usize) -> Option<UserAction> {
        self.error_message.clear();
        let last = self.guesses.len().checked_sub(1)?;
        match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) => match Feedback::from_char(c) {
                Some(feedback) => {
                    let Some(state) = self.guesses[last].states.get_mut(marking_index) else {
                        return None;
                    };
                    *state = LetterState::Marked(feedback);
                    self.state = if marking_index + 1 < self.word_length {
                        TuiState::MarkingFeedback {
                            marking_index: marking_index + 1,
                        }
                    } else {
                        TuiState::ConfirmingFeedback
                    };
                }
                None => {
                    self.error_message =
                        format!("Use 1 (right position), 2 (elsewhere) or 3 (absent), not '{c}'");
                }
            },
            KeyCode::Backspace if marking_index > 0 => {
                self.guesses[last].states[marking_index - 1] = LetterState::Unmarked;
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
            }
            _ => {}
        }
        None
    }

    fn handle_confirming_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => {
                self.state = TuiState::FeedbackReady;
                None
            }
            KeyCode::Backspace if self.word_length > 0 => {
                let last_index = self.word_length - 1;
                if let Some(row) = self.guesses.last_mut() {
                    row.states[last_index] = LetterState::Unmarked;
                }
                self.state = TuiState::MarkingFeedback {
                    marking_index: last_index,
                };
                None
            }
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        debug_log!("handle_key() - {:?} in state {:?}", key.code, self.state);
        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::MarkingFeedback { marking_index } => {
                self.handle_feedback_input(key, marking_index)
            }
            TuiState::ConfirmingFeedback => self.handle_confirming_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
            TuiState::FeedbackReady => None,
        }
    }

    /// Draw and dispatch keys until an action is produced or `done` holds.
    fn run_until(&mut self, done: impl Fn(&TuiState) -> bool) -> Option<UserAction> {
        loop {
            if done(&self.state) {
                return None;
            }
            if let Err(e) = self.draw() {
                debug_log!("run_until() - Draw failed: {}", e);
                return Some(UserAction::Exit);
            }
            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_key(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("run_until() - Input error: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn enter_game_over(&mut self, message: String, status: &str) {
        self.state = TuiState::GameOver;
        self.message = message;
        self.status = status.to_string();
        self.draw_or_log();
    }

    fn reset_board(&mut self) {
        self.guesses.clear();
        self.current_input.clear();
        self.candidates.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringGuess;
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Board
            Constraint::Min(8),     // Candidates and messages
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Key help
        ])
        .split(f.area());

    let title = Paragraph::new("WORDLE FILTER")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_board(f, chunks[1], ctx);
    render_info(f, chunks[2], ctx);

    let status = if ctx.status.is_empty() { "Ready" } else { ctx.status };
    let status = Paragraph::new(status)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[3]);

    let help = Paragraph::new(key_help(ctx.state))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

fn key_help(state: &TuiState) -> &'static str {
    match state {
        TuiState::EnteringGuess => "Type your guess | ENTER: Submit | ESC: Quit",
        TuiState::MarkingFeedback { .. } => {
            "1: Right position | 2: Elsewhere | 3: Absent | BACKSPACE: Go back | ESC: Quit"
        }
        TuiState::ConfirmingFeedback => "ENTER: Apply feedback | BACKSPACE: Edit last mark",
        TuiState::FeedbackReady => "Filtering...",
        TuiState::GameOver => "N: New Game | ESC: Quit",
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let showing_input = *ctx.state == TuiState::EnteringGuess && ctx.guesses.len() < MAX_ROUNDS;
    let rows_needed = ctx.guesses.len() + usize::from(showing_input);
    let available_rows = (inner.height / ROW_SPACING) as usize;
    let skip = rows_needed.saturating_sub(available_rows);

    let visible = ctx.guesses.len().saturating_sub(skip);
    for (row_index, guess) in ctx.guesses.iter().skip(skip).enumerate() {
        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in guess.letters.iter().zip(&guess.states) {
            let (bg, fg) = state.colors();
            spans.push(Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg)));
            spans.push(Span::raw(" "));
        }
        if let TuiState::MarkingFeedback { marking_index } = ctx.state
            && row_index + 1 == visible
        {
            spans.push(Span::raw(format!(" <- Marking letter {} (1/2/3)", marking_index + 1)));
        }
        render_line(f, inner, row_index, spans);
    }

    if showing_input {
        let mut spans = vec![Span::raw("  ")];
        let mut typed = ctx.current_input.chars();
        for _ in 0..ctx.word_length {
            let letter = typed.next().unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }
        render_line(f, inner, visible.min(available_rows.saturating_sub(1)), spans);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
    let y = area.y + row_index as u16 * ROW_SPACING;
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = Vec::new();

    if !ctx.candidates.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Possible candidates ({}):", ctx.candidates.len()),
            INFO_STYLE,
        )));
        for word in ctx.candidates.iter().take(MAX_CANDIDATES_DISPLAY) {
            lines.push(Line::from(format!("  {word}")));
        }
        if ctx.candidates.len() > MAX_CANDIDATES_DISPLAY {
            lines.push(Line::from(format!(
                "  ... and {} more",
                ctx.candidates.len() - MAX_CANDIDATES_DISPLAY
            )));
        }
        lines.push(Line::from(""));
    }

    if !ctx.message.is_empty() {
        let style = if *ctx.state == TuiState::GameOver {
            SUCCESS_STYLE
        } else {
            MESSAGE_STYLE
        };
        lines.push(Line::from(Span::styled(ctx.message, style)));
    }
    if !ctx.error_message.is_empty() {
        lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, info: &SessionInfo) {
        if let Some(length) = info.word_length {
            self.word_length = length;
        }
        self.message = format!(
            "{} candidate words loaded. You have {} rounds.",
            info.word_count, info.max_rounds
        );
        self.status = format!("Enter your first {}-letter guess", self.word_length);
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        if self.exit_requested {
            return Some(UserAction::Exit);
        }
        self.state = TuiState::EnteringGuess;
        let action = self.run_until(|_| false);
        if let Some(UserAction::Guess(guess)) = &action {
            self.guesses.push(GuessRow::from_guess(guess));
            self.state = TuiState::MarkingFeedback { marking_index: 0 };
            self.status = format!("Guess entered: {guess} - now mark each letter");
        }
        action
    }

    fn read_feedback(&mut self) -> Option<Vec<Feedback>> {
        match self.run_until(|state| *state == TuiState::FeedbackReady) {
            Some(UserAction::Exit) => {
                self.exit_requested = true;
                None
            }
            Some(_) => None,
            None => {
                self.status = "Feedback recorded".to_string();
                self.guesses.last().and_then(GuessRow::feedback)
            }
        }
    }

    fn display_candidates(&mut self, candidates: &[String], round: usize) {
        self.candidates = candidates.to_vec();
        self.state = TuiState::EnteringGuess;
        self.status = format!("Round {round}: {} candidates remaining", candidates.len());
        self.draw_or_log();
    }

    fn display_filter_error(&mut self, error: &FilterError) {
        self.guesses.pop();
        self.state = TuiState::EnteringGuess;
        self.error_message = format!("Round rejected: {error}");
        self.draw_or_log();
    }

    fn display_no_candidates_message(&mut self) {
        self.enter_game_over(
            "No candidates remain. Check your inputs.".to_string(),
            "Error: No valid candidates found",
        );
    }

    fn display_solution_found(&mut self, solution: &str) {
        self.enter_game_over(
            format!("✓ Solution found: {solution}"),
            &format!("Game Over - Solution: {solution}"),
        );
    }

    fn display_out_of_rounds(&mut self, remaining: usize) {
        self.enter_game_over(
            format!("Out of rounds with {remaining} candidates remaining."),
            "Game Over - Out of rounds",
        );
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.reset_board();
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn play_again(&mut self) -> bool {
        match self.run_until(|_| false) {
            Some(UserAction::NewGame) => true,
            _ => {
                self.exit_requested = true;
                false
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

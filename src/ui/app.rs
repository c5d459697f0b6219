use crate::config::AppConfig;
use crate::error::{GameError, SnapshotError};
use crate::game::{rules, Game, GameOutcome, GameSnapshot};
use crate::storage::{JsonGameRepository, SavedGame};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

pub struct App {
    config: AppConfig,
    repository: JsonGameRepository,
    game: Game,
    /// Id of the save this game was loaded from or last written to.
    save_id: Option<String>,
    selected_column: usize,
    /// Digits typed so far, submitted with Enter.
    column_input: String,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// A fresh game built from the configured settings.
    pub fn new(config: AppConfig, repository: JsonGameRepository) -> Result<Self, GameError> {
        let game = config.game.new_game(&config.ai)?;
        Ok(Self::with_game(config, repository, game, None))
    }

    /// Continue a saved game. Saving again updates the same id.
    pub fn resume(
        config: AppConfig,
        repository: JsonGameRepository,
        saved: SavedGame,
    ) -> Result<Self, SnapshotError> {
        let game = saved.snapshot.restore(&config.ai)?;
        let mut app = Self::with_game(config, repository, game, Some(saved.id));
        app.message = Some(format!(
            "Loaded game {}",
            app.save_id.as_deref().unwrap_or_default()
        ));
        Ok(app)
    }

    fn with_game(
        config: AppConfig,
        repository: JsonGameRepository,
        game: Game,
        save_id: Option<String>,
    ) -> Self {
        let selected_column = game.board().width() / 2;
        App {
            config,
            repository,
            game,
            save_id,
            selected_column,
            column_input: String::new(),
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn save_id(&self) -> Option<&str> {
        self.save_id.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.ai_to_move() {
                self.play_ai_turn();
            } else {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    fn ai_to_move(&self) -> bool {
        !self.game.is_over() && self.game.current().is_ai()
    }

    /// Let the computer player whose turn it is make its move.
    pub fn play_ai_turn(&mut self) {
        if !self.ai_to_move() {
            return;
        }
        let column = self.game.ai_move();
        let name = self.game.current().name().to_string();
        self.apply_move(column);
        if !self.game.is_over() {
            self.message = Some(format!("{name} played column {}", column + 1));
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.column_input.clear();
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                self.column_input.clear();
                if self.selected_column + 1 < self.game.board().width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.column_input.push(c);
                self.message = Some(format!("Column {}", self.column_input));
            }
            KeyCode::Backspace => {
                self.column_input.pop();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.submit_move();
            }
            KeyCode::Char('s') => {
                self.save();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn submit_move(&mut self) {
        if self.game.is_over() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.game.current().is_ai() {
            return;
        }

        let typed = std::mem::take(&mut self.column_input);
        let column = if typed.is_empty() {
            rules::validate_move(&self.game, self.selected_column)
                .map(|()| self.selected_column)
                .map_err(|e| e.to_string())
        } else {
            rules::parse_column(&self.game, &typed)
        };

        match column {
            Ok(column) => {
                self.selected_column = column;
                self.apply_move(column);
            }
            Err(reason) => self.message = Some(reason),
        }
    }

    fn apply_move(&mut self, column: usize) {
        if let Err(e) = self.game.make_move(column) {
            self.message = Some(e.to_string());
            return;
        }
        if let Some(outcome) = self.game.outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner(side) => format!("{} wins!", self.game.player(side).name()),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
            self.finish_saved_game();
        }
    }

    /// A finished game no longer needs its save.
    fn finish_saved_game(&mut self) {
        let Some(id) = self.save_id.take() else {
            return;
        };
        match self.repository.delete(&id) {
            Ok(_) => info!(id = %id, "finished game removed from saves"),
            Err(e) => warn!(id = %id, "could not delete finished save: {e}"),
        }
    }

    fn save(&mut self) {
        let snapshot = GameSnapshot::from_game(&self.game);
        let result = match &self.save_id {
            Some(id) => match self.repository.update(id, &snapshot) {
                Ok(true) => Ok(id.clone()),
                Ok(false) => self.repository.save(&snapshot),
                Err(e) => Err(e),
            },
            None => self.repository.save(&snapshot),
        };
        self.message = Some(match result {
            Ok(id) => {
                let text = format!("Saved as {id}");
                self.save_id = Some(id);
                text
            }
            Err(e) => format!("Save failed: {e}"),
        });
    }

    fn restart(&mut self) {
        match self.config.game.new_game(&self.config.ai) {
            Ok(game) => {
                self.selected_column = game.board().width() / 2;
                self.game = game;
                self.save_id = None;
                self.column_input.clear();
                self.message = Some("New game started!".to_string());
            }
            Err(e) => self.message = Some(format!("Cannot start a new game: {e}")),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game,
            self.selected_column,
            &self.column_input,
            self.message.as_deref(),
        );
    }
}

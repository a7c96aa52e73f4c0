use std::collections::BTreeSet;
use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use pursuit::{
    Cell, GraphEditor, GridGraph, Phase, PlacementOrder, PursuerCount, PursuitGame, Role,
    TurnOutcome,
};
use pursuit_bots::{
    ColumnGuardStrategy, EvaderControl, GreedyChaser, PursuerControl, RandomWalker,
    StrategyError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

#[derive(Parser)]
struct Args {
    /// Number of rows of the grid
    #[arg(long, default_value_t = 8)]
    rows: usize,

    /// Number of columns of the grid
    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Number of pursuers, 1 or 2
    #[arg(long, default_value_t = 2)]
    pursuers: usize,

    /// Let the evader be placed first, also with two pursuers
    #[arg(long, default_value_t = false)]
    evader_first: bool,

    /// RNG seed for the bots
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between moves when playing automatically
    #[arg(long, default_value_t = 300)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let pursuers = PursuerCount::try_from(args.pursuers)?;
    let order = if args.evader_first {
        PlacementOrder::EvaderFirst
    } else {
        PlacementOrder::default_for(pursuers)
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut app = App::new(
        GraphEditor::new(args.rows, args.cols)?,
        pursuers,
        order,
        StdRng::seed_from_u64(seed),
    );
    let tick = Duration::from_millis(args.tick_ms);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut last_tick = Instant::now();
    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        should_quit = handle_events(&mut app)?;
        if app.auto_play && last_tick.elapsed() >= tick {
            app.auto_step();
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn handle_events(app: &mut App) -> std::io::Result<bool> {
    if event::poll(Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == event::KeyEventKind::Press {
                return Ok(app.handle_key(key.code));
            }
        }
    }
    Ok(false)
}

/// A game in progress, with the bots that can take over either side.
struct Match {
    game: PursuitGame,
    pursuers: Box<dyn PursuerControl>,
    evader: RandomWalker,
}

enum Mode {
    Editing {
        editor: GraphEditor,
        removable: BTreeSet<Cell>,
    },
    Playing(Match),
}

struct App {
    mode: Mode,
    cursor: Cell,
    pursuers: PursuerCount,
    order: PlacementOrder,
    rng: StdRng,
    auto_play: bool,
    message: String,
}

impl App {
    fn new(editor: GraphEditor, pursuers: PursuerCount, order: PlacementOrder, rng: StdRng) -> Self {
        let removable = editor.removable_cells().into_iter().collect();
        Self {
            mode: Mode::Editing { editor, removable },
            cursor: Cell::new(0, 0),
            pursuers,
            order,
            rng,
            auto_play: false,
            message: String::from("Remove border cells, then press p to play"),
        }
    }

    fn graph(&self) -> &GridGraph {
        match &self.mode {
            Mode::Editing { editor, .. } => editor.graph(),
            Mode::Playing(m) => m.game.graph(),
        }
    }

    /// Returns true if the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter => self.select(),
            KeyCode::Char('r') => self.erode_one(),
            KeyCode::Char('p') => self.start_game(),
            KeyCode::Char('c') => self.bot_turn(Role::Pursuer(0)),
            KeyCode::Char('e') => self.bot_turn(Role::Evader),
            KeyCode::Char('a') => {
                self.auto_play = !self.auto_play && matches!(self.mode, Mode::Playing(_));
            }
            _ => {}
        }
        false
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let rows = self.graph().rows() as i32;
        let cols = self.graph().cols() as i32;
        self.cursor = Cell::new(
            (self.cursor.row + d_row).clamp(0, rows - 1),
            (self.cursor.col + d_col).clamp(0, cols - 1),
        );
    }

    fn select(&mut self) {
        let cursor = self.cursor;
        self.message = match &mut self.mode {
            Mode::Editing { editor, removable } => match editor.select_cell(cursor) {
                Ok(()) => {
                    *removable = editor.removable_cells().into_iter().collect();
                    format!("Removed {}", cursor)
                }
                Err(err) => err.to_string(),
            },
            Mode::Playing(m) => match m.game.select_cell(cursor) {
                Ok(outcome) => describe_outcome(outcome),
                Err(err) => err.to_string(),
            },
        };
    }

    fn erode_one(&mut self) {
        if let Mode::Editing { editor, removable } = &mut self.mode {
            self.message = if editor.erode_randomly(&mut self.rng, 1) == 1 {
                *removable = editor.removable_cells().into_iter().collect();
                String::from("Removed a random border cell")
            } else {
                String::from("No cell can be removed")
            };
        }
    }

    /// Starts a game on the current region, or restarts it if a game is running.
    fn start_game(&mut self) {
        let graph = self.graph().clone();
        let pursuers: Box<dyn PursuerControl> = match self.pursuers {
            PursuerCount::Two => Box::new(ColumnGuardStrategy::new()),
            PursuerCount::One => Box::new(GreedyChaser::from_seed(self.rng.gen())),
        };
        self.mode = Mode::Playing(Match {
            game: PursuitGame::with_placement_order(graph, self.pursuers, self.order),
            pursuers,
            evader: RandomWalker::from_seed(self.rng.gen()),
        });
        self.auto_play = false;
        self.message = String::from("Game started");
    }

    fn bot_turn(&mut self, side: Role) {
        let Mode::Playing(m) = &mut self.mode else {
            self.message = String::from("Press p to start a game first");
            return;
        };
        let result = match side {
            Role::Pursuer(_) => m.pursuers.act(&mut m.game),
            Role::Evader => m.evader.act(&mut m.game),
        };
        self.message = match result {
            Ok(outcome) => describe_outcome(outcome),
            Err(err) => {
                self.auto_play = false;
                describe_error(&err)
            }
        };
    }

    fn auto_step(&mut self) {
        let Mode::Playing(m) = &self.mode else {
            self.auto_play = false;
            return;
        };
        match m.game.current_role() {
            Some(role) => self.bot_turn(role),
            None => self.auto_play = false,
        }
    }

    /// The character and style for one cell of the board.
    fn glyph(&self, cell: Cell, targets: &BTreeSet<Cell>) -> (char, Style) {
        let plain = Style::new();
        let highlight = Style::new().fg(Color::Yellow);
        let glyph = match &self.mode {
            Mode::Editing { editor, removable } => {
                if removable.contains(&cell) {
                    ('+', highlight)
                } else if editor.graph().contains(cell) {
                    ('·', plain)
                } else {
                    (' ', plain)
                }
            }
            Mode::Playing(m) => {
                let state = m.game.state();
                let pursuer = state.pursuers.iter().position(|&p| p == Some(cell));
                match (pursuer, state.evader == Some(cell)) {
                    (Some(_), true) => ('X', Style::new().fg(Color::Red).bold()),
                    (Some(idx), false) => (
                        char::from_digit(idx as u32 + 1, 10).unwrap_or('P'),
                        Style::new().fg(Color::Blue).bold(),
                    ),
                    (None, true) => ('E', Style::new().fg(Color::Green).bold()),
                    (None, false) if targets.contains(&cell) => ('+', highlight),
                    (None, false) if m.game.graph().contains(cell) => ('·', plain),
                    (None, false) => (' ', plain),
                }
            }
        };
        if cell == self.cursor {
            (glyph.0, glyph.1.add_modifier(Modifier::REVERSED))
        } else {
            glyph
        }
    }

    fn status(&self) -> String {
        match &self.mode {
            Mode::Editing { editor, .. } => {
                format!("Editing, {} cells | {}", editor.graph().len(), self.message)
            }
            Mode::Playing(m) => {
                let snapshot = m.game.snapshot();
                let turn = match snapshot.to_move {
                    _ if snapshot.is_over() => String::from("game over"),
                    Some(role) => format!("{} to play", role),
                    None => String::new(),
                };
                let order = match (snapshot.phase, m.game.placement_order()) {
                    (Phase::Placement, PlacementOrder::PursuersFirst) => ", pursuers first",
                    (Phase::Placement, PlacementOrder::EvaderFirst) => ", evader first",
                    _ => "",
                };
                let auto = if self.auto_play { ", auto" } else { "" };
                format!(
                    "{:?}{}{}, {} moves, {} | {}",
                    snapshot.step, order, auto, snapshot.moves, turn, self.message
                )
            }
        }
    }

    fn ui(&self, frame: &mut Frame) {
        let main_layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ],
        )
        .split(frame.size());
        frame.render_widget(BoardWidget { app: self }, main_layout[0]);
        frame.render_widget(
            Paragraph::new(self.status()).block(Block::bordered().title("Status")),
            main_layout[1],
        );
        let help = match self.mode {
            Mode::Editing { .. } => "arrows: move | enter: remove cell | r: remove random cell | p: play | q: quit",
            Mode::Playing(_) => "arrows: move | enter: select | c: cops' bot | e: evader bot | a: auto play | p: restart | q: quit",
        };
        frame.render_widget(
            Paragraph::new(help).block(Block::bordered().title("Keys")),
            main_layout[2],
        );
    }
}

fn describe_outcome(outcome: TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Continue(step) => format!("Next: {:?}", step),
        TurnOutcome::Captured { pursuer } => format!("Captured by {}", Role::Pursuer(pursuer)),
    }
}

// Joins the error with its sources, so that "the game rejected the bot's choice"
// also says why.
fn describe_error(err: &StrategyError) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(err) = source {
        text += &format!(": {}", err);
        source = std::error::Error::source(err);
    }
    text
}

struct BoardWidget<'a> {
    app: &'a App,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.app.mode {
            Mode::Editing { .. } => "Region",
            Mode::Playing(_) => "Game",
        };
        let block = Block::new()
            .title(title)
            .border_type(BorderType::Rounded)
            .borders(Borders::all());
        let inner = block.inner(area);
        block.render(area, buf);

        let targets = match &self.app.mode {
            Mode::Playing(m) => m
                .game
                .current_role()
                .map(|role| m.game.legal_targets(role))
                .unwrap_or_default(),
            Mode::Editing { .. } => BTreeSet::new(),
        };
        let graph = self.app.graph();
        for row in 0..graph.rows() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            for col in 0..graph.cols() {
                let x = inner.x + 1 + 2 * col as u16;
                if x >= inner.right() {
                    break;
                }
                let (glyph, style) = self.app.glyph(Cell::new(row as i32, col as i32), &targets);
                buf.set_string(x, y, glyph.to_string(), style);
            }
        }
    }
}

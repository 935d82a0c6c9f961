//! Bounce Pomodoro entry point
//!
//! Terminal front end: draws the clock and a character-grid canvas, maps keys
//! to commands, and lets the driver decide when ticks are due.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use glam::IVec2;

use bounce_pomodoro::consts::TICK_INTERVAL;
use bounce_pomodoro::sim::{Phase, Snapshot, WidgetEvent, WidgetState};
use bounce_pomodoro::{Driver, Observer, Settings};

/// Canvas pixels per terminal cell (cells are roughly twice as tall as wide)
const CELL_SIZE: IVec2 = IVec2::new(5, 10);
/// Longest we block on the keyboard before checking the tick source again
const INPUT_POLL: Duration = Duration::from_millis(250);
/// First terminal row of the canvas frame
const CANVAS_TOP: u16 = 4;

#[derive(Parser)]
#[command(author, version, about = "Pomodoro focus/break timer with a bouncing icon")]
struct Args {
    /// JSON settings file (durations, canvas and icon size)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Redraws the whole screen on every published change
struct TerminalView {
    out: Stdout,
    grid: IVec2,
    /// Last phase flip, shown until the next command
    banner: Option<String>,
}

impl TerminalView {
    fn new(out: Stdout, settings: &Settings) -> Self {
        Self {
            out,
            grid: (settings.canvas() / CELL_SIZE).max(IVec2::ONE),
            banner: None,
        }
    }

    fn glyph(rotation_degrees: i32) -> char {
        match rotation_degrees {
            90 => '▲',
            180 => '▶',
            270 => '▼',
            _ => '◀',
        }
    }

    fn draw(&mut self, snap: &Snapshot) -> io::Result<()> {
        let cell = (snap.pos / CELL_SIZE).clamp(IVec2::ZERO, self.grid - IVec2::ONE);
        let state = if snap.running { "running" } else { "paused" };

        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(snap.phase.label()),
            cursor::MoveTo(0, 1),
            Print(format!("Time remaining: {}", snap.formatted)),
            cursor::MoveTo(0, 2),
            Print(format!("[{}]  tilt {}°", state, snap.rendered_rotation))
        )?;

        let border = format!("+{}+", "-".repeat(self.grid.x as usize));
        queue!(self.out, cursor::MoveTo(0, CANVAS_TOP - 1), Print(&border))?;
        for row in 0..self.grid.y {
            let line: String = (0..self.grid.x)
                .map(|col| {
                    if IVec2::new(col, row) == cell {
                        Self::glyph(snap.rotation_degrees)
                    } else {
                        ' '
                    }
                })
                .collect();
            queue!(
                self.out,
                cursor::MoveTo(0, CANVAS_TOP + row as u16),
                Print(format!("|{}|", line))
            )?;
        }

        let footer = CANVAS_TOP + self.grid.y as u16;
        queue!(
            self.out,
            cursor::MoveTo(0, footer),
            Print(&border),
            cursor::MoveTo(0, footer + 1),
            Print("[s] start  [p] pause  [r] reset  [q] quit")
        )?;
        if let Some(banner) = &self.banner {
            queue!(self.out, cursor::MoveTo(0, footer + 2), Print(banner))?;
        }

        self.out.flush()
    }
}

impl Observer for TerminalView {
    fn on_change(&mut self, snapshot: &Snapshot, events: &[WidgetEvent]) {
        for event in events {
            match event {
                WidgetEvent::PhaseChanged { to, .. } => {
                    self.banner = Some(match to {
                        Phase::Focus => "Break is over, back to focus.".to_string(),
                        Phase::Break => "Focus session complete, take a break!".to_string(),
                    });
                }
                WidgetEvent::Started | WidgetEvent::Paused | WidgetEvent::Reset => {
                    self.banner = None;
                }
                WidgetEvent::Bounced { .. } => {}
            }
        }

        if let Err(e) = self.draw(snapshot) {
            log::warn!("Render error: {}", e);
        }
    }
}

/// Key handling and tick pumping until the user quits
fn run(driver: &mut Driver) -> io::Result<()> {
    driver.publish();

    loop {
        let now = Instant::now();
        let timeout = driver
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(INPUT_POLL)
            .min(INPUT_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('s') => driver.start(Instant::now()),
                        KeyCode::Char('p') => driver.pause(),
                        KeyCode::Char('r') => driver.reset(),
                        _ => {}
                    }
                }
            }
        }

        driver.pump(Instant::now());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let state = WidgetState::new(&settings)?;
    log::info!(
        "Bounce Pomodoro starting: {}s focus / {}s break",
        settings.focus_secs,
        settings.break_secs
    );

    let mut driver = Driver::new(state, TICK_INTERVAL);
    driver.subscribe(TerminalView::new(io::stdout(), &settings));

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut driver);

    // Restore the terminal before reporting any error
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result?;
    log::info!("Bounce Pomodoro exiting");
    Ok(())
}

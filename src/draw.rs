use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use tracing::{info, warn};

use crate::{
    error::{LifeError, Result},
    grid::Grid,
    proc::{GridSnapshot, Life},
};

/// Frame delays in milliseconds, fastest first. `j`/`k` move along it.
pub static DELAYS: [u64; 14] = [1, 10, 20, 40, 60, 100, 150, 200, 300, 450, 800, 1200, 1500, 2000];

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub struct Rect {
    w: u16,
    h: u16,
}

impl Rect {
    #[inline]
    pub fn new(width: u16, height: u16) -> Self {
        Rect { w: width, h: height }
    }

    #[inline]
    pub fn term_size() -> Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Rect { w, h })
    }

    /// Characters needed to show `grid` plus the status line.
    pub fn for_grid(grid: &Grid) -> Self {
        let w = 2 * grid.height() + 1;
        let h = grid.width() + 1;
        Rect {
            w: u16::try_from(w).unwrap_or(u16::MAX),
            h: u16::try_from(h).unwrap_or(u16::MAX),
        }
    }

    #[inline]
    pub fn w(&self) -> u16 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> u16 {
        self.h
    }

    #[inline]
    pub fn fits(&self, other: &Rect) -> bool {
        other.w <= self.w && other.h <= self.h
    }
}

/// Heading printed before each generation in plain mode. Turns count from 1.
pub fn turn_header(snapshot: &GridSnapshot) -> String {
    format!("Life as we know it in turn {}:", snapshot.generation() + 1)
}

/// Streams every snapshot of `life` to `out` as plain text. A closed pipe
/// ends the run quietly.
pub fn print_run<W: Write>(life: Life, out: &mut W) -> Result<u64> {
    let mut shown = 0;
    for snapshot in life {
        let snapshot = snapshot?;
        let written = writeln!(out, "{}", turn_header(&snapshot))
            .and_then(|_| write!(out, "{}", snapshot.grid()))
            .and_then(|_| writeln!(out))
            .and_then(|_| out.flush());
        match written {
            Ok(()) => shown += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                info!(shown, "output closed, stopping run");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(shown)
}

/// What the keyboard asked for while waiting between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Interactive terminal view state.
#[derive(Debug)]
pub struct App {
    life: Life,
    pause: bool,
    delay: usize,
}

impl App {
    /// `upd_timeout` is snapped to the nearest entry of [`DELAYS`].
    pub fn new(life: Life, upd_timeout: u64) -> Self {
        let delay = DELAYS
            .iter()
            .enumerate()
            .min_by_key(|(_, d)| d.abs_diff(upd_timeout))
            .map_or(0, |(i, _)| i);
        App {
            life,
            pause: false,
            delay,
        }
    }

    #[inline]
    pub fn pause(&self) -> bool {
        self.pause
    }

    #[inline]
    pub fn upd_timeout(&self) -> u64 {
        DELAYS[self.delay]
    }

    fn faster(&mut self) {
        self.delay = self.delay.saturating_sub(1);
    }

    fn slower(&mut self) {
        self.delay = (self.delay + 1).min(DELAYS.len() - 1);
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Control {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c') => Control::Quit,
                _ => Control::Continue,
            };
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('p') => self.pause = !self.pause,
            KeyCode::Char('j') => self.faster(),
            KeyCode::Char('k') => self.slower(),
            _ => {}
        }
        Control::Continue
    }
}

/// Runs the interactive view until the run ends or the user quits. Returns
/// the number of generations shown.
pub fn run(a: App) -> Result<u64> {
    guarded(runup, || draw(a), shutdown)
}

/// Runs `body` between `setup` and `restore`. `restore` is called whenever
/// `setup` was attempted, including when `setup` itself fails partway.
fn guarded<T>(
    setup: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    if let Err(e) = setup() {
        if let Err(r) = restore() {
            warn!(error = %r, "unable to restore terminal");
        }
        return Err(e);
    }
    let d = body();
    restore()?;
    d
}

fn runup() -> Result<()> {
    execute!(io::stderr(), EnterAlternateScreen, SetTitle("gridlife"), Hide)?;
    terminal::enable_raw_mode()?;
    Ok(())
}

fn shutdown() -> Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen, Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn draw(mut a: App) -> Result<u64> {
    let mut shown = 0u64;
    let mut checked_size = false;

    while let Some(snapshot) = a.life.next() {
        let snapshot = snapshot?;

        if !checked_size {
            checked_size = true;
            let need = Rect::for_grid(snapshot.grid());
            match Rect::term_size() {
                Ok(term) if !term.fits(&need) => warn!(
                    need_w = need.w(),
                    need_h = need.h(),
                    term_w = term.w(),
                    term_h = term.h(),
                    "grid is larger than the terminal, output will be cut"
                ),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "unable to read terminal size"),
            }
        }

        frame(&snapshot, &a)?;
        shown += 1;

        // Stay on this generation while paused; only quit or unpause moves on.
        loop {
            if wait(&mut a)? == Control::Quit {
                info!(shown, "run cancelled");
                return Ok(shown);
            }
            if !a.pause() {
                break;
            }
            frame(&snapshot, &a)?;
        }
    }
    Ok(shown)
}

fn frame(snapshot: &GridSnapshot, a: &App) -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in snapshot.grid().render().lines() {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    let status = format!(
        "gen {}  pop {}  delay {}ms{}  [p]ause [j]faster [k]slower [q]uit",
        snapshot.generation(),
        snapshot.grid().live_count(),
        a.upd_timeout(),
        if a.pause() { "  PAUSED" } else { "" },
    );
    queue!(out, Print(status))?;
    out.flush().map_err(LifeError::from)
}

/// Polls the keyboard for one frame delay.
fn wait(a: &mut App) -> Result<Control> {
    let deadline = Instant::now() + Duration::from_millis(a.upd_timeout());
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(Control::Continue);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                let paused = a.pause();
                if a.handle_key(key.code, key.modifiers) == Control::Quit {
                    return Ok(Control::Quit);
                }
                if paused != a.pause() {
                    return Ok(Control::Continue);
                }
            }
        }
        if Instant::now() >= deadline {
            return Ok(Control::Continue);
        }
    }
}

use std::fmt::Display;
use std::io::{self, Write};
use std::mem;
use std::ops::Deref;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;

use crate::error::{Error, Result, RunError};
use crate::render::{RenderFn, Strategy};
use crate::render_loop::RenderLoop;
use crate::state::{Settings, Shared, UpdateFn};
use crate::style::{single_char, Color, Style};

/// Options controlling what the loader displays and how often.
///
/// Names are validated by [`Loader::with_options`]; see [`Style`] and [`Color`]
/// for the accepted values.
pub struct Options {
    /// Unit shown after the counts, e.g. `(3/10 items)`.
    pub unit: String,
    /// Label printed in front of every frame.
    pub description: String,
    /// Number of cells between the bar brackets.
    pub bar_length: usize,
    /// How long to wait between subsequent repaints.
    /// Defaults to 100 ms.
    pub refresh_period: Duration,
    /// Show the spinner regardless of `style`.
    pub spinner: bool,
    /// One of `bar`, `dots`, `time_clock`. Defaults to `bar`.
    pub style: String,
    /// One of `blue`, `green`, `red`. Defaults to `blue`.
    pub color: String,
    /// Single character for completed bar cells.
    pub fill_char: String,
    /// Single character for remaining bar cells.
    pub empty_char: String,
    /// Emit ANSI escape codes. Defaults to true when stdout is a terminal.
    pub ansi: bool,
    /// Pause after each item in [`Loader::run_over_items`].
    pub item_delay: Duration,
    /// Custom strategy; replaces the spinner and style selection when set.
    pub render: Option<RenderFn>,
    /// Called under the state lock after every update with the new count.
    /// Must not call back into the loader.
    pub on_update: Option<UpdateFn>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            unit: "items".to_string(),
            description: "Progress".to_string(),
            bar_length: 20,
            refresh_period: Duration::from_millis(100),
            spinner: false,
            style: Style::Bar.to_string(),
            color: Color::Blue.to_string(),
            fill_char: "#".to_string(),
            empty_char: " ".to_string(),
            ansi: atty::is(atty::Stream::Stdout),
            item_delay: Duration::from_millis(100),
            render: None,
            on_update: None,
        }
    }
}

enum Phase {
    Created,
    Running(RenderLoop),
    Stopped,
}

/// Tracks a unit-counted task and paints its progress on a single console line.
///
/// A loader moves through three phases: created, running (after [`start`](Loader::start))
/// and stopped (after [`close`](Loader::close)). A stopped loader cannot be restarted.
/// All methods take `&self`, so a loader can be shared between threads reporting progress.
pub struct Loader {
    shared: Arc<Shared>,
    phase: Mutex<Phase>,
    item_delay: Duration,
}

impl Loader {
    /// Creates a loader for `total` units with default options, writing to stdout.
    pub fn new(total: u64) -> Result<Loader> {
        Self::with_options(total, Options::default())
    }

    /// Creates a loader with custom options, writing to stdout.
    pub fn with_options(total: u64, options: Options) -> Result<Loader> {
        Self::with_writer(total, options, io::stdout())
    }

    /// Creates a loader that paints to `out` instead of stdout.
    pub fn with_writer<W>(total: u64, options: Options, out: W) -> Result<Loader>
    where
        W: Write + Send + 'static,
    {
        let style: Style = options.style.parse()?;
        let color: Color = options.color.parse()?;
        let fill_char = single_char(&options.fill_char)
            .ok_or_else(|| Error::InvalidFillChar(options.fill_char.clone()))?;
        let empty_char = single_char(&options.empty_char)
            .ok_or_else(|| Error::InvalidEmptyChar(options.empty_char.clone()))?;
        if total == 0 {
            return Err(Error::InvalidTotal);
        }
        if options.refresh_period.is_zero() {
            return Err(Error::InvalidRefreshInterval);
        }

        let settings = Settings {
            total,
            unit: options.unit,
            description: options.description,
            bar_length: options.bar_length,
            refresh_period: options.refresh_period,
            fill_char,
            empty_char,
            color,
            ansi: options.ansi,
        };
        let strategy = Strategy::select(options.render, options.spinner, style);
        let shared = Shared::new(settings, strategy, options.on_update, Box::new(out));
        Ok(Loader {
            shared: Arc::new(shared),
            phase: Mutex::new(Phase::Created),
            item_delay: options.item_delay,
        })
    }

    /// Starts repainting the status line on a background thread. Returns immediately.
    ///
    /// Fails with [`Error::AlreadyRunning`] if called twice, and with [`Error::Closed`]
    /// after [`close`](Loader::close).
    pub fn start(&self) -> Result<()> {
        let mut phase = self.phase.lock();
        match *phase {
            Phase::Created => {
                *phase = Phase::Running(RenderLoop::spawn(self.shared.clone()));
                debug!("started loader {:?}", self.shared.settings.description);
                Ok(())
            }
            Phase::Running(_) => Err(Error::AlreadyRunning),
            Phase::Stopped => Err(Error::Closed),
        }
    }

    /// Adds `amount` to the completed count and returns the new count.
    ///
    /// Never writes to the output stream; the next tick shows the change.
    /// Allowed in every phase, but only visible while running.
    pub fn update(&self, amount: u64) -> u64 {
        self.shared.add(amount)
    }

    /// Same as `update(1)`.
    pub fn inc(&self) -> u64 {
        self.update(1)
    }

    /// Stops the render thread, waits for it to exit and ends the status line
    /// with a newline. Calling it again does nothing.
    pub fn close(&self) {
        let mut phase = self.phase.lock();
        match mem::replace(&mut *phase, Phase::Stopped) {
            Phase::Running(render_loop) => {
                render_loop.stop();
                self.shared.write_text("\n");
                debug!("closed loader at {}/{}", self.completed(), self.total());
            }
            Phase::Created => self.shared.write_text("\n"),
            Phase::Stopped => {}
        }
    }

    /// Starts the loader and returns a guard that closes it when dropped,
    /// including during unwinding.
    pub fn enter(&self) -> Result<LoaderGuard<'_>> {
        self.start()?;
        Ok(LoaderGuard { loader: self })
    }

    /// Runs `f` between `start` and `close`. The loader is closed on every exit
    /// path of `f`.
    pub fn scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Loader) -> R,
    {
        let guard = self.enter()?;
        Ok(f(&guard))
    }

    /// Calls `f` for each item, counting one unit after each successful call,
    /// then closes the loader.
    ///
    /// Starts the loader if it has not been started yet. The first error
    /// returned by `f` is written to the output stream, the loader is closed and
    /// the error is handed back unchanged; remaining items are skipped.
    pub fn run_over_items<T, E, I, F>(
        &self,
        items: I,
        mut f: F,
    ) -> std::result::Result<(), RunError<E>>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T, &Loader) -> std::result::Result<(), E>,
        E: Display,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return Err(RunError::EmptyInput);
        }
        match self.start() {
            Ok(()) | Err(Error::AlreadyRunning) => {}
            Err(e) => return Err(e.into()),
        }

        for item in items {
            if let Err(e) = f(item, self) {
                self.shared.write_text(&format!("\n{}\n", e));
                self.close();
                return Err(RunError::Item(e));
            }
            self.update(1);
            if !self.item_delay.is_zero() {
                thread::sleep(self.item_delay);
            }
        }
        self.close();
        Ok(())
    }

    /// Formats one frame from the current state without touching the output stream.
    pub fn render_frame(&self) -> String {
        self.shared.render()
    }

    /// Units completed so far.
    pub fn completed(&self) -> u64 {
        self.shared.completed()
    }

    /// Units the task consists of.
    pub fn total(&self) -> u64 {
        self.shared.settings.total
    }

    /// True between `start` and `close`.
    pub fn is_running(&self) -> bool {
        matches!(*self.phase.lock(), Phase::Running(_))
    }

    /// True once `close` has been called.
    pub fn is_closed(&self) -> bool {
        matches!(*self.phase.lock(), Phase::Stopped)
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        if matches!(self.phase.get_mut(), Phase::Running(_)) {
            self.close()
        }
    }
}

/// Keeps a [`Loader`] running for as long as it lives.
pub struct LoaderGuard<'a> {
    loader: &'a Loader,
}

impl Deref for LoaderGuard<'_> {
    type Target = Loader;
    fn deref(&self) -> &Self::Target {
        self.loader
    }
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        self.loader.close()
    }
}

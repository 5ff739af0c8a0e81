//! State shared between a [`Loader`](crate::Loader) and its render thread.

use std::io::Write;
use std::time::Duration;

use ansi_escapes::EraseEndLine;
use log::warn;
use parking_lot::Mutex;

use crate::render::{Frame, Strategy, SPINNER_FRAMES};
use crate::style::Color;

/// Called after every update with the new completed count.
pub type UpdateFn = Box<dyn Fn(u64) + Send + Sync>;

/// Validated construction parameters. Never change after construction.
pub(crate) struct Settings {
    pub total: u64,
    pub unit: String,
    pub description: String,
    pub bar_length: usize,
    pub refresh_period: Duration,
    pub fill_char: char,
    pub empty_char: char,
    pub color: Color,
    pub ansi: bool,
}

struct Counters {
    completed: u64,
    spinner_index: usize,
    out: Box<dyn Write + Send>,
}

pub(crate) struct Shared {
    pub settings: Settings,
    strategy: Strategy,
    on_update: Option<UpdateFn>,
    counters: Mutex<Counters>,
}

impl Shared {
    pub fn new(
        settings: Settings,
        strategy: Strategy,
        on_update: Option<UpdateFn>,
        out: Box<dyn Write + Send>,
    ) -> Shared {
        Shared {
            settings,
            strategy,
            on_update,
            counters: Mutex::new(Counters {
                completed: 0,
                spinner_index: 0,
                out,
            }),
        }
    }

    /// Adds `amount` to the completed count and notifies the update callback,
    /// both under the lock.
    pub fn add(&self, amount: u64) -> u64 {
        let mut counters = self.counters.lock();
        counters.completed = counters.completed.saturating_add(amount);
        if let Some(on_update) = &self.on_update {
            on_update(counters.completed);
        }
        counters.completed
    }

    pub fn completed(&self) -> u64 {
        self.counters.lock().completed
    }

    pub fn render(&self) -> String {
        let counters = self.counters.lock();
        self.format(&counters)
    }

    /// Repaints the status line in place and advances the spinner.
    /// The write happens under the lock, so it never interleaves with an update.
    pub fn tick(&self) {
        let mut counters = self.counters.lock();
        let line = self.format(&counters);
        let out = &mut counters.out;
        let result = if self.settings.ansi {
            write!(out, "\r{}{}", line, EraseEndLine)
        } else {
            write!(out, "\r{}", line)
        }
        .and_then(|_| out.flush());
        if let Err(e) = result {
            warn!("failed to draw status line: {}", e);
        }
        counters.spinner_index = (counters.spinner_index + 1) % SPINNER_FRAMES.len();
    }

    /// Writes raw text to the output stream, e.g. the final newline.
    pub fn write_text(&self, text: &str) {
        let mut counters = self.counters.lock();
        let result = counters
            .out
            .write_all(text.as_bytes())
            .and_then(|_| counters.out.flush());
        if let Err(e) = result {
            warn!("failed to write to output stream: {}", e);
        }
    }

    fn format(&self, counters: &Counters) -> String {
        let s = &self.settings;
        let frame = Frame {
            completed: counters.completed,
            total: s.total,
            unit: &s.unit,
            description: &s.description,
            bar_length: s.bar_length,
            fill_char: s.fill_char,
            empty_char: s.empty_char,
            color: s.color,
            ansi: s.ansi,
            spinner_index: counters.spinner_index,
        };
        self.strategy.render(&frame)
    }
}

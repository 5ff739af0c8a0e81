//! Formatting of a single status line from a snapshot of the loader state.
//!
//! Every built-in strategy is a pure function of [`Frame`]. The strategy used by a
//! loader is chosen once, at construction: a custom [`RenderFn`] wins, then the
//! spinner flag, then the configured [`Style`].

use std::iter;

use crate::style::{Color, Style};

/// Symbols the spinner cycles through, one per tick.
pub const SPINNER_FRAMES: [char; 4] = ['-', '\\', '|', '/'];

/// Clock faces, indexed by how far the task has progressed.
pub const CLOCK_FACES: [&str; 22] = [
    "🕝", "🕞", "🕟", "🕠", "🕡", "🕢", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕛", "🕧", "🕜", "🕣",
    "🕘", "🕤", "🕙", "🕥", "🕚", "🕦",
];

/// User supplied strategy. Replaces the built-in selection entirely.
pub type RenderFn = Box<dyn Fn(&Frame<'_>) -> String + Send + Sync>;

/// A consistent view of the loader state, taken under its lock.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub completed: u64,
    pub total: u64,
    pub unit: &'a str,
    pub description: &'a str,
    pub bar_length: usize,
    pub fill_char: char,
    pub empty_char: char,
    pub color: Color,
    /// Whether ANSI color codes may be emitted.
    pub ansi: bool,
    /// Position in [`SPINNER_FRAMES`]; advanced by the render loop.
    pub spinner_index: usize,
}

impl Frame<'_> {
    /// Percentage of `total` done, rounded down. Exceeds 100 when `completed > total`.
    pub fn percentage(&self) -> u128 {
        scaled(self.completed, self.total, 100)
    }
}

/// `floor(completed / total * scale)` in exact integer arithmetic.
fn scaled(completed: u64, total: u64, scale: u64) -> u128 {
    u128::from(completed) * u128::from(scale) / u128::from(total.max(1))
}

/// A bar past its total grows to at most this many times `bar_length`.
pub const MAX_OVERFLOW: usize = 2;

/// Number of fill cells in a bar of `bar_length` cells.
///
/// Not clamped to `bar_length`: an overflowed task shows a longer bar, up to
/// [`MAX_OVERFLOW`] times its length.
pub fn filled_cells(completed: u64, total: u64, bar_length: usize) -> usize {
    let cap = bar_length.saturating_mul(MAX_OVERFLOW);
    let cells = scaled(completed, total, bar_length as u64);
    usize::try_from(cells).map_or(cap, |cells| cells.min(cap))
}

/// Index into [`CLOCK_FACES`], always in `0..22`.
pub fn clock_index(completed: u64, total: u64) -> usize {
    (scaled(completed, total, CLOCK_FACES.len() as u64) % CLOCK_FACES.len() as u128) as usize
}

/// `desc: [####    ] 50% (5/10 items)`, colored around the brackets.
pub fn bar(frame: &Frame<'_>) -> String {
    let filled = filled_cells(frame.completed, frame.total, frame.bar_length);
    let empty = frame.bar_length.saturating_sub(filled);
    let cells: String = iter::repeat(frame.fill_char)
        .take(filled)
        .chain(iter::repeat(frame.empty_char).take(empty))
        .collect();
    let bar = format!("[{}]", cells);
    let bar = if frame.ansi {
        frame.color.paint(&bar)
    } else {
        bar
    };
    format!(
        "{}: {} {}% ({}/{} {})",
        frame.description,
        bar,
        frame.percentage(),
        frame.completed,
        frame.total,
        frame.unit
    )
}

/// `desc: -`, one of [`SPINNER_FRAMES`] picked by the tick count.
pub fn spinner(frame: &Frame<'_>) -> String {
    let symbol = SPINNER_FRAMES[frame.spinner_index % SPINNER_FRAMES.len()];
    format!("{}: {}", frame.description, symbol)
}

/// `desc: ..`, with `completed % 4` dots.
pub fn dots(frame: &Frame<'_>) -> String {
    let count = (frame.completed % 4) as usize;
    format!("{}: {}", frame.description, ".".repeat(count))
}

/// `desc: 🕝`, a clock face from [`CLOCK_FACES`].
pub fn clock(frame: &Frame<'_>) -> String {
    let face = CLOCK_FACES[clock_index(frame.completed, frame.total)];
    format!("{}: {}", frame.description, face)
}

/// The strategy a loader renders with.
pub(crate) enum Strategy {
    Bar,
    Spinner,
    Dots,
    Clock,
    Custom(RenderFn),
}

impl Strategy {
    pub(crate) fn select(custom: Option<RenderFn>, spinner: bool, style: Style) -> Strategy {
        match (custom, spinner, style) {
            (Some(f), _, _) => Strategy::Custom(f),
            (None, true, _) => Strategy::Spinner,
            (None, false, Style::Bar) => Strategy::Bar,
            (None, false, Style::Dots) => Strategy::Dots,
            (None, false, Style::TimeClock) => Strategy::Clock,
        }
    }

    pub(crate) fn render(&self, frame: &Frame<'_>) -> String {
        match self {
            Strategy::Bar => bar(frame),
            Strategy::Spinner => spinner(frame),
            Strategy::Dots => dots(frame),
            Strategy::Clock => clock(frame),
            Strategy::Custom(f) => f(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(completed: u64, total: u64) -> Frame<'static> {
        Frame {
            completed,
            total,
            unit: "items",
            description: "Progress",
            bar_length: 20,
            fill_char: '#',
            empty_char: ' ',
            color: Color::Blue,
            ansi: false,
            spinner_index: 0,
        }
    }

    fn cells(line: &str) -> (usize, usize) {
        let start = line.find('[').unwrap() + 1;
        let end = line.find(']').unwrap();
        let inner = &line[start..end];
        (
            inner.chars().filter(|c| *c == '#').count(),
            inner.chars().filter(|c| *c == ' ').count(),
        )
    }

    #[test]
    fn bar_fill_matches_floor_and_keeps_length() {
        for total in [1, 3, 7, 10, 100, 333] {
            for completed in 0..=total {
                let line = bar(&frame(completed, total));
                let (filled, empty) = cells(&line);
                assert_eq!(filled as u64, completed * 20 / total, "{}/{}", completed, total);
                assert_eq!(filled + empty, 20);
            }
        }
    }

    #[test]
    fn bar_layout() {
        assert_eq!(
            bar(&frame(5, 10)),
            "Progress: [##########          ] 50% (5/10 items)"
        );
    }

    #[test]
    fn bar_is_colored_only_around_brackets() {
        let mut f = frame(1, 2);
        f.ansi = true;
        f.color = Color::Green;
        assert_eq!(
            bar(&f),
            "Progress: \x1b[92m[##########          ]\x1b[0m 50% (1/2 items)"
        );
    }

    #[test]
    fn bar_overflows_when_completed_exceeds_total() {
        let line = bar(&frame(15, 10));
        let (filled, empty) = cells(&line);
        assert_eq!(filled, 30);
        assert_eq!(empty, 0);
        assert!(line.contains("150% (15/10 items)"));
    }

    #[test]
    fn huge_overflow_is_bounded() {
        let line = bar(&frame(u64::MAX, 1));
        let (filled, empty) = cells(&line);
        assert_eq!(filled, 20 * MAX_OVERFLOW);
        assert_eq!(empty, 0);
        assert!(line.contains(" 1844674407370955161500% (18446744073709551615/1 items)"));
        assert_eq!(frame(u64::MAX, 1).percentage(), 1_844_674_407_370_955_161_500);
    }

    #[test]
    fn spinner_cycles_through_four_symbols() {
        let mut f = frame(0, 10);
        let symbols: Vec<String> = (0..5)
            .map(|i| {
                f.spinner_index = i;
                spinner(&f)
            })
            .collect();
        assert_eq!(
            symbols,
            ["Progress: -", "Progress: \\", "Progress: |", "Progress: /", "Progress: -"]
        );
    }

    #[test]
    fn dots_count_ignores_total() {
        for total in [1, 4, 50] {
            for completed in 0..12 {
                let line = dots(&frame(completed, total));
                let count = line.chars().filter(|c| *c == '.').count();
                assert_eq!(count as u64, completed % 4);
            }
        }
    }

    #[test]
    fn clock_index_is_bounded_and_monotonic_below_total() {
        let total = 97;
        let mut previous = 0;
        for completed in 0..total {
            let index = clock_index(completed, total);
            assert!(index < CLOCK_FACES.len());
            assert!(index >= previous);
            previous = index;
        }
        assert_eq!(clock_index(total, total), 0);
        assert_eq!(clock(&frame(0, 10)), "Progress: 🕝");
    }

    #[test]
    fn custom_strategy_overrides_spinner_and_style() {
        let custom: RenderFn = Box::new(|f: &Frame<'_>| format!("{} of {}", f.completed, f.total));
        let strategy = Strategy::select(Some(custom), true, Style::Dots);
        assert_eq!(strategy.render(&frame(3, 9)), "3 of 9");
    }

    #[test]
    fn spinner_flag_overrides_style() {
        let strategy = Strategy::select(None, true, Style::TimeClock);
        assert!(matches!(strategy, Strategy::Spinner));
    }
}

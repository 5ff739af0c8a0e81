//! # throttle
//!
//! This crate displays the progress of a unit-counted task on a single terminal line,
//! repainting it periodically while the task runs.
//!
//! A [`Loader`] owns the progress counter and a background thread. Foreground code
//! reports work with [`Loader::update`]; the background thread snapshots the counter
//! at a fixed refresh period, formats it and overwrites the current console line.
//! Updates never write to the terminal themselves, so they stay cheap no matter how
//! often they are made.
//!
//! Four built-in displays are available: a bar, a spinner, dots and a clock face.
//! A custom formatting function can replace them entirely, see [`Options::render`].
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use throttle::{Loader, Options};
//!
//! let options = Options {
//!     description: "Copying".to_string(),
//!     color: "green".to_string(),
//!     item_delay: Duration::ZERO,
//!     ..Default::default()
//! };
//! let loader = Loader::with_options(3, options).unwrap();
//!
//! // Starts the render thread, closes the loader when the closure returns:
//! loader.scope(|loader| {
//!     for _ in 0..3 {
//!         loader.update(1);                  // shows 33%, 66%, 100%
//!     }
//! }).unwrap();
//! assert!(loader.is_closed());
//!
//! // Invalid names are rejected up front:
//! let options = Options { style: "pie".to_string(), ..Default::default() };
//! assert!(Loader::with_options(3, options).is_err());
//! ```
//!
//! ## Processing a list
//! ```rust
//! use std::time::Duration;
//! use throttle::{Loader, Options, RunError};
//!
//! let options = Options { item_delay: Duration::ZERO, ..Default::default() };
//! let loader = Loader::with_options(3, options).unwrap();
//! let result = loader.run_over_items(["a", "b", "c"], |name, _| {
//!     if name == "b" { Err(format!("cannot process {}", name)) } else { Ok(()) }
//! });
//! assert_eq!(result, Err(RunError::Item("cannot process b".to_string())));
//! assert_eq!(loader.completed(), 1);
//! ```

pub mod error;
pub mod render;
pub mod style;

mod loader;
mod render_loop;
mod state;

pub use error::{Error, Result, RunError};
pub use loader::{Loader, LoaderGuard, Options};
pub use render::{Frame, RenderFn};
pub use state::UpdateFn;
pub use style::{Color, Style};

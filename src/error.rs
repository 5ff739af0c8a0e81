use thiserror::Error;

use crate::style::{Color, Style};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by [`Loader`](crate::Loader) construction and lifecycle calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid style: {0}; valid styles are: {valid}", valid = Style::NAMES.join(", "))]
    InvalidStyle(String),

    #[error("invalid color: {0}; valid colors are: {valid}", valid = Color::NAMES.join(", "))]
    InvalidColor(String),

    #[error("invalid fill char: {0:?}; fill character must be a single character")]
    InvalidFillChar(String),

    #[error("invalid empty char: {0:?}; empty character must be a single character")]
    InvalidEmptyChar(String),

    #[error("total must be greater than zero")]
    InvalidTotal,

    #[error("refresh period must be greater than zero")]
    InvalidRefreshInterval,

    #[error("loader is already running")]
    AlreadyRunning,

    #[error("loader has been closed")]
    Closed,
}

/// Failure of [`Loader::run_over_items`](crate::Loader::run_over_items).
///
/// `Item` carries the error returned by the per-item callback, unchanged.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunError<E> {
    #[error("no items to process")]
    EmptyInput,

    #[error(transparent)]
    Loader(#[from] Error),

    #[error("{0}")]
    Item(E),
}

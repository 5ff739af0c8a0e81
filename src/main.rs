use clap::{CommandFactory, Parser, ValueEnum};
use throttle::{Loader, Options, Style};

/// Throttle: a progress loader for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "throttle",
    version,
    after_help = "Example usage:\n  throttle --loader bar --percentage 50\n  throttle --loader spinner --percentage 75"
)]
struct Cli {
    /// Type of loader to display
    #[arg(long, value_enum)]
    loader: Option<LoaderKind>,

    /// Progress percentage; how much of the task is completed
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=100))]
    percentage: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LoaderKind {
    /// A rotating spinner
    Spinner,
    /// A progress bar
    Bar,
    /// Dots indicating progress
    Dots,
    /// A clock face indicating progress
    #[value(name = "time_clock")]
    TimeClock,
}

impl LoaderKind {
    fn options(self) -> Options {
        let (spinner, style) = match self {
            LoaderKind::Spinner => (true, Style::Bar),
            LoaderKind::Bar => (false, Style::Bar),
            LoaderKind::Dots => (false, Style::Dots),
            LoaderKind::TimeClock => (false, Style::TimeClock),
        };
        Options {
            spinner,
            style: style.to_string(),
            ..Default::default()
        }
    }
}

/// Renders the single frame shown for `kind` at `percentage` percent.
fn frame(kind: LoaderKind, percentage: u64) -> throttle::Result<String> {
    let loader = Loader::with_options(100, kind.options())?;
    loader.update(percentage);
    Ok(loader.render_frame())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match (cli.loader, cli.percentage) {
        (Some(kind), Some(percentage)) => match frame(kind, percentage) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
        },
        _ => {
            if let Err(e) = Cli::command().print_help() {
                eprintln!("error: {}", e);
            }
        }
    }
}

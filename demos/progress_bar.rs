use std::thread;
use std::time::Duration;

use throttle::{Loader, Options};

fn process(item: u32, _loader: &Loader) -> Result<(), String> {
    thread::sleep(Duration::from_millis(200));
    if item > 10 {
        return Err(format!("item {} is out of range", item));
    }
    Ok(())
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let loader = Loader::with_options(10, options)?;
    loader.run_over_items(1..=10, process)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    run(Options {
        description: "Processing data".to_string(),
        ..Default::default()
    })?;

    run(Options {
        description: "Processing data".to_string(),
        spinner: true,
        ..Default::default()
    })?;

    run(Options {
        description: "Processing data".to_string(),
        style: "dots".to_string(),
        fill_char: "*".to_string(),
        empty_char: ".".to_string(),
        ..Default::default()
    })?;

    // Driving the loader by hand from another thread:
    let loader = Loader::with_options(
        5,
        Options {
            description: "Loading".to_string(),
            color: "green".to_string(),
            ..Default::default()
        },
    )?;
    loader.start()?;
    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..5 {
                loader.update(1);
                thread::sleep(Duration::from_millis(300));
            }
        });
    });
    loader.close();

    let loader = Loader::with_options(
        50,
        Options {
            description: "Copying".to_string(),
            color: "red".to_string(),
            fill_char: "█".to_string(),
            empty_char: "░".to_string(),
            bar_length: 40,
            ..Default::default()
        },
    )?;
    loader.scope(|loader| {
        for _ in 0..50 {
            loader.update(1);
            thread::sleep(Duration::from_millis(40));
        }
    })?;

    run(Options {
        description: "Time Clock Progress".to_string(),
        style: "time_clock".to_string(),
        ..Default::default()
    })?;
    Ok(())
}

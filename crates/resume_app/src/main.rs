use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use engine_logging::{engine_info, engine_warn};
use resume_app::{
    candidate_from_path, initialize_logging, parse_command, render, AppConfig, Command,
    SubmissionController, CONFIG_FILENAME, HELP,
};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = AppConfig::resolve(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    initialize_logging(config.log_destination, &config.log_file);
    engine_info!("resume_app starting, endpoint={}", config.endpoint);

    let mut controller = SubmissionController::new(config.upload_settings());

    // Stdin is read on its own thread so `cancel` gets through while uploading.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{HELP}");
    print_view(&controller);

    let tick = Duration::from_millis(75);
    loop {
        match line_rx.recv_timeout(tick) {
            Ok(line) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => apply(&mut controller, command),
                Err(err) => println!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed (piped script): let the last attempt finish.
                let limit = Duration::from_secs(config.request_timeout_secs.saturating_add(1));
                if !controller.wait_for_outcome(limit) {
                    controller.cancel();
                }
                print_view(&controller);
                break;
            }
        }

        controller.pump();
        if controller.consume_dirty() {
            print_view(&controller);
        }
    }

    engine_info!("resume_app exiting");
    Ok(())
}

fn apply(controller: &mut SubmissionController, command: Command) {
    match command {
        Command::Select(Some(path)) => match candidate_from_path(&path) {
            Ok(candidate) => controller.select_file(Some(candidate)),
            Err(err) => {
                engine_warn!("Cannot open {:?}: {}", path, err);
                println!("cannot open {}: {err}", path.display());
                controller.select_file(None);
            }
        },
        Command::Select(None) => controller.select_file(None),
        Command::Format(format) => controller.set_format(format),
        Command::Submit => controller.submit(),
        Command::Cancel => controller.cancel(),
        Command::Reset => controller.reset(),
        Command::Dismiss => controller.dismiss_alert(),
        Command::Status => print_view(controller),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn print_view(controller: &SubmissionController) {
    let stamp = Local::now().format("%H:%M:%S");
    for line in render(&controller.view()) {
        println!("[{stamp}] {line}");
    }
}

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info, engine_warn};
use search_core::{update, AppState, Msg};

use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui::commands::{parse_command, Command};
use super::ui::constants::{HELP_TEXT, PROMPT};
use super::{logging, persistence, ui};

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load(Path::new(CONFIG_FILENAME)).context("loading configuration")?;
    logging::initialize(config.log_destination);
    engine_info!("Starting search_app against {}", config.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner =
        EffectRunner::new(&config, msg_tx.clone()).context("starting request engine")?;

    let mut state = AppState::with_input_term(config.default_query.clone());
    match persistence::load_last_term(&config.state_dir) {
        Ok(Some(term)) => {
            let _ = msg_tx.send(Msg::RestoreSearchTerm(term));
        }
        Ok(None) => {}
        Err(err) => engine_warn!(
            "Ignoring persisted state in {:?}: {}",
            config.state_dir,
            err
        ),
    }
    // Search the initial term right away, like a freshly opened page.
    let _ = msg_tx.send(Msg::Submitted);

    spawn_input_reader(msg_tx);

    while let Ok(msg) = msg_rx.recv() {
        let is_teardown = msg == Msg::Teardown;
        engine_debug!("Dispatch {:?}", msg);
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            print_view(&state)?;
        }
        if is_teardown {
            break;
        }
    }

    engine_info!("Session ended");
    Ok(())
}

fn print_view(state: &AppState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out)?;
    for line in ui::render::render(&state.view()) {
        writeln!(out, "{line}")?;
    }
    write!(out, "{PROMPT}")?;
    out.flush()
}

/// Reads commands from stdin until `:quit` or end of input.
fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                None => continue,
                Some(Command::Help) => println!("{HELP_TEXT}"),
                Some(Command::Unknown(text)) => {
                    println!("Unknown command {text:?}, try :help");
                }
                Some(command) => {
                    let quit = command == Command::Quit;
                    for msg in command.into_msgs() {
                        if msg_tx.send(msg).is_err() {
                            return;
                        }
                    }
                    if quit {
                        return;
                    }
                }
            }
        }
        let _ = msg_tx.send(Msg::Teardown);
    });
}

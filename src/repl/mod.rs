//! Interactive REPL acting as the kernel controller
//!
//! Lines starting with `%` drive the kernel lifecycle:
//! - `%start` / `%stop`: spawn or join the worker
//! - `%reset`: restart from the startup environment
//! - `%exit`: leave (so does end of input)
//!
//! Anything else is sent to the kernel and the response printed. Ctrl-C
//! while a request is running interrupts it.

pub mod config;
pub mod helper;

use std::fs;
use std::io;
use std::thread;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::{debug, warn};

use crate::backend::kernel::{Interrupter, Kernel, Response};

pub use config::ReplConfig;
pub use helper::{check_completeness, Completeness, PlotscriptHelper};

/// A `%` line understood by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Exit,
    Unknown(String),
}

impl Command {
    /// `None` when `line` is a program rather than a command.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if !line.starts_with('%') {
            return None;
        }
        Some(match line {
            "%start" => Command::Start,
            "%stop" => Command::Stop,
            "%reset" => Command::Reset,
            "%exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        })
    }
}

/// Text printed for a kernel response: the error if any, else the value.
pub fn format_response(response: &Response) -> String {
    let (exp, error) = response;
    if error.is_empty() {
        exp.to_string()
    } else {
        error.clone()
    }
}

/// Apply a command to the kernel. Returns `false` when the REPL should quit.
pub fn execute_command(kernel: &mut Kernel, command: &Command) -> bool {
    let outcome = match command {
        Command::Start => kernel.start(),
        Command::Stop => kernel.stop(),
        Command::Reset => kernel.reset(),
        Command::Exit => return false,
        Command::Unknown(name) => {
            eprintln!("Error: unknown command {}", name);
            return true;
        }
    };
    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
    }
    true
}

/// Listen for Ctrl-C on a background thread and forward it to the kernel.
///
/// A Ctrl-C with no request in flight is dropped here; at the prompt the
/// line editor sees it itself.
fn spawn_interrupt_listener(interrupter: Interrupter) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("plotscript-sigint".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    if interrupter.interrupt() {
                        debug!("Ctrl-C while evaluating, interrupting kernel");
                    }
                }
            })
        })?;
    Ok(())
}

/// Run the REPL until `%exit` or end of input.
///
/// `startup` is the program the kernel environment was built from; its
/// definitions are offered for completion.
pub fn run_repl(
    kernel: &mut Kernel,
    config: &ReplConfig,
    startup: &str,
) -> Result<(), ReadlineError> {
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.history_size)?
        .auto_add_history(false)
        .build();
    let mut rl: Editor<PlotscriptHelper, DefaultHistory> = Editor::with_config(editor_config)?;

    let mut helper = PlotscriptHelper::new();
    helper.note_definitions(startup);
    rl.set_helper(Some(helper));

    if let Some(path) = &config.history_file {
        if rl.load_history(path).is_err() {
            debug!(path = %path.display(), "no REPL history loaded");
        }
    }

    if let Err(e) = spawn_interrupt_listener(kernel.interrupt_handle()) {
        warn!(error = %e, "Ctrl-C will not interrupt evaluations");
    }

    if !kernel.is_running() {
        if let Err(e) = kernel.start() {
            eprintln!("Error: {}", e);
        }
    }

    loop {
        let line = match rl.readline(&config.prompt) {
            Ok(line) => line,
            // Ctrl-C at the prompt discards the line
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line)?;
        if let Some(helper) = rl.helper_mut() {
            helper.add_to_history(line.to_string());
        }

        if let Some(command) = Command::parse(line) {
            if !execute_command(kernel, &command) {
                break;
            }
            continue;
        }

        if let Some(helper) = rl.helper_mut() {
            helper.note_definitions(line);
        }

        match kernel.evaluate(line) {
            Ok(response) => println!("{}", format_response(&response)),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if let Some(path) = &config.history_file {
        save_history(&mut rl, path);
    }
    Ok(())
}

fn save_history(rl: &mut Editor<PlotscriptHelper, DefaultHistory>, path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "cannot create history directory");
            return;
        }
    }
    if let Err(e) = rl.save_history(path) {
        warn!(path = %path.display(), error = %e, "failed to save REPL history");
    }
}

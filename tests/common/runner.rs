// Runs the plotscript binary built for this test session

use std::io::Write;
use std::process::{Command, Stdio};

/// Captured result of one binary invocation
#[derive(Debug, Clone)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `plotscript` with `args`, feeding `stdin` to it.
///
/// Logging is silenced and the configuration directory is pointed at an
/// empty location so a developer's own config cannot leak in.
pub fn run_cli(args: &[&str], stdin: &str) -> CliOutput {
    let scratch = std::env::temp_dir().join(format!("plotscript-cli-{}", std::process::id()));

    let mut child = Command::new(env!("CARGO_BIN_EXE_plotscript"))
        .args(args)
        .env("PLOTSCRIPT_LOG", "off")
        .env("XDG_CONFIG_HOME", &scratch)
        .env("XDG_DATA_HOME", &scratch)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("plotscript binary should start");

    if let Some(mut input) = child.stdin.take() {
        input
            .write_all(stdin.as_bytes())
            .expect("stdin should accept input");
    }

    let output = child.wait_with_output().expect("plotscript should exit");
    CliOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

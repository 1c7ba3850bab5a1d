use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn temp_dir(prefix: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut dir = std::env::temp_dir();
    dir.push(format!("inispect_{prefix}_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_file(path: &Path, text: &str) {
    std::fs::write(path, text).unwrap();
}

pub fn run_inispect(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inispect"))
        .args(args)
        .output()
        .unwrap()
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn exit_code(output: &Output) -> i32 {
    output.status.code().unwrap()
}

/// The two-section fixture used across the CLI tests.
pub fn sample_ini(dir: &Path) -> PathBuf {
    let path = dir.join("sample.ini");
    write_file(
        &path,
        "[db]\nhost=localhost\nport=5432\n[cache]\nhost=redis\n",
    );
    path
}

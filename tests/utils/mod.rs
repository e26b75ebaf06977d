#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

const FINCRYPT: &str = env!("CARGO_BIN_EXE_fincrypt");
const TMP_DIR: &str = env!("CARGO_TARGET_TMPDIR");

const LOREM_TEXT: &str = "\
Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim
veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea
commodo consequat.
";

#[derive(Debug)]
pub struct Output {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Write the fixed lorem-ipsum fixture to a fresh file under the test
/// tmp dir and return its path.
pub fn get_text_file(file_name: &str) -> PathBuf {
    let dest = Path::new(TMP_DIR).join(file_name).with_extension("txt");
    std::fs::write(&dest, LOREM_TEXT).unwrap();
    dest
}

/// A fresh, empty directory under the test tmp dir, unique to `name`,
/// so parallel tests don't trip over each other's `public_keys/` and
/// `private_key/`.
pub fn fresh_dir(name: &str) -> PathBuf {
    let dir = Path::new(TMP_DIR).join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Run the compiled `fincrypt` binary with `cwd` as its working
/// directory (so `public_keys/` and `private_key/` resolve there).
pub fn run_in(cwd: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(FINCRYPT);
    command.current_dir(cwd);
    command.env("NO_COLOR", "1");
    command.env_remove("PAGER");

    for arg in args {
        command.arg(arg);
    }

    let output = command.output().unwrap();

    Output {
        exit_code: output.status.code().unwrap(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

pub fn run(args: &[&str]) -> Output {
    run_in(Path::new(TMP_DIR), args)
}

pub fn checksum(path: &Path) -> String {
    let payload = std::fs::read(path).unwrap();
    let hash = blake3::hash(&payload);
    hash.to_hex().to_string()
}

use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI with an isolated HOME so session storage stays in `home`.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_opsdesk"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("OPSDESK_API", api_url);
    cmd.env_remove("OPSDESK_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with an isolated HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with an isolated HOME and expect failure. Returns stderr.
pub fn run_cli_with_env_failure(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Path of the stored session file under `home`.
pub fn session_file(home: &Path) -> std::path::PathBuf {
    home.join("data").join("opsdesk").join("session.json")
}

/// Write a session file as `opsdesk login` against `api_url` would.
pub fn seed_session(home: &Path, token: &str, api_url: &str) {
    let path = session_file(home);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        serde_json::json!({"token": token, "api": api_url, "username": "operator"}).to_string(),
    )
    .unwrap();
}

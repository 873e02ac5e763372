use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::{tempdir, TempDir};

const PROMPT: &str = "Enter password to display notes: ";
const BUILTIN_SECRET: &str = match option_env!("NOTEGATE_SECRET") {
    Some(secret) => secret,
    None => "h",
};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_notegate"))
}

/// A working directory with an isolated config home.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("xdg")).expect("create xdg dir");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_store(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("write store");
        path
    }

    fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.path().join("notegate.toml");
        std::fs::write(&path, contents).expect("write config");
        path
    }

    fn run(&self, args: &[&str], stdin: &[u8]) -> Output {
        let mut child = Command::new(bin())
            .args(args)
            .current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env_remove("NOTEGATE_STORE")
            .env_remove("NOTEGATE_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn notegate");
        if let Some(mut input) = child.stdin.take() {
            // The process may exit before reading stdin.
            let _ = input.write_all(stdin);
        }
        child.wait_with_output().expect("wait for notegate")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_correct_password_reveals_note() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"Buy milk~extra");
    let config = ws.write_config("[access]\nsecret = \"h\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"h\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), format!("{}\nBuy milk\n", PROMPT));
}

#[test]
fn test_builtin_secret_with_default_store() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"remember the milk~");

    let output = ws.run(&[], format!("{}\n", BUILTIN_SECRET).as_bytes());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("remember the milk\n"));
}

#[test]
fn test_prefix_sharing_password_is_rejected() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"Buy milk~");
    let config = ws.write_config("[access]\nsecret = \"h\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"hello\n");

    assert_eq!(output.status.code(), Some(5));
    let out = stdout(&output);
    assert!(out.contains("ERROR! INVALID PASSWORD!"));
    assert!(!out.contains("Buy milk"));
}

#[test]
fn test_truncated_password_is_rejected() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"secret plans~");
    let config = ws.write_config("[access]\nsecret = \"IloveCats\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"Ilove\n");

    assert_eq!(output.status.code(), Some(5));
    assert!(!stdout(&output).contains("secret plans"));
}

#[test]
fn test_overlong_password_is_rejected() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"secret plans~");
    let config = ws.write_config("[access]\nsecret = \"12345678901234\"\n");

    let output = ws.run(
        &["--config", config.to_str().unwrap()],
        b"12345678901234-and-more\n",
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(!stdout(&output).contains("secret plans"));
}

#[test]
fn test_longest_password_with_crlf_reveals_note() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"secret plans~");
    let config = ws.write_config("[access]\nsecret = \"12345678901234\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"12345678901234\r\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("secret plans\n"));
}

#[test]
fn test_missing_store_fails_before_prompt() {
    let ws = Workspace::new();
    let config = ws.write_config("[access]\nsecret = \"h\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"h\n");

    assert_eq!(output.status.code(), Some(3));
    assert!(!stdout(&output).contains(PROMPT));
    assert!(stderr(&output).contains("Note store not found"));
}

#[test]
fn test_empty_note_reveals_empty_content() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"~anything after");
    let config = ws.write_config("[access]\nsecret = \"h\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"h\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), format!("{}\n\n", PROMPT));
}

#[test]
fn test_store_flag_and_config_limits() {
    let ws = Workspace::new();
    let store = ws.write_store("notes.txt", b"abcdefgh");
    let config = ws.write_config("[store]\ncapacity = 4\n\n[access]\nsecret = \"h\"\n");

    let output = ws.run(
        &[
            "--config",
            config.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
        ],
        b"h\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("\nabcd\n"));
    assert!(stderr(&output).contains("truncated"));
}

#[test]
fn test_quiet_suppresses_truncation_warning() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"abcdefgh");
    let config = ws.write_config("[store]\ncapacity = 4\n\n[access]\nsecret = \"h\"\n");

    let output = ws.run(&["--quiet", "--config", config.to_str().unwrap()], b"h\n");

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("\nabcd\n"));
    assert!(!stderr(&output).contains("truncated"));
}

#[test]
fn test_default_config_location_is_read() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"from default config~");
    let config_dir = ws.path().join("xdg").join("notegate");
    std::fs::create_dir_all(&config_dir).expect("create config dir");
    std::fs::write(config_dir.join("config.toml"), "[access]\nsecret = \"pa ss\"\n")
        .expect("write config");

    let output = ws.run(&[], b"pa ss\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("from default config\n"));
}

#[test]
fn test_invalid_secret_config_fails_before_prompt() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"note~");
    let config = ws.write_config("[access]\nsecret = \"this secret is far too long\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap()], b"h\n");

    assert_eq!(output.status.code(), Some(4));
    assert!(!stdout(&output).contains(PROMPT));
    assert!(stderr(&output).contains("secret"));
}

#[test]
fn test_missing_explicit_config_is_not_found() {
    let ws = Workspace::new();
    ws.write_store("user.db", b"note~");

    let output = ws.run(&["--config", "nope.toml"], b"h\n");

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Config file not found"));
}

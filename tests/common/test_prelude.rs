// common/test_prelude.rs

// Re-export commonly used items for CLI tests.
pub use assert_cmd::Command;
pub use predicates::prelude::*;
pub use predicates::str::contains;

/// The `cargo-e-msg` binary with colours disabled.
pub fn msg_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cargo-e-msg").expect("binary should be built");
    cmd.args(["--color", "never"]);
    cmd
}

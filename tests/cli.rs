//! CLI contract tests.

#[path = "main/cli_test.rs"]
mod cli_test;

#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    lesson_games_test_support::logging::init();
}

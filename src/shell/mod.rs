//! Interactive terminal front end.
//!
//! The menu loop reads whitespace-separated answers from any `BufRead` and
//! draws on any `Write`, so it runs the same on stdin/stdout and in tests.

pub mod menu;

pub use menu::Shell;

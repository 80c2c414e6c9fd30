//! Drives the scanner from a file or an interactive prompt and prints what
//! it produced.

pub mod runner;

pub mod git;
pub mod package;
pub mod platform;
pub mod shell;

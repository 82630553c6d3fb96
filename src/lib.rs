pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod menu;
pub mod signal;
pub mod tools;

pub use error::{Result, ToolError, TranscodeError};

use anyhow::Result as AnyResult;
use console::{Term, style};

pub fn pause(term: &Term) -> AnyResult<()> {
    println!("\n{}", style("按 Enter 繼續...").dim());
    term.read_line()?;
    Ok(())
}

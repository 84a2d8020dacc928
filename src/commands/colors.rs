//! Colors command implementation
//!
//! Prints the effective keyword to color table.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ColorList};
use crate::config::ConfigBuilder;
use crate::error::Result;

/// Execute the colors command
pub fn run_colors(config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let config = ConfigBuilder::new().with_file(config_path)?.build();
    let list = ColorList::from(&config.color_table());
    print_output(&list, format)?;
    Ok(())
}

//! Command line arguments

use crate::descriptor::api::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "orgfolder")]
#[command(about = "Organization folder \"New Item\" descriptors")]
#[command(version = crate::core::version::long_version())]
pub struct Args {
    /// Host manifest listing factories and navigator providers
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = crate::app::config::LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Write log records to this file instead of stderr
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Color output control; unspecified means auto (TTY)
    #[arg(short = 'g', long = "color")]
    pub color: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the "New Item" entries visible in a context
    List {
        #[arg(long, value_enum, default_value_t = ContextArg::View)]
        context: ContextArg,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the listing to FILE
        #[arg(long, value_name = "FILE")]
        record: Option<PathBuf>,

        /// Append to an existing record file instead of replacing it
        #[arg(long, requires = "record")]
        append: bool,
    },

    /// Create an organization folder through a descriptor
    Create {
        descriptor_id: String,
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextArg {
    View,
    ViewGroup,
    ItemGroup,
    Other,
}

impl ContextArg {
    pub fn to_context(self) -> Context {
        match self {
            ContextArg::View => Context::View {
                name: "all".to_string(),
            },
            ContextArg::ViewGroup => Context::ViewGroup,
            ContextArg::ItemGroup => Context::ItemGroup {
                name: "root".to_string(),
            },
            ContextArg::Other => Context::Other,
        }
    }
}

//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::editor::Edit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Siteframe payload codec and editor CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file (default: siteframe.toml when present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Suppress log messages on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    /// Skip round-trip verification of serialized payloads
    #[arg(long, global = true)]
    pub no_verify: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Payload source shared by all commands
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Payload file, `-` reads stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Unescape a JSON-escaped payload, print anything else unchanged
    Normalize {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the parsed document as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Rewrite a payload in canonical form
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Only check that the payload is already canonical
        #[arg(long)]
        check: bool,
    },

    /// Serialize a JSON document (as printed by `parse`) back to a payload
    Render {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Apply structured edits and print the resulting payload
    ///
    /// Edits:
    ///   part:<id>.type=<v>              part:<id>.attr.<key>=<v>
    ///   part:<id>.content=<v>           page:<id>.attr.<key>=<v>
    ///   page:<id>.home=<true|false>     block:<page>/<block>.content=<v>
    ///   block:<page>/<block>.attr.<key>=<v>
    #[command(verbatim_doc_comment)]
    Edit {
        #[command(flatten)]
        input: InputArgs,

        /// Edit to apply, in order (repeatable)
        #[arg(short = 'a', long = "apply", value_parser = parse_edit, required = true)]
        edits: Vec<Edit>,
    },

    /// Print call-to-action button copy found in the payload
    Buttons {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Replace text in the raw payload
    Patch {
        #[command(flatten)]
        input: InputArgs,

        /// Exact text to find; the first occurrence is replaced
        #[arg(long, requires = "replace", conflicts_with = "full")]
        search: Option<String>,

        /// Replacement for `--search`
        #[arg(long, requires = "search")]
        replace: Option<String>,

        /// File whose content replaces the whole payload
        #[arg(long, required_unless_present = "search")]
        full: Option<PathBuf>,
    },

    /// Summarize parts, pages and blocks
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Commands {
    pub const fn input(&self) -> &InputArgs {
        match self {
            Self::Normalize { input }
            | Self::Parse { input }
            | Self::Format { input, .. }
            | Self::Render { input }
            | Self::Edit { input, .. }
            | Self::Buttons { input }
            | Self::Patch { input, .. }
            | Self::Stats { input } => input,
        }
    }
}

// ============================================================================
// Edit Parsing
// ============================================================================

/// Parse one `--apply` argument into an [`Edit`].
///
/// Only the first `=` separates target from value, so values may contain `=`.
pub fn parse_edit(arg: &str) -> Result<Edit, String> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected `<target>=<value>`, got `{arg}`"))?;
    let (kind, rest) = target
        .split_once(':')
        .ok_or_else(|| format!("expected `part:`, `page:` or `block:` in `{target}`"))?;
    let (address, field) = rest
        .split_once('.')
        .ok_or_else(|| format!("missing field after id in `{target}`"))?;

    if address.is_empty() {
        return Err(format!("missing id in `{target}`"));
    }

    let value = value.to_owned();
    let attribute = field.strip_prefix("attr.").filter(|key| !key.is_empty());

    match (kind, field, attribute) {
        ("part", "type", _) => Ok(Edit::PartType {
            part: address.to_owned(),
            value,
        }),
        ("part", "content", _) => Ok(Edit::PartContent {
            part: address.to_owned(),
            value,
        }),
        ("part", _, Some(key)) => Ok(Edit::PartAttribute {
            part: address.to_owned(),
            key: key.to_owned(),
            value,
        }),
        ("page", "home", _) => {
            let home = value
                .parse::<bool>()
                .map_err(|_| format!("home must be `true` or `false`, got `{value}`"))?;
            Ok(Edit::PageHome {
                page: address.to_owned(),
                home,
            })
        }
        ("page", _, Some(key)) => Ok(Edit::PageAttribute {
            page: address.to_owned(),
            key: key.to_owned(),
            value,
        }),
        ("block", _, _) => {
            let (page, block) = address
                .split_once('/')
                .filter(|(page, block)| !page.is_empty() && !block.is_empty())
                .ok_or_else(|| format!("block address must be `<page>/<block>`, got `{address}`"))?;
            let (page, block) = (page.to_owned(), block.to_owned());
            match (field, attribute) {
                ("content", _) => Ok(Edit::BlockContent { page, block, value }),
                (_, Some(key)) => Ok(Edit::BlockAttribute {
                    page,
                    block,
                    key: key.to_owned(),
                    value,
                }),
                _ => Err(format!("unknown block field `{field}`")),
            }
        }
        ("part" | "page", _, None) => Err(format!("unknown {kind} field `{field}`")),
        _ => Err(format!("unknown target `{kind}`, expected part, page or block")),
    }
}

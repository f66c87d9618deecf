//! CLI argument parsing using clap derive

use std::path::PathBuf;

use blockedit_core::{BlockQuery, EndRule, Occurrence, Operation, Pattern, Predicate};
use clap::{Args, Parser, Subcommand};

use crate::error::{CliError, Result};

/// blockedit - locate and rewrite named blocks in configuration files
#[derive(Parser, Debug)]
#[command(name = "blockedit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run an edit recipe against a file
    ///
    /// Recipes are TOML, YAML or JSON. The file edited is --file, or the
    /// recipe's `target` resolved against the current directory.
    ///
    /// Examples:
    ///   blockedit apply disable-release.toml
    ///   blockedit apply fix-import.yaml --file android/app/build.gradle.kts --dry-run
    Apply {
        /// Recipe file
        recipe: PathBuf,

        /// File to edit, overriding the recipe's target
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Show the diff without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the blocks a query matches
    Find {
        /// File to search
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,

        /// Show every match instead of the first
        #[arg(long)]
        all: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Apply one operation to a block
    ///
    /// Examples:
    ///   blockedit edit ci.yml --start "- name: Build APK" comment "#"
    ///   blockedit edit ci.yml --start "- name: Patch" --all delete
    Edit {
        /// File to edit
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Show the diff without writing
        #[arg(long)]
        dry_run: bool,

        #[command(subcommand)]
        op: OpCommand,
    },
}

/// How the target block is found
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct QueryArgs {
    /// Text the block's first line starts with (leading whitespace ignored)
    #[arg(short, long, required_unless_present = "start_regex", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Regex the block's first line matches
    #[arg(long, conflicts_with = "start", allow_hyphen_values = true)]
    pub start_regex: Option<String>,

    /// Text the block's last line starts with; without it the block ends
    /// where indentation returns to the start line's level
    #[arg(short, long, allow_hyphen_values = true)]
    pub until: Option<String>,

    /// Leave the --until line out of the block
    #[arg(long, requires = "until")]
    pub exclusive: bool,

    /// Let end of file close an indentation-bounded block
    #[arg(long, conflicts_with = "until")]
    pub close_at_eof: bool,
}

impl QueryArgs {
    pub fn to_query(&self) -> Result<BlockQuery> {
        let start = match (&self.start, &self.start_regex) {
            (_, Some(pattern)) => Predicate::regex(pattern)?,
            (Some(text), None) => Predicate::starts_with(text.as_str()),
            (None, None) => return Err(CliError::user("--start or --start-regex is required")),
        };

        let end = match &self.until {
            Some(text) => EndRule::Until {
                predicate: Predicate::starts_with(text.as_str()),
                inclusive: !self.exclusive,
            },
            None => EndRule::Dedent {
                close_at_eof: self.close_at_eof,
            },
        };

        Ok(BlockQuery { start, end })
    }
}

/// Which matches an edit touches
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeArgs {
    /// Edit every match
    #[arg(long, conflicts_with = "unique")]
    pub all: bool,

    /// Fail unless exactly one block matches
    #[arg(long)]
    pub unique: bool,
}

impl ScopeArgs {
    pub fn occurrence(self) -> Occurrence {
        if self.all {
            Occurrence::All
        } else if self.unique {
            Occurrence::Unique
        } else {
            Occurrence::First
        }
    }
}

/// Operation applied by `blockedit edit`
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OpCommand {
    /// Remove the block
    Delete,
    /// Comment out every uncommented line
    Comment {
        #[arg(default_value = "#")]
        marker: String,
    },
    /// Strip one comment marker from every commented line
    Uncomment {
        #[arg(default_value = "#")]
        marker: String,
    },
    /// Uncomment the block if every line is commented, else comment it
    Toggle {
        #[arg(default_value = "#")]
        marker: String,
    },
    /// Replace the block with TEXT
    Replace {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Insert TEXT before the block
    InsertBefore {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Insert TEXT after the block
    InsertAfter {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Shift the block so its first line is indented WIDTH columns
    Reindent { width: usize },
    /// Replace FIND with REPLACE inside every line of the block
    Substitute {
        #[arg(allow_hyphen_values = true)]
        find: String,
        #[arg(allow_hyphen_values = true)]
        replace: String,
        /// Treat FIND as a regex; REPLACE may use $1 references
        #[arg(long)]
        regex: bool,
    },
}

impl OpCommand {
    /// Fails only for an invalid `--regex` pattern.
    pub fn into_operation(self) -> Result<Operation> {
        let op = match self {
            OpCommand::Delete => Operation::Delete,
            OpCommand::Comment { marker } => Operation::Comment(marker),
            OpCommand::Uncomment { marker } => Operation::Uncomment(marker),
            OpCommand::Toggle { marker } => Operation::CommentToggle(marker),
            OpCommand::Replace { text } => Operation::Replace(text),
            OpCommand::InsertBefore { text } => Operation::InsertBefore(text),
            OpCommand::InsertAfter { text } => Operation::InsertAfter(text),
            OpCommand::Reindent { width } => Operation::Reindent(width),
            OpCommand::Substitute { find, replace, regex: true } => Operation::SubstituteRegex {
                pattern: Pattern::new(&find)?,
                replace,
            },
            OpCommand::Substitute { find, replace, regex: false } => {
                Operation::Substitute { find, replace }
            }
        };
        Ok(op)
    }
}

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, ValueHint};

use crate::domain::Options;

/// Command line access to Google services: picasa, blogger, youtube, docs, contacts, calendar
#[derive(Parser, Debug)]
#[command(name = "google")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "google [OPTIONS] <SERVICE> <TASK> [ARGS]...\n       google [OPTIONS]    (interactive shell)")]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: config.toml on the XDG search path)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, conflicts_with = "config_template")]
    pub show_config: bool,

    /// Print a commented config template and exit
    #[arg(long)]
    pub config_template: bool,

    #[command(flatten)]
    pub task: TaskArgs,
}

/// Options and words of one `service task` command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArgs {
    /// Blogger only - blog other than your primary one
    #[arg(long)]
    pub blog: Option<String>,

    /// Calendar only - calendar other than your primary one
    #[arg(long, visible_alias = "calendar-id")]
    pub cal: Option<String>,

    /// YouTube only - video category, e.g. "Film"
    #[arg(short, long)]
    pub category: Option<String>,

    /// YouTube only - developer tags as a comma-separated list
    #[arg(long, visible_alias = "developer-tags")]
    pub devtags: Option<String>,

    /// Date as YYYY-MM-DD; calendar also takes a range YYYY-MM-DD,YYYY-MM-DD
    #[arg(short, long)]
    pub date: Option<String>,

    /// Delimiter between the fields of list output
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Docs only - editor to use on a file
    #[arg(long)]
    pub editor: Option<String>,

    /// Docs only - folder to upload to / search in
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Docs only - format to download documents as
    #[arg(long)]
    pub format: Option<String>,

    /// Title of the item (a regular expression unless regex is off in the config)
    #[arg(short = 'n', long)]
    pub title: Option<String>,

    /// Docs only - do not convert uploads to the native format
    #[arg(long)]
    pub no_convert: bool,

    /// Password for the user given with --user
    #[arg(short, long)]
    pub password: Option<String>,

    /// Full text query on titles, captions and tags
    #[arg(short, long)]
    pub query: Option<String>,

    /// Description of the upload, or a file containing it
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub summary: Option<String>,

    /// Tags: "a, b" adds, "-a" removes, "--" clears
    #[arg(short, long, allow_hyphen_values = true)]
    pub tags: Option<String>,

    /// User to act as or whose items to show
    #[arg(short, long)]
    pub user: Option<String>,

    /// SERVICE TASK [ARGS...]; no words starts the interactive shell
    #[arg(value_name = "WORDS")]
    pub words: Vec<String>,
}

impl TaskArgs {
    /// Split into the option record and the positional words.
    pub fn into_parts(self) -> (Options, Vec<String>) {
        let options = Options {
            blog: self.blog,
            cal: self.cal,
            category: self.category,
            convert: !self.no_convert,
            date: self.date,
            delimiter: self.delimiter,
            devtags: self.devtags,
            editor: self.editor,
            folder: self.folder,
            format: self.format,
            password: self.password,
            query: self.query,
            summary: self.summary,
            tags: self.tags,
            title: self.title,
            user: self.user,
            encoded_query: None,
        };
        (options, self.words)
    }
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "google", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(flatten)]
    pub task: TaskArgs,
}

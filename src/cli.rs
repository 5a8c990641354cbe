use anstyle::{AnsiColor, Color, Style};
use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::inventory::DEFAULT_EXCLUDE_MARKER;

const fn colored(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub const fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(colored(AnsiColor::Yellow).bold().underline())
        .header(colored(AnsiColor::Yellow).bold().underline())
        .literal(colored(AnsiColor::Green))
        .invalid(colored(AnsiColor::Red).bold())
        .error(colored(AnsiColor::Red).bold())
        .valid(colored(AnsiColor::Green).bold().underline())
        .placeholder(colored(AnsiColor::White))
}

pub trait Process {
    async fn process(self) -> anyhow::Result<i32>;
}

/// Interactive menu to list, empty and delete S3 buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Parser)]
#[clap(version, about, styles=get_styles())]
pub struct Args {
    /// Print shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Credentials profile to use instead of asking for one
    #[arg(long)]
    pub profile: Option<String>,

    /// Buckets whose name contains this marker are left out of the menu
    #[arg(long, env = "BUCKET_UTIL_EXCLUDE", default_value = DEFAULT_EXCLUDE_MARKER)]
    pub exclude: String,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

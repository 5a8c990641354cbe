use anyhow::Context;
use owo_colors::OwoColorize;
use std::io;
use tracing::info;

use crate::cli::{Args, Process};
use crate::helpers::StringExt;
use crate::input::{LineSource, Terminal};
use crate::menu::BANNER;
use crate::repl::Controller;
use crate::s3::{CredentialSource, S3Storage};

pub const DEFAULT_PROFILE: &str = "default";
pub const PROFILE_PROMPT: &str = "Enter your profile name [default]: ";

fn print_banner() {
    for line in BANNER {
        println!("{}", line.cyan());
    }
    println!();
}

/// Ambient credentials win; otherwise use `--profile` or ask for a profile name.
pub async fn resolve_credentials<I: LineSource>(
    ambient: Option<CredentialSource>,
    profile: Option<String>,
    input: &mut I,
) -> io::Result<CredentialSource> {
    if let Some(source) = ambient {
        return Ok(source);
    }

    let name = match profile {
        Some(name) => name,
        None => input.read_line(PROFILE_PROMPT).await?.unwrap_or_default(),
    };

    Ok(CredentialSource::Profile(name.trim().or(DEFAULT_PROFILE)))
}

impl Process for Args {
    async fn process(self) -> anyhow::Result<i32> {
        print_banner();

        let mut input = Terminal::new();
        let source = resolve_credentials(CredentialSource::from_env(), self.profile, &mut input)
            .await
            .context("Could not read the profile name")?;
        println!("{source}");

        let storage = S3Storage::connect(&source)
            .await
            .context("Could not set up the S3 client")?;

        let mut controller = Controller::new(storage, input, io::stdout(), self.exclude);
        controller
            .load()
            .await
            .context("Could not read the bucket listing")?;
        info!(buckets = controller.inventory().len(), "starting menu");

        controller.run().await.context("Terminal I/O failed")?;

        Ok(0)
    }
}

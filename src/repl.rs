use std::io::{self, Write};
use tracing::{debug, warn};

use crate::command::{Command, Verb};
use crate::errors::{BucketUtilError, StorageResult};
use crate::input::LineSource;
use crate::inventory::{Inventory, ObjectCount};
use crate::menu::{USAGE, render};
use crate::purge::{delete_all_objects, list_all_keys};
use crate::storage::StorageAdapter;

pub const PROMPT: &str = "Command: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Running,
    Stopped,
}

/// Phrase completing "Error occurred while ...".
const fn failure_context(verb: &Verb) -> &'static str {
    match verb {
        Verb::Delete => "deleting bucket",
        Verb::List => "listing bucket",
        Verb::Empty => "emptying bucket",
        Verb::Refresh => "refreshing bucket listing",
        Verb::Help | Verb::Quit | Verb::Unknown(_) => "running command",
    }
}

/// The menu loop. Owns the storage handle, the input, the output and the inventory.
pub struct Controller<S, I, W> {
    storage: S,
    input: I,
    out: W,
    exclude_marker: String,
    inventory: Inventory,
}

impl<S: StorageAdapter, I: LineSource, W: Write> Controller<S, I, W> {
    pub fn new<M: Into<String>>(
        storage: S,
        input: I,
        out: W,
        exclude_marker: M,
    ) -> Self {
        Self {
            storage,
            input,
            out,
            exclude_marker: exclude_marker.into(),
            inventory: Inventory::default(),
        }
    }

    #[must_use]
    pub fn with_inventory(
        mut self,
        inventory: Inventory,
    ) -> Self {
        self.inventory = inventory;
        self
    }

    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn input(&self) -> &I {
        &self.input
    }

    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Replace the inventory with a fresh listing from the provider.
    pub async fn load(&mut self) -> StorageResult<()> {
        self.inventory = Inventory::load(&self.storage, &self.exclude_marker).await?;
        debug!(buckets = self.inventory.len(), "inventory loaded");

        Ok(())
    }

    /// Render, read, dispatch until the user quits, input ends or nothing is left.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            if self.inventory.is_empty() {
                writeln!(self.out, "----> There are no buckets to work on <----")?;
                break;
            }

            writeln!(self.out)?;
            for line in render(&self.inventory) {
                writeln!(self.out, "{line}")?;
            }
            self.out.flush()?;

            let Some(line) = self.input.read_line(PROMPT).await? else {
                debug!("input closed");
                break;
            };

            if self.execute(Command::parse(&line)).await? == State::Stopped {
                break;
            }
        }

        writeln!(self.out, "Quitting...")?;
        self.out.flush()
    }

    /// Run one command. Only output failures escape; everything else becomes a status line.
    pub async fn execute(
        &mut self,
        command: Command,
    ) -> io::Result<State> {
        let result = match (&command.verb, command.target) {
            (Verb::Quit, _) => return Ok(State::Stopped),
            (Verb::Help | Verb::Unknown(_), _) => self.usage(),
            (Verb::Refresh, _) => self.refresh().await,
            (Verb::Delete | Verb::List | Verb::Empty, None) => {
                Err(BucketUtilError::MissingTarget(command.verb.name()))
            }
            (Verb::Delete, Some(id)) => self.delete(id).await,
            (Verb::List, Some(id)) => self.list(id).await,
            (Verb::Empty, Some(id)) => self.empty(id).await,
        };

        match result {
            Ok(()) => {}
            Err(BucketUtilError::Io(err)) => return Err(err),
            Err(BucketUtilError::Storage(err)) => {
                warn!(command = command.verb.name(), error = %err, "storage request failed");
                writeln!(
                    self.out,
                    "----> Error occurred while {}: {err} <----",
                    failure_context(&command.verb)
                )?;
            }
            Err(err) => writeln!(self.out, "==> {err} <==")?,
        }

        Ok(State::Running)
    }

    fn usage(&mut self) -> Result<(), BucketUtilError> {
        for line in USAGE {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn done(&mut self) -> Result<(), BucketUtilError> {
        writeln!(self.out, "----> Done <----")?;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), BucketUtilError> {
        writeln!(self.out, "==> Refreshing bucket listing <==")?;
        self.out.flush()?;

        self.load().await?;
        Ok(())
    }

    async fn delete(
        &mut self,
        id: usize,
    ) -> Result<(), BucketUtilError> {
        let bucket = self.inventory.find(id)?.clone();
        if bucket.objects == ObjectCount::Unknown {
            writeln!(
                self.out,
                "==> Cannot delete a bucket with an unknown object count, refresh first <=="
            )?;
            return Ok(());
        }
        if !bucket.objects.is_empty() {
            writeln!(self.out, "==> Cannot delete a non-empty bucket <==")?;
            return Ok(());
        }

        writeln!(self.out, "==> Deleting bucket {}...", bucket.name)?;
        self.out.flush()?;

        self.storage.delete_bucket(&bucket.name).await?;
        self.inventory.remove(id);

        self.done()
    }

    async fn list(
        &mut self,
        id: usize,
    ) -> Result<(), BucketUtilError> {
        let bucket = self.inventory.find(id)?.clone();
        if bucket.objects.is_empty() {
            writeln!(self.out, "==> Cannot list an empty bucket <==")?;
            return Ok(());
        }

        writeln!(self.out, "==> Listing bucket {}...", bucket.name)?;
        self.out.flush()?;

        let keys = list_all_keys(&self.storage, &bucket.name).await?;
        writeln!(self.out, "{} objects found", keys.len())?;
        for key in &keys {
            writeln!(self.out, " - {key}")?;
        }

        self.done()
    }

    async fn empty(
        &mut self,
        id: usize,
    ) -> Result<(), BucketUtilError> {
        let bucket = self.inventory.find(id)?.clone();
        if bucket.objects.is_empty() {
            writeln!(self.out, "==> Cannot empty an empty bucket <==")?;
            return Ok(());
        }

        writeln!(self.out, "==> Emptying bucket {}...", bucket.name)?;
        self.out.flush()?;

        let deleted = delete_all_objects(&self.storage, &bucket.name).await?;
        debug!(bucket = %bucket.name, deleted, "emptied");
        self.inventory.mark_empty(id);

        self.done()
    }
}

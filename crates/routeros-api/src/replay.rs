//! In-process [`Connection`] that replays scripted reply batches.
//!
//! Every batch is copied into one reusable reply buffer before the handler
//! runs, and the buffer is clobbered as soon as the handler returns, the way
//! a real dispatcher recycles its receive buffer.

use crate::connection::Connection;
use crate::error::{RosError, RosResult};
use crate::reply::Reply;
use crate::transcript::{self, CommandScript};
use std::collections::HashMap;
use tracing::debug;

/// A query issued through a [`ReplayConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQuery {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
enum Script {
    Batches(Vec<Reply>),
    Fail(String),
}

/// Scripted dispatcher keyed by command name.
#[derive(Debug, Default)]
pub struct ReplayConnection {
    scripts: HashMap<String, Script>,
    buffer: Reply,
    issued: Vec<IssuedQuery>,
    batches_delivered: usize,
}

impl ReplayConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a connection from a parsed transcript.
    pub fn from_scripts(scripts: Vec<CommandScript>) -> Self {
        let mut conn = Self::new();
        for script in scripts {
            for batch in script.batches {
                conn.add_batch(script.command.clone(), batch);
            }
            conn.scripts
                .entry(script.command)
                .or_insert_with(|| Script::Batches(Vec::new()));
        }
        conn
    }

    /// Parses `text` as a transcript and builds a connection from it.
    pub fn from_transcript(text: &str) -> RosResult<Self> {
        Ok(Self::from_scripts(transcript::parse(text)?))
    }

    /// Appends a reply batch for `command`.
    pub fn add_batch(&mut self, command: impl Into<String>, batch: Reply) {
        let script = self
            .scripts
            .entry(command.into())
            .or_insert_with(|| Script::Batches(Vec::new()));
        match script {
            Script::Batches(batches) => batches.push(batch),
            Script::Fail(_) => *script = Script::Batches(vec![batch]),
        }
    }

    /// Adds a reply batch for `command`, builder style.
    pub fn with_batch(mut self, command: impl Into<String>, batch: Reply) -> Self {
        self.add_batch(command, batch);
        self
    }

    /// Makes `command` fail in the dispatcher before any batch is delivered.
    pub fn fail_command(&mut self, command: impl Into<String>, message: impl Into<String>) {
        self.scripts
            .insert(command.into(), Script::Fail(message.into()));
    }

    /// Returns every query issued so far, in order.
    pub fn issued(&self) -> &[IssuedQuery] {
        &self.issued
    }

    /// Returns how many batches have been handed to handlers.
    pub fn batches_delivered(&self) -> usize {
        self.batches_delivered
    }

    /// Returns the reusable reply buffer.
    pub fn buffer(&self) -> &Reply {
        &self.buffer
    }
}

impl Connection for ReplayConnection {
    fn query<H>(&mut self, command: &str, args: &[&str], mut handler: H) -> RosResult<()>
    where
        H: FnMut(&Self, &Reply) -> RosResult<()>,
    {
        if command.is_empty() {
            return Err(RosError::invalid_argument("command must not be empty"));
        }

        self.issued.push(IssuedQuery {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        debug!(command, args = args.len(), "replaying query");

        let batches = match self.scripts.get(command) {
            Some(Script::Batches(batches)) => batches.clone(),
            Some(Script::Fail(message)) => return Err(RosError::query(command, message.clone())),
            None => return Err(RosError::query(command, "no such command")),
        };

        for batch in &batches {
            self.buffer.clone_from(batch);
            let this: &Self = self;
            let status = handler(this, &this.buffer);
            self.buffer.clobber();
            self.batches_delivered += 1;
            status?;
        }
        Ok(())
    }
}

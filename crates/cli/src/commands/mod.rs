//! Shell commands
//!
//! Each verb is a self-contained operation bound to the session path context
//! and, where it needs the network, the object store. [`Command`] is the
//! closed set of verbs the shell understands.

use std::fmt;
use std::str::FromStr;

use s3fs_core::{Error, ObjectStore, PathContext, Result};

use crate::output::Output;

mod cd;
mod clear;
mod exit;
mod get;
mod ls;
mod put;
mod pwd;

pub use cd::Cd;
pub use clear::Clear;
pub use exit::Exit;
pub use get::{Get, resolve_destination};
pub use ls::{Entry, Ls, immediate_children};
pub use put::Put;
pub use pwd::Pwd;

/// Command verbs recognized by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Ls,
    Cd,
    Pwd,
    Get,
    Put,
    Clear,
    Exit,
}

impl Verb {
    /// Every verb, in help order
    pub const ALL: [Verb; 7] = [
        Verb::Ls,
        Verb::Cd,
        Verb::Pwd,
        Verb::Get,
        Verb::Put,
        Verb::Clear,
        Verb::Exit,
    ];

    /// The token that invokes this verb
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Ls => "ls",
            Verb::Cd => "cd",
            Verb::Pwd => "pwd",
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Clear => "clear",
            Verb::Exit => "exit",
        }
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed command bound to the session state it operates on
pub enum Command<'a> {
    Ls(Ls<'a>),
    Cd(Cd<'a>),
    Pwd(Pwd<'a>),
    Get(Get<'a>),
    Put(Put<'a>),
    Clear(Clear),
    Exit(Exit),
}

impl<'a> Command<'a> {
    /// Build a command from a verb token and its arguments
    ///
    /// `args[0]` is the verb; the remaining tokens are its arguments.
    pub fn parse(
        args: &[String],
        context: &'a mut PathContext,
        store: &'a dyn ObjectStore,
    ) -> Result<Self> {
        let (verb, rest) = args
            .split_first()
            .ok_or(Error::MissingArgument("command"))?;
        Ok(Self::new(verb.parse()?, rest, context, store))
    }

    /// Bind `verb` to its arguments, context and store
    pub fn new(
        verb: Verb,
        args: &[String],
        context: &'a mut PathContext,
        store: &'a dyn ObjectStore,
    ) -> Self {
        let arg = |i: usize| args.get(i).cloned();
        match verb {
            Verb::Ls => Command::Ls(Ls::new(context, store)),
            Verb::Cd => Command::Cd(Cd::new(context, store, arg(0))),
            Verb::Pwd => Command::Pwd(Pwd::new(context)),
            Verb::Get => Command::Get(Get::new(context, store, arg(0), arg(1))),
            Verb::Put => Command::Put(Put::new(context, store, arg(0), arg(1))),
            Verb::Clear => Command::Clear(Clear),
            Verb::Exit => Command::Exit(Exit),
        }
    }

    /// The verb this command was built from
    pub fn verb(&self) -> Verb {
        match self {
            Command::Ls(_) => Verb::Ls,
            Command::Cd(_) => Verb::Cd,
            Command::Pwd(_) => Verb::Pwd,
            Command::Get(_) => Verb::Get,
            Command::Put(_) => Verb::Put,
            Command::Clear(_) => Verb::Clear,
            Command::Exit(_) => Verb::Exit,
        }
    }

    /// Whether the command needs a round trip to the object store
    pub fn is_long_running(&self) -> bool {
        match self {
            Command::Ls(_) | Command::Get(_) | Command::Put(_) => true,
            Command::Cd(cd) => cd.is_long_running(),
            Command::Pwd(_) | Command::Clear(_) | Command::Exit(_) => false,
        }
    }

    /// Run the command, writing its results to `out`
    pub async fn execute(self, out: &dyn Output) -> Result<()> {
        match self {
            Command::Ls(ls) => ls.execute(out).await,
            Command::Cd(cd) => cd.execute().await,
            Command::Pwd(pwd) => {
                pwd.execute(out);
                Ok(())
            }
            Command::Get(get) => get.execute(out).await,
            Command::Put(put) => put.execute(out).await,
            Command::Clear(clear) => {
                clear.execute(out);
                Ok(())
            }
            Command::Exit(exit) => exit.execute(out),
        }
    }
}

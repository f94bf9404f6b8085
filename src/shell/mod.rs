
mod command;
mod parser;

use std::io::{self, BufRead, Write};

use color_print::cwriteln;
use tracing::debug;

use self::command::{Command, HELP};
use self::parser::{ParseErr, Parser};
use crate::{render, storage::Storage, RosterStore};

// Line-oriented editor over one store. Each command runs to completion
// before the next line is read.
pub struct Shell<'a, S>
where
    S: Storage,
{
    store: &'a mut RosterStore<S>,
    prompt: String,
}

impl<'a, S> Shell<'a, S>
where
    S: Storage,
{
    pub fn new(store: &'a mut RosterStore<S>) -> Self {
        Self {
            store,
            prompt: String::from("(roster)> "),
        }
    }

    pub fn main_loop<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        let mut parser = Parser {};
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            let command = match parser.parse(line.trim()) {
                Ok(inner) => inner,
                Err(ParseErr::EmptyLine) => continue,
                Err(e) => {
                    cwriteln!(out, "<red>error:</> {}", e)?;
                    continue;
                }
            };

            debug!("{:<12} - {command:?}", "SHELL");
            if command == Command::Quit {
                return Ok(());
            }
            self.execute(command, &mut out)?;
        }
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        let result = match command {
            Command::Add(form) => self.store.add(&form).map(|()| {
                format!("Added student #{}", self.store.len() - 1)
            }),
            Command::Edit { index, form } => self
                .store
                .update(index, &form)
                .map(|()| format!("Updated student #{index}")),
            Command::Delete { index } => self
                .store
                .delete(index)
                .map(|removed| format!("Deleted {} (#{index})", removed.name())),
            Command::Show { index } => self
                .store
                .get(index)
                .map(|student| render::record(index, student))
                .map_err(Into::into),
            Command::List => Ok(render::table(self.store.list())),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        };

        match result {
            Ok(message) => write!(out, "{}", with_newline(message)),
            Err(e) => cwriteln!(out, "<red>error:</> {}", e),
        }
    }
}

fn with_newline(mut message: String) -> String {
    if !message.ends_with('\n') {
        message.push('\n');
    }
    message
}

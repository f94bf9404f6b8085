mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use cli::{edit_form, Command, CommandLine};
use color_print::{ceprintln, cprintln};
use roster::{render, shell::Shell, storage::FileStorage, Config, RosterStore, StudentForm};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CommandLine::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ceprintln!("<red,bold>error:</> {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CommandLine) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args.data_dir, args.key)?;
    let mut store = RosterStore::open(FileStorage::new(config.DATA_DIR), config.STORAGE_KEY);

    match args.command {
        Command::Add { name, sid, email, contact } => {
            store.add(&StudentForm::new(name, sid, email, contact))?;
            cprintln!("<green>Added</> student #{}", store.len() - 1);
        }
        Command::Edit { index, name, sid, email, contact } => {
            let form = edit_form(store.get(index)?, name, sid, email, contact);
            store.update(index, &form)?;
            cprintln!("<green>Updated</> student #{}", index);
        }
        Command::Delete { index } => {
            let removed = store.delete(index)?;
            cprintln!("<green>Deleted</> {} (#{})", removed.name(), index);
        }
        Command::Show { index } => {
            print!("{}", render::record(index, store.get(index)?));
        }
        Command::List => {
            print!("{}", render::table(store.list()));
        }
        Command::Shell => {
            Shell::new(&mut store).main_loop(io::stdin().lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}

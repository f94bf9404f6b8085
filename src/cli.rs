use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster::{StudentForm, StudentRecord};

#[derive(Debug, Parser)]
#[clap(name = "roster", version, about = "Keep a roster of students on local disk")]
pub struct CommandLine {
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[clap(long, global = true)]
    pub key: Option<String>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        sid: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        contact: String,
    },
    Edit {
        index: usize,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        sid: Option<String>,
        #[clap(long)]
        email: Option<String>,
        #[clap(long)]
        contact: Option<String>,
    },
    Delete {
        index: usize,
    },
    Show {
        index: usize,
    },
    List,
    Shell,
}

// Starts from the stored values and overrides whatever was given.
pub fn edit_form(
    current: &StudentRecord,
    name: Option<String>,
    sid: Option<String>,
    email: Option<String>,
    contact: Option<String>,
) -> StudentForm {
    let mut form = StudentForm::from(current);
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(sid) = sid {
        form.student_id = sid;
    }
    if let Some(email) = email {
        form.email = email;
    }
    if let Some(contact) = contact {
        form.contact = contact;
    }
    form
}

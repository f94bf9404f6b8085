
use crate::StudentForm;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add(StudentForm),
    Edit { index: usize, form: StudentForm },
    Delete { index: usize },
    Show { index: usize },
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name> <sid> <email> <contact>
  edit <index> <name> <sid> <email> <contact>
  delete <index>
  show <index>
  list
  help
  quit
Quote values that contain spaces, e.g. add \"Ann Lee\" 101 a@x.com 1234567890
";


use core::fmt;

use super::command::*;
use crate::StudentForm;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseErr {
    EmptyLine,
    UnterminatedQuote,
    UnknownCommand(String),
    IncorrectNArguments(String, usize, usize),
    InvalidIndex(String),
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "Empty line"),
            Self::UnterminatedQuote => write!(f, "Missing closing quote"),
            Self::UnknownCommand(command) => write!(f, "Unknown command: {command} (try \"help\")"),
            Self::IncorrectNArguments(command, actual, expected) => {
                write!(f, "Incorrect number of args for command: {command}, {actual}/{expected}")
            }
            Self::InvalidIndex(value) => write!(f, "Not a valid index: {value}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token {
    String(String),

    Add,
    Edit,
    Delete,
    Show,
    List,
    Help,
    Quit,
}

impl Token {
    pub fn as_string(&self) -> String {
        match self {
            Token::String(string) => string.to_string(),
            Token::Add => "add".to_string(),
            Token::Edit => "edit".to_string(),
            Token::Delete => "delete".to_string(),
            Token::Show => "show".to_string(),
            Token::List => "list".to_string(),
            Token::Help => "help".to_string(),
            Token::Quit => "quit".to_string(),
        }
    }
}

fn keyword(lexeme: &str) -> Token {
    match lexeme {
        "add" => Token::Add,
        "edit" => Token::Edit,
        "delete" | "rm" => Token::Delete,
        "show" => Token::Show,
        "list" | "ls" => Token::List,
        "help" | "?" => Token::Help,
        "quit" | "exit" => Token::Quit,
        s => Token::String(s.to_string()),
    }
}

pub struct Parser {}

impl Parser {
    // Splits on whitespace; double quotes group a value and keep it literal.
    fn lex(&self, command: &str) -> Result<Vec<Token>, ParseErr> {
        let mut tokens = vec![];
        let mut chars = command.chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }

            if c == '"' {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => value.push(c),
                        None => return Err(ParseErr::UnterminatedQuote),
                    }
                }
                tokens.push(Token::String(value));
            } else {
                let mut lexeme = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '"' {
                        break;
                    }
                    lexeme.push(c);
                    chars.next();
                }
                tokens.push(keyword(&lexeme));
            }
        }
        Ok(tokens)
    }

    pub fn parse(&mut self, code: &str) -> Result<Command, ParseErr> {
        let tokens = self.lex(code)?;
        let Some((head, args)) = tokens.split_first() else {
            return Err(ParseErr::EmptyLine);
        };

        match head {
            Token::Add => {
                expect_args("add", args, 4)?;
                Ok(Command::Add(form(args)))
            }
            Token::Edit => {
                expect_args("edit", args, 5)?;
                Ok(Command::Edit { index: index(&args[0])?, form: form(&args[1..]) })
            }
            Token::Delete => {
                expect_args("delete", args, 1)?;
                Ok(Command::Delete { index: index(&args[0])? })
            }
            Token::Show => {
                expect_args("show", args, 1)?;
                Ok(Command::Show { index: index(&args[0])? })
            }
            Token::List => {
                expect_args("list", args, 0)?;
                Ok(Command::List)
            }
            Token::Help => Ok(Command::Help),
            Token::Quit => Ok(Command::Quit),
            Token::String(s) => Err(ParseErr::UnknownCommand(s.clone())),
        }
    }
}

fn expect_args(command: &str, args: &[Token], expected: usize) -> Result<(), ParseErr> {
    if args.len() != expected {
        return Err(ParseErr::IncorrectNArguments(command.to_string(), args.len(), expected));
    }
    Ok(())
}

fn index(token: &Token) -> Result<usize, ParseErr> {
    let text = token.as_string();
    text.parse::<usize>().map_err(|_| ParseErr::InvalidIndex(text))
}

fn form(args: &[Token]) -> StudentForm {
    StudentForm::new(
        args[0].as_string(),
        args[1].as_string(),
        args[2].as_string(),
        args[3].as_string(),
    )
}

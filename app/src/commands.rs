use anyhow::Result;
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  query <text>   set the query text and submit it
  ask            submit the current query text again
  file <path>    choose a file to upload
  upload         upload the chosen file
  status         check that the index service is reachable
  show           print the current view
  help           show this message
  quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Ask,
    File(PathBuf),
    Upload,
    Status,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "query" | "q" => Command::Query(rest.to_string()),
        "ask" => Command::Ask,
        "file" | "f" => {
            if rest.is_empty() {
                return Err(anyhow::anyhow!("usage: file <path>"));
            }
            Command::File(PathBuf::from(rest))
        }
        "upload" | "u" => Command::Upload,
        "status" => Command::Status,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(anyhow::anyhow!("unknown command `{}` (try `help`)", other)),
    };

    Ok(Some(command))
}

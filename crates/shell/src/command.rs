// Shell command parsing

use anyhow::{bail, Context, Result};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    /// 0-based queue index (typed as a 1-based slot number)
    Remove(usize),
    Undo,
    Edit(usize),
    Type(String),
    Save,
    Cancel,
    /// Leave the edit field without saving or cancelling explicitly
    Blur,
    Admin,
    Show,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Whether the command is an interaction outside the edit field, which
    /// takes focus from it (and so saves an open edit) before it runs.
    /// Reload and quit drop the edit like closing the page does.
    pub fn leaves_edit_field(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Remove(_) | Command::Undo | Command::Edit(_) | Command::Admin
        )
    }
}

pub const HELP: &str = "\
commands:
  add <name>      join the queue
  undo            restore the last removed entry
  show            redraw the board
  admin           toggle admin mode
  remove <slot>   remove an entry (admin)
  edit <slot>     start editing an entry (admin)
  type <text>     replace the text being edited
  save | cancel   finish editing
  blur            leave the edit field (saves)
                  add, remove, undo, edit and admin also save an open edit
  reload          reopen the board from the session store
  help            this text
  quit            end the session";

/// Parse a line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        // the engine trims and validates the name
        "add" => Command::Add(rest.to_string()),
        "remove" | "rm" => Command::Remove(slot_index(rest)?),
        "undo" => Command::Undo,
        "edit" => Command::Edit(slot_index(rest)?),
        "type" => Command::Type(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "blur" => Command::Blur,
        "admin" => Command::Admin,
        "show" | "ls" => Command::Show,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {:?} (try `help`)", other),
    };
    Ok(Some(command))
}

fn slot_index(arg: &str) -> Result<usize> {
    let slot: usize = arg
        .parse()
        .with_context(|| format!("expected a slot number, got {:?}", arg))?;
    if slot == 0 {
        bail!("slots are numbered from 1");
    }
    Ok(slot - 1)
}

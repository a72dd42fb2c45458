// Line-oriented terminal front end: parses commands and dispatches store actions

use crate::action::{Action, Applied, TaskRef};
use crate::render::Renderer;
use crate::store::TaskList;
use crate::task::Priority;
use eyre::{Result, eyre};
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub const HELP: &str = "\
Commands:
  add [-p low|medium|high] <text>   add a task (no text: add the draft)
  text <text>                       set the draft text
  priority <low|medium|high>        set the draft priority
  submit                            add a task from the draft
  toggle <n>                        mark task n done / not done
  delete <n>                        delete task n
  edit <n>                          load task n into the draft for editing
  save                              save the edit
  cancel                            discard the edit
  list                              show the list
  help                              show this help
  quit                              exit";

/// A parsed shell command; task numbers are 1-based positions in the sorted view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { text: String, priority: Priority },
    Text(String),
    Priority(Priority),
    Submit,
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    Save,
    Cancel,
    List,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" | "a" => parse_add(rest)?,
        "text" | "t" => Command::Text(rest.to_string()),
        "priority" | "p" => Command::Priority(rest.parse()?),
        "submit" => Command::Submit,
        "toggle" | "done" => Command::Toggle(parse_position(rest)?),
        "delete" | "del" | "rm" => Command::Delete(parse_position(rest)?),
        "edit" | "e" => Command::Edit(parse_position(rest)?),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(eyre!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}

fn parse_add(rest: &str) -> Result<Command> {
    if rest.is_empty() {
        return Ok(Command::Submit);
    }

    for flag in ["-p", "--priority"] {
        if let Some(after) = rest.strip_prefix(flag).and_then(|s| s.strip_prefix(' ')) {
            let after = after.trim_start();
            let (priority, text) = after.split_once(char::is_whitespace).unwrap_or((after, ""));
            return Ok(Command::Add {
                text: text.trim_start().to_string(),
                priority: priority.parse()?,
            });
        }
    }

    Ok(Command::Add {
        text: rest.to_string(),
        priority: Priority::Low,
    })
}

fn parse_position(rest: &str) -> Result<usize> {
    let n: usize = rest
        .trim()
        .parse()
        .map_err(|_| eyre!("Expected a task number, got '{}'", rest.trim()))?;
    if n == 0 {
        return Err(eyre!("Task numbers start at 1"));
    }
    Ok(n)
}

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    list: TaskList,
    renderer: Renderer,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(list: TaskList, renderer: Renderer, out: W) -> Self {
        Self { list, renderer, out }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R, prompt: &str) -> Result<()> {
        info!("Shell started");
        write!(self.out, "{}", self.renderer.screen(&self.list))?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(self.out)?;
                break;
            };
            let line = line?;

            match parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if self.execute(command)? == Flow::Quit {
                        break;
                    }
                }
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    writeln!(self.out, "{}", self.renderer.dim("Type 'help' for commands"))?;
                }
            }
        }

        info!(tasks = self.list.len(), "Shell finished");
        Ok(())
    }

    /// Execute one command, printing the result
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "execute");

        let action = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::List => {
                write!(self.out, "{}", self.renderer.screen(&self.list))?;
                return Ok(Flow::Continue);
            }
            Command::Add { text, priority } => Action::Add { text, priority },
            Command::Text(text) => Action::SetDraftText { text },
            Command::Priority(priority) => Action::SetDraftPriority { priority },
            Command::Submit => Action::SubmitDraft,
            Command::Save => Action::SaveEdit,
            Command::Cancel => Action::CancelEdit,
            Command::Toggle(n) => Action::Toggle {
                task: TaskRef::Position(n),
            },
            Command::Delete(n) => Action::Delete {
                task: TaskRef::Position(n),
            },
            Command::Edit(n) => Action::BeginEdit {
                task: TaskRef::Position(n),
            },
        };

        match self.list.apply(action) {
            Ok(Applied::DraftUpdated | Applied::EditStarted(_) | Applied::EditCancelled) => {
                writeln!(self.out, "{}", self.renderer.draft(&self.list))?;
            }
            Ok(_) => {
                write!(self.out, "{}", self.renderer.screen(&self.list))?;
            }
            Err(ignored) => {
                writeln!(self.out, "{}", self.renderer.dim(&format!("Nothing changed: {}", ignored)))?;
            }
        }

        Ok(Flow::Continue)
    }
}

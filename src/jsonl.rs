// JSONL reading and writing for action scripts and list output

use crate::action::Action;
use eyre::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read one action per line from a JSONL file
///
/// Blank lines are skipped. Lines that fail to read or parse are skipped with a
/// warning so one bad line does not abort a whole script.
pub fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let file = File::open(path).with_context(|| format!("Failed to open action file {}", path.display()))?;
    let actions = parse_actions(BufReader::new(file), path);

    info!(file = ?path, count = actions.len(), "Loaded actions from JSONL");
    Ok(actions)
}

fn parse_actions<R: BufRead>(reader: R, path: &Path) -> Vec<Action> {
    let mut actions = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Action>(&line) {
            Ok(action) => actions.push(action),
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = %e,
                    "Failed to parse action, skipping"
                );
            }
        }
    }

    actions
}

/// Write each item as one JSON line
pub fn write_jsonl<W, T, I>(writer: &mut W, items: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    for item in items {
        let json = serde_json::to_string(&item).context("Failed to serialize record")?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_actions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("script.jsonl");

        fs::write(
            &path,
            r#"{"action":"add","text":"Buy milk","priority":"low"}

{"action":"set_draft_text","text":"Call bob"}
{"action":"submit_draft"}
"#,
        )
        .unwrap();

        let actions = read_actions(&path).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(
            actions[0],
            Action::Add {
                text: "Buy milk".to_string(),
                priority: Priority::Low
            }
        );
        assert_eq!(actions[2], Action::SubmitDraft);
    }

    #[test]
    fn test_read_actions_skips_malformed_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("script.jsonl");

        fs::write(
            &path,
            r#"{"action":"add","text":"A"}
{malformed json}
{"action":"add","text":"B","priority":"urgent"}
{"action":"save_edit"}
"#,
        )
        .unwrap();

        let actions = read_actions(&path).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1], Action::SaveEdit);
    }

    #[test]
    fn test_read_actions_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = read_actions(&temp.path().join("nonexistent.jsonl"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_jsonl() {
        let mut out = Vec::new();
        write_jsonl(&mut out, [Priority::High, Priority::Low]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"high\"\n\"low\"\n");
    }
}

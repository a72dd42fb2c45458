// Terminal rendering of the task list

use crate::store::TaskList;
use crate::task::{Priority, Task};
use colored::{Color, Colorize};

/// Terminal colour for a priority: low green, medium yellow, high red
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
    show_ids: bool,
}

impl Renderer {
    pub fn new(color: bool, show_ids: bool) -> Self {
        Self { color, show_ids }
    }

    /// One row of the list; `position` is the 1-based index in the sorted view
    pub fn row(&self, position: usize, task: &Task) -> String {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let mut row = format!("{:>3}. {} ", position, check);

        if self.color {
            let marker = "▌".color(priority_color(task.priority));
            let text = if task.completed {
                task.text.strikethrough().dimmed().to_string()
            } else {
                task.text.clone()
            };
            row.push_str(&format!("{} {}", marker, text));
        } else {
            row.push_str(&format!("({}) {}", task.priority, task.text));
        }

        if self.show_ids {
            row.push_str(&format!("  {}", task.id));
        }
        row
    }

    /// The priority picker, with the selected priority highlighted
    pub fn priority_picker(&self, selected: Priority) -> String {
        Priority::ALL
            .iter()
            .map(|&p| {
                if p != selected {
                    p.label().to_string()
                } else if self.color {
                    format!(" {} ", p.label()).black().on_color(priority_color(p)).to_string()
                } else {
                    format!("[{}]", p.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Draft line: the compose field, or the edit surface while editing
    pub fn draft(&self, list: &TaskList) -> String {
        let draft = list.draft();
        let label = if list.is_editing() { "Edit task" } else { "New task" };
        let text = if draft.text.is_empty() {
            self.dim("(empty)")
        } else {
            draft.text.clone()
        };
        format!("{}: {}  {}", label, text, self.priority_picker(draft.priority))
    }

    /// The whole screen: the sorted list followed by the draft line
    pub fn screen(&self, list: &TaskList) -> String {
        let view = list.sorted_view();

        let mut lines: Vec<String> = view.iter().enumerate().map(|(i, task)| self.row(i + 1, task)).collect();
        if lines.is_empty() {
            lines.push(self.dim("No tasks yet"));
        }
        lines.push(self.draft(list));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

// Board rendering for the terminal

use colored::Colorize;
use queueboard_core::application::constants::SLOTS_PER_COLUMN;
use queueboard_core::application::{BoardView, SlotView};
use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

/// Gap between board columns
const COLUMN_GAP: usize = 2;

/// Draw the board as side-by-side columns of numbered slots
pub fn render(view: &BoardView) -> String {
    let mut out = String::new();

    let title = if view.admin {
        format!("{}  {}", "Queue".bold(), "[admin]".red().bold())
    } else {
        "Queue".bold().to_string()
    };
    out.push_str(&title);
    out.push('\n');

    let columns = view.columns(SLOTS_PER_COLUMN);
    let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut builder = Builder::default();
    for row in 0..rows {
        builder.push_record(columns.iter().map(|column| {
            column
                .get(row)
                .map(|slot| render_slot(slot, view))
                .unwrap_or_default()
        }));
    }

    // tabled measures display width, so colored and wide names stay aligned
    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_GAP, 0, 0));
    for line in table.to_string().lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if view.overflow > 0 {
        out.push_str(&format!("+{} more waiting\n", view.overflow));
    }
    if view.can_undo {
        out.push_str(&format!("{}\n", "(undo available)".dimmed()));
    }
    out
}

fn render_slot(slot: &SlotView, view: &BoardView) -> String {
    let number = format!("{:>2}.", slot.number).bold();

    let name = match (&view.editing, slot.editing) {
        (Some(edit), true) => format!("[{}]", edit.buffer).yellow().to_string(),
        _ => slot.entry.clone().unwrap_or_default(),
    };

    format!("{} {}", number, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use queueboard_core::application::EditView;
    use unicode_width::UnicodeWidthStr;

    fn view_with(names: &[&str]) -> BoardView {
        BoardView {
            slots: (0..20)
                .map(|i| SlotView {
                    number: i + 1,
                    entry: names.get(i).map(|n| n.to_string()),
                    editing: false,
                })
                .collect(),
            overflow: 0,
            can_undo: false,
            admin: false,
            editing: None,
        }
    }

    #[test]
    fn test_render_two_columns() {
        colored::control::set_override(false);
        let output = render(&view_with(&["Alice", "Bob"]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Queue");
        assert_eq!(lines.len(), 11);
        assert!(lines[1].starts_with(" 1. Alice"));
        assert!(lines[1].contains("11."));
        assert!(lines[10].ends_with("20."));
    }

    #[test]
    fn test_render_edit_buffer_and_footer() {
        colored::control::set_override(false);
        let mut view = view_with(&["Alice", "Bob"]);
        view.slots[1].editing = true;
        view.editing = Some(EditView {
            index: 1,
            buffer: "Bobby".to_string(),
        });
        view.admin = true;
        view.overflow = 2;
        view.can_undo = true;

        let output = render(&view);
        assert!(output.starts_with("Queue  [admin]"));
        assert!(output.contains(" 2. [Bobby]"));
        assert!(output.contains("+2 more waiting"));
        assert!(output.contains("(undo available)"));
    }

    #[test]
    fn test_second_column_aligned_with_wide_names() {
        colored::control::set_override(false);
        let output = render(&view_with(&["Alice", "김철수", "Bo"]));
        let lines: Vec<&str> = output.lines().collect();

        let column_start = |line: &str, marker: &str| {
            let at = line.find(marker).unwrap();
            UnicodeWidthStr::width(&line[..at])
        };
        let first = column_start(lines[1], "11.");
        assert_eq!(column_start(lines[2], "12."), first);
        assert_eq!(column_start(lines[3], "13."), first);
        assert_eq!(column_start(lines[4], "14."), first);
    }
}

// Board View - snapshot handed to the presentation layer

use crate::domain::{Board, Entry};
use serde::Serialize;

/// One numbered slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// 1-based slot number (queue index + 1)
    pub number: usize,
    pub entry: Option<String>,
    /// This slot is the current edit target
    pub editing: bool,
}

/// The slot being edited and its unsaved text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditView {
    pub index: usize,
    pub buffer: String,
}

/// Read-only snapshot of the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub slots: Vec<SlotView>,
    /// Entries queued past the last slot
    pub overflow: usize,
    pub can_undo: bool,
    pub admin: bool,
    pub editing: Option<EditView>,
}

impl BoardView {
    pub fn from_board(board: &Board, slot_count: usize) -> Self {
        let queue = board.queue();
        let edit_index = board.edit().target().map(|(index, _)| index);

        let slots = (0..slot_count)
            .map(|index| SlotView {
                number: index + 1,
                entry: queue.get(index).map(|e| e.as_str().to_string()),
                editing: edit_index == Some(index),
            })
            .collect();

        Self {
            slots,
            overflow: queue.len().saturating_sub(slot_count),
            can_undo: !board.history().is_empty(),
            admin: board.is_admin(),
            editing: board.edit().target().map(|(index, buffer)| EditView {
                index,
                buffer: buffer.to_string(),
            }),
        }
    }

    /// Occupied slots, in order
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| slot.entry.as_deref())
    }

    /// Split slots into display columns of `per_column` slots each
    pub fn columns(&self, per_column: usize) -> Vec<&[SlotView]> {
        self.slots.chunks(per_column.max(1)).collect()
    }
}

/// Queue values in order, for callers that want the full unbounded list
pub(crate) fn entry_values(board: &Board) -> Vec<String> {
    board.queue().iter().map(Entry::as_str).map(str::to_string).collect()
}

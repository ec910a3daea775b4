// Board Aggregate
//
// Queue, removal history, admin flag and edit session as one consistent unit.
// Every operation either applies and returns the resulting event, or returns
// the reason it did not apply and leaves the board untouched.

use crate::domain::edit::EditSession;
use crate::domain::entry::Entry;
use crate::domain::error::{DomainError, Result};
use crate::domain::event::BoardEvent;
use crate::domain::history::{HistoryLog, HistoryRecord};
use crate::domain::queue::Queue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    queue: Queue,
    history: HistoryLog,
    admin: bool,
    edit: EditSession,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board restored from stored state: admin off, no edit in progress
    pub fn restore(queue: Queue, history: HistoryLog) -> Self {
        Self {
            queue,
            history,
            ..Self::default()
        }
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    /// Append `raw` (trimmed), suffixing `" (n)"` if the name is taken.
    /// Clears the history.
    pub fn add(&mut self, raw: &str) -> Result<BoardEvent> {
        let candidate = Entry::parse(raw)?;
        let entry = self.queue.disambiguate(candidate);
        let value = entry.as_str().to_string();
        let index = self.queue.push(entry);
        self.history.clear();
        Ok(BoardEvent::Added { index, value })
    }

    /// Remove the entry at `index` and record it for undo.
    /// Closes any edit session, since indices shift.
    pub fn remove(&mut self, index: usize) -> Result<BoardEvent> {
        let entry = self.queue.remove(index)?;
        let value = entry.as_str().to_string();
        self.history.push(HistoryRecord::new(entry, index));
        self.edit.close();
        Ok(BoardEvent::Removed { index, value })
    }

    /// Reinsert the most recently removed entry at its recorded index,
    /// clamped to the current length.
    pub fn undo(&mut self) -> Result<BoardEvent> {
        let record = self.history.pop().ok_or(DomainError::HistoryEmpty)?;
        let value = record.value.as_str().to_string();
        let target = record.index.unwrap_or(usize::MAX);
        let index = self.queue.insert_clamped(target, record.value);
        self.edit.close();
        Ok(BoardEvent::Restored { index, value })
    }

    /// Replace the entry at `index` with trimmed `raw`. Uniqueness is not
    /// re-checked. Clears the history.
    pub fn edit_at(&mut self, index: usize, raw: &str) -> Result<BoardEvent> {
        self.queue.check_index(index)?;
        let entry = Entry::parse(raw)?;
        let value = entry.as_str().to_string();
        self.queue.replace(index, entry)?;
        self.history.clear();
        Ok(BoardEvent::Edited { index, value })
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<BoardEvent> {
        let current = self
            .queue
            .get(index)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.queue.len(),
            })?
            .as_str()
            .to_string();
        self.edit.begin(index, &current);
        Ok(BoardEvent::EditStarted { index })
    }

    pub fn set_edit_buffer(&mut self, text: &str) -> Result<()> {
        if self.edit.set_buffer(text) {
            Ok(())
        } else {
            Err(DomainError::NotEditing)
        }
    }

    /// Commit the edit buffer through `edit_at`. A blank buffer leaves the
    /// session open.
    pub fn save_edit(&mut self) -> Result<BoardEvent> {
        let (index, buffer) = self
            .edit
            .target()
            .map(|(index, buffer)| (index, buffer.to_string()))
            .ok_or(DomainError::NotEditing)?;
        let event = self.edit_at(index, &buffer)?;
        self.edit.close();
        Ok(event)
    }

    pub fn cancel_edit(&mut self) -> Result<BoardEvent> {
        if self.edit.close() {
            Ok(BoardEvent::EditCancelled)
        } else {
            Err(DomainError::NotEditing)
        }
    }

    pub fn toggle_admin(&mut self) -> BoardEvent {
        self.admin = !self.admin;
        BoardEvent::AdminToggled { admin: self.admin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(board: &Board) -> Vec<&str> {
        board.queue().iter().map(Entry::as_str).collect()
    }

    fn board_of(names: &[&str]) -> Board {
        let mut board = Board::new();
        for name in names {
            board.add(name).unwrap();
        }
        board
    }

    #[test]
    fn test_add_disambiguates_duplicates() {
        let mut board = Board::new();
        board.add("Alice").unwrap();
        board.add("Alice").unwrap();
        assert_eq!(names(&board), vec!["Alice", "Alice (1)"]);

        let event = board.add("  Alice ").unwrap();
        assert_eq!(
            event,
            BoardEvent::Added {
                index: 2,
                value: "Alice (2)".to_string()
            }
        );
    }

    #[test]
    fn test_add_keeps_names_pairwise_distinct() {
        let mut board = Board::new();
        for name in ["A", "A", "A (1)", "B", "A", "A (1)", "B"] {
            board.add(name).unwrap();
            let mut seen = std::collections::HashSet::new();
            assert!(board.queue().iter().all(|e| seen.insert(e.as_str())));
        }
        assert_eq!(
            names(&board),
            vec!["A", "A (1)", "A (1) (1)", "B", "A (2)", "A (1) (2)", "B (1)"]
        );
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let mut board = board_of(&["A"]);
        board.remove(0).unwrap();
        assert_eq!(board.add("   "), Err(DomainError::BlankEntry));
        // history survives a rejected add
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_remove_then_undo_round_trip() {
        let mut board = board_of(&["A", "B", "C"]);

        board.remove(1).unwrap();
        assert_eq!(names(&board), vec!["A", "C"]);
        let records: Vec<_> = board.history().iter().cloned().collect();
        assert_eq!(
            records,
            vec![HistoryRecord::new(Entry::parse("B").unwrap(), 1)]
        );

        let event = board.undo().unwrap();
        assert_eq!(
            event,
            BoardEvent::Restored {
                index: 1,
                value: "B".to_string()
            }
        );
        assert_eq!(names(&board), vec!["A", "B", "C"]);
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_undo_walks_back_through_history() {
        let mut board = board_of(&["A", "B", "C", "D"]);
        board.remove(3).unwrap();
        board.remove(0).unwrap();
        assert_eq!(names(&board), vec!["B", "C"]);

        board.undo().unwrap();
        assert_eq!(names(&board), vec!["A", "B", "C"]);
        board.undo().unwrap();
        assert_eq!(names(&board), vec!["A", "B", "C", "D"]);
        assert_eq!(board.undo(), Err(DomainError::HistoryEmpty));
    }

    #[test]
    fn test_undo_clamps_index() {
        let mut board = board_of(&["A", "B", "C"]);
        board.remove(2).unwrap();
        board.remove(1).unwrap();
        board.remove(0).unwrap();
        // latest record is A at 0, then B at 1, then C at 2
        board.undo().unwrap();
        board.undo().unwrap();
        board.undo().unwrap();
        assert_eq!(names(&board), vec!["A", "B", "C"]);

        let mut board = Board::restore(
            Queue::new(),
            HistoryLog::from_records(vec![HistoryRecord::new(Entry::parse("Z").unwrap(), 5)]),
        );
        let event = board.undo().unwrap();
        assert_eq!(
            event,
            BoardEvent::Restored {
                index: 0,
                value: "Z".to_string()
            }
        );
    }

    #[test]
    fn test_undo_unindexed_record_appends() {
        let mut board = Board::restore(
            Queue::from_entries(vec![Entry::parse("A").unwrap(), Entry::parse("B").unwrap()]),
            HistoryLog::from_records(vec![HistoryRecord::unindexed(Entry::parse("X").unwrap())]),
        );
        board.undo().unwrap();
        assert_eq!(names(&board), vec!["A", "B", "X"]);
    }

    #[test]
    fn test_add_and_edit_clear_history() {
        let mut board = board_of(&["A", "B", "C"]);
        board.remove(0).unwrap();
        board.add("D").unwrap();
        assert!(board.history().is_empty());

        board.remove(0).unwrap();
        assert!(!board.history().is_empty());
        board.edit_at(0, "Q").unwrap();
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_edit_at_allows_duplicates() {
        let mut board = board_of(&["A", "B"]);
        board.edit_at(1, " A ").unwrap();
        assert_eq!(names(&board), vec!["A", "A"]);
    }

    #[test]
    fn test_edit_at_rejections_leave_history() {
        let mut board = board_of(&["A", "B"]);
        board.remove(1).unwrap();
        assert_eq!(
            board.edit_at(4, "X"),
            Err(DomainError::IndexOutOfRange { index: 4, len: 1 })
        );
        assert_eq!(board.edit_at(0, "  "), Err(DomainError::BlankEntry));
        assert_eq!(board.history().len(), 1);
        assert_eq!(names(&board), vec!["A"]);
    }

    #[test]
    fn test_edit_session_save() {
        let mut board = board_of(&["A", "B"]);
        board.begin_edit(1).unwrap();
        assert_eq!(board.edit().target(), Some((1, "B")));

        board.set_edit_buffer("  Bea ").unwrap();
        let event = board.save_edit().unwrap();
        assert_eq!(
            event,
            BoardEvent::Edited {
                index: 1,
                value: "Bea".to_string()
            }
        );
        assert_eq!(names(&board), vec!["A", "Bea"]);
        assert!(!board.edit().is_editing());
    }

    #[test]
    fn test_save_blank_buffer_keeps_session_open() {
        let mut board = board_of(&["A"]);
        board.begin_edit(0).unwrap();
        board.set_edit_buffer(" ").unwrap();
        assert_eq!(board.save_edit(), Err(DomainError::BlankEntry));
        assert_eq!(board.edit().target(), Some((0, " ")));
        assert_eq!(names(&board), vec!["A"]);
    }

    #[test]
    fn test_cancel_edit_leaves_queue_and_history() {
        let mut board = board_of(&["A", "B"]);
        board.remove(0).unwrap();
        board.begin_edit(0).unwrap();
        board.set_edit_buffer("nope").unwrap();
        assert_eq!(board.cancel_edit(), Ok(BoardEvent::EditCancelled));
        assert_eq!(names(&board), vec!["B"]);
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.cancel_edit(), Err(DomainError::NotEditing));
    }

    #[test]
    fn test_remove_closes_edit_session() {
        let mut board = board_of(&["A", "B", "C"]);
        board.begin_edit(2).unwrap();
        board.remove(0).unwrap();
        assert!(!board.edit().is_editing());
        assert_eq!(board.save_edit(), Err(DomainError::NotEditing));
    }

    #[test]
    fn test_begin_edit_out_of_range() {
        let mut board = board_of(&["A"]);
        assert_eq!(
            board.begin_edit(1),
            Err(DomainError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(board.set_edit_buffer("x"), Err(DomainError::NotEditing));
    }

    #[test]
    fn test_toggle_admin_does_not_touch_queue() {
        let mut board = board_of(&["A"]);
        board.remove(0).unwrap();
        assert_eq!(board.toggle_admin(), BoardEvent::AdminToggled { admin: true });
        assert_eq!(board.toggle_admin(), BoardEvent::AdminToggled { admin: false });
        assert!(board.queue().is_empty());
        assert_eq!(board.history().len(), 1);
    }
}

use crate::types::Record;

/// Derived state of the select-all checkbox. Recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderCheckbox {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Records plus one selection flag per record, aligned by position.
/// Only open records can ever be selected.
#[derive(Debug, Clone)]
pub struct SelectionTable {
    records: Vec<Record>,
    checked: Vec<bool>,
    pub cursor: usize,
}

impl SelectionTable {
    pub fn new(records: Vec<Record>) -> Self {
        let checked = vec![false; records.len()];
        Self {
            records,
            checked,
            cursor: 0,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, index: usize) {
        let Some(record) = self.records.get(index) else {
            return;
        };
        if !record.status.is_open() {
            return;
        }
        self.checked[index] = !self.checked[index];
    }

    pub fn set_all(&mut self, value: bool) {
        for (flag, record) in self.checked.iter_mut().zip(&self.records) {
            *flag = value && record.status.is_open();
        }
    }

    pub fn toggle_header(&mut self) {
        let value = !self.header().checked;
        self.set_all(value);
    }

    pub fn toggle_cursor(&mut self) {
        self.toggle(self.cursor);
    }

    pub fn selected_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    pub fn open_count(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_open()).count()
    }

    pub fn header(&self) -> HeaderCheckbox {
        let selected = self.selected_count();
        let open = self.open_count();
        HeaderCheckbox {
            checked: open > 0 && selected == open,
            indeterminate: selected > 0 && selected < open,
        }
    }

    pub fn selection_label(&self) -> String {
        match self.selected_count() {
            0 => "None selected".to_string(),
            n => format!("Selected {}", n),
        }
    }

    pub fn next(&mut self) {
        if !self.records.is_empty() && self.cursor < self.records.len() - 1 {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.records.len().saturating_sub(1);
    }
}

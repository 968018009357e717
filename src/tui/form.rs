use crate::engine::Inputs;
use crate::fields::{FieldKey, FieldKind, Section};
use crate::format::format_currency;

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    /// `None` for derived rows such as the entry investment total.
    pub key: Option<FieldKey>,
}

impl FormField {
    pub fn read_only(&self) -> bool {
        self.key.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct FormTab {
    pub label: String,
    pub fields: Vec<FormField>,
}

/// Cursor and edit buffer. Lives in the TUI task only; the values shown
/// come from the latest published state.
#[derive(Debug, Clone, Default)]
pub struct FormViewState {
    pub active_tab: usize,
    pub selected_field: usize,
    pub editing: bool,
    pub edit_buffer: String,
}

/// What a key press asks the engine loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Set { key: FieldKey, value: String },
    Cycle(FieldKey),
}

pub fn build_form_tabs(inputs: &Inputs, entry_investment: f64) -> Vec<FormTab> {
    Section::ALL
        .iter()
        .map(|&section| {
            let mut fields: Vec<FormField> = section
                .fields()
                .map(|key| FormField {
                    label: key.label().to_string(),
                    value: key.value_text(inputs),
                    kind: key.kind(),
                    key: Some(key),
                })
                .collect();
            if section == Section::EntryCosts {
                fields.push(FormField {
                    label: "Total Entry Investment".to_string(),
                    value: format_currency(entry_investment),
                    kind: FieldKind::Number,
                    key: None,
                });
            }
            FormTab {
                label: section.title().to_string(),
                fields,
            }
        })
        .collect()
}

impl FormViewState {
    pub fn next_tab(&mut self, tab_count: usize) {
        if tab_count == 0 {
            return;
        }
        self.active_tab = (self.active_tab + 1) % tab_count;
        self.selected_field = 0;
    }

    pub fn prev_tab(&mut self, tab_count: usize) {
        if tab_count == 0 {
            return;
        }
        self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
        self.selected_field = 0;
    }

    pub fn next_field(&mut self, field_count: usize) {
        if self.selected_field + 1 < field_count {
            self.selected_field += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.selected_field = self.selected_field.saturating_sub(1);
    }

    /// Enter on the selected field: start editing, cycle a choice, or
    /// (while editing) commit the buffer.
    pub fn activate(&mut self, tabs: &[FormTab]) -> Option<FormAction> {
        let field = tabs
            .get(self.active_tab)
            .and_then(|t| t.fields.get(self.selected_field))?;
        let key = field.key?;

        if self.editing {
            self.editing = false;
            return Some(FormAction::Set {
                key,
                value: std::mem::take(&mut self.edit_buffer),
            });
        }

        match field.kind {
            FieldKind::Choice(_) => Some(FormAction::Cycle(key)),
            FieldKind::Number | FieldKind::Text => {
                self.editing = true;
                self.edit_buffer = field.value.clone();
                None
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn type_char(&mut self, c: char) {
        if self.editing {
            self.edit_buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing {
            self.edit_buffer.pop();
        }
    }
}

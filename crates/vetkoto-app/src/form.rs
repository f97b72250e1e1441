//! Entity create/edit forms
//!
//! [`build_form`] turns an entity's field descriptors into a [`FormState`]:
//! foreign-key fields become selects fed by the store's `options`, everything
//! else a typed input. The form then collects a payload for create/update.

use std::cmp::Ordering;

use serde_json::Value;

use vetkoto_core::prelude::*;
use vetkoto_core::{display_value, Entity, InputType, Record, RecordId, SchemaRegistry};
use vetkoto_remote::{RemoteStore, SelectOption};

/// Label of the leading empty choice of every select.
pub const EMPTY_CHOICE: &str = "— Select —";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Widget of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Input {
        input: InputType,
        value: String,
        placeholder: Option<String>,
    },
    /// `selected == 0` is the empty choice; `n` picks `options[n - 1]`.
    Select {
        options: Vec<SelectOption>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub control: Control,
}

impl FormControl {
    /// Value as it will be submitted.
    pub fn value(&self) -> Value {
        match &self.control {
            Control::Input { input, value, .. } => input_value(*input, value),
            Control::Select { options, selected } => selected
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .map(|o| o.value.clone())
                .unwrap_or(Value::Null),
        }
    }

    /// Text shown in the field.
    pub fn display(&self) -> String {
        match &self.control {
            Control::Input { value, .. } => value.clone(),
            Control::Select { options, selected } => selected
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .map(|o| o.label.clone())
                .unwrap_or_else(|| EMPTY_CHOICE.to_string()),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self.control, Control::Select { .. })
    }

    fn is_empty(&self) -> bool {
        self.value().is_null()
    }
}

/// Submitted value of raw input text: blank is null, numeric inputs parse.
pub(crate) fn input_value(input: InputType, raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if input == InputType::Number {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::from(n);
        }
        if let Some(n) = trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::from(raw.to_string())
}

/// An open create or edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub entity: Entity,
    pub mode: FormMode,
    pub title: String,
    pub primary_key: &'static str,
    /// Hidden primary key carried by edit forms
    pub hidden_id: Option<RecordId>,
    pub controls: Vec<FormControl>,
    pub focus: usize,
    initial: Vec<FormControl>,
}

impl FormState {
    pub fn new(
        entity: Entity,
        mode: FormMode,
        primary_key: &'static str,
        hidden_id: Option<RecordId>,
        controls: Vec<FormControl>,
    ) -> Self {
        let verb = match mode {
            FormMode::Create => "Create",
            FormMode::Edit => "Update",
        };
        Self {
            entity,
            mode,
            title: format!("{} {}", verb, entity.title()),
            primary_key,
            hidden_id,
            initial: controls.clone(),
            controls,
            focus: 0,
        }
    }

    pub fn focused(&self) -> Option<&FormControl> {
        self.controls.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.controls.is_empty() {
            self.focus = (self.focus + 1) % self.controls.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.controls.is_empty() {
            self.focus = (self.focus + self.controls.len() - 1) % self.controls.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(FormControl {
            control: Control::Input { value, .. },
            ..
        }) = self.controls.get_mut(self.focus)
        {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        match self.controls.get_mut(self.focus).map(|c| &mut c.control) {
            Some(Control::Input { value, .. }) => {
                value.pop();
            }
            Some(Control::Select { selected, .. }) => *selected = 0,
            None => {}
        }
    }

    /// Step the focused select through its choices, wrapping around.
    pub fn cycle_option(&mut self, forward: bool) {
        if let Some(Control::Select { options, selected }) =
            self.controls.get_mut(self.focus).map(|c| &mut c.control)
        {
            let choices = options.len() + 1;
            *selected = if forward {
                (*selected + 1) % choices
            } else {
                (*selected + choices - 1) % choices
            };
        }
    }

    /// Restore the values the form opened with.
    pub fn reset(&mut self) {
        self.controls = self.initial.clone();
        self.focus = 0;
    }

    pub fn is_dirty(&self) -> bool {
        self.controls != self.initial
    }

    /// Fail on the first empty required field.
    pub fn validate(&self) -> Result<()> {
        match self.controls.iter().find(|c| c.required && c.is_empty()) {
            Some(c) => Err(Error::required_field(c.key, c.label)),
            None => Ok(()),
        }
    }

    /// Hidden primary key (edit mode) followed by every field.
    pub fn payload(&self) -> Record {
        let mut payload = Record::new();
        if let Some(id) = &self.hidden_id {
            payload.insert(self.primary_key, id.to_value());
        }
        for control in &self.controls {
            payload.insert(control.key, control.value());
        }
        payload
    }
}

/// Build a form for `entity`, pre-filled from `existing` when editing.
///
/// A failed `options` call leaves that select with only the empty choice.
pub async fn build_form<S>(
    store: &S,
    registry: &SchemaRegistry,
    entity: Entity,
    existing: Option<&Record>,
) -> FormState
where
    S: RemoteStore + Sync,
{
    let schema = registry.schema(entity);
    let mut controls = Vec::with_capacity(schema.fields.len());

    for field in schema.fields {
        let current = existing.and_then(|r| r.get(field.key));

        let control = match schema.select_relation(field.key) {
            Some(relation) => {
                let mut options = match store
                    .options(relation.entity, relation.label_field, None)
                    .await
                {
                    Ok(options) => options,
                    Err(e) => {
                        warn!(
                            "Failed to load {} options for {}.{}: {}",
                            relation.entity, entity, field.key, e
                        );
                        Vec::new()
                    }
                };
                options.sort_by(|a, b| compare_labels(&a.label, &b.label));

                let current_id = current.and_then(RecordId::from_value);
                let selected = current_id
                    .and_then(|id| options.iter().position(|o| o.id().as_ref() == Some(&id)))
                    .map_or(0, |i| i + 1);
                Control::Select { options, selected }
            }
            None => Control::Input {
                input: field.input,
                value: current.map(display_value).unwrap_or_default(),
                placeholder: field.placeholder.map(str::to_string),
            },
        };

        controls.push(FormControl {
            key: field.key,
            label: field.label,
            required: field.required,
            control,
        });
    }

    let (mode, hidden_id) = match existing {
        Some(record) => (FormMode::Edit, record.id(schema.primary_key)),
        None => (FormMode::Create, None),
    };
    FormState::new(entity, mode, schema.primary_key, hidden_id, controls)
}

/// Numeric labels (ids used as labels) sort by value ahead of text labels.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

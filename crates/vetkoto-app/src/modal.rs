//! Generic modal dialog behaviour
//!
//! The [`ModalController`] knows nothing about entities. It keeps every
//! registered modal in a layer stack, decorates modals once (overlay, close
//! affordance, footer layout) and turns user triggers into open/close
//! transitions or a submission request.

use std::sync::LazyLock;

use regex::Regex;

static SAVE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(save|primary)\b").expect("save class regex is valid"));
static RESET_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(reset|cancel)\b").expect("reset class regex is valid"));
static DELETE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(delete|danger)\b").expect("delete class regex is valid")
});
static CLOSE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(close|×|✕)\s*$").expect("close label regex is valid")
});

/// Dialogs known to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    EntityForm,
    Confirm,
    Alert,
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// Accessibility attributes mirrored by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalAttrs {
    pub hidden: bool,
    pub role: Option<&'static str>,
    pub aria_modal: bool,
}

impl Default for ModalAttrs {
    fn default() -> Self {
        Self {
            hidden: true,
            role: None,
            aria_modal: false,
        }
    }
}

/// Elements injected into a modal during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Overlay,
    CloseAffordance,
    FormContainer,
}

/// Placement of a footer button after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Save,
    Reset,
    Delete,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterButton {
    pub label: String,
    pub class: String,
    pub role: ButtonRole,
}

impl FooterButton {
    pub fn new(label: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: class.into(),
            role: ButtonRole::Other,
        }
    }
}

/// Footer buttons split into a left and a right group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    raw: Vec<FooterButton>,
    pub left: Vec<FooterButton>,
    pub right: Vec<FooterButton>,
    normalized: bool,
}

impl Footer {
    pub fn new(buttons: Vec<FooterButton>) -> Self {
        Self {
            raw: buttons,
            ..Self::default()
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Sort raw buttons into groups. Runs once per footer.
    fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        for mut button in std::mem::take(&mut self.raw) {
            let class = button.class.as_str();
            button.role = if SAVE_CLASS.is_match(class) {
                ButtonRole::Save
            } else if RESET_CLASS.is_match(class) {
                ButtonRole::Reset
            } else if DELETE_CLASS.is_match(class) {
                ButtonRole::Delete
            } else {
                ButtonRole::Other
            };
            match button.role {
                ButtonRole::Save => self.right.push(button),
                _ => self.left.push(button),
            }
        }
        self.normalized = true;
    }

    pub fn buttons(&self) -> impl Iterator<Item = &FooterButton> {
        self.left.iter().chain(self.right.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub id: ModalId,
    pub title: String,
    /// Pinned modals ignore overlay clicks and Escape.
    pub closable: bool,
    /// Content holds inputs that a save submits.
    pub has_form: bool,
    pub visibility: Visibility,
    pub attrs: ModalAttrs,
    pub body_labels: Vec<String>,
    pub footer: Footer,
    decorations: Vec<Decoration>,
}

impl Modal {
    pub fn new(id: ModalId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            closable: true,
            has_form: false,
            visibility: Visibility::Closed,
            attrs: ModalAttrs::default(),
            body_labels: Vec::new(),
            footer: Footer::default(),
            decorations: Vec::new(),
        }
    }

    pub fn pinned(mut self) -> Self {
        self.closable = false;
        self
    }

    pub fn with_form(mut self) -> Self {
        self.has_form = true;
        self
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.body_labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_footer(mut self, buttons: Vec<FooterButton>) -> Self {
        self.footer = Footer::new(buttons);
        self
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn has(&self, decoration: Decoration) -> bool {
        self.decorations.contains(&decoration)
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn overlay_visible(&self) -> bool {
        self.is_open() && self.has(Decoration::Overlay)
    }

    fn ensure(&mut self, decoration: Decoration) {
        if !self.has(decoration) {
            self.decorations.push(decoration);
        }
    }

    fn decorate(&mut self) {
        self.ensure(Decoration::Overlay);
        self.ensure(Decoration::CloseAffordance);
        if self.has_form {
            self.ensure(Decoration::FormContainer);
        }
    }

    fn setup(&mut self) {
        self.body_labels.retain(|label| !CLOSE_LABEL.is_match(label));
        self.footer.normalize();
        self.decorate();
    }
}

/// User triggers routed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    CloseAffordance(ModalId),
    OverlayClick(ModalId),
    Escape,
    Save(ModalId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Closed(Vec<ModalId>),
    SubmitRequested(ModalId),
    Ignored,
}

/// Layer stack of modals, bottom first.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    layers: Vec<Modal>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller holding the dashboard's dialogs.
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.insert(
            Modal::new(ModalId::EntityForm, "Record")
                .with_form()
                .with_footer(vec![
                    FooterButton::new("Save", "btn btn-primary"),
                    FooterButton::new("Reset", "btn btn-reset"),
                    FooterButton::new("Delete", "btn btn-danger"),
                    FooterButton::new("Cancel", "btn btn-cancel"),
                ]),
        );
        controller.insert(Modal::new(ModalId::Confirm, "Confirm").with_footer(vec![
            FooterButton::new("Confirm", "btn btn-danger"),
            FooterButton::new("Cancel", "btn btn-cancel"),
        ]));
        controller.insert(
            Modal::new(ModalId::Alert, "Notice")
                .pinned()
                .with_footer(vec![FooterButton::new("OK", "btn btn-primary")]),
        );
        controller.insert(
            Modal::new(ModalId::Import, "Import CSV")
                .with_form()
                .with_footer(vec![
                    FooterButton::new("Import", "btn btn-primary"),
                    FooterButton::new("Cancel", "btn btn-cancel"),
                ]),
        );
        controller
    }

    /// Register a modal, replacing any modal with the same id.
    pub fn insert(&mut self, mut modal: Modal) {
        modal.setup();
        self.layers.retain(|m| m.id != modal.id);
        self.layers.insert(0, modal);
    }

    pub fn get(&self, id: ModalId) -> Option<&Modal> {
        self.layers.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: ModalId) -> Option<&mut Modal> {
        self.layers.iter_mut().find(|m| m.id == id)
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.get(id).is_some_and(Modal::is_open)
    }

    /// Open modals, bottom to top.
    pub fn open_modals(&self) -> impl Iterator<Item = &Modal> {
        self.layers.iter().filter(|m| m.is_open())
    }

    pub fn top(&self) -> Option<&Modal> {
        self.layers.iter().rev().find(|m| m.is_open())
    }

    pub fn any_open(&self) -> bool {
        self.top().is_some()
    }

    /// Raise `id` to the top layer and show it.
    pub fn open(&mut self, id: ModalId) -> bool {
        let Some(index) = self.layers.iter().position(|m| m.id == id) else {
            return false;
        };
        let mut modal = self.layers.remove(index);
        modal.decorate();
        modal.visibility = Visibility::Open;
        modal.attrs = ModalAttrs {
            hidden: false,
            role: Some("dialog"),
            aria_modal: true,
        };
        self.layers.push(modal);
        true
    }

    /// Hide `id`. Decorations stay in place for the next open.
    pub fn close(&mut self, id: ModalId) -> bool {
        match self.get_mut(id) {
            Some(modal) if modal.is_open() => {
                modal.visibility = Visibility::Closed;
                modal.attrs = ModalAttrs::default();
                true
            }
            _ => false,
        }
    }

    pub fn handle(&mut self, event: ModalEvent) -> ModalOutcome {
        match event {
            ModalEvent::CloseAffordance(id) => self.close_one(id),
            ModalEvent::OverlayClick(id) => match self.get(id) {
                Some(modal) if modal.closable => self.close_one(id),
                _ => ModalOutcome::Ignored,
            },
            ModalEvent::Escape => {
                let ids: Vec<ModalId> = self
                    .open_modals()
                    .filter(|m| m.closable)
                    .map(|m| m.id)
                    .collect();
                for id in &ids {
                    self.close(*id);
                }
                if ids.is_empty() {
                    ModalOutcome::Ignored
                } else {
                    ModalOutcome::Closed(ids)
                }
            }
            ModalEvent::Save(id) => match self.get(id) {
                Some(modal) if modal.is_open() && modal.has(Decoration::FormContainer) => {
                    ModalOutcome::SubmitRequested(id)
                }
                _ => ModalOutcome::Ignored,
            },
        }
    }

    fn close_one(&mut self, id: ModalId) -> ModalOutcome {
        if self.close(id) {
            ModalOutcome::Closed(vec![id])
        } else {
            ModalOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_twice_injects_once() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::EntityForm);
        modals.open(ModalId::EntityForm);

        let modal = modals.get(ModalId::EntityForm).unwrap();
        assert_eq!(modal.decorations().len(), 3);
        assert!(modal.overlay_visible());
        assert_eq!(modal.attrs.role, Some("dialog"));
        assert!(!modal.attrs.hidden);
        assert!(modal.attrs.aria_modal);
    }

    #[test]
    fn test_close_only_hides() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::Confirm);
        assert!(modals.close(ModalId::Confirm));
        assert!(!modals.close(ModalId::Confirm));

        let modal = modals.get(ModalId::Confirm).unwrap();
        assert!(!modal.is_open());
        assert!(modal.attrs.hidden);
        assert!(modal.has(Decoration::Overlay));
        assert!(modal.has(Decoration::CloseAffordance));
    }

    #[test]
    fn test_open_moves_to_top() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::EntityForm);
        modals.open(ModalId::Confirm);
        assert_eq!(modals.top().map(|m| m.id), Some(ModalId::Confirm));

        modals.open(ModalId::EntityForm);
        assert_eq!(modals.top().map(|m| m.id), Some(ModalId::EntityForm));
        assert_eq!(modals.open_modals().count(), 2);
    }

    #[test]
    fn test_escape_spares_pinned() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::EntityForm);
        modals.open(ModalId::Alert);

        let outcome = modals.handle(ModalEvent::Escape);
        assert_eq!(outcome, ModalOutcome::Closed(vec![ModalId::EntityForm]));
        assert!(modals.is_open(ModalId::Alert));
        assert_eq!(modals.handle(ModalEvent::Escape), ModalOutcome::Ignored);
    }

    #[test]
    fn test_overlay_click_respects_pin() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::Alert);
        modals.open(ModalId::Import);

        assert_eq!(
            modals.handle(ModalEvent::OverlayClick(ModalId::Alert)),
            ModalOutcome::Ignored
        );
        assert_eq!(
            modals.handle(ModalEvent::OverlayClick(ModalId::Import)),
            ModalOutcome::Closed(vec![ModalId::Import])
        );
        assert_eq!(
            modals.handle(ModalEvent::CloseAffordance(ModalId::Alert)),
            ModalOutcome::Closed(vec![ModalId::Alert])
        );
    }

    #[test]
    fn test_save_needs_form_container() {
        let mut modals = ModalController::with_defaults();
        modals.open(ModalId::EntityForm);
        modals.open(ModalId::Confirm);

        assert_eq!(
            modals.handle(ModalEvent::Save(ModalId::EntityForm)),
            ModalOutcome::SubmitRequested(ModalId::EntityForm)
        );
        assert_eq!(
            modals.handle(ModalEvent::Save(ModalId::Confirm)),
            ModalOutcome::Ignored
        );
    }

    #[test]
    fn test_footer_normalization() {
        let mut modals = ModalController::new();
        modals.insert(Modal::new(ModalId::EntityForm, "Edit").with_footer(vec![
            FooterButton::new("Delete", "btn danger"),
            FooterButton::new("Save", "btn SAVE"),
            FooterButton::new("Cancel", "btn cancel"),
            FooterButton::new("Help", "btn link"),
        ]));

        let footer = &modals.get(ModalId::EntityForm).unwrap().footer;
        assert!(footer.is_normalized());
        let right: Vec<&str> = footer.right.iter().map(|b| b.label.as_str()).collect();
        let left: Vec<(&str, ButtonRole)> = footer
            .left
            .iter()
            .map(|b| (b.label.as_str(), b.role))
            .collect();
        assert_eq!(right, vec!["Save"]);
        assert_eq!(
            left,
            vec![
                ("Delete", ButtonRole::Delete),
                ("Cancel", ButtonRole::Reset),
                ("Help", ButtonRole::Other),
            ]
        );
    }

    #[test]
    fn test_insert_strips_close_labels() {
        let mut modals = ModalController::new();
        modals.insert(Modal::new(ModalId::Import, "Import").with_labels(&["Close", "File", " × "]));
        let modal = modals.get(ModalId::Import).unwrap();
        assert_eq!(modal.body_labels, vec!["File".to_string()]);
        assert!(modal.has(Decoration::CloseAffordance));
    }
}

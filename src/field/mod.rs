//! Editing session for a single token field.
//!
//! A field is `Idle` until focused. While `Editing`, every keystroke updates
//! the draft and, when the draft holds a usable value, propagates it to the
//! token tree right away. Blur commits once more and returns to `Idle`.

use std::fmt;

use crate::units::{
    clamp_to_bounds, format_number, parse_leading_number, parse_value_and_unit,
    round_step_result, CssUnit,
};

const FINE_MULTIPLIER: f64 = 0.1;
const COARSE_MULTIPLIER: f64 = 10.0;

/// Value flowing between an editor field and the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Text form as shown in an input box.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, propagated verbatim.
    Text,
    /// Plain number with an implied, fixed unit.
    Number,
    /// Color literal, propagated verbatim and never stepped.
    Color,
    /// Number coupled to a CSS unit the user may change inline.
    UnitAware,
    /// On/off switch.
    Toggle,
}

/// Static description of a field: what it holds and how it steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub default_unit: CssUnit,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
}

impl FieldSpec {
    const fn with_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            default_unit: CssUnit::Px,
            min: None,
            max: None,
            step: 1.0,
        }
    }

    pub const fn text() -> Self {
        Self::with_kind(FieldKind::Text)
    }

    pub const fn number() -> Self {
        Self::with_kind(FieldKind::Number)
    }

    pub const fn color() -> Self {
        Self::with_kind(FieldKind::Color)
    }

    pub const fn toggle() -> Self {
        Self::with_kind(FieldKind::Toggle)
    }

    pub const fn unit_aware(default_unit: CssUnit) -> Self {
        let mut spec = Self::with_kind(FieldKind::UnitAware);
        spec.default_unit = default_unit;
        spec
    }

    pub const fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub const fn stepped(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    const fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Keyboard modifiers held while stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepModifiers {
    pub fine: bool,
    pub coarse: bool,
}

impl StepModifiers {
    pub const fn new(fine: bool, coarse: bool) -> Self {
        Self { fine, coarse }
    }

    pub fn multiplier(self) -> f64 {
        let fine = if self.fine { FINE_MULTIPLIER } else { 1.0 };
        let coarse = if self.coarse { COARSE_MULTIPLIER } else { 1.0 };
        fine * coarse
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Idle,
    Editing,
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    spec: FieldSpec,
    state: FieldState,
    committed: FieldValue,
    draft: String,
    active_unit: CssUnit,
}

impl FieldEditor {
    pub fn new(spec: FieldSpec, committed: FieldValue) -> Self {
        let mut editor = Self {
            spec,
            state: FieldState::Idle,
            committed: committed.clone(),
            draft: String::new(),
            active_unit: spec.default_unit,
        };
        editor.sync(committed);
        editor
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn active_unit(&self) -> CssUnit {
        self.active_unit
    }

    pub fn committed(&self) -> &FieldValue {
        &self.committed
    }

    /// Accepts the value currently stored in the token tree. The visible text
    /// only follows it while the field is idle.
    pub fn sync(&mut self, committed: FieldValue) {
        self.committed = committed;
        if self.state == FieldState::Editing {
            return;
        }

        if self.spec.kind != FieldKind::UnitAware {
            self.draft = self.committed.as_text();
            return;
        }

        match &self.committed {
            FieldValue::Text(raw) => match parse_value_and_unit(raw, self.spec.default_unit) {
                Some(parsed) => {
                    self.draft = parsed.numeric_text();
                    self.active_unit = parsed.unit;
                }
                None => {
                    self.draft = raw.clone();
                    self.active_unit = self.spec.default_unit;
                }
            },
            other => {
                self.draft = other.as_text();
                self.active_unit = self.spec.default_unit;
            }
        }
    }

    pub fn focus(&mut self) {
        if self.state == FieldState::Idle {
            tracing::debug!(kind = ?self.spec.kind, "field focused");
        }
        self.state = FieldState::Editing;
    }

    /// Handles a keystroke. Returns the value to write into the token tree,
    /// or `None` when the draft is not (yet) a usable value.
    pub fn input(&mut self, raw: &str) -> Option<FieldValue> {
        self.focus();
        self.draft = raw.to_string();

        let value = match self.spec.kind {
            FieldKind::Text | FieldKind::Color => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Number => parse_leading_number(raw).map(FieldValue::Number),
            FieldKind::UnitAware => parse_value_and_unit(raw, self.active_unit).map(|parsed| {
                self.active_unit = parsed.unit;
                FieldValue::Text(parsed.to_string())
            }),
            FieldKind::Toggle => match raw.trim() {
                "true" => Some(FieldValue::Bool(true)),
                "false" => Some(FieldValue::Bool(false)),
                _ => None,
            },
        };

        match &value {
            Some(value) => self.committed = value.clone(),
            None => tracing::trace!(draft = raw, "draft not propagated"),
        }
        value
    }

    /// Leaves editing. Unit-aware fields normalize and propagate once more.
    pub fn blur(&mut self) -> Option<FieldValue> {
        if self.state == FieldState::Editing {
            tracing::debug!(kind = ?self.spec.kind, "field blurred");
        }
        self.state = FieldState::Idle;

        if self.spec.kind != FieldKind::UnitAware {
            self.draft = self.committed.as_text();
            return None;
        }

        let parsed = parse_value_and_unit(&self.draft, self.active_unit)?;
        self.draft = parsed.numeric_text();
        self.active_unit = parsed.unit;
        let value = FieldValue::Text(parsed.to_string());
        self.committed = value.clone();
        Some(value)
    }

    /// Applies one keyboard step. Fine and coarse modifiers compose; the
    /// result is clamped to the field's bounds.
    pub fn step(&mut self, direction: StepDirection, modifiers: StepModifiers) -> Option<FieldValue> {
        let delta = self.spec.step * modifiers.multiplier() * direction.sign();
        if delta == 0.0 {
            return None;
        }

        match self.spec.kind {
            FieldKind::UnitAware => {
                let parsed = parse_value_and_unit(&self.display_text(), self.active_unit)?;
                let next = self.stepped(parsed.number, delta);
                self.draft = format_number(next);
                self.active_unit = parsed.unit;
                let value = FieldValue::Text(format!("{}{}", self.draft, self.active_unit));
                self.committed = value.clone();
                Some(value)
            }
            FieldKind::Number | FieldKind::Text => {
                let current = parse_leading_number(&self.display_text())?;
                let next = self.stepped(current, delta);
                self.draft = format_number(next);
                let value = FieldValue::Number(next);
                self.committed = value.clone();
                Some(value)
            }
            FieldKind::Color | FieldKind::Toggle => None,
        }
    }

    fn stepped(&self, current: f64, delta: f64) -> f64 {
        let next = round_step_result(current + delta);
        clamp_to_bounds(next, self.spec.min, self.spec.max)
    }

    /// Text shown in the input box.
    pub fn display_text(&self) -> String {
        if self.spec.kind == FieldKind::UnitAware || self.state == FieldState::Editing {
            self.draft.clone()
        } else {
            self.committed.as_text()
        }
    }

    /// Full value including unit, as shown in the live tooltip.
    pub fn preview_text(&self) -> String {
        if self.spec.kind == FieldKind::UnitAware {
            format!("{}{}", self.draft, self.active_unit)
        } else {
            self.committed.as_text()
        }
    }
}

use std::fmt;

use super::patch::{ButtonStatePatch, Merge, TextShadowPatch, TypographyPatch};
use super::names::{normalize_font_family, slugify_color_name};
use super::{
    ButtonState, ButtonVariant, ColorToken, DesignTokens, HeadingLevel, ParagraphVariant,
    TokenError, TokenResult,
};
use crate::field::{FieldSpec, FieldValue};
use crate::units::CssUnit;

/// A single edit applied to the working tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenMutation {
    UpdateColor { index: usize, value: String },
    RenameColor { index: usize, name: String },
    AddColor(ColorToken),
    UpdateHeading {
        level: HeadingLevel,
        patch: TypographyPatch,
    },
    UpdateParagraph {
        variant: ParagraphVariant,
        patch: TypographyPatch,
    },
    UpdateButton {
        variant: ButtonVariant,
        state: ButtonState,
        patch: ButtonStatePatch,
    },
}

impl TokenMutation {
    /// Returns a new tree with the mutation applied; `tokens` is untouched.
    pub fn apply(&self, tokens: &DesignTokens) -> TokenResult<DesignTokens> {
        let mut next = tokens.clone();
        match self {
            Self::UpdateColor { index, value } => {
                color_at(&mut next.colors, *index)?.value = value.clone();
            }
            Self::RenameColor { index, name } => {
                let name = slugify_color_name(name).ok_or(TokenError::InvalidName)?;
                color_at(&mut next.colors, *index)?.name = name;
            }
            Self::AddColor(color) => next.colors.push(color.clone()),
            Self::UpdateHeading { level, patch } => {
                let heading = next.typography.headings.get_mut(*level);
                *heading = heading.merged_with(patch);
            }
            Self::UpdateParagraph { variant, patch } => {
                let paragraph = next.typography.paragraph.get_mut(*variant);
                *paragraph = paragraph.merged_with(patch);
            }
            Self::UpdateButton {
                variant,
                state,
                patch,
            } => {
                let button_state = next.buttons.get_mut(*variant).state_mut(*state);
                *button_state = button_state.merged_with(patch);
            }
        }
        Ok(next)
    }
}

fn color_at(colors: &mut [ColorToken], index: usize) -> TokenResult<&mut ColorToken> {
    let len = colors.len();
    colors
        .get_mut(index)
        .ok_or(TokenError::ColorIndexOutOfRange { index, len })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographyField {
    FontFamily,
    FontWeight,
    FontSize,
    LineHeight,
    LetterSpacing,
    ShadowX,
    ShadowY,
    ShadowBlur,
    ShadowColor,
}

impl TypographyField {
    const ALL: [TypographyField; 9] = [
        TypographyField::FontFamily,
        TypographyField::FontWeight,
        TypographyField::FontSize,
        TypographyField::LineHeight,
        TypographyField::LetterSpacing,
        TypographyField::ShadowX,
        TypographyField::ShadowY,
        TypographyField::ShadowBlur,
        TypographyField::ShadowColor,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
            Self::FontSize => "fontSize",
            Self::LineHeight => "lineHeight",
            Self::LetterSpacing => "letterSpacing",
            Self::ShadowX => "textShadow.x",
            Self::ShadowY => "textShadow.y",
            Self::ShadowBlur => "textShadow.blur",
            Self::ShadowColor => "textShadow.color",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    fn patch(self, path: &TokenPath, value: &FieldValue) -> TokenResult<TypographyPatch> {
        let mut patch = TypographyPatch::default();
        let mut shadow = TextShadowPatch::default();
        match self {
            Self::FontFamily => {
                patch.font_family = Some(normalize_font_family(&expect_text(path, value)?));
            }
            Self::FontWeight => patch.font_weight = Some(expect_weight(path, value)?),
            Self::FontSize => patch.font_size = Some(expect_number(path, value)?),
            Self::LineHeight => patch.line_height = Some(expect_number(path, value)?),
            Self::LetterSpacing => patch.letter_spacing = Some(expect_number(path, value)?),
            Self::ShadowX => shadow.x = Some(expect_number(path, value)?),
            Self::ShadowY => shadow.y = Some(expect_number(path, value)?),
            Self::ShadowBlur => shadow.blur = Some(expect_number(path, value)?),
            Self::ShadowColor => shadow.color = Some(expect_text(path, value)?),
        }
        if shadow != TextShadowPatch::default() {
            patch.text_shadow = Some(shadow);
        }
        Ok(patch)
    }

    fn heading_spec(self) -> FieldSpec {
        match self {
            Self::FontFamily => FieldSpec::text(),
            Self::FontWeight => FieldSpec::number().bounded(100.0, 900.0).stepped(100.0),
            Self::FontSize => FieldSpec::number().bounded(12.0, 120.0),
            Self::LineHeight => FieldSpec::number().bounded(0.5, 3.0).stepped(0.1),
            Self::LetterSpacing => FieldSpec::number().bounded(-5.0, 10.0).stepped(0.25),
            Self::ShadowX | Self::ShadowY => FieldSpec::number().bounded(-10.0, 10.0),
            Self::ShadowBlur => FieldSpec::number().bounded(0.0, 20.0),
            Self::ShadowColor => FieldSpec::color(),
        }
    }

    fn paragraph_spec(self) -> FieldSpec {
        match self {
            Self::FontFamily => FieldSpec::text(),
            Self::FontWeight => FieldSpec::number().bounded(100.0, 900.0).stepped(100.0),
            Self::FontSize => FieldSpec::number().bounded(10.0, 32.0),
            Self::LineHeight => FieldSpec::number().bounded(1.0, 3.0).stepped(0.05),
            Self::LetterSpacing => FieldSpec::number().bounded(-2.0, 5.0).stepped(0.1),
            Self::ShadowX | Self::ShadowY => FieldSpec::number().bounded(-5.0, 5.0),
            Self::ShadowBlur => FieldSpec::number().bounded(0.0, 10.0),
            Self::ShadowColor => FieldSpec::color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonField {
    PaddingTop,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    MinWidth,
    MinHeight,
    /// Sets `height` and `minHeight` together.
    Height,
    FontFamily,
    FontWeight,
    FontSize,
    Background,
    TextColor,
    BorderWidth,
    BorderColor,
    BorderRadius,
    BorderEnabled,
}

impl ButtonField {
    const ALL: [ButtonField; 16] = [
        ButtonField::PaddingTop,
        ButtonField::PaddingBottom,
        ButtonField::PaddingLeft,
        ButtonField::PaddingRight,
        ButtonField::MinWidth,
        ButtonField::MinHeight,
        ButtonField::Height,
        ButtonField::FontFamily,
        ButtonField::FontWeight,
        ButtonField::FontSize,
        ButtonField::Background,
        ButtonField::TextColor,
        ButtonField::BorderWidth,
        ButtonField::BorderColor,
        ButtonField::BorderRadius,
        ButtonField::BorderEnabled,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::PaddingTop => "paddingTop",
            Self::PaddingBottom => "paddingBottom",
            Self::PaddingLeft => "paddingLeft",
            Self::PaddingRight => "paddingRight",
            Self::MinWidth => "minWidth",
            Self::MinHeight => "minHeight",
            Self::Height => "height",
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
            Self::FontSize => "fontSize",
            Self::Background => "background",
            Self::TextColor => "textColor",
            Self::BorderWidth => "borderWidth",
            Self::BorderColor => "borderColor",
            Self::BorderRadius => "borderRadius",
            Self::BorderEnabled => "borderEnabled",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    fn patch(
        self,
        path: &TokenPath,
        value: &FieldValue,
        current_border_width: f64,
    ) -> TokenResult<ButtonStatePatch> {
        let mut patch = ButtonStatePatch::default();
        match self {
            Self::PaddingTop => patch.padding_top = Some(expect_number(path, value)?),
            Self::PaddingBottom => patch.padding_bottom = Some(expect_number(path, value)?),
            Self::PaddingLeft => patch.padding_left = Some(expect_number(path, value)?),
            Self::PaddingRight => patch.padding_right = Some(expect_number(path, value)?),
            Self::MinWidth => patch.min_width = Some(expect_number(path, value)?),
            Self::MinHeight => patch.min_height = Some(expect_number(path, value)?),
            Self::Height => {
                let height = expect_number(path, value)?;
                patch.height = Some(height);
                patch.min_height = Some(height);
            }
            Self::FontFamily => patch.font_family = Some(expect_text(path, value)?),
            Self::FontWeight => patch.font_weight = Some(expect_weight(path, value)?),
            Self::FontSize => patch.font_size = Some(expect_text(path, value)?),
            Self::Background => patch.background = Some(expect_text(path, value)?),
            Self::TextColor => patch.text_color = Some(expect_text(path, value)?),
            Self::BorderWidth => patch.border_width = Some(expect_number(path, value)?),
            Self::BorderColor => patch.border_color = Some(expect_text(path, value)?),
            Self::BorderRadius => patch.border_radius = Some(expect_number(path, value)?),
            Self::BorderEnabled => {
                let enabled = expect_bool(path, value)?;
                patch.border_enabled = Some(enabled);
                patch.border_width = Some(if enabled { current_border_width } else { 0.0 });
            }
        }
        Ok(patch)
    }

    fn spec(self) -> FieldSpec {
        match self {
            Self::PaddingTop | Self::PaddingBottom => FieldSpec::number().bounded(0.0, 50.0),
            Self::PaddingLeft | Self::PaddingRight => FieldSpec::number().bounded(0.0, 100.0),
            Self::MinWidth => FieldSpec::number().bounded(50.0, 400.0),
            Self::MinHeight | Self::Height => FieldSpec::number().bounded(24.0, 120.0),
            Self::FontFamily => FieldSpec::text(),
            Self::FontWeight => FieldSpec::number().bounded(100.0, 900.0).stepped(100.0),
            Self::FontSize => FieldSpec::unit_aware(CssUnit::Px),
            Self::Background | Self::TextColor | Self::BorderColor => FieldSpec::color(),
            Self::BorderWidth => FieldSpec::number().bounded(0.0, 10.0),
            Self::BorderRadius => FieldSpec::number().bounded(0.0, 200.0),
            Self::BorderEnabled => FieldSpec::toggle(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Name,
    Value,
}

/// Address of one editable leaf, e.g. `typography.headings.h1.fontSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPath {
    Color {
        index: usize,
        field: ColorField,
    },
    Heading {
        level: HeadingLevel,
        field: TypographyField,
    },
    Paragraph {
        variant: ParagraphVariant,
        field: TypographyField,
    },
    Button {
        variant: ButtonVariant,
        state: ButtonState,
        field: ButtonField,
    },
}

impl TokenPath {
    pub fn parse(raw: &str) -> TokenResult<Self> {
        let invalid = || TokenError::InvalidPath {
            path: raw.to_string(),
        };
        let segments: Vec<&str> = raw.split('.').collect();

        let path = match segments.as_slice() {
            ["colors", index, field] => TokenPath::Color {
                index: index.parse().map_err(|_| invalid())?,
                field: match *field {
                    "name" => ColorField::Name,
                    "value" => ColorField::Value,
                    _ => return Err(invalid()),
                },
            },
            ["typography", "headings", level, rest @ ..] => TokenPath::Heading {
                level: HeadingLevel::from_key(level).ok_or_else(invalid)?,
                field: TypographyField::from_key(&rest.join(".")).ok_or_else(invalid)?,
            },
            ["typography", "paragraph", variant, rest @ ..] => TokenPath::Paragraph {
                variant: ParagraphVariant::from_key(variant).ok_or_else(invalid)?,
                field: TypographyField::from_key(&rest.join(".")).ok_or_else(invalid)?,
            },
            ["buttons", variant, state, field] => TokenPath::Button {
                variant: ButtonVariant::from_key(variant).ok_or_else(invalid)?,
                state: ButtonState::from_key(state).ok_or_else(invalid)?,
                field: ButtonField::from_key(field).ok_or_else(invalid)?,
            },
            _ => return Err(invalid()),
        };
        Ok(path)
    }

    /// Editor description for the leaf: kind, default unit, bounds and step.
    pub fn field_spec(&self) -> FieldSpec {
        match self {
            Self::Color {
                field: ColorField::Name,
                ..
            } => FieldSpec::text(),
            Self::Color {
                field: ColorField::Value,
                ..
            } => FieldSpec::color(),
            Self::Heading { field, .. } => field.heading_spec(),
            Self::Paragraph { field, .. } => field.paragraph_spec(),
            Self::Button { field, .. } => field.spec(),
        }
    }

    /// Current value of the leaf in `tokens`, if the leaf exists.
    pub fn read(&self, tokens: &DesignTokens) -> Option<FieldValue> {
        let value = match *self {
            Self::Color { index, field } => {
                let color = tokens.colors.get(index)?;
                match field {
                    ColorField::Name => FieldValue::from(color.name.as_str()),
                    ColorField::Value => FieldValue::from(color.value.as_str()),
                }
            }
            Self::Heading { level, field } => {
                read_typography(tokens.typography.headings.get(level), field)
            }
            Self::Paragraph { variant, field } => {
                read_typography(tokens.typography.paragraph.get(variant), field)
            }
            Self::Button {
                variant,
                state,
                field,
            } => {
                let token = tokens.buttons.get(variant).state(state);
                match field {
                    ButtonField::PaddingTop => FieldValue::Number(token.padding_top),
                    ButtonField::PaddingBottom => FieldValue::Number(token.padding_bottom),
                    ButtonField::PaddingLeft => FieldValue::Number(token.padding_left),
                    ButtonField::PaddingRight => FieldValue::Number(token.padding_right),
                    ButtonField::MinWidth => FieldValue::Number(token.min_width),
                    ButtonField::MinHeight => FieldValue::Number(token.min_height),
                    ButtonField::Height => FieldValue::Number(token.effective_height()),
                    ButtonField::FontFamily => FieldValue::from(token.font_family.as_str()),
                    ButtonField::FontWeight => FieldValue::from(token.font_weight),
                    ButtonField::FontSize => FieldValue::from(token.font_size.as_str()),
                    ButtonField::Background => FieldValue::from(token.background.as_str()),
                    ButtonField::TextColor => FieldValue::from(token.text_color.as_str()),
                    ButtonField::BorderWidth => FieldValue::Number(token.border_width),
                    ButtonField::BorderColor => FieldValue::from(token.border_color.as_str()),
                    ButtonField::BorderRadius => FieldValue::Number(token.border_radius),
                    ButtonField::BorderEnabled => FieldValue::Bool(token.border_enabled()),
                }
            }
        };
        Some(value)
    }

    /// Builds the typed mutation that writes `value` at this path. `tokens`
    /// supplies context for derived fields (the border width kept when a
    /// border is switched on).
    pub fn mutation(&self, tokens: &DesignTokens, value: FieldValue) -> TokenResult<TokenMutation> {
        let mutation = match *self {
            Self::Color { index, field } => {
                let text = expect_text(self, &value)?;
                match field {
                    ColorField::Name => TokenMutation::RenameColor { index, name: text },
                    ColorField::Value => TokenMutation::UpdateColor { index, value: text },
                }
            }
            Self::Heading { level, field } => TokenMutation::UpdateHeading {
                level,
                patch: field.patch(self, &value)?,
            },
            Self::Paragraph { variant, field } => TokenMutation::UpdateParagraph {
                variant,
                patch: field.patch(self, &value)?,
            },
            Self::Button {
                variant,
                state,
                field,
            } => {
                let current = tokens.buttons.get(variant).state(state).border_width;
                TokenMutation::UpdateButton {
                    variant,
                    state,
                    patch: field.patch(self, &value, current)?,
                }
            }
        };
        Ok(mutation)
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { index, field } => {
                let field = match field {
                    ColorField::Name => "name",
                    ColorField::Value => "value",
                };
                write!(f, "colors.{index}.{field}")
            }
            Self::Heading { level, field } => {
                write!(f, "typography.headings.{}.{}", level.key(), field.key())
            }
            Self::Paragraph { variant, field } => {
                write!(f, "typography.paragraph.{}.{}", variant.key(), field.key())
            }
            Self::Button {
                variant,
                state,
                field,
            } => write!(
                f,
                "buttons.{}.{}.{}",
                variant.key(),
                state.key(),
                field.key()
            ),
        }
    }
}

fn read_typography(token: &super::TypographyToken, field: TypographyField) -> FieldValue {
    match field {
        TypographyField::FontFamily => FieldValue::from(token.font_family.as_str()),
        TypographyField::FontWeight => FieldValue::from(token.font_weight),
        TypographyField::FontSize => FieldValue::Number(token.font_size),
        TypographyField::LineHeight => FieldValue::Number(token.line_height),
        TypographyField::LetterSpacing => FieldValue::Number(token.letter_spacing),
        TypographyField::ShadowX => FieldValue::Number(token.text_shadow.x),
        TypographyField::ShadowY => FieldValue::Number(token.text_shadow.y),
        TypographyField::ShadowBlur => FieldValue::Number(token.text_shadow.blur),
        TypographyField::ShadowColor => FieldValue::from(token.text_shadow.color.as_str()),
    }
}

fn mismatch(path: &TokenPath, expected: &'static str) -> TokenError {
    TokenError::TypeMismatch {
        path: path.to_string(),
        expected,
    }
}

fn expect_number(path: &TokenPath, value: &FieldValue) -> TokenResult<f64> {
    match value {
        FieldValue::Number(number) if number.is_finite() => Ok(*number),
        FieldValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| mismatch(path, "number")),
        _ => Err(mismatch(path, "number")),
    }
}

fn expect_weight(path: &TokenPath, value: &FieldValue) -> TokenResult<u16> {
    let number = expect_number(path, value)?;
    if number.fract() != 0.0 || !(0.0..=f64::from(u16::MAX)).contains(&number) {
        return Err(mismatch(path, "whole number"));
    }
    // Range checked above.
    Ok(number as u16)
}

fn expect_text(path: &TokenPath, value: &FieldValue) -> TokenResult<String> {
    match value {
        FieldValue::Text(text) => Ok(text.clone()),
        FieldValue::Number(_) => Ok(value.as_text()),
        FieldValue::Bool(_) => Err(mismatch(path, "text")),
    }
}

fn expect_bool(path: &TokenPath, value: &FieldValue) -> TokenResult<bool> {
    match value {
        FieldValue::Bool(flag) => Ok(*flag),
        _ => Err(mismatch(path, "boolean")),
    }
}

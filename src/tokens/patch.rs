//! Typed partial trees and the deep merge that lays them over a full tree.
//!
//! Every patch field is optional. Absent (or `null`) fields keep the base
//! value, nested records merge recursively and `colors` is replaced whole.
//! Decoding is tolerant per leaf: a value of the wrong type is dropped and
//! the base value shows through in its place.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{
    ButtonStateToken, ButtonToken, Buttons, ColorToken, DesignTokens, Headings, Paragraphs,
    TextShadow, Typography, TypographyToken,
};

/// A complete value that can absorb a partial overlay of itself.
pub trait Merge: Clone {
    type Patch;

    fn merged_with(&self, patch: &Self::Patch) -> Self;
}

/// Lays `incoming` over `base`, keeping every leaf `incoming` leaves out.
pub fn merge<T: Merge>(base: &T, incoming: &T::Patch) -> T {
    base.merged_with(incoming)
}

fn merge_nested<T: Merge>(base: &T, patch: Option<&T::Patch>) -> T {
    match patch {
        Some(patch) => base.merged_with(patch),
        None => base.clone(),
    }
}

fn pick_string(patch: &Option<String>, base: &str) -> String {
    patch.clone().unwrap_or_else(|| base.to_string())
}

const MIN_FONT_WEIGHT: f64 = 1.0;
const MAX_FONT_WEIGHT: f64 = 1000.0;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            tracing::warn!(?err, "dropping malformed token leaf");
            Ok(None)
        }
    }
}

/// Accepts any JSON number; fractional weights round to the nearest integer
/// and land inside the CSS `1..=1000` range.
fn lenient_font_weight<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    let weight = value
        .as_f64()
        .filter(|weight| weight.is_finite())
        .map(font_weight_from_number);
    if weight.is_none() {
        tracing::warn!(%value, "dropping malformed font weight");
    }
    Ok(weight)
}

fn font_weight_from_number(weight: f64) -> u16 {
    // `clamp` keeps the cast in range.
    weight.round().clamp(MIN_FONT_WEIGHT, MAX_FONT_WEIGHT) as u16
}

/// Keeps every well-formed color entry; a value that is not a list at all
/// leaves the base palette in place.
fn lenient_colors<'de, D>(deserializer: D) -> Result<Option<Vec<ColorToken>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let entries = match value {
        Value::Null => return Ok(None),
        Value::Array(entries) => entries,
        other => {
            tracing::warn!(value = %other, "dropping malformed color list");
            return Ok(None);
        }
    };
    let colors = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<ColorToken>(entry) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::warn!(?err, "skipping malformed color entry");
                None
            }
        })
        .collect();
    Ok(Some(colors))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextShadowPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub color: Option<String>,
}

impl Merge for TextShadow {
    type Patch = TextShadowPatch;

    fn merged_with(&self, patch: &TextShadowPatch) -> TextShadow {
        TextShadow {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            blur: patch.blur.unwrap_or(self.blur),
            color: pick_string(&patch.color, &self.color),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_font_weight")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub text_shadow: Option<TextShadowPatch>,
}

impl Merge for TypographyToken {
    type Patch = TypographyPatch;

    fn merged_with(&self, patch: &TypographyPatch) -> TypographyToken {
        TypographyToken {
            font_family: pick_string(&patch.font_family, &self.font_family),
            font_weight: patch.font_weight.unwrap_or(self.font_weight),
            font_size: patch.font_size.unwrap_or(self.font_size),
            line_height: patch.line_height.unwrap_or(self.line_height),
            letter_spacing: patch.letter_spacing.unwrap_or(self.letter_spacing),
            text_shadow: merge_nested(&self.text_shadow, patch.text_shadow.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonStatePatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_font_weight")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub border_enabled: Option<bool>,
}

impl Merge for ButtonStateToken {
    type Patch = ButtonStatePatch;

    fn merged_with(&self, patch: &ButtonStatePatch) -> ButtonStateToken {
        ButtonStateToken {
            padding_top: patch.padding_top.unwrap_or(self.padding_top),
            padding_bottom: patch.padding_bottom.unwrap_or(self.padding_bottom),
            padding_left: patch.padding_left.unwrap_or(self.padding_left),
            padding_right: patch.padding_right.unwrap_or(self.padding_right),
            min_width: patch.min_width.unwrap_or(self.min_width),
            min_height: patch.min_height.unwrap_or(self.min_height),
            height: patch.height.or(self.height),
            font_family: pick_string(&patch.font_family, &self.font_family),
            font_weight: patch.font_weight.unwrap_or(self.font_weight),
            font_size: pick_string(&patch.font_size, &self.font_size),
            background: pick_string(&patch.background, &self.background),
            text_color: pick_string(&patch.text_color, &self.text_color),
            border_width: patch.border_width.unwrap_or(self.border_width),
            border_color: pick_string(&patch.border_color, &self.border_color),
            border_radius: patch.border_radius.unwrap_or(self.border_radius),
            border_enabled: patch.border_enabled.or(self.border_enabled),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTokenPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub default: Option<ButtonStatePatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub hover: Option<ButtonStatePatch>,
}

impl Merge for ButtonToken {
    type Patch = ButtonTokenPatch;

    fn merged_with(&self, patch: &ButtonTokenPatch) -> ButtonToken {
        ButtonToken {
            default: merge_nested(&self.default, patch.default.as_ref()),
            hover: merge_nested(&self.hover, patch.hover.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub primary: Option<ButtonTokenPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub secondary: Option<ButtonTokenPatch>,
}

impl Merge for Buttons {
    type Patch = ButtonsPatch;

    fn merged_with(&self, patch: &ButtonsPatch) -> Buttons {
        Buttons {
            primary: merge_nested(&self.primary, patch.primary.as_ref()),
            secondary: merge_nested(&self.secondary, patch.secondary.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingsPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h1: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h2: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h3: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h4: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h5: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub h6: Option<TypographyPatch>,
}

impl Merge for Headings {
    type Patch = HeadingsPatch;

    fn merged_with(&self, patch: &HeadingsPatch) -> Headings {
        Headings {
            h1: merge_nested(&self.h1, patch.h1.as_ref()),
            h2: merge_nested(&self.h2, patch.h2.as_ref()),
            h3: merge_nested(&self.h3, patch.h3.as_ref()),
            h4: merge_nested(&self.h4, patch.h4.as_ref()),
            h5: merge_nested(&self.h5, patch.h5.as_ref()),
            h6: merge_nested(&self.h6, patch.h6.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphsPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub large: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub small: Option<TypographyPatch>,
}

impl Merge for Paragraphs {
    type Patch = ParagraphsPatch;

    fn merged_with(&self, patch: &ParagraphsPatch) -> Paragraphs {
        Paragraphs {
            large: merge_nested(&self.large, patch.large.as_ref()),
            small: merge_nested(&self.small, patch.small.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographySectionPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub headings: Option<HeadingsPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub paragraph: Option<ParagraphsPatch>,
}

impl Merge for Typography {
    type Patch = TypographySectionPatch;

    fn merged_with(&self, patch: &TypographySectionPatch) -> Typography {
        Typography {
            headings: merge_nested(&self.headings, patch.headings.as_ref()),
            paragraph: merge_nested(&self.paragraph, patch.paragraph.as_ref()),
        }
    }
}

/// Partial document as persisted by older or newer builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokensPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_colors")]
    pub colors: Option<Vec<ColorToken>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub typography: Option<TypographySectionPatch>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub buttons: Option<ButtonsPatch>,
}

impl DesignTokensPatch {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Merge for DesignTokens {
    type Patch = DesignTokensPatch;

    fn merged_with(&self, patch: &DesignTokensPatch) -> DesignTokens {
        DesignTokens {
            colors: patch.colors.clone().unwrap_or_else(|| self.colors.clone()),
            typography: merge_nested(&self.typography, patch.typography.as_ref()),
            buttons: merge_nested(&self.buttons, patch.buttons.as_ref()),
        }
    }
}

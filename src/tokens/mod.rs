mod names;
mod patch;
mod path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use names::{normalize_font_family, slugify_color_name, DEFAULT_FONT_FAMILY};
pub use patch::{
    merge, ButtonStatePatch, ButtonTokenPatch, ButtonsPatch, DesignTokensPatch, HeadingsPatch,
    Merge, ParagraphsPatch, TextShadowPatch, TypographyPatch, TypographySectionPatch,
};
pub use path::{ButtonField, ColorField, TokenMutation, TokenPath, TypographyField};

pub type TokenResult<T> = std::result::Result<T, TokenError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    #[error("unknown token path: {path}")]
    InvalidPath { path: String },
    #[error("token path {path} expects a {expected} value")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
    #[error("color index {index} is out of range for {len} colors")]
    ColorIndexOutOfRange { index: usize, len: usize },
    #[error("name is empty after normalization")]
    InvalidName,
    #[error("value is empty")]
    EmptyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub value: String,
}

impl ColorToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub font_family: String,
    pub font_weight: u16,
    pub font_size: f64,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub text_shadow: TextShadow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStateToken {
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub min_width: f64,
    pub min_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub font_family: String,
    pub font_weight: u16,
    pub font_size: String,
    pub background: String,
    pub text_color: String,
    pub border_width: f64,
    pub border_color: String,
    pub border_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_enabled: Option<bool>,
}

impl ButtonStateToken {
    /// Height used for layout: explicit `height` wins over `min_height`.
    pub fn effective_height(&self) -> f64 {
        self.height.unwrap_or(self.min_height)
    }

    pub fn border_enabled(&self) -> bool {
        self.border_enabled != Some(false)
    }

    /// Border width as rendered; zero whenever the border is switched off.
    pub fn rendered_border_width(&self) -> f64 {
        if self.border_enabled() {
            self.border_width
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonToken {
    pub default: ButtonStateToken,
    pub hover: ButtonStateToken,
}

impl ButtonToken {
    pub fn state(&self, state: ButtonState) -> &ButtonStateToken {
        match state {
            ButtonState::Default => &self.default,
            ButtonState::Hover => &self.hover,
        }
    }

    pub fn state_mut(&mut self, state: ButtonState) -> &mut ButtonStateToken {
        match state {
            ButtonState::Default => &mut self.default,
            ButtonState::Hover => &mut self.hover,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: TypographyToken,
    pub h2: TypographyToken,
    pub h3: TypographyToken,
    pub h4: TypographyToken,
    pub h5: TypographyToken,
    pub h6: TypographyToken,
}

impl Headings {
    pub fn get(&self, level: HeadingLevel) -> &TypographyToken {
        match level {
            HeadingLevel::H1 => &self.h1,
            HeadingLevel::H2 => &self.h2,
            HeadingLevel::H3 => &self.h3,
            HeadingLevel::H4 => &self.h4,
            HeadingLevel::H5 => &self.h5,
            HeadingLevel::H6 => &self.h6,
        }
    }

    pub fn get_mut(&mut self, level: HeadingLevel) -> &mut TypographyToken {
        match level {
            HeadingLevel::H1 => &mut self.h1,
            HeadingLevel::H2 => &mut self.h2,
            HeadingLevel::H3 => &mut self.h3,
            HeadingLevel::H4 => &mut self.h4,
            HeadingLevel::H5 => &mut self.h5,
            HeadingLevel::H6 => &mut self.h6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraphs {
    pub large: TypographyToken,
    pub small: TypographyToken,
}

impl Paragraphs {
    pub fn get(&self, variant: ParagraphVariant) -> &TypographyToken {
        match variant {
            ParagraphVariant::Large => &self.large,
            ParagraphVariant::Small => &self.small,
        }
    }

    pub fn get_mut(&mut self, variant: ParagraphVariant) -> &mut TypographyToken {
        match variant {
            ParagraphVariant::Large => &mut self.large,
            ParagraphVariant::Small => &mut self.small,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub headings: Headings,
    pub paragraph: Paragraphs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buttons {
    pub primary: ButtonToken,
    pub secondary: ButtonToken,
}

impl Buttons {
    pub fn get(&self, variant: ButtonVariant) -> &ButtonToken {
        match variant {
            ButtonVariant::Primary => &self.primary,
            ButtonVariant::Secondary => &self.secondary,
        }
    }

    pub fn get_mut(&mut self, variant: ButtonVariant) -> &mut ButtonToken {
        match variant {
            ButtonVariant::Primary => &mut self.primary,
            ButtonVariant::Secondary => &mut self.secondary,
        }
    }
}

/// The full token tree edited by the studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTokens {
    pub colors: Vec<ColorToken>,
    pub typography: Typography,
    pub buttons: Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }

    pub fn selector(self) -> String {
        format!(".heading-{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphVariant {
    Large,
    Small,
}

impl ParagraphVariant {
    pub const ALL: [ParagraphVariant; 2] = [ParagraphVariant::Large, ParagraphVariant::Small];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Small => "small",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.key() == key)
    }

    pub fn selector(self) -> String {
        format!(".paragraph-{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 2] = [ButtonVariant::Primary, ButtonVariant::Secondary];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.key() == key)
    }

    /// Class name without the leading dot, e.g. `btn-primary`.
    pub fn class_name(self) -> String {
        format!("btn-{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Default,
    Hover,
}

impl ButtonState {
    pub const ALL: [ButtonState; 2] = [ButtonState::Default, ButtonState::Hover];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "hover",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.key() == key)
    }
}

fn typography(
    font_weight: u16,
    font_size: f64,
    line_height: f64,
    letter_spacing: f64,
    shadow_blur: f64,
    shadow_color: &str,
) -> TypographyToken {
    TypographyToken {
        font_family: DEFAULT_FONT_FAMILY.to_string(),
        font_weight,
        font_size,
        line_height,
        letter_spacing,
        text_shadow: TextShadow {
            x: 0.0,
            y: 1.0,
            blur: shadow_blur,
            color: shadow_color.to_string(),
        },
    }
}

fn button_state(
    padding: (f64, f64),
    min_width: f64,
    min_height: f64,
    font_size: &str,
    background: &str,
    foreground: &str,
) -> ButtonStateToken {
    let (vertical, horizontal) = padding;
    ButtonStateToken {
        padding_top: vertical,
        padding_bottom: vertical,
        padding_left: horizontal,
        padding_right: horizontal,
        min_width,
        min_height,
        height: None,
        font_family: DEFAULT_FONT_FAMILY.to_string(),
        font_weight: 600,
        font_size: font_size.to_string(),
        background: background.to_string(),
        text_color: foreground.to_string(),
        border_width: 1.0,
        border_color: foreground.to_string(),
        border_radius: 100.0,
        border_enabled: Some(true),
    }
}

const BRAND_RED: &str = "#fb2545";
const BUTTON_WHITE: &str = "#ffffff";

/// Built-in defaults. Every leaf missing from persisted data falls back here.
pub fn canonical_tokens() -> DesignTokens {
    DesignTokens {
        colors: vec![
            ColorToken::new("musio-red", BRAND_RED),
            ColorToken::new("musio-slate", "#1a1925"),
            ColorToken::new("musio-gray", "#262532"),
            ColorToken::new("musio-black", "#000000"),
            ColorToken::new("musio-white", "#eeeeee"),
            ColorToken::new("cinesamples-blue", "#1e94fc"),
            ColorToken::new("musio-accent-mint", "#26FBB8"),
        ],
        typography: Typography {
            headings: Headings {
                h1: typography(600, 70.0, 1.0, -1.75, 1.0, "#000000"),
                h2: typography(600, 60.0, 1.0, -1.75, 1.0, "#000000"),
                h3: typography(600, 50.0, 1.0, -1.75, 1.0, "rgba(0, 0, 0, 0.985)"),
                h4: typography(600, 40.0, 1.2, -0.5, 1.0, "rgba(0, 0, 0, 0.96)"),
                h5: typography(600, 30.0, 1.2, -0.5, 1.0, "rgba(0, 0, 0, 0.97)"),
                h6: typography(600, 20.0, 1.4, 0.0, 0.0, "rgba(0, 0, 0, 0.92)"),
            },
            paragraph: Paragraphs {
                large: typography(600, 18.0, 1.25, 0.0, 0.0, "rgba(0, 0, 0, 0.92)"),
                small: typography(500, 14.0, 1.5, 0.0, 0.0, "rgba(0, 0, 0, 0.82)"),
            },
        },
        buttons: Buttons {
            primary: ButtonToken {
                default: button_state((10.0, 20.0), 300.0, 48.0, "0.9vw", BRAND_RED, BUTTON_WHITE),
                hover: button_state((5.0, 35.0), 280.0, 45.0, "0.8vw", BUTTON_WHITE, BRAND_RED),
            },
            secondary: ButtonToken {
                default: button_state((10.0, 20.0), 300.0, 48.0, "0.9vw", BUTTON_WHITE, BRAND_RED),
                hover: button_state((5.0, 35.0), 280.0, 45.0, "0.8vw", BRAND_RED, BUTTON_WHITE),
            },
        },
    }
}

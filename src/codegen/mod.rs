//! Stylesheet text generated from the token tree.
//!
//! Output is byte-deterministic: two-space indentation, `\n` line endings and
//! no trailing newline.

use crate::tokens::{
    ButtonStateToken, ButtonToken, ButtonVariant, DesignTokens, HeadingLevel, ParagraphVariant,
    TypographyToken,
};
use crate::units::format_number;

/// `:root` block declaring one `--color-{name}` variable per color, in order.
pub fn color_variables(tokens: &DesignTokens) -> String {
    let mut lines = Vec::with_capacity(tokens.colors.len() + 2);
    lines.push(":root {".to_string());
    for color in &tokens.colors {
        lines.push(format!("  --color-{}: {};", color.name, color.value));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

pub fn typography_rule(token: &TypographyToken, selector: &str) -> String {
    let shadow = &token.text_shadow;
    format!(
        "{selector} {{
  font-family: \"{family}\", sans-serif;
  font-weight: {weight};
  font-size: {size}px;
  line-height: {line_height};
  letter-spacing: {letter_spacing}px;
  text-shadow: {x}px {y}px {blur}px {shadow_color};
}}",
        family = token.font_family,
        weight = token.font_weight,
        size = format_number(token.font_size),
        line_height = format_number(token.line_height),
        letter_spacing = format_number(token.letter_spacing),
        x = format_number(shadow.x),
        y = format_number(shadow.y),
        blur = format_number(shadow.blur),
        shadow_color = shadow.color,
    )
}

/// Wrapper, base and hover rules for one button. `class_name` has no dot.
pub fn button_rule(token: &ButtonToken, class_name: &str) -> String {
    let base = &token.default;
    let hover = &token.hover;
    format!(
        ".{class_name}-wrapper {{
  height: {wrapper_height}px;
  display: flex;
  align-items: center;
}}

.{class_name} {{
  padding: {base_padding};
  min-width: {base_min_width}px;
  min-height: {base_min_height}px;
  font-family: \"{family}\", sans-serif;
  font-weight: {weight};
  font-size: {size};
  background: {base_background};
  color: {base_color};
  border: {base_border};
  border-radius: {radius}px;
  cursor: pointer;
  transition: all 0.25s ease-out;
}}

.{class_name}:hover {{
  padding: {hover_padding};
  min-width: {hover_min_width}px;
  background: {hover_background};
  color: {hover_color};
  border: {hover_border};
}}",
        wrapper_height = format_number(base.effective_height()),
        base_padding = padding(base),
        base_min_width = format_number(base.min_width),
        base_min_height = format_number(base.min_height),
        family = base.font_family,
        weight = base.font_weight,
        size = base.font_size,
        base_background = base.background,
        base_color = base.text_color,
        base_border = border(base),
        radius = format_number(base.border_radius),
        hover_padding = padding(hover),
        hover_min_width = format_number(hover.min_width),
        hover_background = hover.background,
        hover_color = hover.text_color,
        hover_border = border(hover),
    )
}

/// Every rule the studio exports, blank-line separated: colors, headings,
/// paragraphs, then buttons.
pub fn stylesheet(tokens: &DesignTokens) -> String {
    let mut blocks = vec![color_variables(tokens)];
    blocks.extend(HeadingLevel::ALL.into_iter().map(|level| {
        typography_rule(tokens.typography.headings.get(level), &level.selector())
    }));
    blocks.extend(ParagraphVariant::ALL.into_iter().map(|variant| {
        typography_rule(tokens.typography.paragraph.get(variant), &variant.selector())
    }));
    blocks.extend(ButtonVariant::ALL.into_iter().map(|variant| {
        button_rule(tokens.buttons.get(variant), &variant.class_name())
    }));
    blocks.join("\n\n")
}

fn padding(state: &ButtonStateToken) -> String {
    format!(
        "{}px {}px {}px {}px",
        format_number(state.padding_top),
        format_number(state.padding_right),
        format_number(state.padding_bottom),
        format_number(state.padding_left),
    )
}

fn border(state: &ButtonStateToken) -> String {
    format!(
        "{}px solid {}",
        format_number(state.rendered_border_width()),
        state.border_color
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::tokens::{canonical_tokens, ColorToken, TokenPath};

    #[test]
    fn color_variables_follow_palette_order() {
        let mut tokens = canonical_tokens();
        tokens.colors = vec![
            ColorToken::new("ink", "#000"),
            ColorToken::new("paper", "#fff"),
        ];
        assert_eq!(
            color_variables(&tokens),
            ":root {\n  --color-ink: #000;\n  --color-paper: #fff;\n}"
        );
    }

    #[test]
    fn empty_palette_still_emits_root_block() {
        let mut tokens = canonical_tokens();
        tokens.colors.clear();
        assert_eq!(color_variables(&tokens), ":root {\n}");
    }

    #[test]
    fn typography_rule_matches_expected_text() {
        let tokens = canonical_tokens();
        let css = typography_rule(&tokens.typography.headings.h1, ".heading-h1");
        assert_eq!(
            css,
            ".heading-h1 {
  font-family: \"Inter\", sans-serif;
  font-weight: 600;
  font-size: 70px;
  line-height: 1;
  letter-spacing: -1.75px;
  text-shadow: 0px 1px 1px #000000;
}"
        );
    }

    #[test]
    fn button_rule_matches_expected_text() {
        let tokens = canonical_tokens();
        let css = button_rule(&tokens.buttons.primary, "btn-primary");
        assert_eq!(
            css,
            ".btn-primary-wrapper {
  height: 48px;
  display: flex;
  align-items: center;
}

.btn-primary {
  padding: 10px 20px 10px 20px;
  min-width: 300px;
  min-height: 48px;
  font-family: \"Inter\", sans-serif;
  font-weight: 600;
  font-size: 0.9vw;
  background: #fb2545;
  color: #ffffff;
  border: 1px solid #ffffff;
  border-radius: 100px;
  cursor: pointer;
  transition: all 0.25s ease-out;
}

.btn-primary:hover {
  padding: 5px 35px 5px 35px;
  min-width: 280px;
  background: #ffffff;
  color: #fb2545;
  border: 1px solid #fb2545;
}"
        );
    }

    #[test]
    fn disabled_border_renders_zero_width() {
        let mut tokens = canonical_tokens();
        tokens.buttons.secondary.default.border_enabled = Some(false);
        tokens.buttons.secondary.default.border_width = 5.0;
        let css = button_rule(&tokens.buttons.secondary, "btn-secondary");
        assert!(css.contains("  border: 0px solid #fb2545;\n"));
        assert!(!css.contains("5px solid"));
    }

    #[test]
    fn wrapper_uses_explicit_height_when_present() {
        let mut tokens = canonical_tokens();
        tokens.buttons.primary.default.height = Some(56.0);
        let css = button_rule(&tokens.buttons.primary, "btn-primary");
        assert!(css.starts_with(".btn-primary-wrapper {\n  height: 56px;\n"));
        assert!(css.contains("  min-height: 48px;\n"));
    }

    #[test]
    fn hover_rule_omits_sizing_and_radius() {
        let css = button_rule(&canonical_tokens().buttons.primary, "btn-primary");
        let hover = css
            .split(".btn-primary:hover {")
            .nth(1)
            .expect("hover block present");
        assert!(!hover.contains("min-height"));
        assert!(!hover.contains("border-radius"));
        assert!(!hover.contains("font-size"));
    }

    #[test]
    fn heading_size_edit_only_changes_that_declaration() {
        let before = canonical_tokens();
        let path = TokenPath::parse("typography.headings.h1.fontSize").unwrap();
        let after = path
            .mutation(&before, FieldValue::from(64))
            .and_then(|mutation| mutation.apply(&before))
            .unwrap();

        let old_css = stylesheet(&before);
        let new_css = stylesheet(&after);
        assert!(new_css.contains(".heading-h1 {\n  font-family: \"Inter\", sans-serif;\n  font-weight: 600;\n  font-size: 64px;\n"));
        assert_eq!(old_css.replacen("font-size: 70px;", "font-size: 64px;", 1), new_css);
    }

    #[test]
    fn stylesheet_is_deterministic_and_ordered() {
        let tokens = canonical_tokens();
        let css = stylesheet(&tokens);
        assert_eq!(css, stylesheet(&tokens));
        assert!(!css.ends_with('\n'));

        let positions: Vec<usize> = [
            ":root {",
            ".heading-h1 {",
            ".heading-h6 {",
            ".paragraph-large {",
            ".paragraph-small {",
            ".btn-primary-wrapper {",
            ".btn-secondary-wrapper {",
        ]
        .iter()
        .map(|needle| css.find(needle).expect("block present"))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(css.contains("}\n\n.heading-h1 {"));
    }
}

//! SVG image generator — a solid square labelled with its color.

use base64::Engine;

use crate::types::{ResultKind, TaggedResult};

/// Side length used when the caller gives none.
pub const DEFAULT_SIZE: u32 = 100;

const MAX_SIZE: u32 = 2048;

/// Render the SVG as a `data:` URL tagged `IMAGE`.
pub fn create_image(color: &str, size: u32) -> TaggedResult {
    let color = color.trim();
    if !is_valid_color(color) {
        return TaggedResult::error(format!("Invalid color: {:?}", color));
    }
    if size == 0 || size > MAX_SIZE {
        return TaggedResult::error(format!("Size must be between 1 and {} pixels", MAX_SIZE));
    }

    let svg = render_svg(color, size);
    let b64 = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    TaggedResult::new(ResultKind::Image, format!("data:image/svg+xml;base64,{}", b64))
}

/// Named colors and hex codes only, so the value is safe to splice into markup.
fn is_valid_color(color: &str) -> bool {
    !color.is_empty()
        && color.len() <= 32
        && color.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
}

fn render_svg(color: &str, size: u32) -> String {
    format!(
        r#"<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg">
  <rect width="{size}" height="{size}" fill="{color}"/>
  <text x="50%" y="50%" text-anchor="middle" fill="white" font-size="14">{color}</text>
</svg>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(result: &TaggedResult) -> String {
        let b64 = result
            .payload
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data url prefix");
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .expect("valid base64");
        String::from_utf8(bytes).expect("utf8 svg")
    }

    #[test]
    fn test_create_image_renders_svg() {
        let result = create_image("red", 150);
        assert_eq!(result.kind, ResultKind::Image);
        let svg = decode(&result);
        assert!(svg.contains(r#"width="150""#));
        assert!(svg.contains(r#"fill="red""#));
        assert!(svg.contains(">red</text>"));
    }

    #[test]
    fn test_hex_color_accepted() {
        let svg = decode(&create_image("#00ff00", DEFAULT_SIZE));
        assert!(svg.contains(r##"fill="#00ff00""##));
    }

    #[test]
    fn test_markup_in_color_rejected() {
        assert!(create_image("red\"/><script>", 100).is_error());
        assert!(create_image("", 100).is_error());
    }

    #[test]
    fn test_size_bounds() {
        assert!(create_image("blue", 0).is_error());
        assert!(create_image("blue", 4096).is_error());
        assert!(!create_image("blue", 2048).is_error());
    }
}

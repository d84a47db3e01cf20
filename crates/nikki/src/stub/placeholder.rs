use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use nikki_core::{Illustrator, MangaPrompt, MangaResult, Panel, ProcessorMetadata, Result};

pub const STUB_NOTES: &str =
    "Stub image generated locally. Wire Nano Banana Pro to replace this.";

/// Baseline of the first dialogue line
pub const BASE_Y: usize = 200;
/// Vertical distance between dialogue lines
pub const LINE_GAP: usize = 200;

/// Draws a placeholder SVG page locally
#[derive(Debug, Clone, Copy, Default)]
pub struct StubIllustrator;

#[async_trait]
impl Illustrator for StubIllustrator {
    async fn illustrate(&self, _prompt: &MangaPrompt, panels: &[Panel]) -> Result<MangaResult> {
        Ok(MangaResult {
            image_data_url: placeholder_data_url(panels),
            panels: panels.to_vec(),
            notes: STUB_NOTES.to_string(),
        })
    }

    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::new("stub", "Placeholder SVG manga page")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Placeholder page: title, frame, two dividers, and one dialogue line per
/// panel in input order.
pub fn placeholder_svg(panels: &[Panel]) -> String {
    let lines: String = panels
        .iter()
        .enumerate()
        .map(|(idx, panel)| {
            let y = BASE_Y + idx * LINE_GAP;
            format!(
                "<text x='70' y='{}' font-size='18' fill='#111'>{}: {}</text>",
                y,
                idx + 1,
                escape_xml(&panel.jp)
            )
        })
        .collect();
    let dialogue = format!("  {}", lines);

    [
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="720" height="1100">"#,
        "  <style>",
        "    text { font-family: 'Noto Sans JP', 'Fira Sans', sans-serif; }",
        "  </style>",
        r##"  <rect width="100%" height="100%" fill="#f4f2ec" />"##,
        r##"  <text x="50%" y="60" text-anchor="middle" font-size="28" fill="#111">Manga preview (stub)</text>"##,
        r##"  <rect x="40" y="90" width="640" height="960" fill="none" stroke="#111" stroke-width="6" />"##,
        r##"  <line x1="40" y1="370" x2="680" y2="370" stroke="#111" stroke-width="4" />"##,
        r##"  <line x1="40" y1="650" x2="680" y2="650" stroke="#111" stroke-width="4" />"##,
        dialogue.as_str(),
        "</svg>",
    ]
    .join("\n")
}

pub fn placeholder_data_url(panels: &[Panel]) -> String {
    let svg = placeholder_svg(panels);
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::jogging_lesson;

    fn decode(data_url: &str) -> String {
        let payload = data_url
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("svg data url");
        String::from_utf8(BASE64.decode(payload).unwrap()).unwrap()
    }

    fn dialogue_lines(svg: &str) -> Vec<&str> {
        svg.split("<text x='70'").skip(1).collect()
    }

    #[test]
    fn test_one_line_per_panel() {
        let panels = jogging_lesson("entry", "beginner").script.panels;
        let svg = decode(&placeholder_data_url(&panels));

        let lines = dialogue_lines(&svg);
        assert_eq!(lines.len(), 4);
        for (idx, line) in lines.iter().enumerate() {
            let y = 200 + 200 * idx;
            assert!(line.starts_with(&format!(" y='{}'", y)), "line {}: {}", idx, line);
        }
        assert!(svg.contains("1: 今日は公園でジョギングしました。"));
        assert!(svg.contains("4: でも続けたらきっと上手くなるよ。"));
    }

    #[test]
    fn test_frame_and_dividers() {
        let svg = placeholder_svg(&[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Manga preview (stub)"));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert!(dialogue_lines(&svg).is_empty());
    }

    #[test]
    fn test_order_follows_input_position() {
        let mut panels = jogging_lesson("entry", "beginner").script.panels;
        panels.reverse();
        let svg = placeholder_svg(&panels);

        // Numbering is positional, not taken from the panel index
        assert!(svg.contains("<text x='70' y='200' font-size='18' fill='#111'>1: でも続けたら"));
    }

    #[test]
    fn test_dialogue_is_escaped() {
        let mut panels = jogging_lesson("entry", "beginner").script.panels;
        panels.truncate(1);
        panels[0].jp = "<b>A & B</b>".to_string();

        let svg = placeholder_svg(&panels);
        assert!(svg.contains("1: &lt;b&gt;A &amp; B&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn test_stub_illustrator_is_deterministic() {
        let lesson = jogging_lesson("entry", "beginner");
        let first = StubIllustrator
            .illustrate(&lesson.manga_prompt, &lesson.script.panels)
            .await
            .unwrap();
        let second = StubIllustrator
            .illustrate(&lesson.manga_prompt, &lesson.script.panels)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.panels, lesson.script.panels);
        assert_eq!(first.notes, STUB_NOTES);
    }

    #[test]
    fn test_stub_notes_text() {
        assert_eq!(
            STUB_NOTES,
            "Stub image generated locally. Wire Nano Banana Pro to replace this."
        );
    }
}

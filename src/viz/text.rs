//! Text measurement and truncation for axis labels.

/// Heuristic: estimate pixel width of text (no font metrics are loaded for SVG output).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Fit `text` into `max_px`, ending with a single ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        // not even one character fits; keep the first so the tick stays identifiable
        return text.chars().take(1).collect();
    }
    out.push('…');
    out
}

//! Single-page A4 text listing rendered with the built-in Helvetica font.

use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 18.0;
const TOP: f32 = 279.0;
const LEADING: f32 = 5.6;
const FONT_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 16.0;

/// Lines that fit under the title on one page
pub const MAX_LINES: usize = 45;

/// Lines actually printed: at most [`MAX_LINES`], with a trailing
/// "... N more" marker when some are cut
pub fn page_lines(lines: &[String]) -> Vec<String> {
    if lines.len() <= MAX_LINES {
        return lines.to_vec();
    }
    let mut shown = lines[..MAX_LINES].to_vec();
    shown.push(format!("... {} more", lines.len() - MAX_LINES));
    shown
}

/// Render `title` and `lines` as a complete PDF file
pub fn render_text_page(title: &str, lines: &[String]) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| format!("{:?}", e))?;
    let canvas = doc.get_page(page).get_layer(layer);

    canvas.use_text(title, TITLE_SIZE, Mm(LEFT), Mm(TOP), &font);

    // Leave one blank line between the title and the listing
    let mut y = TOP - 2.0 * LEADING;
    for line in page_lines(lines) {
        if !line.is_empty() {
            canvas.use_text(line, FONT_SIZE, Mm(LEFT), Mm(y), &font);
        }
        y -= LEADING;
    }

    doc.save_to_bytes().map_err(|e| format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_a_pdf_file() {
        let bytes = render_text_page("Sales", &["A: 1".to_string()]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_short_listing_is_kept() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(page_lines(&lines), lines);
    }

    #[test]
    fn test_long_listing_is_truncated() {
        let lines: Vec<String> = (0..MAX_LINES + 5).map(|i| format!("row {}", i)).collect();
        let shown = page_lines(&lines);
        assert_eq!(shown.len(), MAX_LINES + 1);
        assert_eq!(shown[MAX_LINES - 1], format!("row {}", MAX_LINES - 1));
        assert_eq!(shown[MAX_LINES], "... 5 more");
    }

    #[test]
    fn test_overflowing_listing_still_renders() {
        let lines: Vec<String> = (0..MAX_LINES * 2).map(|i| format!("row {}", i)).collect();
        assert!(render_text_page("Many", &lines).is_ok());
    }
}

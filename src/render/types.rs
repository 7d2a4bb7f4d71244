//! Rendered output types.

/// Explicit switches for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Hide literal document text, leaving only the field widgets.
    /// Radio labels stay visible.
    pub hide_text: bool,
    /// Answer mode. When false the document is being edited: fields are
    /// disabled and show only their placeholders.
    pub read_only: bool,
    /// Show the comment affordance after paragraphs and radio options
    pub comments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hide_text: false,
            read_only: true,
            comments: false,
        }
    }
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// The text content of the line
    content: String,
    /// The type of line (for styling)
    line_type: LineType,
}

impl RenderedLine {
    /// Create a new rendered line.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self { content, line_type }
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the line type.
    pub const fn line_type(&self) -> LineType {
        self.line_type
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Flowing text with inline fields
    Paragraph,
    /// A radio button and its label
    RadioOption,
    /// Part of a multi-line input box
    TextArea,
    /// Empty line
    Empty,
}

/// Join rendered lines into one block of text.
pub fn lines_to_string(lines: &[RenderedLine]) -> String {
    lines
        .iter()
        .map(RenderedLine::content)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_line_content() {
        let line = RenderedLine::new("Hello".to_string(), LineType::Paragraph);
        assert_eq!(line.content(), "Hello");
        assert_eq!(line.line_type(), LineType::Paragraph);
    }

    #[test]
    fn test_default_options_are_answer_mode() {
        let options = RenderOptions::default();
        assert!(options.read_only);
        assert!(!options.hide_text);
        assert!(!options.comments);
    }

    #[test]
    fn test_lines_to_string() {
        let lines = vec![
            RenderedLine::new("a".to_string(), LineType::Paragraph),
            RenderedLine::new(String::new(), LineType::Empty),
            RenderedLine::new("b".to_string(), LineType::RadioOption),
        ];
        assert_eq!(lines_to_string(&lines), "a\n\nb");
    }
}

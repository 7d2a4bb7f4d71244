//! Terminal form preview.
//!
//! A text-mode presentation layer: each element is drawn by the handler the
//! [`DispatchTable`] picks for its type. Field widgets are void, so they are
//! drawn from the element alone and their placeholder children never appear
//! as document text.

mod types;
mod widgets;

pub use types::{LineType, RenderOptions, RenderedLine, lines_to_string};

use crate::classify::classify_node;
use crate::dispatch::{DispatchTable, HandlerKind};
use crate::document::{Document, Element, Node};
use crate::store::FieldValues;

/// Render a document to display lines.
pub fn render_document<V: FieldValues + ?Sized>(
    document: &Document,
    values: &V,
    table: &DispatchTable,
    options: RenderOptions,
) -> Vec<RenderedLine> {
    let mut renderer = Renderer {
        values,
        table,
        options,
        lines: Vec::new(),
    };
    for node in document.nodes() {
        renderer.block(node);
    }
    tracing::debug!(lines = renderer.lines.len(), ?options, "form render complete");
    renderer.lines
}

/// Render a document and join the lines.
pub fn render_to_string<V: FieldValues + ?Sized>(
    document: &Document,
    values: &V,
    table: &DispatchTable,
    options: RenderOptions,
) -> String {
    lines_to_string(&render_document(document, values, table, options))
}

struct Renderer<'a, V: ?Sized> {
    values: &'a V,
    table: &'a DispatchTable,
    options: RenderOptions,
    lines: Vec<RenderedLine>,
}

impl<'a, V: FieldValues + ?Sized> Renderer<'a, V> {
    fn block(&mut self, node: &Node) {
        let element = match node {
            Node::Text(leaf) => {
                let text = if self.options.hide_text {
                    String::new()
                } else {
                    leaf.text.clone()
                };
                self.push(text, LineType::Paragraph);
                return;
            }
            Node::Element(element) => element,
        };

        match self.table.resolve_element(element) {
            HandlerKind::Paragraph if classify_node(node).void => {
                let value = self.field_value(element).unwrap_or_default().to_owned();
                self.push(value, LineType::Paragraph);
            }
            HandlerKind::Paragraph => self.paragraph(element),
            HandlerKind::RadioOption => self.radio(element),
            HandlerKind::TextArea => self.text_area(element),
            HandlerKind::TextInput | HandlerKind::Select => {
                let widget = self.inline_widget(element);
                self.push(widget, LineType::Paragraph);
            }
        }
    }

    /// Inline children share a line; block children start their own.
    fn paragraph(&mut self, element: &Element) {
        let mut line = String::new();
        let mut wrote_block = false;
        for child in &element.children {
            if child.is_text() || classify_node(child).inline {
                self.inline(child, self.options.hide_text, &mut line);
                continue;
            }
            if !line.is_empty() {
                self.push(std::mem::take(&mut line), LineType::Paragraph);
            }
            self.block(child);
            wrote_block = true;
        }
        if line.is_empty() && wrote_block {
            return;
        }
        self.append_comment(&mut line);
        self.push(line, LineType::Paragraph);
    }

    fn inline(&self, node: &Node, hide_text: bool, out: &mut String) {
        match node {
            Node::Text(leaf) => {
                if !hide_text {
                    out.push_str(&leaf.text);
                }
            }
            Node::Element(element) => match self.table.resolve_element(element) {
                HandlerKind::TextInput | HandlerKind::Select => {
                    out.push_str(&self.inline_widget(element));
                }
                // Placeholder children of a void field are never document text.
                _ if classify_node(node).void => {
                    out.push_str(self.field_value(element).unwrap_or_default());
                }
                _ => {
                    for child in &element.children {
                        self.inline(child, hide_text, out);
                    }
                }
            },
        }
    }

    fn inline_widget(&self, element: &Element) -> String {
        match self.table.resolve_element(element) {
            HandlerKind::Select => widgets::select(&self.select_label(element)),
            _ => {
                let content = self
                    .field_value(element)
                    .filter(|value| !value.is_empty())
                    .map_or_else(|| element.text_content(), ToOwned::to_owned);
                widgets::text_input(&content)
            }
        }
    }

    /// Label of the chosen option, else the first option, else the placeholder.
    fn select_label(&self, element: &Element) -> String {
        let current = self.field_value(element);
        let options = element.options();
        options
            .iter()
            .find(|option| current == Some(option.value.as_str()))
            .or_else(|| options.first())
            .map_or_else(|| element.text_content(), |option| option.label.clone())
    }

    fn radio(&mut self, element: &Element) {
        let checked = self
            .field_value(element)
            .is_some_and(|current| element.value.as_deref() == Some(current));
        let mut label = String::new();
        for child in &element.children {
            // Labels stay visible when document text is hidden.
            self.inline(child, false, &mut label);
        }
        let mut line = widgets::radio(checked, &label);
        self.append_comment(&mut line);
        self.push(line, LineType::RadioOption);
    }

    fn text_area(&mut self, element: &Element) {
        let content = self
            .field_value(element)
            .filter(|value| !value.is_empty())
            .map_or_else(|| element.text_content(), ToOwned::to_owned);
        for row in widgets::text_area(&content) {
            self.push(row, LineType::TextArea);
        }
    }

    /// Current value of a field. Disabled fields in editing mode have none.
    fn field_value(&self, element: &Element) -> Option<&'a str> {
        if !self.options.read_only {
            return None;
        }
        element
            .name
            .as_deref()
            .and_then(|name| self.values.resolve(name))
    }

    fn append_comment(&self, line: &mut String) {
        if !self.options.comments {
            return;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(widgets::comment(self.options.read_only));
    }

    fn push(&mut self, content: String, line_type: LineType) {
        let line_type = if content.is_empty() && line_type == LineType::Paragraph {
            LineType::Empty
        } else {
            line_type
        };
        self.lines.push(RenderedLine::new(content, line_type));
    }
}

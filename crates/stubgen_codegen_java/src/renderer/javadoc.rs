// stubgen_codegen_java/renderer/javadoc - Verbatim doc block re-emission
use super::StubRenderer;
use crate::builder::JavaSourceBuilder;
use stubgen_api::DocComment;

impl StubRenderer {
    /// Emit a doc block above a declaration. Lines are reproduced exactly as
    /// carried by the surface, `@apiSince` tags included; the renderer never
    /// synthesises documentation text.
    pub(crate) fn render_doc(&self, builder: &mut JavaSourceBuilder, doc: Option<&DocComment>) {
        if !self.config().emit_doc_comments {
            return;
        }
        let Some(doc) = doc else {
            return;
        };
        if doc.is_empty() {
            return;
        }

        builder.push_line("/**");
        for line in &doc.lines {
            if line.trim().is_empty() {
                builder.push_line(" *");
            } else {
                builder.push_line(&format!(" * {}", line));
            }
        }
        builder.push_line(" */");
    }
}

/// Standalone doc block used ahead of the `package` declaration in
/// `package-info` units.
pub(crate) fn format_doc_block(doc: &DocComment) -> String {
    let mut block = String::from("/**\n");
    for line in &doc.lines {
        if line.trim().is_empty() {
            block.push_str(" *\n");
        } else {
            block.push_str(" * ");
            block.push_str(line);
            block.push('\n');
        }
    }
    block.push_str(" */\n");
    block
}

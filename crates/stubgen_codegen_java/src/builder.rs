// stubgen_codegen_java/builder - Incremental Java source construction
use crate::config::StubGenConfig;

/// Utility that incrementally constructs Java source code with indentation
/// handling.
#[derive(Debug, Default, Clone)]
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
    indent: String,
}

impl JavaSourceBuilder {
    pub fn new(indent: String) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        if !line.is_empty() {
            self.push_indent();
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    pub fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn push_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.content.push_str(&self.indent);
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Fully-rendered stub compilation unit. `type_declarations` is empty for a
/// `package-info` unit, which instead carries the package Javadoc in
/// `header_doc`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JavaCompilationUnit {
    pub license_header: Option<String>,
    pub header_doc: Option<String>,
    pub package_declaration: Option<String>,
    pub imports: Vec<String>,
    pub type_declarations: Vec<String>,
}

impl JavaCompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_source(&self, config: &StubGenConfig) -> String {
        let mut builder = JavaSourceBuilder::new(config.indent.clone());

        if let Some(header) = &self.license_header {
            builder.push(header);
            if !header.ends_with('\n') {
                builder.push("\n");
            }
            builder.push_line("");
        }

        if let Some(doc) = &self.header_doc {
            builder.push(doc);
            if !doc.ends_with('\n') {
                builder.push("\n");
            }
        }

        if let Some(package) = &self.package_declaration {
            builder.push_line(&format!("package {};", package));
            builder.push_line("");
        }

        if !self.imports.is_empty() {
            for import in &self.imports {
                builder.push_line(&format!("import {};", import));
            }
            builder.push_line("");
        }

        for (index, declaration) in self.type_declarations.iter().enumerate() {
            if index > 0 {
                builder.push_line("");
            }
            builder.push(declaration);
        }

        builder.build()
    }
}

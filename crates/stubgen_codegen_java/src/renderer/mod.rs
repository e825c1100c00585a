// stubgen_codegen_java/renderer - Stub unit assembly and import management
use crate::builder::{JavaCompilationUnit, JavaSourceBuilder};
use crate::config::StubGenConfig;
use crate::error::RenderError;
use std::collections::{BTreeMap, HashMap};
use stubgen_api::{PackageDecl, TypeDecl};

mod declarations;
mod javadoc;
mod types;

pub(crate) use javadoc::format_doc_block;

/// One fully-rendered output file.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedUnit {
    pub package: String,
    /// Dotted outer type name, or `package-info` for package documentation.
    pub type_name: String,
    pub file_name: String,
    pub source: String,
}

/// Grouping of one top-level type with its flattened nested declarations,
/// ready to render as a single compilation unit.
#[derive(Debug, Clone)]
pub struct UnitPlan<'a> {
    pub outer: &'a TypeDecl,
    pub nested: Vec<&'a TypeDecl>,
}

/// Group a package's types into per-unit plans. Nested declarations
/// (`Outer.Inner`) attach to their outer type; a nested declaration whose
/// outer type is absent from the package cannot be rendered and is reported
/// instead of silently dropped.
pub fn plan_units(package: &PackageDecl) -> (Vec<UnitPlan<'_>>, Vec<RenderError>) {
    let mut plans: BTreeMap<&str, UnitPlan<'_>> = BTreeMap::new();
    let mut errors = Vec::new();

    for decl in &package.types {
        if !decl.name.contains('.') {
            plans.insert(
                decl.name.as_str(),
                UnitPlan {
                    outer: decl,
                    nested: Vec::new(),
                },
            );
        }
    }

    for decl in &package.types {
        if let Some((outer_name, _)) = decl.name.split_once('.') {
            match plans.get_mut(outer_name) {
                Some(plan) => plan.nested.push(decl),
                None => errors.push(RenderError::MissingOuterType {
                    outer: format!("{}.{}", package.name, outer_name),
                    nested: decl.name.clone(),
                }),
            }
        }
    }

    (plans.into_values().collect(), errors)
}

/// The Stub Unit Renderer.
///
/// Given a planned declaration group it renders a compilation unit that is
/// source-compatible with real call sites while guaranteeing that invoking
/// any stubbed member fails immediately: every executable body is exactly
/// `throw new RuntimeException("Stub!");`.
pub struct StubRenderer {
    config: StubGenConfig,
    /// simple name -> qualified outer class, first claim wins.
    imports: HashMap<String, String>,
    package: String,
}

pub(crate) const STUB_BODY: &str = "throw new RuntimeException(\"Stub!\");";

impl StubRenderer {
    pub fn new() -> Self {
        Self::with_config(StubGenConfig::default())
    }

    pub fn with_config(config: StubGenConfig) -> Self {
        Self {
            config,
            imports: HashMap::new(),
            package: String::new(),
        }
    }

    pub fn config(&self) -> &StubGenConfig {
        &self.config
    }

    /// Render one planned unit. On error nothing may be written for the
    /// unit: the returned source only exists on the `Ok` path.
    pub fn render_unit(
        &mut self,
        package: &PackageDecl,
        plan: &UnitPlan<'_>,
    ) -> Result<RenderedUnit, RenderError> {
        self.reset(&package.name);

        let index = NestedIndex::build(&plan.nested);
        let declaration = self.generate_type_decl(plan.outer, &plan.outer.name, &index)?;

        let mut unit = JavaCompilationUnit::new();
        unit.license_header = self.config.license_header.clone();
        unit.package_declaration = Some(package.name.clone());
        unit.imports = self.take_imports();
        unit.type_declarations.push(declaration);

        Ok(RenderedUnit {
            package: package.name.clone(),
            type_name: plan.outer.name.clone(),
            file_name: format!("{}.java", plan.outer.name),
            source: unit.to_source(&self.config),
        })
    }

    /// Render the `package-info.java` unit for a documented package.
    /// Returns `None` when the package carries no documentation.
    pub fn render_package_info(&mut self, package: &PackageDecl) -> Option<RenderedUnit> {
        let doc = package.doc.as_ref()?;
        if doc.is_empty() || !self.config.emit_doc_comments {
            return None;
        }

        let mut unit = JavaCompilationUnit::new();
        unit.license_header = self.config.license_header.clone();
        unit.header_doc = Some(format_doc_block(doc));
        unit.package_declaration = Some(package.name.clone());

        Some(RenderedUnit {
            package: package.name.clone(),
            type_name: "package-info".to_string(),
            file_name: "package-info.java".to_string(),
            source: unit.to_source(&self.config),
        })
    }

    pub(crate) fn builder(&self) -> JavaSourceBuilder {
        JavaSourceBuilder::new(self.config.indent.clone())
    }

    fn reset(&mut self, package: &str) {
        self.imports.clear();
        self.package = package.to_string();
    }

    fn take_imports(&mut self) -> Vec<String> {
        let mut imports: Vec<String> = self.imports.drain().map(|(_, qualified)| qualified).collect();
        imports.sort();
        imports
    }

    /// Register a dot-qualified type name and return its rendered spelling.
    /// The first surface type to claim a simple name gets the import; later
    /// collisions stay fully qualified. `java.lang` and same-package types
    /// render simple without importing anything.
    pub(crate) fn register_type_name(&mut self, name: &str) -> String {
        if !name.contains('.') {
            return name.to_string();
        }

        let segments: Vec<&str> = name.split('.').collect();
        let class_start = segments
            .iter()
            .position(|segment| segment.starts_with(|c: char| c.is_ascii_uppercase()));
        let Some(class_start) = class_start else {
            return name.to_string();
        };
        if class_start == 0 {
            // Dotted simple name of a nested type in the current package.
            return name.to_string();
        }

        let package_part = segments[..class_start].join(".");
        let class_path = segments[class_start..].join(".");

        if package_part == self.package {
            return class_path;
        }
        if package_part == "java.lang" && segments.len() == class_start + 1 {
            return class_path;
        }

        let simple = segments[class_start];
        let qualified_outer = format!("{}.{}", package_part, simple);
        match self.imports.get(simple) {
            None => {
                self.imports
                    .insert(simple.to_string(), qualified_outer);
                class_path
            }
            Some(existing) if *existing == qualified_outer => class_path,
            Some(_) => name.to_string(),
        }
    }

    pub(crate) fn nullability_annotation(&self, name: &str) -> String {
        format!("@{}.{}", self.config.nullability_package, name)
    }

    pub(crate) fn push_lines(builder: &mut JavaSourceBuilder, code: &str) {
        for line in code.lines() {
            builder.push_line(line);
        }
    }
}

impl Default for StubRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Children lookup for flattened nested declarations, keyed by the dotted
/// name of the direct parent.
pub(crate) struct NestedIndex<'a> {
    children: HashMap<&'a str, Vec<&'a TypeDecl>>,
}

impl<'a> NestedIndex<'a> {
    fn build(nested: &[&'a TypeDecl]) -> Self {
        let mut children: HashMap<&'a str, Vec<&'a TypeDecl>> = HashMap::new();
        for decl in nested {
            if let Some((parent, _)) = decl.name.rsplit_once('.') {
                children.entry(parent).or_default().push(decl);
            }
        }
        Self { children }
    }

    pub(crate) fn children_of(&self, name: &str) -> &[&'a TypeDecl] {
        self.children
            .get(name)
            .map(|decls| decls.as_slice())
            .unwrap_or(&[])
    }
}

// stubgen_api/decl - Type declarations, packages and whole surfaces
use crate::docs::DocComment;
use crate::member::{Member, Modifiers};
use crate::types::{Span, TypeParam, TypeRef};
use serde::{Deserialize, Serialize};

/// Kind of stub unit a declaration renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "@interface",
        }
    }
}

/// One public type of the surface. Each declaration renders into exactly
/// one compilation unit; nested types appear flattened under their dotted
/// simple name (`Outer.Inner`), the way signature files spell them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub doc: Option<DocComment>,
    pub span: Span,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            modifiers: Modifiers::default(),
            name: name.into(),
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
            doc: None,
            span: Span::dummy(),
        }
    }
}

/// A package of the surface. A package with documentation additionally
/// yields a `package-info.java` unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PackageDecl {
    pub name: String,
    pub doc: Option<DocComment>,
    pub types: Vec<TypeDecl>,
}

impl PackageDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            types: Vec::new(),
        }
    }
}

/// A complete API surface, merged from one or more signature files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApiSurface {
    pub packages: Vec<PackageDecl>,
}

impl ApiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package_mut(&mut self, name: &str) -> &mut PackageDecl {
        if let Some(index) = self.packages.iter().position(|pkg| pkg.name == name) {
            return &mut self.packages[index];
        }
        self.packages.push(PackageDecl::new(name));
        let last = self.packages.len() - 1;
        &mut self.packages[last]
    }

    /// Package-wise union. Type lists are concatenated as-is; duplicate
    /// fully-qualified names surface later through `validate`, never as a
    /// silent overwrite. Package documentation follows first-writer-wins.
    pub fn merge(&mut self, other: ApiSurface) {
        for incoming in other.packages {
            let target = self.package_mut(&incoming.name);
            if target.doc.is_none() {
                target.doc = incoming.doc;
            }
            target.types.extend(incoming.types);
        }
    }

    /// Sort packages and types by name so that emission order, and with it
    /// the bytes written per run, depend only on surface content.
    pub fn sort_canonical(&mut self) {
        self.packages.sort_by(|a, b| a.name.cmp(&b.name));
        for package in &mut self.packages {
            package.types.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|pkg| pkg.types.len()).sum()
    }

    pub fn iter_types(&self) -> impl Iterator<Item = (&PackageDecl, &TypeDecl)> {
        self.packages
            .iter()
            .flat_map(|pkg| pkg.types.iter().map(move |decl| (pkg, decl)))
    }
}

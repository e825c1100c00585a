// stubgen_api/validate - Structural integrity checks over a merged surface
use crate::decl::{ApiSurface, TypeDecl, TypeKind};
use crate::member::{Member, Parameter};
use crate::types::Span;
use std::collections::HashSet;
use std::fmt;

/// A structural problem found in a surface. Any issue blocks generation:
/// a surface that fails validation must not reach the renderer, since a
/// silently-wrong public signature corrupts every downstream compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: &'static str,
    pub package: String,
    pub type_name: String,
    pub message: String,
    pub span: Option<Span>,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.type_name.is_empty() {
            self.package.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        };
        match &self.span {
            Some(span) => write!(f, "{} [{}] {}: {}", self.code, location, span, self.message),
            None => write!(f, "{} [{}]: {}", self.code, location, self.message),
        }
    }
}

pub const DUPLICATE_TYPE: &str = "SG1001";
pub const DUPLICATE_MEMBER: &str = "SG1002";
pub const CONSTANT_TYPE_MISMATCH: &str = "SG1003";
pub const CONSTRUCTOR_NOT_ALLOWED: &str = "SG1004";
pub const VARARGS_NOT_LAST: &str = "SG1005";
pub const ANNOTATION_ELEMENT_SHAPE: &str = "SG1006";
pub const ENUM_CONSTANT_OUTSIDE_ENUM: &str = "SG1007";

/// Run every structural check over the surface. Returns all issues found
/// rather than stopping at the first, so a `check` run reports the full
/// picture in one pass.
pub fn validate(surface: &ApiSurface) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_types: HashSet<String> = HashSet::new();

    for package in &surface.packages {
        for decl in &package.types {
            let qualified = format!("{}.{}", package.name, decl.name);
            if !seen_types.insert(qualified.clone()) {
                issues.push(issue(
                    DUPLICATE_TYPE,
                    &package.name,
                    decl,
                    format!("duplicate type declaration for {}", qualified),
                    Some(&decl.span),
                ));
            }

            let mut seen_members: HashSet<String> = HashSet::new();
            for member in &decl.members {
                check_member(&package.name, decl, member, &mut issues);
                if !seen_members.insert(member.signature_key()) {
                    issues.push(issue(
                        DUPLICATE_MEMBER,
                        &package.name,
                        decl,
                        format!("duplicate member signature `{}`", member.signature_key()),
                        Some(member.span()),
                    ));
                }
            }
        }
    }

    issues
}

fn issue(
    code: &'static str,
    package: &str,
    decl: &TypeDecl,
    message: String,
    span: Option<&Span>,
) -> ValidationIssue {
    ValidationIssue {
        code,
        package: package.to_string(),
        type_name: decl.name.clone(),
        message,
        span: span.cloned(),
    }
}

fn check_member(
    package: &str,
    decl: &TypeDecl,
    member: &Member,
    issues: &mut Vec<ValidationIssue>,
) {
    match member {
        Member::Field {
            type_ref,
            constant: Some(constant),
            name,
            span,
            ..
        } => {
            if !constant.fits(type_ref) {
                issues.push(issue(
                    CONSTANT_TYPE_MISMATCH,
                    package,
                    decl,
                    format!(
                        "constant value of field `{}` does not fit declared type `{}`",
                        name,
                        type_ref.canonical()
                    ),
                    Some(span),
                ));
            }
        }
        Member::Field { .. } => {}
        Member::Constructor {
            parameters, span, ..
        } => {
            match decl.kind {
                TypeKind::Interface | TypeKind::Annotation => issues.push(issue(
                    CONSTRUCTOR_NOT_ALLOWED,
                    package,
                    decl,
                    format!("{} types cannot declare constructors", decl.kind.keyword()),
                    Some(span),
                )),
                // An enum constructor would be uncallable in a stub; the
                // surface must not carry them.
                TypeKind::Enum => issues.push(issue(
                    CONSTRUCTOR_NOT_ALLOWED,
                    package,
                    decl,
                    "enum constructors are not renderable in a stub surface".to_string(),
                    Some(span),
                )),
                TypeKind::Class => {}
            }
            check_varargs(package, decl, parameters, span, issues);
        }
        Member::Method {
            name,
            parameters,
            throws,
            span,
            ..
        } => {
            if decl.kind == TypeKind::Annotation && (!parameters.is_empty() || !throws.is_empty()) {
                issues.push(issue(
                    ANNOTATION_ELEMENT_SHAPE,
                    package,
                    decl,
                    format!(
                        "annotation element `{}` must not declare parameters or throws",
                        name
                    ),
                    Some(span),
                ));
            }
            check_varargs(package, decl, parameters, span, issues);
        }
        Member::EnumConstant { name, span, .. } => {
            if decl.kind != TypeKind::Enum {
                issues.push(issue(
                    ENUM_CONSTANT_OUTSIDE_ENUM,
                    package,
                    decl,
                    format!(
                        "enum constant `{}` declared on non-enum type `{}`",
                        name, decl.name
                    ),
                    Some(span),
                ));
            }
        }
    }
}

fn check_varargs(
    package: &str,
    decl: &TypeDecl,
    parameters: &[Parameter],
    span: &Span,
    issues: &mut Vec<ValidationIssue>,
) {
    for (index, parameter) in parameters.iter().enumerate() {
        if parameter.is_varargs && index + 1 != parameters.len() {
            issues.push(issue(
                VARARGS_NOT_LAST,
                package,
                decl,
                format!(
                    "varargs parameter `{}` must be the last parameter",
                    parameter.name
                ),
                Some(span),
            ));
        }
    }
}

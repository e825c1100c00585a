// stubgen_codegen_java/renderer/declarations - Type and member rendering
use super::{NestedIndex, StubRenderer, STUB_BODY};
use crate::builder::JavaSourceBuilder;
use crate::error::RenderError;
use stubgen_api::{
    Member, Modifiers, Nullability, Parameter, Span, TypeDecl, TypeKind, TypeParam, TypeRef,
};

impl StubRenderer {
    pub(crate) fn generate_type_decl(
        &mut self,
        decl: &TypeDecl,
        dotted_name: &str,
        index: &NestedIndex<'_>,
    ) -> Result<String, RenderError> {
        let simple_name = decl
            .name
            .rsplit_once('.')
            .map(|(_, simple)| simple)
            .unwrap_or(&decl.name);

        let mut builder = self.builder();
        self.render_doc(&mut builder, decl.doc.as_ref());
        if decl.modifiers.deprecated {
            builder.push_line("@Deprecated");
        }

        let mut header = String::new();
        let modifiers_str = self.generate_type_modifiers(&decl.modifiers, decl.kind);
        if !modifiers_str.is_empty() {
            header.push_str(&modifiers_str);
            header.push(' ');
        }
        header.push_str(decl.kind.keyword());
        header.push(' ');
        header.push_str(simple_name);
        header.push_str(&self.render_type_params(&decl.type_params));

        if let Some(superclass) = &decl.extends {
            header.push_str(" extends ");
            header.push_str(&self.generate_type(superclass));
        }
        if !decl.implements.is_empty() {
            let clause = match decl.kind {
                TypeKind::Interface => "extends",
                _ => "implements",
            };
            let rendered = decl
                .implements
                .iter()
                .map(|interface| self.generate_type(interface))
                .collect::<Vec<_>>()
                .join(", ");
            header.push_str(&format!(" {} {}", clause, rendered));
        }

        builder.push_line(&format!("{} {{", header));
        builder.indent();

        self.render_members(&mut builder, decl, simple_name)?;

        let children = index.children_of(dotted_name);
        for (position, nested) in children.iter().enumerate() {
            if position > 0 || !decl.members.is_empty() {
                builder.push_line("");
            }
            let nested_code = self.generate_type_decl(nested, &nested.name, index)?;
            Self::push_lines(&mut builder, &nested_code);
        }

        builder.dedent();
        builder.push_line("}");
        Ok(builder.build())
    }

    fn render_members(
        &mut self,
        builder: &mut JavaSourceBuilder,
        decl: &TypeDecl,
        simple_name: &str,
    ) -> Result<(), RenderError> {
        let constants: Vec<&Member> = decl
            .members
            .iter()
            .filter(|member| matches!(member, Member::EnumConstant { .. }))
            .collect();
        let others: Vec<&Member> = decl
            .members
            .iter()
            .filter(|member| !matches!(member, Member::EnumConstant { .. }))
            .collect();

        if !constants.is_empty() && decl.kind != TypeKind::Enum {
            let first = constants[0];
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: format!(
                    "enum constant `{}` on a {} declaration",
                    first.name(),
                    decl.kind.keyword()
                ),
                span: Some(first.span().clone()),
            });
        }

        for (position, constant) in constants.iter().enumerate() {
            if let Member::EnumConstant { name, doc, .. } = constant {
                self.render_doc(builder, doc.as_ref());
                let terminator = if position + 1 < constants.len() {
                    ","
                } else if others.is_empty() {
                    ""
                } else {
                    ";"
                };
                builder.push_line(&format!("{}{}", name, terminator));
            }
        }
        if !constants.is_empty() && !others.is_empty() {
            builder.push_line("");
        }

        let mut emitted_field = false;
        for member in &others {
            match member {
                Member::Field { .. } => {
                    let code = self.generate_field(decl, member)?;
                    Self::push_lines(builder, &code);
                    emitted_field = true;
                }
                _ => {}
            }
        }

        let mut first_executable = true;
        for member in &others {
            match member {
                Member::Constructor { .. } | Member::Method { .. } => {
                    if first_executable && emitted_field || !first_executable {
                        builder.push_line("");
                    }
                    first_executable = false;
                    let code = match member {
                        Member::Constructor { .. } => {
                            self.generate_constructor(decl, simple_name, member)?
                        }
                        _ => self.generate_method(decl, member)?,
                    };
                    Self::push_lines(builder, &code);
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub(crate) fn generate_field(
        &mut self,
        decl: &TypeDecl,
        member: &Member,
    ) -> Result<String, RenderError> {
        let Member::Field {
            modifiers,
            type_ref,
            nullability,
            name,
            constant,
            doc,
            span,
        } = member
        else {
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: "expected field declaration".to_string(),
                span: None,
            });
        };

        let mut builder = self.builder();
        self.render_doc(&mut builder, doc.as_ref());
        if modifiers.deprecated {
            builder.push_line("@Deprecated");
        }
        self.render_nullability(&mut builder, *nullability);

        let mut line = String::new();
        let modifiers_str = self.generate_member_modifiers(modifiers, decl.kind, false);
        if !modifiers_str.is_empty() {
            line.push_str(&modifiers_str);
            line.push(' ');
        }
        line.push_str(&self.generate_type(type_ref));
        line.push(' ');
        line.push_str(name);

        match constant {
            // Compile-time constants keep their real literal so call sites
            // can constant-fold against the stub.
            Some(value) => {
                if !value.fits(type_ref) {
                    return Err(RenderError::ConstantError {
                        type_name: decl.name.clone(),
                        message: format!(
                            "literal for `{}` does not fit type `{}`",
                            name,
                            type_ref.canonical()
                        ),
                        span: Some(span.clone()),
                    });
                }
                line.push_str(" = ");
                line.push_str(&Self::render_constant(value));
            }
            // Runtime-initialised finals get a load-safe placeholder: a
            // throwing initializer would fail class loading itself.
            None if modifiers.is_final => {
                line.push_str(" = ");
                line.push_str(&Self::sentinel_literal(type_ref));
            }
            None => {}
        }

        line.push(';');
        builder.push_line(&line);
        Ok(builder.build())
    }

    pub(crate) fn generate_constructor(
        &mut self,
        decl: &TypeDecl,
        simple_name: &str,
        member: &Member,
    ) -> Result<String, RenderError> {
        let Member::Constructor {
            modifiers,
            parameters,
            throws,
            doc,
            span,
        } = member
        else {
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: "expected constructor declaration".to_string(),
                span: None,
            });
        };

        if !matches!(decl.kind, TypeKind::Class | TypeKind::Enum) {
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: format!("constructor on a {} declaration", decl.kind.keyword()),
                span: Some(span.clone()),
            });
        }
        if decl.kind == TypeKind::Enum {
            // An enum constructor would be uncallable from a stub unit.
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: "enum constructors are not renderable".to_string(),
                span: Some(span.clone()),
            });
        }

        let mut builder = self.builder();
        self.render_doc(&mut builder, doc.as_ref());
        if modifiers.deprecated {
            builder.push_line("@Deprecated");
        }

        let mut signature = String::new();
        let modifiers_str = self.generate_member_modifiers(modifiers, decl.kind, true);
        if !modifiers_str.is_empty() {
            signature.push_str(&modifiers_str);
            signature.push(' ');
        }
        signature.push_str(simple_name);
        signature.push('(');
        signature.push_str(&self.render_parameters(&decl.name, parameters, span)?);
        signature.push(')');
        signature.push_str(&self.render_throws(throws));

        builder.push_line(&format!("{} {{ {} }}", signature, STUB_BODY));
        Ok(builder.build())
    }

    pub(crate) fn generate_method(
        &mut self,
        decl: &TypeDecl,
        member: &Member,
    ) -> Result<String, RenderError> {
        let Member::Method {
            modifiers,
            type_params,
            return_type,
            return_nullability,
            name,
            parameters,
            throws,
            annotation_default,
            doc,
            span,
        } = member
        else {
            return Err(RenderError::UnsupportedConstruct {
                type_name: decl.name.clone(),
                message: "expected method declaration".to_string(),
                span: None,
            });
        };

        if decl.kind == TypeKind::Annotation && (!parameters.is_empty() || !throws.is_empty()) {
            return Err(RenderError::InvalidSignature {
                type_name: decl.name.clone(),
                message: format!(
                    "annotation element `{}` must not declare parameters or throws",
                    name
                ),
                span: Some(span.clone()),
            });
        }

        let mut builder = self.builder();
        self.render_doc(&mut builder, doc.as_ref());
        if modifiers.deprecated {
            builder.push_line("@Deprecated");
        }
        self.render_nullability(&mut builder, *return_nullability);

        let mut signature = String::new();
        let modifiers_str = self.generate_member_modifiers(modifiers, decl.kind, true);
        if !modifiers_str.is_empty() {
            signature.push_str(&modifiers_str);
            signature.push(' ');
        }

        let generics = self.render_type_params(type_params);
        if !generics.is_empty() {
            signature.push_str(&generics);
            signature.push(' ');
        }

        signature.push_str(&self.generate_type(return_type));
        signature.push(' ');
        signature.push_str(name);
        signature.push('(');
        signature.push_str(&self.render_parameters(&decl.name, parameters, span)?);
        signature.push(')');
        signature.push_str(&self.render_throws(throws));

        if decl.kind == TypeKind::Annotation {
            match annotation_default {
                Some(value) => builder.push_line(&format!(
                    "{} default {};",
                    signature,
                    Self::render_constant(value)
                )),
                None => builder.push_line(&format!("{};", signature)),
            }
            return Ok(builder.build());
        }

        if self.is_bodiless(decl.kind, modifiers) {
            builder.push_line(&format!("{};", signature));
        } else {
            builder.push_line(&format!("{} {{ {} }}", signature, STUB_BODY));
        }
        Ok(builder.build())
    }

    /// Abstract class methods and plain interface methods carry no body;
    /// everything else gets the throwing stub body.
    fn is_bodiless(&self, kind: TypeKind, modifiers: &Modifiers) -> bool {
        match kind {
            TypeKind::Interface => !modifiers.is_default && !modifiers.is_static,
            _ => modifiers.is_abstract,
        }
    }

    fn render_parameters(
        &mut self,
        type_name: &str,
        parameters: &[Parameter],
        span: &Span,
    ) -> Result<String, RenderError> {
        let mut rendered = Vec::new();
        for (position, parameter) in parameters.iter().enumerate() {
            let mut entry = String::new();
            match parameter.nullability {
                Nullability::NonNull => {
                    entry.push_str(&self.nullability_annotation("NonNull"));
                    entry.push(' ');
                }
                Nullability::Nullable => {
                    entry.push_str(&self.nullability_annotation("Nullable"));
                    entry.push(' ');
                }
                Nullability::Unspecified => {}
            }

            if parameter.is_varargs {
                if position + 1 != parameters.len() {
                    return Err(RenderError::InvalidSignature {
                        type_name: type_name.to_string(),
                        message: format!(
                            "varargs parameter `{}` must be the last parameter",
                            parameter.name
                        ),
                        span: Some(span.clone()),
                    });
                }
                let TypeRef::Array {
                    element,
                    dimensions,
                } = &parameter.type_ref
                else {
                    return Err(RenderError::InvalidSignature {
                        type_name: type_name.to_string(),
                        message: format!(
                            "varargs parameter `{}` must have an array type",
                            parameter.name
                        ),
                        span: Some(span.clone()),
                    });
                };
                let element_ref = if *dimensions > 1 {
                    TypeRef::Array {
                        element: element.clone(),
                        dimensions: dimensions - 1,
                    }
                } else {
                    (**element).clone()
                };
                entry.push_str(&self.generate_type(&element_ref));
                entry.push_str("...");
            } else {
                entry.push_str(&self.generate_type(&parameter.type_ref));
            }

            entry.push(' ');
            entry.push_str(&parameter.name);
            rendered.push(entry);
        }
        Ok(rendered.join(", "))
    }

    fn render_throws(&mut self, throws: &[TypeRef]) -> String {
        if throws.is_empty() {
            return String::new();
        }
        let rendered = throws
            .iter()
            .map(|exception| self.generate_type(exception))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" throws {}", rendered)
    }

    pub(crate) fn render_type_params(&mut self, type_params: &[TypeParam]) -> String {
        if type_params.is_empty() {
            return String::new();
        }
        let mut parts = Vec::new();
        for param in type_params {
            let mut fragment = param.name.clone();
            if !param.bounds.is_empty() {
                let bounds = param
                    .bounds
                    .iter()
                    .map(|bound| self.generate_type(bound))
                    .collect::<Vec<_>>()
                    .join(" & ");
                fragment.push_str(" extends ");
                fragment.push_str(&bounds);
            }
            parts.push(fragment);
        }
        format!("<{}>", parts.join(", "))
    }

    fn render_nullability(&self, builder: &mut JavaSourceBuilder, nullability: Nullability) {
        match nullability {
            Nullability::NonNull => builder.push_line(&self.nullability_annotation("NonNull")),
            Nullability::Nullable => builder.push_line(&self.nullability_annotation("Nullable")),
            Nullability::Unspecified => {}
        }
    }

    /// Modifier string for a type declaration. `abstract` is kept for
    /// classes; interfaces and annotations are implicitly abstract.
    fn generate_type_modifiers(&self, modifiers: &Modifiers, kind: TypeKind) -> String {
        let mut parts = vec![modifiers.visibility.as_str()];
        if modifiers.is_abstract && kind == TypeKind::Class {
            parts.push("abstract");
        }
        if modifiers.is_static {
            parts.push("static");
        }
        if modifiers.is_final && kind == TypeKind::Class {
            parts.push("final");
        }
        parts.join(" ")
    }

    /// Modifier string for a member. `native` never survives into a stub:
    /// the rendered member carries a body, and a body and `native` are
    /// mutually exclusive. `executable` drops field-only modifiers.
    fn generate_member_modifiers(
        &self,
        modifiers: &Modifiers,
        kind: TypeKind,
        executable: bool,
    ) -> String {
        // Interface members are implicitly public, but published stubs
        // spell the visibility out the way the platform sources do.
        let mut parts = vec![modifiers.visibility.as_str()];
        if modifiers.is_abstract && matches!(kind, TypeKind::Class | TypeKind::Enum) {
            parts.push("abstract");
        }
        if modifiers.is_default && kind == TypeKind::Interface {
            parts.push("default");
        }
        if modifiers.is_static {
            parts.push("static");
        }
        if modifiers.is_final {
            parts.push("final");
        }
        if executable {
            if modifiers.is_synchronized {
                parts.push("synchronized");
            }
        } else {
            if modifiers.is_transient {
                parts.push("transient");
            }
            if modifiers.is_volatile {
                parts.push("volatile");
            }
        }
        parts.join(" ")
    }
}

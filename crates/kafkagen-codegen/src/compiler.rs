//! Schema to Rust compiler
//!
//! Every structure in a document (the message itself, each inline nested
//! structure and each common structure) becomes:
//!
//! - a `pub struct` deriving serde, one field per schema field
//! - an `impl Default` carrying the schema defaults
//! - an inherent impl with `reset` and one version-gated decode and encode
//!   helper per field
//! - an `impl Message` calling the helpers in declaration order
//!
//! The top-level structure also gets `is_version_valid`,
//! `is_version_flexible` and, for requests and responses, `API_KEY`.

use crate::emitter::SourceFile;
use crate::error::{CompileError, CompileResult};
use kafkagen_core::naming::{to_rust_ident, to_snake_case};
use kafkagen_core::{
    ElemType, Field, MessageData, Primitive, SchemaError, VersionCondition, VersionRange,
    implies_true,
};
use std::collections::HashSet;
use std::path::PathBuf;

const VERSION_VAR: &str = "version";

/// Options shared by every generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Path of the crate providing `Encoder`, `Decoder`, `Message` and
    /// `CodecError`.
    pub runtime_path: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            runtime_path: "kafkagen_protocol".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn new(runtime_path: impl Into<String>) -> Self {
        Self {
            runtime_path: runtime_path.into(),
        }
    }

    /// Imports placed after the banner.
    pub fn prelude(&self) -> String {
        format!(
            "use {}::{{CodecError, Decoder, Encoder, Message}};\nuse serde::{{Deserialize, Serialize}};\n",
            self.runtime_path
        )
    }
}

/// Compile a group of documents into one file at `path`.
///
/// The file is not validated or written; see [`SourceFile::persist`].
pub fn compile_group(
    path: impl Into<PathBuf>,
    messages: &[&MessageData],
    options: &CompileOptions,
) -> CompileResult<SourceFile> {
    let mut file = SourceFile::new(path, &options.prelude());
    for msg in messages {
        compile_message(&mut file, msg)?;
    }
    Ok(file)
}

/// Append every structure of `msg` to `file`.
pub fn compile_message(file: &mut SourceFile, msg: &MessageData) -> CompileResult<()> {
    let mut compiler = MessageCompiler {
        file,
        msg,
        known: declared_structs(msg),
    };
    compiler.run()
}

/// A structure to emit and the range its fields are gated against.
struct StructSpec<'m> {
    name: &'m str,
    fields: &'m [Field],
    parent: Option<&'m VersionRange>,
    top_level: bool,
}

struct MessageCompiler<'f, 'm> {
    file: &'f mut SourceFile,
    msg: &'m MessageData,
    known: HashSet<&'m str>,
}

impl<'m> MessageCompiler<'_, 'm> {
    fn run(&mut self) -> CompileResult<()> {
        let msg = self.msg;
        tracing::debug!(message = %msg.name, "compiling message");

        self.file.write_char('\n');
        self.write_comments();
        self.compile_tree(&StructSpec {
            name: &msg.name,
            fields: &msg.fields,
            parent: msg.valid_versions.as_ref(),
            top_level: true,
        })?;

        for common in &msg.common_structs {
            self.file.write_char('\n');
            self.compile_tree(&StructSpec {
                name: &common.name,
                fields: &common.fields,
                parent: common.versions.as_ref(),
                top_level: false,
            })?;
        }
        Ok(())
    }

    /// Emit `spec`, then its nested structures depth-first in field order.
    fn compile_tree(&mut self, spec: &StructSpec<'m>) -> CompileResult<()> {
        self.compile_struct(spec)?;
        for field in spec.fields {
            if let (ElemType::Struct(name), true) = (&field.ty.elem, field.has_nested_struct()) {
                self.file.write_char('\n');
                self.compile_tree(&StructSpec {
                    name,
                    fields: &field.fields,
                    parent: field.versions.as_ref(),
                    top_level: false,
                })?;
            }
        }
        Ok(())
    }

    fn compile_struct(&mut self, spec: &StructSpec<'m>) -> CompileResult<()> {
        self.check_struct_refs(spec)?;
        self.declare_struct(spec);
        self.file.write_char('\n');
        self.default_impl(spec)?;
        self.file.write_char('\n');
        self.inherent_impl(spec);
        self.file.write_char('\n');
        self.message_impl(spec);
        Ok(())
    }

    /// Schema comments, rewritten so none becomes a doc or inner comment.
    fn write_comments(&mut self) {
        for line in self.msg.comments.lines() {
            let text = line.trim_start_matches('/');
            self.file.write_str("//");
            if text.starts_with('!') {
                self.file.write_char(' ');
            }
            self.file.line(text.trim_end());
        }
    }

    fn check_struct_refs(&self, spec: &StructSpec<'m>) -> CompileResult<()> {
        for field in spec.fields {
            if let ElemType::Struct(name) = &field.ty.elem
                && !self.known.contains(name.as_str())
            {
                return Err(CompileError::UnknownStruct {
                    structure: spec.name.to_string(),
                    field: field.name.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    fn declare_struct(&mut self, spec: &StructSpec<'m>) {
        self.file
            .line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
        self.file.line(&format!("pub struct {} {{", spec.name));
        for (i, field) in spec.fields.iter().enumerate() {
            if i != 0 {
                self.file.write_char('\n');
            }
            for doc in field.about.lines() {
                let doc = doc.trim_end();
                if doc.is_empty() {
                    self.file.line("///");
                } else {
                    self.file.line(&format!("/// {doc}"));
                }
            }
            let snake = to_snake_case(&field.name);
            self.file.line(&format!("#[serde(rename = \"{snake}\")]"));
            self.file.line(&format!(
                "pub {}: {},",
                to_rust_ident(&snake),
                rust_type(field)
            ));
        }
        self.file.line("}");
    }

    fn default_impl(&mut self, spec: &StructSpec<'m>) -> CompileResult<()> {
        self.file.line("#[allow(clippy::derivable_impls)]");
        self.file.line(&format!("impl Default for {} {{", spec.name));
        self.file.line("fn default() -> Self {");
        self.file.line("Self {");
        for field in spec.fields {
            self.file
                .write_str(&format!("{}: ", to_rust_ident(&to_snake_case(&field.name))));
            self.write_default(spec, field)?;
            self.file.line(",");
        }
        self.file.line("}");
        self.file.line("}");
        self.file.line("}");
        Ok(())
    }

    fn write_default(&mut self, spec: &StructSpec<'m>, field: &Field) -> CompileResult<()> {
        let wrap = |source: SchemaError| CompileError::Default {
            structure: spec.name.to_string(),
            field: field.name.clone(),
            source,
        };

        if field.ty.array {
            self.file.write_str("Vec::new()");
            return Ok(());
        }
        match &field.ty.elem {
            ElemType::Primitive(Primitive::Bool) => {
                let v = field.default.as_bool().map_err(wrap)?;
                self.file.write_bool(v);
            }
            ElemType::Primitive(
                p @ (Primitive::Int8 | Primitive::Int16 | Primitive::Int32 | Primitive::Int64),
            ) => {
                let bits = p.bits().unwrap_or(64);
                let v = field.default.as_int(bits).map_err(wrap)?;
                self.file.write_int(v, 10);
            }
            ElemType::Primitive(Primitive::String) => {
                let v = field.default.as_str().map_err(wrap)?;
                if v.is_empty() {
                    self.file.write_str("String::new()");
                } else {
                    self.file.write_str("String::from(");
                    self.file.write_quoted(v);
                    self.file.write_char(')');
                }
            }
            ElemType::Primitive(Primitive::Bytes) => self.file.write_str("Vec::new()"),
            ElemType::Struct(_) => self.file.write_str("Default::default()"),
        }
        Ok(())
    }

    fn inherent_impl(&mut self, spec: &StructSpec<'m>) {
        let msg = self.msg;
        self.file
            .line("#[allow(unused_variables, clippy::manual_range_contains)]");
        self.file.line(&format!("impl {} {{", spec.name));

        if spec.top_level {
            if let (true, Some(api_key)) = (msg.is_api(), msg.api_key) {
                self.file.write_str("pub const API_KEY: i16 = ");
                self.file.write_int(i64::from(api_key), 10);
                self.file.line(";");
                self.file.write_char('\n');
                self.file.line("pub fn api_key(&self) -> i16 {");
                self.file.line("Self::API_KEY");
                self.file.line("}");
                self.file.write_char('\n');
            }

            let valid = implies_true(msg.valid_versions.as_ref(), None);
            self.predicate("is_version_valid", valid);
            self.file.write_char('\n');
            let flexible = implies_true(msg.flexible_versions.as_ref(), msg.valid_versions.as_ref());
            self.predicate("is_version_flexible", flexible);
            self.file.write_char('\n');
        }

        self.file.line("pub fn reset(&mut self) {");
        self.file.line("*self = Self::default();");
        self.file.line("}");

        for field in spec.fields {
            let condition = implies_true(field.versions.as_ref(), spec.parent);
            self.file.write_char('\n');
            self.decode_helper(field, condition);
            self.file.write_char('\n');
            self.encode_helper(field, condition);
        }
        self.file.line("}");
    }

    fn predicate(&mut self, name: &str, condition: VersionCondition) {
        self.file
            .line(&format!("pub fn {name}({VERSION_VAR}: i16) -> bool {{"));
        self.file.line(&condition.render(VERSION_VAR));
        self.file.line("}");
    }

    fn guard(&mut self, condition: VersionCondition) {
        if condition == VersionCondition::Always {
            return;
        }
        self.file
            .line(&format!("if {} {{", condition.render_negated(VERSION_VAR)));
        self.file.line("return Ok(());");
        self.file.line("}");
    }

    fn decode_helper(&mut self, field: &Field, condition: VersionCondition) {
        let snake = to_snake_case(&field.name);
        let ident = to_rust_ident(&snake);
        self.file.line(&format!(
            "fn decode_{snake}(&mut self, d: &mut Decoder<'_>, {VERSION_VAR}: i16) -> Result<(), CodecError> {{"
        ));
        self.guard(condition);

        match (&field.ty.elem, field.ty.array) {
            (ElemType::Primitive(p), false) => {
                self.file
                    .line(&format!("self.{ident} = d.read_{}()?;", p.token()));
            }
            (ElemType::Struct(_), false) => {
                self.file
                    .line(&format!("self.{ident}.decode(d, {VERSION_VAR})?;"));
            }
            (elem, true) => {
                self.file.line("let len = d.read_array_len()?;");
                self.file.line("let mut items = Vec::new();");
                self.file.line("for _ in 0..len {");
                match elem {
                    ElemType::Primitive(p) => {
                        self.file
                            .line(&format!("items.push(d.read_{}()?);", p.token()));
                    }
                    ElemType::Struct(name) => {
                        self.file
                            .line(&format!("let mut item = {name}::default();"));
                        self.file.line(&format!("item.decode(d, {VERSION_VAR})?;"));
                        self.file.line("items.push(item);");
                    }
                }
                self.file.line("}");
                self.file.line(&format!("self.{ident} = items;"));
            }
        }

        self.file.line("Ok(())");
        self.file.line("}");
    }

    fn encode_helper(&mut self, field: &Field, condition: VersionCondition) {
        let snake = to_snake_case(&field.name);
        let ident = to_rust_ident(&snake);
        self.file.line(&format!(
            "fn encode_{snake}(&self, e: &mut Encoder, {VERSION_VAR}: i16) -> Result<(), CodecError> {{"
        ));
        self.guard(condition);

        if field.ty.array {
            self.file
                .line(&format!("e.write_array_len(self.{ident}.len())?;"));
            self.file.line(&format!("for item in &self.{ident} {{"));
            let stmt = encode_stmt(&field.ty.elem, "item", true);
            self.file.line(&stmt);
            self.file.line("}");
        } else {
            let stmt = encode_stmt(&field.ty.elem, &format!("self.{ident}"), false);
            self.file.line(&stmt);
        }

        self.file.line("Ok(())");
        self.file.line("}");
    }

    fn message_impl(&mut self, spec: &StructSpec<'m>) {
        let fields: Vec<String> = spec.fields.iter().map(|f| to_snake_case(&f.name)).collect();

        self.file.line("#[allow(unused_variables)]");
        self.file
            .line(&format!("impl Message for {} {{", spec.name));
        self.file.line(&format!(
            "fn decode(&mut self, d: &mut Decoder<'_>, {VERSION_VAR}: i16) -> Result<(), CodecError> {{"
        ));
        self.file.line("self.reset();");
        for snake in &fields {
            self.file
                .line(&format!("self.decode_{snake}(d, {VERSION_VAR})?;"));
        }
        self.file.line("Ok(())");
        self.file.line("}");
        self.file.write_char('\n');
        self.file.line(&format!(
            "fn encode(&self, e: &mut Encoder, {VERSION_VAR}: i16) -> Result<(), CodecError> {{"
        ));
        for snake in &fields {
            self.file
                .line(&format!("self.encode_{snake}(e, {VERSION_VAR})?;"));
        }
        self.file.line("Ok(())");
        self.file.line("}");
        self.file.line("}");
    }
}

/// Statement writing `value`; `borrowed` means it is already a reference.
fn encode_stmt(elem: &ElemType, value: &str, borrowed: bool) -> String {
    match elem {
        ElemType::Primitive(p @ (Primitive::String | Primitive::Bytes)) => {
            let arg = if borrowed {
                value.to_string()
            } else {
                format!("&{value}")
            };
            format!("e.write_{}({arg})?;", p.token())
        }
        ElemType::Primitive(p) => {
            let arg = if borrowed {
                format!("*{value}")
            } else {
                value.to_string()
            };
            format!("e.write_{}({arg});", p.token())
        }
        ElemType::Struct(_) => format!("{value}.encode(e, {VERSION_VAR})?;"),
    }
}

fn rust_type(field: &Field) -> String {
    let elem = match &field.ty.elem {
        ElemType::Primitive(p) => p.rust_type(),
        ElemType::Struct(name) => name.as_str(),
    };
    if field.ty.array {
        format!("Vec<{elem}>")
    } else {
        elem.to_string()
    }
}

/// Names of every structure `msg` declares, inline or common.
fn declared_structs(msg: &MessageData) -> HashSet<&str> {
    fn walk<'m>(fields: &'m [Field], known: &mut HashSet<&'m str>) {
        for field in fields {
            if let (ElemType::Struct(name), true) = (&field.ty.elem, field.has_nested_struct()) {
                known.insert(name);
            }
            walk(&field.fields, known);
        }
    }

    let mut known = HashSet::new();
    walk(&msg.fields, &mut known);
    for common in &msg.common_structs {
        known.insert(common.name.as_str());
        walk(&common.fields, &mut known);
    }
    known
}

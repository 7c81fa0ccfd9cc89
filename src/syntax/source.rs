//! An immutable parsed source file.

use std::sync::Arc;

use crate::base::{FileId, LineCol, LineIndex, TextRange, TextSize};
use super::form::{AttrKind, Attribute, Form, FunctionDecl, MacroDecl, RecordDecl, TypeDecl};

/// One parsed Erlang file: text, lowered forms, and a line index.
///
/// A `SourceFile` is an immutable snapshot. An edit never mutates it: the
/// host re-parses and builds a new `SourceFile`, and every semantic cache
/// scoped to the old snapshot dies with it.
#[derive(Debug)]
pub struct SourceFile {
    file: FileId,
    text: Arc<str>,
    forms: Vec<Form>,
    line_index: LineIndex,
}

impl SourceFile {
    /// Wrap parser output into a snapshot.
    pub fn new(file: FileId, text: impl Into<Arc<str>>, forms: Vec<Form>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            file,
            text,
            forms,
            line_index,
        }
    }

    /// The file this snapshot was parsed from.
    pub fn file(&self) -> FileId {
        self.file
    }

    /// The full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All top-level forms, in source order.
    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    /// All attribute forms, in source order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.forms.iter().filter_map(Form::as_attribute)
    }

    /// Convert a byte offset into a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.line_index.line_col(offset)
    }
}

/// Incremental construction of a [`SourceFile`], one form per source line.
///
/// The parser (or a test) appends each declaration together with its source
/// text; the builder accumulates the text and hands the form constructor the
/// range the text landed on.
pub struct SourceFileBuilder {
    file: FileId,
    text: String,
    forms: Vec<Form>,
}

impl SourceFileBuilder {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            text: String::new(),
            forms: Vec::new(),
        }
    }

    /// Append one line of source and the form it lowers to.
    pub fn push(&mut self, line: &str, form: impl FnOnce(TextRange) -> Form) -> &mut Self {
        let start = TextSize::from(self.text.len() as u32);
        self.text.push_str(line);
        let end = TextSize::from(self.text.len() as u32);
        self.text.push('\n');
        self.forms.push(form(TextRange::new(start, end)));
        self
    }

    /// Append a line that lowers to no form (comments, blank lines).
    pub fn push_text(&mut self, line: &str) -> &mut Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// Append an attribute form.
    pub fn attribute(&mut self, line: &str, kind: AttrKind) -> &mut Self {
        self.push(line, |range| Form::Attribute(Attribute { kind, range }))
    }

    /// Append a function declaration.
    pub fn function(&mut self, line: &str, name: &str, arity: u32) -> &mut Self {
        let name = name.into();
        self.push(line, |range| {
            Form::Function(FunctionDecl { name, arity, range })
        })
    }

    /// Append a record declaration.
    pub fn record(&mut self, line: &str, name: &str, fields: &[&str]) -> &mut Self {
        let name = name.into();
        let fields = fields.iter().map(|f| (*f).into()).collect();
        self.push(line, |range| {
            Form::Record(RecordDecl { name, fields, range })
        })
    }

    /// Append a macro definition.
    pub fn macro_def(&mut self, line: &str, name: &str) -> &mut Self {
        let name = name.into();
        self.push(line, |range| Form::Macro(MacroDecl { name, range }))
    }

    /// Append a type declaration.
    pub fn type_def(&mut self, line: &str, name: &str) -> &mut Self {
        let name = name.into();
        self.push(line, |range| Form::Type(TypeDecl { name, range }))
    }

    /// Finish into an immutable snapshot.
    pub fn finish(self) -> SourceFile {
        SourceFile::new(self.file, self.text, self.forms)
    }
}

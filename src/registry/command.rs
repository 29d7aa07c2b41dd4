//! `<command>` elements and the C declarations inside them.

use crate::dom::{Element, Node};
use crate::error::{Error, Result};

/// A C type as written in the registry, e.g. `const GLchar *const*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType {
    /// `const` applied to the pointee (or to the value, without pointers).
    pub is_const: bool,
    pub base: BaseType,
    /// One entry per `*`, innermost first. `true` if that pointer is itself `const`.
    pub pointers: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    /// Declared through `<ptype>`, e.g. `GLenum`.
    Named(String),
    /// Plain C text, e.g. `void` or `struct _cl_context`.
    Raw(String),
}

impl CType {
    pub fn named(name: &str) -> Self {
        CType {
            is_const: false,
            base: BaseType::Named(name.to_owned()),
            pointers: Vec::new(),
        }
    }

    pub fn is_void(&self) -> bool {
        self.pointers.is_empty() && matches!(&self.base, BaseType::Raw(raw) if raw == "void")
    }

    pub fn is_pointer(&self) -> bool {
        !self.pointers.is_empty()
    }

    /// The `<ptype>` name, if the base type was declared as one.
    pub fn ptype(&self) -> Option<&str> {
        match &self.base {
            BaseType::Named(name) => Some(name),
            BaseType::Raw(_) => None,
        }
    }

    /// Parse the text of a declaration with the `<name>` removed.
    ///
    /// `ptype` is substituted where the `<ptype>` element appeared.
    pub fn parse(before: &str, ptype: Option<&str>, after: &str) -> Option<Self> {
        let mut is_const = false;
        let mut base: Option<BaseType> = ptype.map(|name| BaseType::Named(name.to_owned()));
        let mut pointers: Vec<bool> = Vec::new();

        let mut words = tokens(before);
        if ptype.is_some() {
            words.push(Token::Ptype);
        }
        words.extend(tokens(after));

        for token in words {
            match token {
                Token::Star => pointers.push(false),
                Token::Word("const") => match pointers.last_mut() {
                    Some(pointer) => *pointer = true,
                    None => is_const = true,
                },
                Token::Word("struct") | Token::Word("unsigned") => {}
                Token::Word(word) if base.is_none() && pointers.is_empty() => {
                    base = Some(BaseType::Raw(word.to_owned()));
                }
                Token::Word(_) | Token::Ptype => {}
            }
        }

        Some(CType {
            is_const,
            base: base?,
            pointers,
        })
    }
}

enum Token<'a> {
    Word(&'a str),
    Star,
    Ptype,
}

fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_ascii_alphanumeric() || c == '_' {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            out.push(Token::Word(&text[s..i]));
        }
        if c == '*' {
            out.push(Token::Star);
        }
    }
    if let Some(s) = start {
        out.push(Token::Word(&text[s..]));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: CType,
    pub group: Option<String>,
    pub len: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub ret: CType,
    pub ret_group: Option<String>,
    pub params: Vec<Param>,
    pub comment: Option<String>,
    pub aliases: Vec<String>,
}

/// Split a `<proto>` or `<param>` into its name and declared type.
fn declaration(element: &Element) -> Result<(String, CType)> {
    let mut name: Option<String> = None;
    let mut ptype: Option<String> = None;
    let mut before = String::new();
    let mut after = String::new();

    for node in &element.children {
        let seen_type = ptype.is_some();
        match node {
            Node::Text(text) if seen_type => after.push_str(text),
            Node::Text(text) => before.push_str(text),
            Node::Element(child) if child.name == "name" => name = Some(child.text()),
            Node::Element(child) if child.name == "ptype" => ptype = Some(child.text()),
            Node::Element(child) => {
                log::debug!("ignoring <{}> inside <{}>", child.name, element.name);
            }
        }
    }

    let name = name.ok_or_else(|| Error::MissingChild {
        element: element.name.clone(),
        child: "name",
    })?;
    let ty = CType::parse(before.trim(), ptype.as_deref(), after.trim()).ok_or_else(|| {
        Error::InvalidValue {
            what: "declaration",
            name: name.clone(),
            value: element.text(),
        }
    })?;
    Ok((name.trim().to_owned(), ty))
}

impl Command {
    pub(crate) fn from_element(element: &Element) -> Result<Self> {
        let proto = element.child("proto").ok_or_else(|| Error::MissingChild {
            element: element.name.clone(),
            child: "proto",
        })?;
        let (name, ret) = declaration(proto)?;

        let params = element
            .elements_named("param")
            .map(|param| {
                let (name, ty) = declaration(param)?;
                Ok(Param {
                    name,
                    ty,
                    group: param.attr("group").map(str::to_owned),
                    len: param.attr("len").map(str::to_owned),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let aliases = element
            .elements_named("alias")
            .filter_map(|alias| alias.attr("name"))
            .map(str::to_owned)
            .collect();

        Ok(Command {
            name,
            ret,
            ret_group: proto.attr("group").map(str::to_owned),
            params,
            comment: element.attr("comment").map(str::to_owned),
            aliases,
        })
    }

    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.params.iter_mut().find(|param| param.name == name)
    }
}

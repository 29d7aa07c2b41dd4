//! Writing a [`Plan`] out as Rust source.
//!
//! The output is a module file. It expects the raw `gl_generator` bindings (see [`raw`]) to be
//! reachable under [`Options::raw_module`], and every typed wrapper forwards to them.

use std::io::Write;

use crate::error::{Error, Result};
use crate::guard::{Filter, Guard};
use crate::plan::Plan;

mod commands;
mod enums;
pub mod features;
pub mod raw;

bitflags::bitflags! {
    /// Parts of the generated file.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sections: u8 {
        /// The `GlEnum` trait.
        const PRELUDE = 1 << 0;
        const SPECIAL_NUMBERS = 1 << 1;
        /// Enums and bitmasks.
        const ENUMS = 1 << 2;
        const COMMANDS = 1 << 3;
    }
}

impl Default for Sections {
    fn default() -> Self {
        Sections::all()
    }
}

impl Sections {
    /// Parse names such as `enums` or `special_numbers`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        names.iter().try_fold(Sections::empty(), |sections, name| {
            let name = name.as_ref();
            Sections::from_name(&name.to_ascii_uppercase())
                .map(|section| sections | section)
                .ok_or_else(|| Error::InvalidValue {
                    what: "section",
                    name: "sections".to_owned(),
                    value: name.to_owned(),
                })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Path of the raw bindings module, as seen from the generated module.
    pub raw_module: String,
    pub sections: Sections,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            raw_module: "super::gl".to_owned(),
            sections: Sections::default(),
        }
    }
}

pub struct Emitter<'a> {
    plan: &'a Plan,
    options: &'a Options,
}

impl<'a> Emitter<'a> {
    pub fn new(plan: &'a Plan, options: &'a Options) -> Self {
        Emitter { plan, options }
    }

    pub fn write(&self, w: &mut impl Write) -> Result<()> {
        self.write_header(w)?;
        let sections = self.options.sections;
        if sections.contains(Sections::PRELUDE) {
            self.write_prelude(w)?;
        }
        if sections.contains(Sections::SPECIAL_NUMBERS) && !self.plan.special_numbers.is_empty() {
            writeln!(w, "// special numbers")?;
            enums::write_special_numbers(self, w)?;
            writeln!(w)?;
        }
        if sections.contains(Sections::ENUMS) {
            writeln!(w, "// enums")?;
            for enum_type in &self.plan.enums {
                enums::write_enum(self, enum_type, w)?;
            }
            writeln!(w, "// bitmasks")?;
            for flags in &self.plan.flags {
                enums::write_flags(self, flags, w)?;
            }
        }
        if sections.contains(Sections::COMMANDS) {
            writeln!(w, "// commands")?;
            for command in self.plan.commands() {
                commands::write_command(self, command, w)?;
            }
        }
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        // Everything written is built from `&str`.
        String::from_utf8(out).map_err(|err| Error::InvalidValue {
            what: "generated source",
            name: self.plan.api.clone(),
            value: err.to_string(),
        })
    }

    fn write_header(&self, w: &mut impl Write) -> Result<()> {
        writeln!(
            w,
            "//! Typed `{}` bindings, generated by glreg from the Khronos registry.",
            self.plan.api
        )?;
        writeln!(w, "//!")?;
        match &self.plan.filter {
            Filter::Only(level) => {
                writeln!(w, "//! API feature level: `{}`.", level.name())?;
            }
            Filter::All { levels } => {
                writeln!(
                    w,
                    "//! Every API feature level is gated by a Cargo feature. Enable exactly one of:"
                )?;
                for level in levels {
                    writeln!(w, "//! * `{}` ({})", level.cargo_feature(), level.ident())?;
                }
            }
        }
        if !self.plan.extensions.is_empty() {
            writeln!(w, "//!")?;
            writeln!(w, "//! Extensions: {}.", self.plan.extensions.join(", "))?;
        }
        writeln!(w)?;
        writeln!(
            w,
            "#![allow(non_camel_case_types, non_upper_case_globals, unused_imports, clippy::all)]"
        )?;
        writeln!(w)?;
        writeln!(w, "use core::ffi::{{c_char, c_void}};")?;
        writeln!(w, "use {}::{{self as gl, types}};", self.options.raw_module)?;
        writeln!(w)?;
        Ok(())
    }

    fn write_prelude(&self, w: &mut impl Write) -> Result<()> {
        w.write_all(PRELUDE.as_bytes())?;
        writeln!(w)?;
        Ok(())
    }

    /// `#[cfg(...)]` line for an item, when it needs one.
    fn cfg(&self, w: &mut impl Write, indent: &str, guard: &Guard) -> Result<()> {
        if let Some(cfg) = self.plan.filter.cfg(guard) {
            writeln!(w, "{}#[cfg({})]", indent, cfg)?;
        }
        Ok(())
    }

    /// Like [`Self::cfg`], but silent when the enclosing item already has the same guard.
    fn inner_cfg(
        &self,
        w: &mut impl Write,
        indent: &str,
        guard: &Guard,
        outer: &Guard,
    ) -> Result<()> {
        if guard != outer {
            self.cfg(w, indent, guard)?;
        }
        Ok(())
    }

    fn prelude_enabled(&self) -> bool {
        self.options.sections.contains(Sections::PRELUDE)
    }
}

const PRELUDE: &str = r#"/// Trait for typed `GLenum`s.
///
/// # Safety
/// * Must be implemented only on enums.
/// * The enum must be `#[repr(u32)]`.
/// * Every variant must be a correct constant of `GLenum`.
pub unsafe trait GlEnum: Copy + Sized {
    /// Access the raw `GLenum` value of this enum.
    fn as_raw(&self) -> u32 {
        unsafe { *core::ptr::from_ref(self).cast() }
    }

    /// The variant holding `raw`, if there is one.
    fn from_raw(raw: u32) -> Option<Self>;
}
"#;

use std::io::Write;

use super::Emitter;
use crate::error::Result;
use crate::plan::{EnumType, FlagsType};

pub(super) fn write_special_numbers(emitter: &Emitter<'_>, w: &mut impl Write) -> Result<()> {
    for number in &emitter.plan.special_numbers {
        emitter.cfg(w, "", &number.guard)?;
        writeln!(w, "#[doc(alias = \"{}\")]", number.gl_name)?;
        writeln!(
            w,
            "pub const {}: {} = {};",
            number.name, number.ty, number.literal
        )?;
    }
    Ok(())
}

pub(super) fn write_enum(
    emitter: &Emitter<'_>,
    enum_type: &EnumType,
    w: &mut impl Write,
) -> Result<()> {
    let name = &enum_type.name;
    let outer = &enum_type.guard;

    writeln!(w, "/// Values of the `{}` group.", enum_type.group)?;
    emitter.cfg(w, "", outer)?;
    writeln!(w, "#[repr(u32)]")?;
    writeln!(w, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(w, "pub enum {} {{", name)?;
    for variant in &enum_type.variants {
        writeln!(w, "    #[doc(alias = \"{}\")]", variant.gl_name)?;
        emitter.inner_cfg(w, "    ", &variant.guard, outer)?;
        writeln!(w, "    {} = {:#06X},", variant.name, variant.value)?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;

    emitter.cfg(w, "", outer)?;
    writeln!(w, "impl {} {{", name)?;
    for alias in &enum_type.aliases {
        writeln!(w, "    #[doc(alias = \"{}\")]", alias.gl_name)?;
        emitter.inner_cfg(w, "    ", &alias.guard, outer)?;
        writeln!(
            w,
            "    pub const {}: Self = Self::{};",
            alias.name, alias.owner
        )?;
    }
    if !enum_type.aliases.is_empty() {
        writeln!(w)?;
    }
    writeln!(w, "    pub const fn from_raw(raw: u32) -> Option<Self> {{")?;
    writeln!(w, "        match raw {{")?;
    for variant in &enum_type.variants {
        emitter.inner_cfg(w, "            ", &variant.guard, outer)?;
        writeln!(
            w,
            "            {:#06X} => Some(Self::{}),",
            variant.value, variant.name
        )?;
    }
    writeln!(w, "            _ => None,")?;
    writeln!(w, "        }}")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}}")?;
    writeln!(w)?;

    if emitter.prelude_enabled() {
        emitter.cfg(w, "", outer)?;
        writeln!(w, "unsafe impl GlEnum for {} {{", name)?;
        writeln!(w, "    fn from_raw(raw: u32) -> Option<Self> {{")?;
        writeln!(w, "        {}::from_raw(raw)", name)?;
        writeln!(w, "    }}")?;
        writeln!(w, "}}")?;
        writeln!(w)?;
    }
    Ok(())
}

pub(super) fn write_flags(
    emitter: &Emitter<'_>,
    flags: &FlagsType,
    w: &mut impl Write,
) -> Result<()> {
    let outer = &flags.guard;
    emitter.cfg(w, "", outer)?;
    writeln!(w, "bitflags::bitflags! {{")?;
    writeln!(w, "    /// Bits of the `{}` group.", flags.group)?;
    writeln!(w, "    #[repr(transparent)]")?;
    writeln!(w, "    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(w, "    pub struct {}: u32 {{", flags.name)?;
    for flag in &flags.flags {
        writeln!(w, "        #[doc(alias = \"{}\")]", flag.gl_name)?;
        emitter.inner_cfg(w, "        ", &flag.guard, outer)?;
        writeln!(w, "        const {} = {:#06X};", flag.name, flag.value)?;
    }
    writeln!(w, "    }}")?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

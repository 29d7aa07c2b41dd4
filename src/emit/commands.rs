use std::io::Write;

use super::Emitter;
use crate::error::Result;
use crate::plan::CommandFn;

pub(super) fn write_command(
    emitter: &Emitter<'_>,
    command: &CommandFn,
    w: &mut impl Write,
) -> Result<()> {
    if let Some(doc) = &command.doc {
        for line in doc.lines().map(str::trim).filter(|line| !line.is_empty()) {
            writeln!(w, "/// {}", line)?;
        }
    }
    emitter.cfg(w, "", &command.guard)?;
    writeln!(w, "#[doc(alias = \"{}\")]", command.gl_name)?;
    writeln!(w, "#[inline]")?;

    let params: Vec<String> = command
        .params
        .iter()
        .map(|param| format!("{}: {}", param.name, param.mapped.ty))
        .collect();
    write!(w, "pub unsafe fn {}({})", command.name, params.join(", "))?;
    if let Some(ret) = &command.ret {
        write!(w, " -> {}", ret.ty)?;
    }
    writeln!(w, " {{")?;

    let args: Vec<String> = command
        .params
        .iter()
        .map(|param| param.mapped.conversion.apply(&param.name, &param.mapped.ty))
        .collect();
    let call = format!("gl::{}({})", command.raw_name, args.join(", "));
    let body = match &command.ret {
        Some(ret) => ret.conversion.apply(&call, &ret.ty),
        None => call,
    };
    writeln!(w, "    {}", body)?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

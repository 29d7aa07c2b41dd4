//! The Cargo `[features]` table matching the guards of generated code.

use std::io::Write;

use crate::error::Result;
use crate::level::ApiLevel;

/// Write one feature per level.
///
/// Features do not enable each other. A core level drops items the older levels have, so a
/// crate must enable exactly the level it targets.
pub fn write_table<'a>(
    levels: impl IntoIterator<Item = &'a ApiLevel>,
    w: &mut impl Write,
) -> Result<()> {
    writeln!(w, "[features]")?;
    for level in levels {
        writeln!(w, "# {}", level.ident())?;
        writeln!(w, "{} = []", level.cargo_feature())?;
    }
    Ok(())
}

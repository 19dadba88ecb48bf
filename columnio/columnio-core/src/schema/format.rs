use std::fmt::{Display, Error, Formatter, Result, Write as _};

use super::{MessageType, Type};

/// Render a message schema in the textual message syntax:
/// one field per line, groups opening an indented block.
///
/// ```text
/// message m {
///   required int32 a;
///   optional group b {
///     optional binary c (UTF8);
///   }
/// }
/// ```
pub fn format_message_type(message: &MessageType) -> std::result::Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "message {} {{", message.name)?;
    for field in &message.fields {
        format_type(field, 1, &mut out)?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}

fn format_type(ty: &Type, depth: usize, out: &mut String) -> Result {
    let pad = "  ".repeat(depth);
    match ty {
        Type::Primitive(p) => {
            write!(out, "{pad}{} {} {}", p.repetition, p.kind, p.name)?;
            if let Some(logical) = p.logical {
                write!(out, " ({logical})")?;
            }
            writeln!(out, ";")?;
        }
        Type::Group(g) => {
            write!(out, "{pad}{} group {}", g.repetition, g.name)?;
            if let Some(logical) = g.logical {
                write!(out, " ({logical})")?;
            }
            writeln!(out, " {{")?;
            for child in &g.fields {
                format_type(child, depth + 1, out)?;
            }
            writeln!(out, "{pad}}}")?;
        }
    }
    Ok(())
}

impl Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = format_message_type(self)?;
        f.write_str(&text)
    }
}

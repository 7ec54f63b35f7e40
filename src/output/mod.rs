// mod.rs - Console diagnostics for verbose runs

use std::io::Write;

use crate::core::{EditOptions, EditPlan, EditReport};
use crate::document::Document;

/// Echo the resolved options before the file is touched
pub fn write_options<W: Write>(writer: &mut W, options: &EditOptions) -> std::io::Result<()> {
    writeln!(writer, "🚀 {}", crate::get_info())?;
    writeln!(writer, "🔧 Full options: {:?}", options)?;
    if options.print {
        writeln!(writer, "⚠️  --print is accepted but does not print anything yet")?;
    }
    Ok(())
}

/// Echo the section and the mutations about to be applied
pub fn write_plan<W: Write>(
    writer: &mut W,
    section: Option<&str>,
    plan: &EditPlan,
) -> std::io::Result<()> {
    writeln!(writer, "📂 Section: {}", section.unwrap_or("none"))?;

    if let Some(comments) = &plan.comments {
        writeln!(writer, "💬 Comments: {:?}", comments)?;
    }
    if let Some(key) = &plan.remove {
        writeln!(writer, "🗑️  Option to remove: {}", key)?;
    }
    if let Some(add) = &plan.add {
        writeln!(writer, "➕ Option to add or update: {}", add.key)?;
        writeln!(writer, "   Value: {}", add.value)?;
    }
    writer.flush()
}

/// Echo what an edit run replaced and where the result went
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &EditReport,
    location: &str,
) -> std::io::Result<()> {
    if let Some(removed) = &report.removed {
        writeln!(writer, "   Removed {} (was: {})", removed.key, removed.value)?;
    }
    if let Some(previous) = report.added.as_ref().and_then(|a| a.previous.as_ref()) {
        writeln!(writer, "   Replaced previous value: {}", previous)?;
    }

    if report.persisted {
        writeln!(writer, "✅ Configuration written to: {}", location)?;
    } else {
        writeln!(writer, "🧪 Dry run: {} left unchanged", location)?;
    }
    Ok(())
}

/// Write the rendered document, used by `--dry-run`
pub fn write_document<W: Write>(writer: &mut W, document: &Document) -> std::io::Result<()> {
    let text = document
        .render()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

//! XLIFF 1.2 export.
//!
//! Produces a single-file document with one `<trans-unit>` per entry.
//! Text is entity-escaped; no XML library is involved.

use gamestringer_types::TranslationEntry;

use crate::ExportOptions;

/// Renders entries as an XLIFF 1.2 document.
pub fn to_xliff(entries: &[TranslationEntry], options: &ExportOptions) -> String {
    let mut xliff = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file original="GameStringer Export" source-language="{}" target-language="{}" datatype="plaintext">
    <header>
      <tool tool-id="gamestringer" tool-name="GameStringer" tool-version="0.1"/>
    </header>
    <body>
"#,
        escape_xml(&options.source_lang),
        escape_xml(&options.target_lang)
    );

    for entry in entries {
        if !options.include_empty && entry.target.trim().is_empty() {
            continue;
        }

        xliff.push_str(&format!(
            "      <trans-unit id=\"{}\">\n        <source>{}</source>\n        <target>{}</target>\n",
            escape_xml(&entry.id),
            escape_xml(&entry.source),
            escape_xml(&entry.target),
        ));

        if options.include_context
            && let Some(context) = &entry.context
        {
            xliff.push_str(&format!(
                "        <context-group purpose=\"location\"><context context-type=\"sourcefile\">{}</context></context-group>\n",
                escape_xml(context)
            ));
        }

        if options.include_notes
            && let Some(notes) = &entry.notes
        {
            xliff.push_str(&format!("        <note>{}</note>\n", escape_xml(notes)));
        }

        xliff.push_str("      </trans-unit>\n");
    }

    xliff.push_str("    </body>\n  </file>\n</xliff>\n");
    xliff
}

/// Escapes the five predefined XML entities.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

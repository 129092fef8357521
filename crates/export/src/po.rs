//! GNU gettext PO export and import.
//!
//! Escaping follows msgfmt rules: backslash, quote, newline, and tab are
//! backslash-escaped, and strings containing newlines are folded into one
//! quoted fragment per line.

use gamestringer_types::TranslationEntry;

use crate::{ExportError, ExportOptions};

/// Renders entries as a PO document with a standard header.
pub fn to_po(entries: &[TranslationEntry], options: &ExportOptions) -> String {
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M%z").to_string();

    let mut po = format!(
        r#"# Translation file exported by GameStringer.
msgid ""
msgstr ""
"Project-Id-Version: GameStringer Export\n"
"POT-Creation-Date: {now}\n"
"PO-Revision-Date: {now}\n"
"Language: {}\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"

"#,
        options.target_lang
    );

    for entry in entries {
        if !options.include_empty && entry.target.trim().is_empty() {
            continue;
        }

        if options.include_notes
            && let Some(notes) = &entry.notes
        {
            po.push_str(&format!("#. {notes}\n"));
        }
        po.push_str(&format!("#: {}\n", entry.id));
        if options.include_context
            && let Some(context) = &entry.context
        {
            po.push_str(&format!("msgctxt \"{}\"\n", escape_po(context)));
        }
        po.push_str(&format_po_string("msgid", &entry.source));
        po.push_str(&format_po_string("msgstr", &entry.target));
        po.push('\n');
    }

    po
}

/// Parses PO content back into entries.
///
/// The header entry (empty msgid) is dropped; `#:` references become ids
/// and `msgctxt` becomes the context.
pub fn from_po(content: &str) -> Result<Vec<TranslationEntry>, ExportError> {
    if content.trim().is_empty() {
        return Err(ExportError::Empty);
    }

    #[derive(Default)]
    struct Partial {
        id: String,
        context: Option<String>,
        msgid: String,
        msgstr: String,
        seen_msgid: bool,
    }

    enum Section {
        None,
        MsgId,
        MsgStr,
        MsgCtxt,
    }

    let mut entries = Vec::new();
    let mut current = Partial::default();
    let mut section = Section::None;
    let mut count = 0usize;

    let mut finish = |current: &mut Partial, entries: &mut Vec<TranslationEntry>| {
        if current.seen_msgid && !current.msgid.is_empty() {
            count += 1;
            entries.push(TranslationEntry {
                id: if current.id.is_empty() {
                    format!("po_{count}")
                } else {
                    std::mem::take(&mut current.id)
                },
                source: std::mem::take(&mut current.msgid),
                target: std::mem::take(&mut current.msgstr),
                context: current.context.take(),
                notes: None,
            });
        }
        *current = Partial::default();
    };

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            finish(&mut current, &mut entries);
            section = Section::None;
        } else if let Some(reference) = line.strip_prefix("#:") {
            current.id = reference.trim().to_string();
        } else if line.starts_with('#') {
            // Comments (translator, extracted, flags) are not imported.
        } else if let Some(rest) = line.strip_prefix("msgctxt ") {
            current.context = Some(unescape_po(strip_quotes(rest)));
            section = Section::MsgCtxt;
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            current.seen_msgid = true;
            current.msgid = unescape_po(strip_quotes(rest));
            section = Section::MsgId;
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            current.msgstr = unescape_po(strip_quotes(rest));
            section = Section::MsgStr;
        } else if line.starts_with('"') {
            let fragment = unescape_po(strip_quotes(line));
            match section {
                Section::MsgId => current.msgid.push_str(&fragment),
                Section::MsgStr => current.msgstr.push_str(&fragment),
                Section::MsgCtxt => {
                    if let Some(ctx) = &mut current.context {
                        ctx.push_str(&fragment);
                    }
                }
                Section::None => {}
            }
        }
    }
    finish(&mut current, &mut entries);

    Ok(entries)
}

/// Renders one `msgid`/`msgstr`, folding multi-line strings.
fn format_po_string(key: &str, value: &str) -> String {
    if value.contains('\n') {
        let mut out = format!("{key} \"\"\n");
        let mut lines = value.split('\n').peekable();
        while let Some(line) = lines.next() {
            if lines.peek().is_some() {
                out.push_str(&format!("\"{}\\n\"\n", escape_po_no_newline(line)));
            } else if !line.is_empty() {
                out.push_str(&format!("\"{}\"\n", escape_po_no_newline(line)));
            }
        }
        out
    } else {
        format!("{key} \"{}\"\n", escape_po(value))
    }
}

fn escape_po(s: &str) -> String {
    escape_po_no_newline(s).replace('\n', "\\n")
}

fn escape_po_no_newline(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
}

fn unescape_po(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

//! CSV export and import.
//!
//! RFC-4180 style quoting: a field containing a comma, quote, or newline is
//! wrapped in quotes with inner quotes doubled.

use gamestringer_types::TranslationEntry;

use crate::{ExportError, ExportOptions};

/// Renders entries as CSV with a header row.
pub fn to_csv(entries: &[TranslationEntry], options: &ExportOptions) -> String {
    let mut out = String::new();

    let mut headers = vec!["id", "source", "target"];
    if options.include_context {
        headers.push("context");
    }
    if options.include_notes {
        headers.push("notes");
    }
    out.push_str(&headers.join(","));
    out.push('\n');

    for entry in entries {
        if !options.include_empty && entry.target.trim().is_empty() {
            continue;
        }

        let mut row = vec![
            escape_csv(&entry.id),
            escape_csv(&entry.source),
            escape_csv(&entry.target),
        ];
        if options.include_context {
            row.push(escape_csv(entry.context.as_deref().unwrap_or("")));
        }
        if options.include_notes {
            row.push(escape_csv(entry.notes.as_deref().unwrap_or("")));
        }

        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Parses CSV content back into entries.
///
/// Column positions come from the header row; `id`, `source`, and `target`
/// fall back to the first three columns when unnamed.
pub fn from_csv(content: &str) -> Result<Vec<TranslationEntry>, ExportError> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(ExportError::Empty)?;
    let headers: Vec<String> = parse_csv_line(header)
        .into_iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let id_idx = position("id").unwrap_or(0);
    let source_idx = position("source").unwrap_or(1);
    let target_idx = position("target").unwrap_or(2);
    let context_idx = position("context");
    let notes_idx = position("notes");

    let mut entries = Vec::new();
    for (line_num, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }

        let fields = parse_csv_line(line);
        if fields.len() < 3 {
            continue;
        }

        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        entries.push(TranslationEntry {
            id: fields
                .get(id_idx)
                .cloned()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("row_{line_num}")),
            source: fields.get(source_idx).cloned().unwrap_or_default(),
            target: fields.get(target_idx).cloned().unwrap_or_default(),
            context: context_idx.and_then(|i| fields.get(i).cloned()).and_then(non_empty),
            notes: notes_idx.and_then(|i| fields.get(i).cloned()).and_then(non_empty),
        });
    }

    Ok(entries)
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Splits one CSV line, honoring quoting and doubled quotes.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, source: &str, target: &str) -> TranslationEntry {
        TranslationEntry {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            context: None,
            notes: None,
        }
    }

    #[test]
    fn export_plain_rows() {
        let entries = vec![entry("1", "New Game", "Nuova Partita")];
        let csv = to_csv(&entries, &ExportOptions::default());
        assert_eq!(csv, "id,source,target,context,notes\n1,New Game,Nuova Partita,,\n");
    }

    #[test]
    fn export_escapes_quotes_and_commas() {
        let entries = vec![entry("1", "Say \"hi\", friend", "Di' \"ciao\"")];
        let csv = to_csv(&entries, &ExportOptions::default());
        assert!(csv.contains("\"Say \"\"hi\"\", friend\""));
    }

    #[test]
    fn export_skips_empty_targets_by_default() {
        let entries = vec![entry("1", "Load", ""), entry("2", "Save", "Salva")];
        let csv = to_csv(&entries, &ExportOptions::default());
        assert!(!csv.contains("Load"));
        assert!(csv.contains("Salva"));
    }

    #[test]
    fn export_includes_empty_when_asked() {
        let entries = vec![entry("1", "Load", "")];
        let options = ExportOptions {
            include_empty: true,
            ..Default::default()
        };
        assert!(to_csv(&entries, &options).contains("Load"));
    }

    #[test]
    fn roundtrip_preserves_special_characters() {
        let entries = vec![
            entry("1", "A \"quoted\" line, with commas", "target & more"),
            TranslationEntry {
                id: "2".into(),
                source: "plain".into(),
                target: "x".into(),
                context: Some("menu.json".into()),
                notes: None,
            },
        ];
        let csv = to_csv(&entries, &ExportOptions::default());
        let parsed = from_csv(&csv).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].source, "A \"quoted\" line, with commas");
        assert_eq!(parsed[0].target, "target & more");
        assert_eq!(parsed[1].context.as_deref(), Some("menu.json"));
    }

    #[test]
    fn import_empty_document_errors() {
        assert!(matches!(from_csv(""), Err(ExportError::Empty)));
    }

    #[test]
    fn import_skips_short_rows() {
        let parsed = from_csv("id,source,target\nonly-one-field\n1,src,tgt\n").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].source, "src");
    }

    #[test]
    fn import_assigns_row_ids_when_blank() {
        let parsed = from_csv("id,source,target\n,src,tgt\n").unwrap();
        assert_eq!(parsed[0].id, "row_0");
    }
}

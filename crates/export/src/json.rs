//! JSON export.

use gamestringer_types::TranslationEntry;
use serde::Serialize;

use crate::ExportOptions;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    metadata: Metadata<'a>,
    translations: Vec<&'a TranslationEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    exported_at: String,
    source_language: &'a str,
    target_language: &'a str,
    entries_count: usize,
    tool: &'static str,
}

/// Renders entries as a pretty-printed JSON document with metadata.
pub fn to_json(entries: &[TranslationEntry], options: &ExportOptions) -> String {
    let included: Vec<&TranslationEntry> = entries
        .iter()
        .filter(|e| options.include_empty || !e.target.trim().is_empty())
        .collect();

    let document = JsonDocument {
        metadata: Metadata {
            exported_at: chrono::Utc::now().to_rfc3339(),
            source_language: &options.source_lang,
            target_language: &options.target_lang,
            entries_count: included.len(),
            tool: "GameStringer",
        },
        translations: included,
    };

    // Serialization of this shape cannot fail.
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_shape() {
        let entries = vec![TranslationEntry {
            id: "1".into(),
            source: "Save".into(),
            target: "Salva".into(),
            context: None,
            notes: None,
        }];
        let json = to_json(&entries, &ExportOptions::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["entriesCount"], 1);
        assert_eq!(value["metadata"]["targetLanguage"], "en");
        assert_eq!(value["translations"][0]["source"], "Save");
    }

    #[test]
    fn empty_targets_filtered_from_count() {
        let entries = vec![
            TranslationEntry {
                id: "1".into(),
                source: "Load".into(),
                target: String::new(),
                context: None,
                notes: None,
            },
            TranslationEntry {
                id: "2".into(),
                source: "Save".into(),
                target: "Salva".into(),
                context: None,
                notes: None,
            },
        ];
        let json = to_json(&entries, &ExportOptions::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["entriesCount"], 1);
        assert_eq!(value["translations"].as_array().unwrap().len(), 1);
    }
}

//! Heuristic engine and VR classification.
//!
//! Ordered substring checks against a fixed keyword table. The order is
//! significant: text mentioning both "unity" and "unreal" resolves to the
//! entry checked first, and longer tokens ("source 2") precede their
//! prefixes ("source engine").

/// Keyword table, checked top to bottom. All keys are lowercase.
const ENGINE_KEYWORDS: &[(&str, &str)] = &[
    ("unity", "Unity"),
    ("unreal", "Unreal Engine"),
    ("godot", "Godot"),
    ("rpg maker", "RPG Maker"),
    ("ren'py", "Ren'Py"),
    ("renpy", "Ren'Py"),
    ("gamemaker", "GameMaker"),
    ("game maker", "GameMaker"),
    ("source 2", "Source 2"),
    ("source engine", "Source Engine"),
    ("cryengine", "CryEngine"),
    ("frostbite", "Frostbite"),
    ("redengine", "REDengine"),
    ("creation engine", "Creation Engine"),
    ("id tech", "id Tech"),
    ("telltale", "Telltale Tool"),
];

/// Guesses the engine from free-text metadata.
///
/// Case-insensitive, first match wins, `None` when nothing matches.
pub fn detect_engine(text: &str) -> Option<&'static str> {
    let haystack = text.to_lowercase();
    ENGINE_KEYWORDS
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, engine)| *engine)
}

/// Returns true when any store category marks the title as VR.
pub fn detect_vr(categories: &[String]) -> bool {
    categories.iter().any(|c| {
        let c = c.to_lowercase();
        c.contains("vr") || c.contains("virtual reality")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_engines() {
        assert_eq!(detect_engine("Built with Unity 2021"), Some("Unity"));
        assert_eq!(detect_engine("Powered by Unreal Engine 5"), Some("Unreal Engine"));
        assert_eq!(detect_engine("a Godot project"), Some("Godot"));
        assert_eq!(detect_engine("an RPG Maker MV title"), Some("RPG Maker"));
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_engine("MADE IN UNITY"), Some("Unity"));
        assert_eq!(detect_engine("CryEngine showcase"), Some("CryEngine"));
    }

    #[test]
    fn first_match_wins_for_ambiguous_text() {
        // Table order is the contract: unity is checked before unreal.
        assert_eq!(
            detect_engine("ported from unreal to unity"),
            Some("Unity")
        );
    }

    #[test]
    fn source_two_beats_source_engine() {
        assert_eq!(detect_engine("runs on source 2"), Some("Source 2"));
        assert_eq!(detect_engine("classic source engine mod"), Some("Source Engine"));
    }

    #[test]
    fn unknown_text_is_none() {
        assert_eq!(detect_engine("a handcrafted custom renderer"), None);
        assert_eq!(detect_engine(""), None);
    }

    #[test]
    fn detection_is_deterministic() {
        let text = "unity and unreal and godot";
        let first = detect_engine(text);
        for _ in 0..10 {
            assert_eq!(detect_engine(text), first);
        }
    }

    #[test]
    fn vr_from_categories() {
        assert!(detect_vr(&["VR Supported".into()]));
        assert!(detect_vr(&["Virtual Reality".into()]));
        assert!(detect_vr(&["Single-player".into(), "VR Only".into()]));
        assert!(!detect_vr(&["Single-player".into(), "Co-op".into()]));
        assert!(!detect_vr(&[]));
    }
}

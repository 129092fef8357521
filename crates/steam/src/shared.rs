//! Shared-library XML parsing.
//!
//! Steam's community profile exposes a games list as XML
//! (`.../games?xml=1`). Family members export that document so shared
//! titles can be merged into the library without cookie authentication.
//! Only `<appID>` and `<name>` are read from each `<game>` element.

use crate::SteamError;

/// A title from a shared library export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedApp {
    pub app_id: u32,
    pub name: String,
}

/// Parses the community games-list XML into shared apps.
///
/// Games without a parsable `<appID>` are skipped; a document without a
/// `<gamesList>` root is rejected.
pub fn parse_shared_games_xml(content: &str) -> Result<Vec<SharedApp>, SteamError> {
    if !content.contains("<gamesList>") {
        return Err(SteamError::Xml("missing <gamesList> root".into()));
    }

    let mut apps = Vec::new();
    let mut rest = content;

    while let Some((game, tail)) = next_element(rest, "game") {
        rest = tail;

        let Some(app_id) = element_text(game, "appID").and_then(|s| s.trim().parse::<u32>().ok())
        else {
            continue;
        };

        let name = element_text(game, "name")
            .map(|s| unescape_xml(strip_cdata(s.trim())))
            .unwrap_or_default();

        apps.push(SharedApp { app_id, name });
    }

    Ok(apps)
}

/// Finds the next `<tag>...</tag>` element, returning its inner text and
/// the remaining input after the close tag.
fn next_element<'a>(input: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = input.find(&open)? + open.len();
    let end = start + input[start..].find(&close)?;
    Some((&input[start..end], &input[end + close.len()..]))
}

/// Returns the inner text of the first `<tag>...</tag>` inside `input`.
fn element_text<'a>(input: &'a str, tag: &str) -> Option<&'a str> {
    next_element(input, tag).map(|(inner, _)| inner)
}

/// Strips a `<![CDATA[...]]>` wrapper if present.
fn strip_cdata(s: &str) -> &str {
    s.strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .unwrap_or(s)
}

/// Decodes the five predefined XML entities.
fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<gamesList>
  <steamID64>76561198000000000</steamID64>
  <games>
    <game>
      <appID>440</appID>
      <name><![CDATA[Team Fortress 2]]></name>
      <hoursOnRecord>12.3</hoursOnRecord>
    </game>
    <game>
      <appID>620</appID>
      <name><![CDATA[Portal 2]]></name>
    </game>
  </games>
</gamesList>"#;

    #[test]
    fn parse_sample_export() {
        let apps = parse_shared_games_xml(SAMPLE).unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0], SharedApp { app_id: 440, name: "Team Fortress 2".into() });
        assert_eq!(apps[1].app_id, 620);
    }

    #[test]
    fn parse_name_without_cdata() {
        let xml = "<gamesList><games><game><appID>10</appID><name>Counter-Strike</name></game></games></gamesList>";
        let apps = parse_shared_games_xml(xml).unwrap();
        assert_eq!(apps[0].name, "Counter-Strike");
    }

    #[test]
    fn parse_unescapes_entities() {
        let xml = "<gamesList><game><appID>1</appID><name>Cats &amp; Dogs &lt;3</name></game></gamesList>";
        let apps = parse_shared_games_xml(xml).unwrap();
        assert_eq!(apps[0].name, "Cats & Dogs <3");
    }

    #[test]
    fn parse_skips_game_without_appid() {
        let xml = "<gamesList><game><name>Ghost</name></game><game><appID>2</appID><name>Real</name></game></gamesList>";
        let apps = parse_shared_games_xml(xml).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].app_id, 2);
    }

    #[test]
    fn reject_non_games_list_document() {
        assert!(parse_shared_games_xml("<html><body>login</body></html>").is_err());
    }

    #[test]
    fn empty_list_is_ok() {
        let apps = parse_shared_games_xml("<gamesList><games></games></gamesList>").unwrap();
        assert!(apps.is_empty());
    }
}

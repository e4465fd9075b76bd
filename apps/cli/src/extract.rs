use std::sync::OnceLock;

use regex::Regex;

/// Tried in order; the first capture wins.
const PLAYLIST_PATTERNS: [&str; 2] = [
    // ...?list=PLxxxx&index=2, or any other text carrying `list=`
    r"list=([^&#\s]+)",
    // a bare playlist id pasted on its own
    r"^\s*((?:PL|UU|LL|FL|OL|RD)[\w-]{10,})\s*$",
];

fn patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PLAYLIST_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("playlist pattern compiles"))
            .collect()
    })
}

/// Pulls a playlist id out of free text. The match is not checked against
/// the platform's id format beyond being non-empty.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    patterns()
        .iter()
        .find_map(|re| re.captures(url).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

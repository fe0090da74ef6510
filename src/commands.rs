pub const AUTH_KEYWORD: &str = "gm";
pub const HELP_KEYWORD: &str = "help";
/// Debug leftover that grants access without authenticating. Off unless the
/// session enables it.
pub const BYPASS_KEYWORD: &str = "override";

/// Keywords dispatched once the session is unlocked.
pub const KEYWORDS: [&str; 6] = [
    "status",
    "agents",
    "treatments",
    "threat-level",
    "emergency",
    "stealth",
];

pub const MAX_SUGGESTIONS: usize = 3;

/// Trailing marker that asks for completions instead of running a command.
pub const HINT_SUFFIX: char = '?';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Authenticate,
    Help,
    Bypass,
    Keyword(&'static str),
    Unknown(String),
}

/// Trims surrounding whitespace and lowercases.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Classifies normalized input. Order matters: auth, help, bypass, then the
/// keyword table.
pub fn parse_command(normalized: &str, bypass_enabled: bool) -> Command {
    if normalized == AUTH_KEYWORD {
        return Command::Authenticate;
    }

    if normalized == HELP_KEYWORD {
        return Command::Help;
    }

    if bypass_enabled && normalized == BYPASS_KEYWORD {
        return Command::Bypass;
    }

    match KEYWORDS.iter().copied().find(|keyword| *keyword == normalized) {
        Some(keyword) => Command::Keyword(keyword),
        None => Command::Unknown(normalized.to_string()),
    }
}

/// The partial command of a hint request (`sta?`), if `normalized` is one.
pub fn hint_request(normalized: &str) -> Option<&str> {
    normalized.strip_suffix(HINT_SUFFIX).map(str::trim_end)
}

/// Candidates that contain the typed text or are contained in it, in
/// candidate order, at most `limit` of them.
pub fn suggest<'a>(typed: &str, candidates: &'a [String], limit: usize) -> Vec<&'a str> {
    let typed = normalize(typed);
    if typed.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .map(String::as_str)
        .filter(|candidate| candidate.contains(typed.as_str()) || typed.contains(candidate))
        .take(limit)
        .collect()
}

/// Suggestions listed by the unknown-command script: the matches for `typed`,
/// or the head of the candidate list when nothing matches.
pub fn fallback_suggestions<'a>(typed: &str, candidates: &'a [String]) -> Vec<&'a str> {
    let matched = suggest(typed, candidates, MAX_SUGGESTIONS);
    if !matched.is_empty() {
        return matched;
    }

    candidates
        .iter()
        .map(String::as_str)
        .take(MAX_SUGGESTIONS)
        .collect()
}

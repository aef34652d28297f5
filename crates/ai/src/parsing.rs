//! Validation of raw model answers.
//!
//! Models wrap answers in quotes or markdown, add numbering, or ignore the
//! requested format altogether. These helpers accept only answers that pass
//! strict checks and turn everything else into "no match".

use log::warn;
use procplan_core::reference::CommodityTable;

/// Answer used by the commodity and similarity prompts for "no match".
pub const NO_MATCH_TOKEN: &str = "NO_MATCH";

/// Answer used by the manufacturer prompt for "no match".
pub const NONE_TOKEN: &str = "NONE";

/// Lines containing these phrases are introductions, not data.
const INTRO_PHRASES: [&str; 4] = ["here are", "following", "manufacturers of", "companies that"];

/// Characters that mark a manufacturer line as explanatory rather than data.
const EXPLANATORY_CHARS: [char; 4] = ['(', ')', ':', ';'];

/// Whether `line` carries explanatory punctuation.
///
/// A dash counts unless it joins two alphanumerics, as in `Freeport-McMoRan`.
fn is_explanatory(line: &str) -> bool {
    if line.contains(EXPLANATORY_CHARS) {
        return true;
    }
    let chars: Vec<char> = line.chars().collect();
    chars.iter().enumerate().any(|(i, c)| {
        *c == '-'
            && !(i > 0
                && chars[i - 1].is_alphanumeric()
                && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric()))
    })
}

/// Strip surrounding quotes, backticks and markdown emphasis from a fragment.
pub fn clean_fragment(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for _ in 0..4 {
        let trimmed = text.trim();
        let stripped = [("**", "**"), ("__", "__"), ("`", "`"), ("\"", "\""), ("'", "'"), ("*", "*")]
            .iter()
            .find_map(|(open, close)| {
                let inner = trimmed.strip_prefix(open)?.strip_suffix(close)?;
                (!inner.trim().is_empty()).then(|| inner.trim().to_string())
            });

        match stripped {
            Some(inner) => text = inner,
            None => break,
        }
    }

    text.trim_matches(|c: char| matches!(c, '*' | '_' | '`' | '"' | '\''))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty line of a model answer, cleaned.
pub fn first_answer_line(raw: &str) -> String {
    raw.lines()
        .map(clean_fragment)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// Remove leading list markers: `-`, `*`, `•`, `1.`, `2)`, also when stacked
/// as in `1. - Dow Inc., DOW`.
pub fn strip_enumeration(line: &str) -> &str {
    let mut line = line.trim_start();

    loop {
        if let Some(rest) = line
            .strip_prefix('-')
            .or_else(|| line.strip_prefix('*'))
            .or_else(|| line.strip_prefix('•'))
        {
            line = rest.trim_start();
            continue;
        }

        let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            let rest = &line[digits..];
            if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
                line = rest.trim_start();
                continue;
            }
        }

        return line;
    }
}

/// Parse a commodity answer into a symbol present in `commodities`.
///
/// Returns the table's canonical symbol spelling.
pub fn parse_commodity_answer(raw: &str, commodities: &CommodityTable) -> Option<String> {
    let answer = first_answer_line(raw);
    if answer.is_empty() || answer.eq_ignore_ascii_case(NO_MATCH_TOKEN) {
        return None;
    }

    match commodities.get(&answer) {
        Some(entry) => Some(entry.symbol.clone()),
        None => {
            warn!("Commodity answer '{}' is not a known symbol", answer);
            None
        }
    }
}

/// Parse manufacturer lines (`Company Name, SYMBOL`) into company names.
///
/// Malformed lines are dropped; the symbol part is ignored because symbols are
/// re-resolved against the company directory. At most `count` names are kept.
pub fn parse_manufacturer_lines(raw: &str, count: usize) -> Vec<String> {
    let mut names = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case(NONE_TOKEN) {
            continue;
        }

        let lower = line.to_lowercase();
        if INTRO_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
            continue;
        }

        let line = strip_enumeration(line);
        if is_explanatory(line) {
            warn!("Skipping invalid manufacturer line: {}", line);
            continue;
        }

        let Some((name, _symbol)) = line.rsplit_once(',') else {
            warn!("Skipping manufacturer line without symbol: {}", line);
            continue;
        };

        let name = clean_fragment(name);
        if name.is_empty() {
            continue;
        }
        names.push(name);

        if names.len() == count {
            break;
        }
    }

    names
}

/// Parse a similarity answer; it must equal one of `candidates` exactly.
pub fn parse_similarity_answer(raw: &str, candidates: &[&str]) -> Option<String> {
    let answer = first_answer_line(raw);
    if answer.is_empty() || answer.eq_ignore_ascii_case(NO_MATCH_TOKEN) {
        return None;
    }

    if candidates.contains(&answer.as_str()) {
        Some(answer)
    } else {
        warn!("Similarity answer '{}' is not a candidate", answer);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procplan_core::reference::{curated_manufacturer_lines, CURATED_MANUFACTURERS};

    #[test]
    fn test_clean_fragment() {
        assert_eq!(clean_fragment("  **XAUUSD** "), "XAUUSD");
        assert_eq!(clean_fragment("\"`Steel`\""), "Steel");
        assert_eq!(clean_fragment("'Natural   Gas'"), "Natural Gas");
        assert_eq!(clean_fragment("Steel"), "Steel");
        assert_eq!(clean_fragment("**"), "");
    }

    #[test]
    fn test_strip_enumeration() {
        assert_eq!(strip_enumeration("1. Dow Inc., DOW"), "Dow Inc., DOW");
        assert_eq!(strip_enumeration("12) Nucor, NUE"), "Nucor, NUE");
        assert_eq!(strip_enumeration("- Alcoa, AA"), "Alcoa, AA");
        assert_eq!(strip_enumeration("• Corning, GLW"), "Corning, GLW");
        assert_eq!(strip_enumeration("1. - Dow Inc., DOW"), "Dow Inc., DOW");
        assert_eq!(strip_enumeration("2) * Nucor, NUE"), "Nucor, NUE");
        // Leading digits that are part of the name stay
        assert_eq!(strip_enumeration("3M Company, MMM"), "3M Company, MMM");
        assert_eq!(strip_enumeration("1. 3M Company, MMM"), "3M Company, MMM");
    }

    #[test]
    fn test_parse_commodity_answer() {
        let table = CommodityTable::standard();
        assert_eq!(
            parse_commodity_answer("XAUUSD", &table),
            Some("XAUUSD".to_string())
        );
        assert_eq!(
            parse_commodity_answer("\n  `copper`\n", &table),
            Some("COPPER".to_string())
        );
        assert_eq!(parse_commodity_answer("NO_MATCH", &table), None);
        assert_eq!(parse_commodity_answer("no_match", &table), None);
        assert_eq!(parse_commodity_answer("", &table), None);
        assert_eq!(
            parse_commodity_answer("The symbol for gold is XAUUSD", &table),
            None
        );
    }

    #[test]
    fn test_parse_manufacturer_lines() {
        let raw = "Here are the manufacturers:\n\
                   1. Dow Inc., DOW\n\
                   BASF SE: BASF is a German chemical company\n\
                   Dow Inc. (DOW) - Chemical company\n\
                   - LyondellBasell Industries N.V., LYB\n\
                   Eastman Chemical Company, EMN\n";

        let names = parse_manufacturer_lines(raw, 3);
        assert_eq!(
            names,
            vec![
                "Dow Inc.",
                "LyondellBasell Industries N.V.",
                "Eastman Chemical Company",
            ]
        );
    }

    #[test]
    fn test_parse_manufacturer_lines_keeps_hyphenated_names() {
        let raw = "1. - Dow Inc., DOW\n\
                   Freeport-McMoRan, FCX\n\
                   Nucor Corporation, NUE - largest US steel producer";
        assert_eq!(
            parse_manufacturer_lines(raw, 3),
            vec!["Dow Inc.", "Freeport-McMoRan"]
        );
    }

    #[test]
    fn test_curated_hint_lines_are_accepted() {
        let echoed = curated_manufacturer_lines().join("\n");
        let expected: Vec<&str> = CURATED_MANUFACTURERS
            .iter()
            .flat_map(|(_, companies)| companies.iter().map(|(_, name)| *name))
            .collect();

        assert_eq!(parse_manufacturer_lines(&echoed, usize::MAX), expected);
        assert_eq!(
            parse_manufacturer_lines(&echoed, 3),
            vec!["BHP Group", "Rio Tinto", "Vale S.A."]
        );
    }

    #[test]
    fn test_parse_manufacturer_lines_truncates() {
        let raw = "Alcoa Corporation, AA\nCentury Aluminum Company, CENX\nKaiser Aluminum, KALU";
        assert_eq!(
            parse_manufacturer_lines(raw, 2),
            vec!["Alcoa Corporation", "Century Aluminum Company"]
        );
    }

    #[test]
    fn test_parse_manufacturer_none() {
        assert!(parse_manufacturer_lines("NONE", 3).is_empty());
        assert!(parse_manufacturer_lines("", 3).is_empty());
        // No comma, no symbol
        assert!(parse_manufacturer_lines("Alcoa Corporation", 3).is_empty());
    }

    #[test]
    fn test_parse_similarity_answer() {
        let candidates = ["Steel", "Copper", "Natural Gas"];
        assert_eq!(
            parse_similarity_answer("Steel", &candidates),
            Some("Steel".to_string())
        );
        assert_eq!(
            parse_similarity_answer("\"Natural Gas\"\n", &candidates),
            Some("Natural Gas".to_string())
        );
        // Exact match only
        assert_eq!(parse_similarity_answer("steel", &candidates), None);
        assert_eq!(parse_similarity_answer("Iron", &candidates), None);
        assert_eq!(parse_similarity_answer("NO_MATCH", &candidates), None);
    }
}

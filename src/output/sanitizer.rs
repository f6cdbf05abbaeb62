// Strips interpreter banner and prompt noise from captured output

use regex::Regex;
use std::sync::LazyLock;

/// Windows console banner up to and including the first drive-letter prompt
static BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Microsoft Windows \[[Vv]ersion .+\]\r?\n(?:Copyright|\(c\)).*(?:\r?\n)+[A-Z]:.+?>",
    )
    .unwrap()
});

/// Drive-letter prompt such as `C:\Users\me>`, with any newlines before it
static PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)*[A-Z]:.+?>").unwrap());

/// Remove console banner and prompt lines from `text`.
///
/// Both substitutions are repeated until the text stops changing, since a
/// removal can splice two fragments into a new prompt. Every pass shortens
/// the text, so the loop terminates, and the result contains no match of
/// either pattern.
pub fn clean(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let without_banner = BANNER_RE.replace_all(&current, "");
        let next = PROMPT_RE.replace_all(&without_banner, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

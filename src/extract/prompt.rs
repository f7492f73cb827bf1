//! CLI prompt recognition.
//!
//! A prompt line looks like `<separator><hostname><terminator>`: `R1#show ip route`,
//! `<HP-SW>display arp`, `admin@fw01> show route`. The separator is `@`, `<`, a blank,
//! or the start of the line; the terminator is `#` or `>`.

use lazy_static::lazy_static;
use regex::Regex;

/// Prompt prefix; capture group 1 is the hostname. Anything may follow the terminator.
pub const PROMPT_PATTERN: &str = r"^(?:.*[@<\t ])?([\w-]+)[#>]";

/// Words that look like a prompt but are echoed command text.
const NOT_A_HOSTNAME: &str = "command";

lazy_static! {
    static ref PROMPT_RE: Regex = Regex::new(PROMPT_PATTERN).expect("Invalid prompt regex");
}

/// Hostname from a single prompt line, `None` if the line is not a prompt.
pub fn prompt_hostname(line: &str) -> Option<&str> {
    let caps = PROMPT_RE.captures(line)?;
    let hostname = caps.get(1)?.as_str();
    if hostname.starts_with(NOT_A_HOSTNAME) {
        return None;
    }
    Some(hostname)
}

pub fn is_prompt_line(line: &str) -> bool {
    prompt_hostname(line).is_some()
}

/// Hostname from the first prompt line anywhere in `text`.
pub fn first_prompt_hostname(text: &str) -> Option<&str> {
    text.lines().find_map(prompt_hostname)
}

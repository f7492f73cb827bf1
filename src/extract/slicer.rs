//! Command section slicing.
//!
//! Finds the echoed invocation of each command of interest in a capture and cuts
//! out the output lines that follow it, up to the next prompt line.

use super::prompt::{is_prompt_line, PROMPT_PATTERN};
use regex::Regex;

/// Output of one command, as found in a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSection {
    pub command: String,
    pub text: String,
}

/// All command sections found in one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlicedCapture {
    /// Hostname on the prompt of the first command found.
    pub hostname: Option<String>,
    /// Sections in command-list order.
    pub sections: Vec<CommandSection>,
}

impl SlicedCapture {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Pattern for a command as a device may echo it, abbreviations included.
///
/// Each word is cut to its first two characters followed by `[\w-]*\s*`, so
/// `show ip route` also matches `sh ip ro`.
pub fn command_pattern(command: &str) -> String {
    command
        .split_whitespace()
        .map(|word| {
            let prefix: String = word.chars().take(2).collect();
            format!(r"{}[\w-]*\s*", regex::escape(&prefix))
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Precompiled prompt+command patterns for a list of commands.
#[derive(Debug, Clone)]
pub struct CommandSlicer {
    commands: Vec<(String, Regex)>,
}

impl CommandSlicer {
    pub fn new<S: AsRef<str>>(commands: &[S]) -> Result<CommandSlicer, regex::Error> {
        let mut compiled = Vec::with_capacity(commands.len());
        for command in commands {
            let command = command.as_ref();
            let pattern = format!(r"(?m){PROMPT_PATTERN}.*({})", command_pattern(command));
            compiled.push((command.to_string(), Regex::new(&pattern)?));
        }
        Ok(CommandSlicer { commands: compiled })
    }

    /// Slice `text` into one section per command found. Commands not present are left out.
    pub fn slice(&self, text: &str) -> SlicedCapture {
        let mut sliced = SlicedCapture::default();
        let lines: Vec<&str> = text.lines().collect();

        for (command, re) in &self.commands {
            let hostname = match first_issue_hostname(re, text) {
                Some(hostname) => hostname,
                None => continue,
            };
            if sliced.hostname.is_none() {
                sliced.hostname = Some(hostname.to_string());
            }

            // TODO: the whole-capture fallback only fires when the line scan disagrees
            // with the search above; review whether it can be dropped.
            let candidate: &[&str] = match lines
                .iter()
                .position(|line| first_issue_hostname(re, line).is_some())
            {
                Some(index) => &lines[index + 1..],
                None => &lines,
            };

            let section: Vec<&str> = candidate
                .iter()
                .take_while(|line| !is_prompt_line(line))
                .copied()
                .collect();

            log::debug!(
                "Sliced {command:?} from {hostname}: {} lines",
                section.len()
            );
            sliced.sections.push(CommandSection {
                command: command.clone(),
                text: section.join("\n"),
            });
        }

        sliced
    }
}

/// Hostname of the first prompt in `text` that issues the command matched by `re`.
fn first_issue_hostname<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|hostname| !hostname.starts_with("command"))
}

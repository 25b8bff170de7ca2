//! Splits an inbound chat line into command name and arguments.

/// A line that matched the command prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Command name, prefix stripped.
    pub name: &'a str,
    /// Raw argument text after the first whitespace run, trailing whitespace trimmed.
    pub full_arg: &'a str,
}

impl ParsedCommand<'_> {
    /// Arguments split on whitespace runs.
    pub fn args(&self) -> Vec<String> {
        self.full_arg.split_whitespace().map(str::to_owned).collect()
    }
}

/// Parse `line` as a command invocation.
///
/// Returns `None` when the line does not start with `prefix` or when the
/// command name is empty (`"!"`, `"! foo"`).
pub fn parse<'a>(line: &'a str, prefix: &str) -> Option<ParsedCommand<'a>> {
    let body = line.strip_prefix(prefix)?;

    let (name, rest) = match body.find(char::is_whitespace) {
        Some(idx) => body.split_at(idx),
        None => (body, ""),
    };
    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name,
        full_arg: rest.trim(),
    })
}

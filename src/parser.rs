// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Shell-like input parsing.
//!
//! The playground terminal accepts one free-text line per submission. Lines
//! are split naively on whitespace into a __main command__, an optional
//! __sub command__, and trailing arguments. There is no quoting or escaping
//! support. The only exception is the commit message, which is recovered from
//! the raw line as the text following the `-m` flag.

/// Classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Nothing but whitespace. Never dispatched, never recorded.
    Empty,

    /// Invocation of the simulated `git` binary.
    Git(ParsedCommand),

    /// Terminal builtin that wipes displayed output.
    Clear,

    /// Terminal builtin that shows the command reference.
    Help,

    /// Any other leading token.
    Unknown(ParsedCommand),
}

/// Input line split into its parts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Trimmed raw line as typed by the user.
    pub raw: String,

    /// First token, e.g., "git".
    pub main_command: String,

    /// Second token, e.g., "commit".
    pub sub_command: Option<String>,

    /// Everything after the sub command.
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Argument at position `index`, if any.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Check if a flag is present anywhere in the argument list.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }

    /// Arguments that do not look like flags.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .map(String::as_str)
            .filter(|arg| !arg.starts_with('-'))
    }
}

/// Parse raw input line.
pub fn parse(line: &str) -> Input {
    let raw = line.trim();
    if raw.is_empty() {
        return Input::Empty;
    }

    let mut tokens = raw.split_whitespace().map(str::to_owned);
    // INVARIANT: Non-empty trimmed input always yields a first token.
    let main_command = tokens.next().unwrap_or_default();
    let sub_command = tokens.next();
    let args = tokens.collect::<Vec<_>>();

    let parsed = ParsedCommand {
        raw: raw.to_owned(),
        main_command,
        sub_command,
        args,
    };

    match parsed.main_command.as_str() {
        "git" => Input::Git(parsed),
        "clear" if parsed.sub_command.is_none() => Input::Clear,
        "help" if parsed.sub_command.is_none() => Input::Help,
        _ => Input::Unknown(parsed),
    }
}

/// Result of looking for a commit message in a raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMessage {
    /// No message flag present at all.
    Missing,

    /// Message flag present, but nothing follows it.
    Empty,

    /// Message text, with one matching pair of quotes removed.
    Text(String),
}

/// Extract commit message from raw input line.
///
/// Looks for the first standalone `-m` flag, or a combined short flag that
/// ends in `m` such as `-am`. Everything after that flag is the message. One
/// matching pair of leading and trailing quote characters is stripped.
pub fn commit_message(raw: &str) -> CommitMessage {
    let mut offset = 0;
    for token in raw.split_whitespace() {
        // INVARIANT: Track byte offset of each token in the raw line.
        let start = raw[offset..].find(token).map_or(offset, |pos| offset + pos);
        offset = start + token.len();

        if is_message_flag(token) {
            let rest = raw[offset..].trim();
            return match unquote(rest) {
                "" => CommitMessage::Empty,
                text => CommitMessage::Text(text.to_owned()),
            };
        }
    }

    CommitMessage::Missing
}

fn is_message_flag(token: &str) -> bool {
    token == "-m"
        || (token.len() > 2
            && token.starts_with('-')
            && !token.starts_with("--")
            && token.ends_with('m'))
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test]
    fn parse_splits_git_invocation() {
        let result = parse("  git   checkout -b feature  ");
        let expect = Input::Git(ParsedCommand {
            raw: "git   checkout -b feature".into(),
            main_command: "git".into(),
            sub_command: Some("checkout".into()),
            args: vec!["-b".into(), "feature".into()],
        });
        pretty_assertions::assert_eq!(result, expect);
    }

    #[test_case(""; "empty")]
    #[test_case("   \t  "; "whitespace only")]
    #[test]
    fn parse_blank_input(line: &str) {
        pretty_assertions::assert_eq!(parse(line), Input::Empty);
    }

    #[test]
    fn parse_builtins() {
        pretty_assertions::assert_eq!(parse("clear"), Input::Clear);
        pretty_assertions::assert_eq!(parse("help"), Input::Help);
        assert!(matches!(parse("clear screen"), Input::Unknown(_)));
        assert!(matches!(parse("ls -la"), Input::Unknown(_)));
    }

    #[test_case(r#"git commit -m "Initial setup""#, "Initial setup"; "double quotes")]
    #[test_case("git commit -m 'fix: typo'", "fix: typo"; "single quotes")]
    #[test_case("git commit -m add readme", "add readme"; "unquoted words")]
    #[test_case(r#"git commit -am "wip""#, "wip"; "combined flag")]
    #[test_case(r#"git commit -m "it's""#, "it's"; "inner quote kept")]
    #[test]
    fn commit_message_extraction(raw: &str, expect: &str) {
        pretty_assertions::assert_eq!(commit_message(raw), CommitMessage::Text(expect.into()));
    }

    #[test]
    fn commit_message_absent_or_empty() {
        pretty_assertions::assert_eq!(commit_message("git commit"), CommitMessage::Missing);
        pretty_assertions::assert_eq!(commit_message("git commit --amend"), CommitMessage::Missing);
        pretty_assertions::assert_eq!(commit_message("git commit -m"), CommitMessage::Empty);
        pretty_assertions::assert_eq!(commit_message(r#"git commit -m """#), CommitMessage::Empty);
    }
}

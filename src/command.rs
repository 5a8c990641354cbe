#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    Help,
    Quit,
    Refresh,
    Delete,
    List,
    Empty,
    Unknown(String),
}

impl Verb {
    fn from_token(token: &str) -> Self {
        match token {
            "" | "?" | "help" => Self::Help,
            "q" | "quit" => Self::Quit,
            "r" | "refresh" => Self::Refresh,
            "d" | "delete" => Self::Delete,
            "l" | "list" => Self::List,
            "e" | "empty" => Self::Empty,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Refresh => "refresh",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Empty => "empty",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// One line of user input: a verb and, for bucket operations, the bucket id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub verb: Verb,
    pub target: Option<usize>,
}

impl Command {
    /// Lower-case the line and split it at the first space.
    ///
    /// Without a space the whole line is the verb, so `l1` is an unknown command
    /// rather than `list 1`. A target that is not a number is dropped.
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();

        let (verb, target) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim().parse().ok()),
            None => (line.as_str(), None),
        };

        Self {
            verb: Verb::from_token(verb),
            target,
        }
    }
}

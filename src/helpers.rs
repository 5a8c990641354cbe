use owo_colors::OwoColorize;

// https://users.rust-lang.org/t/is-there-a-simple-way-to-give-a-default-string-if-the-string-variable-is-empty/100411

pub trait StringExt {
    fn or(
        self,
        dflt: &str,
    ) -> String;
}

impl<S: Into<String>> StringExt for S {
    fn or(
        self,
        dflt: &str,
    ) -> String {
        // Re-use a `String`s capacity, maybe
        let mut s = self.into();
        if s.is_empty() {
            s.push_str(dflt);
        }
        s
    }
}

/// Fatal error line for stderr, including the `context` chain.
pub fn fmt_error(err: &anyhow::Error) -> String {
    format!("{} {err:#}", "Error:".red().bold())
}

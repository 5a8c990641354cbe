use owo_colors::OwoColorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Source of user input, one line per prompt.
pub trait LineSource {
    /// `Ok(None)` once the input is closed.
    async fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>>;
}

/// Interactive input; the prompt goes to stdout.
///
/// Bytes that are not UTF-8 are replaced, so a stray byte turns into an
/// unknown command instead of ending the session.
pub struct Terminal<R = BufReader<Stdin>> {
    reader: R,
}

impl Terminal {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin> Terminal<R> {
    pub const fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: AsyncBufRead + Unpin> LineSource for Terminal<R> {
    async fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt.bold())?;
        stdout.flush()?;

        let mut buffer = Vec::new();
        if self.reader.read_until(b'\n', &mut buffer).await? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buffer);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }
}

//! A human at the terminal standing in for a model

use super::{ModelClient, ModelError};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Shows each prompt and answers with the next line of input
pub struct StdinModel<R, W> {
    reader: R,
    writer: W,
}

impl StdinModel<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinModel<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> ModelClient for StdinModel<R, W> {
    fn generate(&mut self, prompt: &str) -> Result<String, ModelError> {
        let io_err = |e: io::Error| ModelError::Other(format!("terminal I/O failed: {e}"));

        writeln!(self.writer, "{prompt}").map_err(io_err)?;
        write!(self.writer, "> ").map_err(io_err)?;
        self.writer.flush().map_err(io_err)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(ModelError::Other("input closed".into()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn model_name(&self) -> &str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn echoes_prompt_and_reads_line() {
        let mut output = Vec::new();
        let mut model = StdinModel::new(Cursor::new("crane\n"), &mut output);

        assert_eq!(model.generate("Your next guess:").unwrap(), "crane");
        assert!(matches!(model.generate("again"), Err(ModelError::Other(_))));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Your next guess:\n> "));
    }
}

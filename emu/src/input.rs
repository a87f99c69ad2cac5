use std::collections::VecDeque;
use std::io::{BufRead, Write};

use arch::Word;

use crate::error::Error;

/// Source consulted by `INP` once the queued values run out.
pub trait Prompt {
    fn prompt(&mut self) -> Result<Word, Error>;
}

/// Asks for one integer per line, re-asking until the line parses.
pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Console { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn prompt(&mut self) -> Result<Word, Error> {
        loop {
            write!(self.writer, "Input: ").map_err(Error::Io)?;
            self.writer.flush().map_err(Error::Io)?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).map_err(Error::Io)? == 0 {
                return Err(Error::InputClosed);
            }
            match line.trim().parse::<Word>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.writer, "not an integer: `{}`", line.trim())
                    .map_err(Error::Io)?,
            }
        }
    }
}

/// Values for `INP`, in order. Without a prompt (batch mode) an empty
/// queue is fatal.
pub struct Input {
    queue: VecDeque<Word>,
    prompt: Option<Box<dyn Prompt>>,
}

impl Input {
    pub fn batch(values: impl IntoIterator<Item = Word>) -> Self {
        Input {
            queue: values.into_iter().collect(),
            prompt: None,
        }
    }

    pub fn interactive(values: impl IntoIterator<Item = Word>, prompt: Box<dyn Prompt>) -> Self {
        Input {
            queue: values.into_iter().collect(),
            prompt: Some(prompt),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn next(&mut self) -> Result<Word, Error> {
        if let Some(value) = self.queue.pop_front() {
            return Ok(value);
        }
        match self.prompt.as_mut() {
            Some(prompt) => prompt.prompt(),
            None => Err(Error::InputStarved),
        }
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("queue", &self.queue)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn batch_drains_in_order() {
        let mut input = Input::batch([3, 4]);
        assert_eq!(input.next().unwrap(), 3);
        assert_eq!(input.next().unwrap(), 4);
        assert!(matches!(input.next(), Err(Error::InputStarved)));
    }

    #[test]
    fn interactive_falls_back_to_prompt() {
        let console = Console::new(Cursor::new("7\n"), Vec::new());
        let mut input = Input::interactive([1], Box::new(console));
        assert!(input.is_interactive());
        assert_eq!(input.next().unwrap(), 1);
        assert_eq!(input.next().unwrap(), 7);
        assert!(matches!(input.next(), Err(Error::InputClosed)));
    }

    #[test]
    fn console_reprompts() {
        let mut out = Vec::new();
        let value = Console::new(Cursor::new("abc\n  -12 \n"), &mut out)
            .prompt()
            .unwrap();
        assert_eq!(value, -12);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "Input: not an integer: `abc`\nInput: ");
    }
}

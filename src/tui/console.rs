//! Line-based prompts and screen output.
//!
//! Menus read whole lines in cooked mode. Invalid answers are rejected and
//! asked again; end of input is reported as `None` so callers can back out.

use std::io::{BufRead, Write};

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

use crate::error::RudoroError;

/// Reads answers from `input` and writes prompts and screens to `out`.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over a reader and a writer.
    pub const fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Consume the console, returning the writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Clear the screen and draw `text` from the top-left corner.
    ///
    /// Line breaks are written as CRLF so frames render in raw mode too.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn draw(&mut self, text: &str) -> Result<(), RudoroError> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.write_all(text.replace('\n', "\r\n").as_bytes())?;
        self.out.write_all(b"\r\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// Write a line below whatever is on screen.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, text: &str) -> Result<(), RudoroError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, RudoroError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer matches one of the option keys
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn choose<T: Copy>(
        &mut self,
        prompt: &str,
        options: &[(&str, T)],
    ) -> Result<Option<T>, RudoroError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if let Some((_, value)) = options
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(&answer))
            {
                return Ok(Some(*value));
            }

            let keys: Vec<&str> = options.iter().map(|(key, _)| *key).collect();
            self.say(
                &format!("Invalid option. Please enter one of: {}", keys.join(", "))
                    .red()
                    .to_string(),
            )?;
        }
    }

    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>, RudoroError> {
        self.choose(
            &format!("{prompt} (y/n): "),
            &[("y", true), ("yes", true), ("n", false), ("no", false)],
        )
    }

    /// Ask until the answer is a positive whole number.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask_positive(&mut self, prompt: &str) -> Result<Option<u32>, RudoroError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                Ok(_) => self.say(&"Values must be positive. Try again.".red().to_string())?,
                Err(_) => self.say(&"Please enter a whole number.".red().to_string())?,
            }
        }
    }

    /// Ask until a non-empty answer is given.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask_non_empty(&mut self, prompt: &str) -> Result<Option<String>, RudoroError> {
        loop {
            match self.ask(prompt)? {
                Some(answer) if answer.is_empty() => {
                    self.say(&"Please enter a name.".red().to_string())?;
                }
                other => return Ok(other),
            }
        }
    }

    /// Wait for Enter. Returns false at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn wait_enter(&mut self, prompt: &str) -> Result<bool, RudoroError> {
        Ok(self.ask(prompt)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_choose_reprompts_on_invalid() {
        let mut c = console("9\nfoo\n2\n");
        let picked = c.choose("> ", &[("1", 'a'), ("2", 'b')]).unwrap();
        assert_eq!(picked, Some('b'));

        let text = output(c);
        assert_eq!(text.matches("Invalid option").count(), 2);
    }

    #[test]
    fn test_choose_eof() {
        let mut c = console("");
        assert_eq!(c.choose("> ", &[("1", 1)]).unwrap(), None);
    }

    #[test]
    fn test_confirm_case_insensitive() {
        let mut c = console("Y\n");
        assert_eq!(c.confirm("Continue?").unwrap(), Some(true));
    }

    #[test]
    fn test_ask_positive() {
        let mut c = console("abc\n0\n-3\n15\n");
        assert_eq!(c.ask_positive("> ").unwrap(), Some(15));

        let text = output(c);
        assert!(text.contains("Values must be positive"));
        assert!(text.contains("whole number"));
    }

    #[test]
    fn test_ask_non_empty() {
        let mut c = console("\n   \nGym\n");
        assert_eq!(c.ask_non_empty("> ").unwrap(), Some("Gym".to_string()));
    }

    #[test]
    fn test_draw_uses_crlf() {
        let mut c = console("");
        c.draw("one\ntwo").unwrap();
        let text = output(c);
        assert!(text.contains("one\r\ntwo\r\n"));
    }
}

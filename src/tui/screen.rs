//! Append-and-scroll terminal output.
//!
//! Nothing is redrawn in place: pages, prompts and messages are written after
//! whatever is already on screen. Raw mode disables output post-processing,
//! so every `\n` is written as `\r\n`.

use std::io::{self, Write};

use crossterm::cursor::MoveLeft;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::core::input::Echo;

const SELECT_PROMPT: &str = "Select: ";

pub struct Screen<W: Write> {
    out: W,
    at_line_start: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            at_line_start: true,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Write content, translating line endings for raw mode.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                queue!(self.out, Print("\r\n"))?;
                self.at_line_start = true;
            }
            if !line.is_empty() {
                queue!(self.out, Print(line))?;
                self.at_line_start = false;
            }
        }
        self.out.flush()
    }

    /// Start a fresh line unless already at one.
    pub fn end_line(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            self.write_text("\n")?;
        }
        Ok(())
    }

    /// Blank separator before a newly loaded page.
    pub fn page_break(&mut self) -> io::Result<()> {
        self.end_line()?;
        self.write_text("\n")
    }

    pub fn more_indicator(&mut self, percent_remaining: f64) -> io::Result<()> {
        self.end_line()?;
        self.write_text(&format!("--More ({percent_remaining:.1}% left)--\n"))
    }

    /// A status or error message on a line of its own.
    pub fn message(&mut self, message: &str) -> io::Result<()> {
        self.end_line()?;
        self.write_text(&format!("[{message}]\n"))
    }

    pub fn echo(&mut self, echo: Echo) -> io::Result<()> {
        match echo {
            Echo::Prompt(first) => {
                self.end_line()?;
                self.write_text(&format!("{SELECT_PROMPT}{first}"))
            }
            Echo::Digit(c) => self.write_text(c.encode_utf8(&mut [0u8; 4])),
            Echo::Erase => {
                queue!(self.out, MoveLeft(1), Clear(ClearType::UntilNewLine))?;
                self.out.flush()
            }
            Echo::EndLine => self.end_line(),
        }
    }
}

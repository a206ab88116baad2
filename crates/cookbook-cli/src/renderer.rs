//! Terminal rendering for the markdown produced by the core display types
//!
//! Rich output styles headers, bold labels and checklists with termimad;
//! plain output prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_style(line) {
                LineStyle::Header => println!("\x1b[34m{line}\x1b[0m"),
                LineStyle::Done => println!("\x1b[2m{line}\x1b[0m"),
                LineStyle::Inline => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineStyle {
    Header,
    /// A ticked checklist item
    Done,
    Inline,
}

fn line_style(line: &str) -> LineStyle {
    if line.starts_with('#') {
        LineStyle::Header
    } else if line.trim_start().starts_with("- [x]") {
        LineStyle::Done
    } else {
        LineStyle::Inline
    }
}

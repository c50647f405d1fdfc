//! Terminal rendering for calgrid types.
//!
//! Extension traits that draw the month grid and day details with owo_colors.

use calgrid_core::grid::{CellDescriptor, MAX_DOTS, MonthGrid};
use calgrid_core::{DayDetail, EventRecord};
use owo_colors::{OwoColorize, Style};

/// Width of one grid column: two digits, the dots, one space.
const CELL_WIDTH: usize = 2 + MAX_DOTS + 1;

const DOT: &str = "•";

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Parse `#rrggbb` (or `#rgb`) into RGB.
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

/// A dot in the event's color, plain when the color is not hex.
fn colored_dot(color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => DOT.truecolor(r, g, b).to_string(),
        None => DOT.to_string(),
    }
}

impl Render for CellDescriptor<'_> {
    fn render(&self) -> String {
        let mut style = Style::new();
        if !self.is_current_month {
            style = style.dimmed();
        }
        if self.is_today {
            style = style.bold().underline();
        }
        if self.is_selected {
            style = style.reversed();
        }

        let day = format!("{:>2}", self.day_of_month).style(style).to_string();
        let dots: String = self.dots().map(colored_dot).collect();
        let padding = " ".repeat(CELL_WIDTH - 2 - self.dots().count());

        format!("{day}{dots}{padding}")
    }
}

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let width = CELL_WIDTH * 7;
        let mut lines = Vec::new();

        lines.push(format!("{:^width$}", self.title()).bold().to_string());

        let header: String = self
            .weekday_labels()
            .iter()
            .map(|label| format!("{label:<CELL_WIDTH$}"))
            .collect();
        lines.push(header.dimmed().to_string());

        for row in self.rows() {
            let line: String = row.iter().map(|cell| cell.render()).collect();
            lines.push(line.trim_end().to_string());
        }

        let count: usize = self
            .cells
            .iter()
            .filter(|c| c.is_current_month)
            .map(|c| c.events.len())
            .sum();
        let footer = match count {
            0 => "No events this month".to_string(),
            1 => "1 event this month".to_string(),
            n => format!("{n} events this month"),
        };
        lines.push(String::new());
        lines.push(footer.dimmed().to_string());

        lines.join("\n")
    }
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {}  {}",
            colored_dot(&self.color),
            self.title.bold(),
            self.time_label().dimmed()
        );
        if let Some(description) = &self.description {
            line.push_str(&format!("\n    {}", description.dimmed()));
        }
        line
    }
}

impl Render for DayDetail<'_> {
    fn render(&self) -> String {
        let mut lines = vec![self.label.bold().to_string(), self.summary().dimmed().to_string()];

        if self.is_empty() {
            lines.push(format!("  {}", self.empty_message().dimmed()));
        } else {
            for event in self.events {
                lines.push(format!("  {}", event.render()));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("tomato"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }
}

use colored::Color;
use crossterm::style;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Yellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

/// Grid cells of hosts given by numeric address.
pub const NUMERIC_HOST: style::Color = style::Color::White;
/// Grid cells of hosts that need name resolution.
pub const DNS_HOST: style::Color = style::Color::Grey;

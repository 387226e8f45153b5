//! Live results grid.
//!
//! Every frame is a full redraw: the screen is cleared, the cursor is sent
//! home and all rows are written in one pass. Slots are laid out left to
//! right in index order; once a row of columns is full the next slots start
//! a new band below it. Hosts given by numeric address and hosts that need
//! name resolution are drawn in different colors.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use pingrid_core::render::FrameRenderer;
use pingrid_core::table::SlotView;
use unicode_width::UnicodeWidthChar;

use crate::terminal::colors;

/// Used when the output is not attached to a terminal.
pub const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub terminal_width: usize,
    pub column_count: usize,
}

impl DisplayConfig {
    pub fn new(terminal_width: usize, column_count: usize) -> Self {
        Self {
            terminal_width,
            column_count: column_count.max(1),
        }
    }

    /// Reads the current terminal width.
    pub fn detect(column_count: usize) -> Self {
        let width: usize = terminal::size()
            .map(|(cols, _rows)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self::new(width, column_count)
    }

    pub fn column_width(&self) -> usize {
        self.terminal_width / self.column_count
    }

    /// Text width of a cell.
    ///
    /// The separator space counts towards `column_width`, so a cell holds one
    /// character less than the column. A full row is then exactly
    /// `terminal_width` wide and never wraps.
    fn cell_width(&self) -> usize {
        self.column_width().saturating_sub(1)
    }
}

/// Lays the snapshot out as bands of `column_count` slots, one string per row.
pub fn layout<S: AsRef<str>>(snapshot: &[S], display: &DisplayConfig) -> Vec<String> {
    layout_bands(snapshot, display)
        .into_iter()
        .flatten()
        .map(|cells| cells.iter().map(|cell| format!("{cell} ")).collect())
        .collect()
}

/// Fitted cell text, indexed by band, then row, then column.
fn layout_bands<S: AsRef<str>>(snapshot: &[S], display: &DisplayConfig) -> Vec<Vec<Vec<String>>> {
    let cell_width: usize = display.cell_width();

    snapshot
        .chunks(display.column_count)
        .map(|band| {
            let columns: Vec<Vec<&str>> =
                band.iter().map(|text| text.as_ref().lines().collect()).collect();
            let row_count: usize = columns.iter().map(Vec::len).max().unwrap_or(0);

            (0..row_count)
                .map(|r| {
                    columns
                        .iter()
                        .map(|lines| fit(lines.get(r).copied().unwrap_or(""), cell_width))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Clips or pads `line` to exactly `width` terminal cells.
fn fit(line: &str, width: usize) -> String {
    let mut cell = String::with_capacity(width);
    let mut used: usize = 0;

    for c in line.chars() {
        let c: char = if c == '\t' { ' ' } else { c };
        // Control characters would move the cursor mid-frame.
        if c.is_control() {
            continue;
        }
        let w: usize = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        cell.push(c);
        used += w;
    }

    cell.extend(std::iter::repeat_n(' ', width - used));
    cell
}

enum WidthSource {
    Terminal,
    Fixed(usize),
}

pub struct GridRenderer<W: Write> {
    out: W,
    columns: usize,
    width: WidthSource,
    color: bool,
}

impl GridRenderer<Stdout> {
    pub fn stdout(columns: usize) -> Self {
        Self::new(io::stdout(), columns)
    }
}

impl<W: Write> GridRenderer<W> {
    /// Colors follow the same `NO_COLOR`/`CLICOLOR` rules as the log output.
    pub fn new(out: W, columns: usize) -> Self {
        Self {
            out,
            columns,
            width: WidthSource::Terminal,
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    /// Pins the width instead of querying the terminal on every frame.
    pub fn with_fixed_width(mut self, width: usize) -> Self {
        self.width = WidthSource::Fixed(width);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn display_config(&self) -> DisplayConfig {
        match self.width {
            WidthSource::Terminal => DisplayConfig::detect(self.columns),
            WidthSource::Fixed(width) => DisplayConfig::new(width, self.columns),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cell(&mut self, cell: &str, requires_dns: bool, heading: bool) -> io::Result<()> {
        if !self.color {
            return write!(self.out, "{cell} ");
        }

        let color = if requires_dns {
            colors::DNS_HOST
        } else {
            colors::NUMERIC_HOST
        };
        queue!(self.out, SetForegroundColor(color))?;
        if heading {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(cell), SetAttribute(Attribute::Reset), Print(' '))
    }
}

impl<W: Write> FrameRenderer for GridRenderer<W> {
    fn render(&mut self, frame: &[SlotView]) -> io::Result<()> {
        let display: DisplayConfig = self.display_config();
        let texts: Vec<&str> = frame.iter().map(|slot| slot.text.as_str()).collect();
        let slot_bands = frame.chunks(display.column_count);
        let bands = layout_bands(&texts, &display);

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for (idx, (band, slots)) in bands.iter().zip(slot_bands).enumerate() {
            if idx > 0 {
                writeln!(self.out)?;
            }
            for (r, row) in band.iter().enumerate() {
                for (cell, slot) in row.iter().zip(slots) {
                    self.write_cell(cell, slot.requires_dns, r == 0)?;
                }
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }
}

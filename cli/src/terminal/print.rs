use std::time::Duration;

use colored::*;
use pingrid_core::table::{ResultTable, SlotStatus};
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    println!("{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

/// Centers `plain` on the separator width, printing `styled` in its place.
pub fn centerln(plain: &str, styled: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(plain)) / 2);
    print(&format!("{}{}", space, styled));
}

pub fn summary(table: &ResultTable, total_time: Duration) {
    let done: usize = table.iter().filter(|slot| slot.status == SlotStatus::Done).count();
    let seconds: String = format!("{:.2}s", total_time.as_secs_f64());
    let unit: &str = if table.len() == 1 { "host" } else { "hosts" };

    let plain: String = format!("{done}/{} {unit} probed in {seconds}", table.len());
    let styled: String = format!(
        "{}{}{} {} {}",
        done.to_string().color(colors::PRIMARY).bold(),
        "/".color(colors::SEPARATOR),
        table.len().to_string().color(colors::TEXT_DEFAULT),
        format!("{unit} probed in").color(colors::TEXT_DEFAULT),
        seconds.color(colors::ACCENT).bold()
    );

    fat_separator();
    centerln(&plain, &styled);
}

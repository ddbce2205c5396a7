//! Timeline presentation: the flat print and the interactive pager.
//!
//! Two modes, each with its own documented sort direction:
//! - [`print_flat`] renders everything oldest-first in one pass, for
//!   piped output and `--plain`.
//! - [`run`] pages through the timeline newest-first, sized to the
//!   terminal, advancing on Enter and quitting on `q` or end of input.

use anyhow::{Context, Result};
use crossterm::terminal;
use std::io::{BufRead, Write};

use crate::theme::Theme;
use crate::timeline::{next_page, Event, Timeline};

/// Lines reserved for the header row and footer chrome around each page.
const CHROME_LINES: usize = 5;
/// Column width for the timestamp field.
const TIMESTAMP_WIDTH: usize = 21;
/// Column width for the source label field.
const SOURCE_WIDTH: usize = 14;
/// The interactive variant truncates messages to this width.
const MESSAGE_WIDTH: usize = 72;

/// Events per page for a given terminal height, never less than one row.
pub fn page_size(terminal_height: u16) -> usize {
    (terminal_height as usize)
        .saturating_sub(CHROME_LINES)
        .max(1)
}

/// Truncates text to a maximum width in characters, appending "..." when
/// anything was cut.
fn truncate_text(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        text.to_string()
    } else if max_width <= 3 {
        "...".to_string()
    } else {
        let truncated: String = text.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    }
}

/// Formats one event as an aligned row. Padding happens before painting so
/// escape sequences don't distort the column widths.
fn format_row(event: &Event, theme: &Theme) -> String {
    let timestamp = event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
    let source = truncate_text(&event.source, SOURCE_WIDTH);
    let message = truncate_text(&event.message, MESSAGE_WIDTH);
    format!(
        "{}  {}  {}",
        theme.paint(
            &format!("{timestamp:<width$}", width = TIMESTAMP_WIDTH),
            theme.timestamp
        ),
        theme.paint(&format!("{source:<width$}", width = SOURCE_WIDTH), theme.source),
        theme.paint(&message, theme.timestamp),
    )
}

/// Renders one page: header row, the page's events, and a footer with the
/// page position and input hints.
fn render_page(
    out: &mut impl Write,
    events: &[Event],
    current_page: usize,
    total_pages: usize,
    theme: &Theme,
) -> std::io::Result<()> {
    writeln!(out)?;

    let header = format!(
        "{:<tw$}  {:<sw$}  {}",
        "TIME",
        "SOURCE",
        "MESSAGE",
        tw = TIMESTAMP_WIDTH,
        sw = SOURCE_WIDTH
    );
    writeln!(out, "{}", theme.paint_bold(&header, theme.header))?;

    for event in events {
        writeln!(out, "{}", format_row(event, theme))?;
    }

    let footer = format!(
        "Page {}/{} (Enter: next, q: quit)",
        current_page + 1,
        total_pages
    );
    writeln!(out, "{}", theme.paint(&footer, theme.muted))?;

    Ok(())
}

/// Presents the timeline interactively, newest events first.
///
/// The page size adapts to the terminal height with [`CHROME_LINES`] rows
/// reserved. The loop blocks on one line of stdin between renders: an
/// empty line advances (a no-op on the last page), `q` or end of input
/// returns, and anything else redraws the current page.
///
/// # Errors
/// This function will return an error if the terminal size cannot be
/// determined or writing to stdout fails.
pub fn run(timeline: &mut Timeline, theme: &Theme) -> Result<()> {
    timeline.sort_descending();

    let mut stdout = std::io::stdout();
    if timeline.is_empty() {
        writeln!(stdout, "{}", theme.paint("No events found", theme.muted))?;
        return Ok(());
    }

    let (_, height) = terminal::size().context("failed to get terminal size")?;
    let page_size = page_size(height);
    let total_pages = Timeline::total_pages(timeline.len(), page_size);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    let mut current_page = 0;
    loop {
        render_page(
            &mut stdout,
            timeline.page(current_page, page_size),
            current_page,
            total_pages,
            theme,
        )?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => Some(line.context("reading pager input")?),
            None => None,
        };
        match next_page(line.as_deref(), current_page, total_pages) {
            Some(page) => current_page = page,
            None => return Ok(()),
        }
    }
}

/// Prints the whole timeline oldest-first, one line per event, with no
/// paging and no message truncation.
pub fn print_flat(timeline: &mut Timeline, theme: &Theme, out: &mut impl Write) -> Result<()> {
    timeline.sort_ascending();

    for event in timeline.events() {
        let timestamp = event
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        writeln!(
            out,
            "[{}] {} {}",
            theme.paint(&timestamp, theme.timestamp),
            theme.paint(
                &format!("{:<width$}", event.source, width = SOURCE_WIDTH),
                theme.source
            ),
            event.message
        )?;
    }

    Ok(())
}

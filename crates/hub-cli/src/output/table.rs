//! Plain aligned tables for `--format table`.

const MIN_COLUMN: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Cell colour for well-known status words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Good,
    Waiting,
    Bad,
}

impl Tone {
    fn of(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "true" | "authenticated" | "render" | "deleted" | "applied" => Some(Self::Good),
            "pending" | "cancelled" | "superseded" | "redirect" => Some(Self::Waiting),
            "false" | "unauthenticated" | "failed" | "error" => Some(Self::Bad),
            _ => None,
        }
    }

    const fn ansi(self) -> &'static str {
        match self {
            Self::Good => "32",
            Self::Waiting => "33",
            Self::Bad => "31",
        }
    }
}

/// Render an aligned table. Numeric cells are right-aligned; columns shrink
/// (widest first) until the table fits `max_width`.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let text = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&text, *width, is_numeric(&text));
                match Tone::of(&text) {
                    Some(tone) if options.color => paint(&padded, &text, tone),
                    _ => padded,
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(GAP));
    }
    lines.join("\n")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            return;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

/// Colour the text inside an already padded cell, leaving padding plain.
fn paint(padded: &str, text: &str, tone: Tone) -> String {
    padded.replacen(text, &format!("\u{1b}[{}m{text}\u{1b}[0m", tone.ansi()), 1)
}

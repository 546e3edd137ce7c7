const MIN_WIDTH: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table. Numeric cells are right-aligned; with `color`
/// set, severity and assessment words are highlighted.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let text = clip(row.get(index).map_or("-", String::as_str), *width);
                let cell = pad(&text, *width, looks_numeric(&text));
                if options.color {
                    colorize_status(&cell)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line);
    }

    lines.join("\n")
}

/// Widths in characters, not bytes: units such as `Ω` are multibyte.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_WIDTH])
                .max()
                .unwrap_or(MIN_WIDTH)
        })
        .collect()
}

/// Narrow the widest column one character at a time until the table fits,
/// never below its header or `MIN_WIDTH`.
fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);

        match widest {
            Some(index) => widths[index] -= 1,
            None => break,
        }
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

/// Green for passing verdicts, yellow for cautions, red for failures.
fn colorize_status(cell: &str) -> String {
    let code = match cell.trim().to_ascii_lowercase().as_str() {
        "info" | "true" | "satisfactory" | "completed" => Some("32"),
        "warning" | "pending" | "c3" => Some("33"),
        "error" | "false" | "unsatisfactory" | "failed" | "c1" | "c2" | "fi" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{cell}\u{1b}[0m"),
        None => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{TableOptions, colorize_status, render_entity_table};

    fn plain(max_width: Option<usize>) -> TableOptions {
        TableOptions {
            max_width,
            color: false,
        }
    }

    #[test]
    fn multibyte_units_do_not_skew_columns() {
        let rows = vec![
            vec!["1.2Ω".to_string(), "warning".to_string()],
            vec!["0.9".to_string(), "info".to_string()],
        ];
        let table = render_entity_table(&["value", "severity"], &rows, plain(None));
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn numbers_are_right_aligned() {
        let rows = vec![vec!["B6".to_string(), "7.28".to_string()]];
        let table = render_entity_table(&["device", "max_zs"], &rows, plain(None));
        let row = table.lines().nth(2).expect("data row");
        assert_eq!(row, "B6        7.28");
    }

    #[test]
    fn long_cells_are_clipped_to_fit() {
        let rows = vec![vec![
            "Zs of 1.5Ω exceeds the maximum of 1.37Ω for B32".to_string(),
        ]];
        let table = render_entity_table(&["message"], &rows, plain(Some(20)));
        let row = table.lines().nth(2).expect("data row");
        assert_eq!(row.chars().count(), 20);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn severities_are_colored() {
        let red = colorize_status("error  ");
        assert!(red.starts_with("\u{1b}[31m"));
        assert!(red.contains("error  "));
        assert_eq!(colorize_status("B32"), "B32");
        assert!(colorize_status("Unsatisfactory").contains("[31m"));
        assert!(colorize_status("info").starts_with("\u{1b}[32m"));
    }
}

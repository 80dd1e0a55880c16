#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table for string rows.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN)
        })
        .collect::<Vec<_>>();
    shrink_to_fit(&mut widths, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.trim_end().chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, is_numeric(&cell));
                if options.color {
                    colorize(&cell, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Narrow the widest columns until the row fits `max_width`.
fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width);
        match widest {
            Some(width) => *width -= 1,
            None => break,
        }
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// Color known status words; the padding stays outside the escape codes.
fn colorize(cell: &str, padded: String) -> String {
    let code = match cell.to_lowercase().as_str() {
        "true" | "verified" | "authenticated" | "completada" | "administrador" => "32",
        "unverified" | "initializing" | "en progreso" | "pendiente" => "33",
        "false" | "unauthenticated" | "cancelada" | "missing" => "31",
        _ => return padded,
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_columns_and_right_aligns_numbers() {
        let rows = vec![
            vec!["l1".to_string(), "Docencia".to_string(), "12".to_string()],
            vec!["l22".to_string(), "Investigación".to_string(), "6".to_string()],
        ];
        let table = render_table(&["id", "nombre", "duracion"], &rows, PLAIN);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "id    nombre         duracion");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "l1    Docencia             12");
        assert_eq!(lines[3], "l22   Investigación         6");
    }

    #[test]
    fn shrinks_wide_columns_with_ellipsis() {
        let rows = vec![vec!["x".to_string(), "a".repeat(60)]];
        let table = render_table(
            &["id", "descripcion"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        let last = table.lines().last().unwrap();
        assert!(last.ends_with('…'));
        assert!(last.chars().count() <= 40);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(&["id", "area"], &[vec!["p1".to_string()]], PLAIN);
        assert!(table.lines().last().unwrap().ends_with('-'));
    }

    #[test]
    fn colors_status_words_only_when_enabled() {
        let rows = vec![vec!["verified".to_string()]];
        let colored = render_table(
            &["trust"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(colored.contains("\u{1b}[32mverified\u{1b}[0m"));
        assert!(!render_table(&["trust"], &rows, PLAIN).contains('\u{1b}'));
    }
}

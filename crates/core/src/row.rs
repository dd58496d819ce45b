//! Input-row parsing and output-row rendering.
//!
//! One batch row has the shape `serial,label,<url list>`. The outer split
//! takes the first two commas only; everything after them is the URL-list
//! field, which is further split on `,` or `;` (both are accepted so that
//! `a.png,b.png` and `a.png;b.png` parse the same way).

use crate::error::CoreError;

/// Characters accepted as separators inside the URL-list field.
const URL_SEPARATORS: [char; 2] = [',', ';'];

/// One parsed input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub serial: String,
    pub label: String,
    /// Source image references, trimmed, in original order. Never empty.
    pub image_urls: Vec<String>,
}

/// One fully processed output row.
///
/// `artifact_paths` is positionally aligned with `source_urls`: the
/// artifact at index `i` was produced from the URL at index `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub serial: String,
    pub label: String,
    pub source_urls: Vec<String>,
    pub artifact_paths: Vec<String>,
}

/// Parse one raw batch row.
///
/// # Examples
///
/// ```
/// use imgbatch_core::row::parse_row;
///
/// let row = parse_row("S1,Widget,http://a/1.png, http://a/2.png").unwrap();
/// assert_eq!(row.serial, "S1");
/// assert_eq!(row.label, "Widget");
/// assert_eq!(row.image_urls, vec!["http://a/1.png", "http://a/2.png"]);
/// ```
///
/// Fails with [`CoreError::RowFormat`] when fewer than three fields are
/// present or the URL-list field is empty after trimming.
pub fn parse_row(raw: &str) -> Result<InputRow, CoreError> {
    let mut fields = raw.splitn(3, ',');

    let serial = fields
        .next()
        .ok_or_else(|| CoreError::RowFormat(format!("missing serial field: {raw:?}")))?;
    let label = fields
        .next()
        .ok_or_else(|| CoreError::RowFormat(format!("missing label field: {raw:?}")))?;
    let url_field = fields
        .next()
        .ok_or_else(|| CoreError::RowFormat(format!("missing image URL field: {raw:?}")))?;

    let image_urls: Vec<String> = url_field
        .split(URL_SEPARATORS)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if image_urls.is_empty() {
        return Err(CoreError::RowFormat(format!(
            "no image URLs in row: {raw:?}"
        )));
    }

    Ok(InputRow {
        serial: serial.to_string(),
        label: label.to_string(),
        image_urls,
    })
}

impl OutputRow {
    /// Render the row in the output CSV format: serial, label, the echoed
    /// source URLs joined by commas, then the artifact paths joined by
    /// commas.
    pub fn render(&self) -> String {
        format!(
            "{},{},{},{}",
            self.serial,
            self.label,
            self.source_urls.join(","),
            self.artifact_paths.join(","),
        )
    }
}

/// Join rendered output rows into the final output table, one row per line.
pub fn render_table(rows: &[OutputRow]) -> String {
    rows.iter()
        .map(OutputRow::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn single_url() {
        let row = parse_row("S1,Widget,http://a/1.png").unwrap();
        assert_eq!(row.serial, "S1");
        assert_eq!(row.label, "Widget");
        assert_eq!(row.image_urls, vec!["http://a/1.png"]);
    }

    #[test]
    fn comma_separated_urls_stay_in_url_field() {
        // Everything past the second comma belongs to the URL field.
        let row = parse_row("S1,Widget,http://a/1.png,http://a/2.png").unwrap();
        assert_eq!(row.image_urls, vec!["http://a/1.png", "http://a/2.png"]);
    }

    #[test]
    fn semicolon_separated_urls() {
        let row = parse_row("S1,Widget,http://a/1.png;http://a/2.png").unwrap();
        assert_eq!(row.image_urls, vec!["http://a/1.png", "http://a/2.png"]);
    }

    #[test]
    fn urls_are_trimmed() {
        let row = parse_row("S1,Widget, http://a/1.png ;  http://a/2.png").unwrap();
        assert_eq!(row.image_urls, vec!["http://a/1.png", "http://a/2.png"]);
    }

    #[test]
    fn empty_sub_entries_are_dropped() {
        let row = parse_row("S1,Widget,http://a/1.png,,http://a/2.png,").unwrap();
        assert_eq!(row.image_urls, vec!["http://a/1.png", "http://a/2.png"]);
    }

    #[test]
    fn url_order_is_preserved() {
        let row = parse_row("S1,W,http://z/9.png,http://a/1.png,http://m/5.png").unwrap();
        assert_eq!(
            row.image_urls,
            vec!["http://z/9.png", "http://a/1.png", "http://m/5.png"]
        );
    }

    #[test]
    fn missing_url_field_is_row_format_error() {
        assert_matches!(parse_row("S1,Widget"), Err(CoreError::RowFormat(_)));
    }

    #[test]
    fn missing_label_is_row_format_error() {
        assert_matches!(parse_row("S1"), Err(CoreError::RowFormat(_)));
    }

    #[test]
    fn blank_url_field_is_row_format_error() {
        assert_matches!(parse_row("S1,Widget,   "), Err(CoreError::RowFormat(_)));
    }

    #[test]
    fn separators_only_url_field_is_row_format_error() {
        assert_matches!(parse_row("S1,Widget,;,;"), Err(CoreError::RowFormat(_)));
    }

    #[test]
    fn render_aligns_sources_and_artifacts() {
        let row = OutputRow {
            serial: "S1".into(),
            label: "Widget".into(),
            source_urls: vec!["http://a/1.png".into(), "http://a/2.png".into()],
            artifact_paths: vec!["out/w_1.jpg".into(), "out/w_2.jpg".into()],
        };
        assert_eq!(
            row.render(),
            "S1,Widget,http://a/1.png,http://a/2.png,out/w_1.jpg,out/w_2.jpg"
        );
    }

    #[test]
    fn render_table_joins_rows_with_newlines() {
        let rows = vec![
            OutputRow {
                serial: "S1".into(),
                label: "A".into(),
                source_urls: vec!["u1".into()],
                artifact_paths: vec!["p1".into()],
            },
            OutputRow {
                serial: "S2".into(),
                label: "B".into(),
                source_urls: vec!["u2".into()],
                artifact_paths: vec!["p2".into()],
            },
        ];
        assert_eq!(render_table(&rows), "S1,A,u1,p1\nS2,B,u2,p2");
    }

    #[test]
    fn render_table_empty() {
        assert_eq!(render_table(&[]), "");
    }
}

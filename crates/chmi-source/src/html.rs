//! Parsing of the precipitation pages.
//!
//! The pages are server-rendered HTML with a stable shape: a "Celkový počet
//! stránek: N" element with the page count, a `Datum d.m.yyyy` header cell
//! with the measurement date, and inside `div.tsrz` a table whose header
//! names a `Stanice` column followed by hour columns `1`..`24`. Plain
//! string scanning is enough for this; anything that does not match the
//! expected shape fails the whole page.

use chrono::NaiveDate;

use precip_common::{parse_date, PrecipError, StationDayRow, HOURS_PER_DAY};

/// Extract the total number of subpages from the first page.
pub fn extract_page_count(html: &str) -> Result<u32, PrecipError> {
    let pos = html.find("Celkov").ok_or_else(|| {
        PrecipError::SourceParseError("page count marker 'Celkov' not found".to_string())
    })?;
    let rest = &html[pos..];
    let text = &rest[..rest.find('<').unwrap_or(rest.len())];
    let trimmed = text.trim_end();

    let digits = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(PrecipError::SourceParseError(format!(
            "no page count in '{}'",
            trimmed
        )));
    }

    trimmed[trimmed.len() - digits..]
        .parse()
        .map_err(|_| PrecipError::SourceParseError(format!("bad page count in '{}'", trimmed)))
}

/// Extract the measurement date from the `Datum …` header cell.
pub fn extract_measurement_date(html: &str) -> Result<NaiveDate, PrecipError> {
    let pos = html.find("Datum").ok_or_else(|| {
        PrecipError::SourceParseError("date marker 'Datum' not found".to_string())
    })?;
    let rest = &html[pos..];
    let text = &rest[..rest.find('<').unwrap_or(rest.len())];
    let trimmed = text.trim_end();

    // the date is the trailing d.m.yyyy run of the cell text
    let tail = trimmed
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .count();
    if tail == 0 {
        return Err(PrecipError::SourceParseError(format!(
            "no date in '{}'",
            trimmed
        )));
    }

    parse_date(&trimmed[trimmed.len() - tail..])
}

/// Parse the station rows of one page.
///
/// The header row decides which columns to read: `Stanice` plus the hour
/// columns `1`..`24`; any other columns the page carries are ignored.
pub fn parse_rows(html: &str) -> Result<Vec<StationDayRow>, PrecipError> {
    let table = extract_table(html)?;

    let mut chunks = table.split("<tr");
    chunks.next(); // everything before the first row

    let mut columns: Option<ColumnMap> = None;
    let mut rows = Vec::new();

    for chunk in chunks {
        let row_html = &chunk[..chunk.find("</tr").unwrap_or(chunk.len())];
        let cells = extract_cells(row_html);
        if cells.is_empty() {
            continue;
        }

        match &columns {
            None => columns = Some(ColumnMap::from_header(&cells)?),
            Some(map) => {
                if let Some(row) = map.read_row(&cells)? {
                    rows.push(row);
                }
            }
        }
    }

    if columns.is_none() {
        return Err(PrecipError::SourceParseError(
            "precipitation table has no header row".to_string(),
        ));
    }

    Ok(rows)
}

/// Mapping from header positions to the columns we keep.
struct ColumnMap {
    station: usize,
    /// header position of hour column `h+1`, if present
    hours: [Option<usize>; HOURS_PER_DAY],
}

impl ColumnMap {
    fn from_header(cells: &[String]) -> Result<Self, PrecipError> {
        let station = cells.iter().position(|c| c == "Stanice").ok_or_else(|| {
            PrecipError::SourceParseError("header has no 'Stanice' column".to_string())
        })?;

        let mut hours = [None; HOURS_PER_DAY];
        for (idx, cell) in cells.iter().enumerate() {
            if let Ok(hour) = cell.parse::<usize>() {
                if (1..=HOURS_PER_DAY).contains(&hour) {
                    hours[hour - 1] = Some(idx);
                }
            }
        }

        if hours.iter().all(|h| h.is_none()) {
            return Err(PrecipError::SourceParseError(
                "header has no hour columns".to_string(),
            ));
        }

        Ok(Self { station, hours })
    }

    /// Read one data row; spacer rows without a station name yield `None`.
    fn read_row(&self, cells: &[String]) -> Result<Option<StationDayRow>, PrecipError> {
        let Some(station) = cells.get(self.station).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        let mut hourly = vec![None; HOURS_PER_DAY];
        for (hour, column) in self.hours.iter().enumerate() {
            let Some(column) = column else { continue };
            let Some(cell) = cells.get(*column) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            let value = cell.replace(',', ".").parse::<f64>().map_err(|_| {
                PrecipError::SourceParseError(format!(
                    "bad value '{}' for station {}",
                    cell, station
                ))
            })?;
            hourly[hour] = Some(value);
        }

        Ok(Some(StationDayRow::new(station.clone(), hourly)))
    }
}

/// Slice out the precipitation table inside `div.tsrz`.
fn extract_table(html: &str) -> Result<&str, PrecipError> {
    let div = html.find("tsrz").ok_or_else(|| {
        PrecipError::SourceParseError("container 'tsrz' not found".to_string())
    })?;
    let rest = &html[div..];

    let start = rest.find("<table").ok_or_else(|| {
        PrecipError::SourceParseError("no table inside 'tsrz' container".to_string())
    })?;
    let table = &rest[start..];
    let end = table.find("</table").unwrap_or(table.len());

    Ok(&table[..end])
}

/// Extract the text of each `<td>`/`<th>` cell of one row.
fn extract_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut rest = row;

    while let Some(open) = find_cell_open(rest) {
        let after = &rest[open..];
        let Some(gt) = after.find('>') else { break };
        let content = &after[gt + 1..];

        let end = content
            .find("</td")
            .into_iter()
            .chain(content.find("</th"))
            .chain(find_cell_open(content))
            .min()
            .unwrap_or(content.len());

        cells.push(strip_tags(&content[..end]));
        rest = &content[end..];
    }

    cells
}

fn find_cell_open(s: &str) -> Option<usize> {
    match (s.find("<td"), s.find("<th")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Drop markup, decode the entities the pages use, collapse whitespace.
fn strip_tags(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
<html><body>
<div>Celkový počet stránek: 3</div>
<div class="tsrz">
<table>
<tr><th>Stanice</th><th>Tok</th><th>1</th><th>2</th><th>3</th><th>24</th></tr>
<tr><td>Praha Ruzyne</td><td>Vltava</td><td>0.5</td><td></td><td>1,2</td><td>0.0</td></tr>
<tr><td><b>Brno - Turany</b></td><td></td><td></td><td></td><td></td><td></td></tr>
<tr><td></td><td></td><td></td><td></td><td></td><td></td></tr>
</table>
</div>
<table><tr><th>Datum 2.10.2023</th></tr></table>
</body></html>
"#;

    #[test]
    fn test_extract_page_count() {
        assert_eq!(extract_page_count(SAMPLE_PAGE).unwrap(), 3);
    }

    #[test]
    fn test_extract_page_count_missing() {
        assert!(extract_page_count("<html></html>").is_err());
    }

    #[test]
    fn test_extract_measurement_date() {
        let date = extract_measurement_date(SAMPLE_PAGE).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 10, 2).unwrap());
    }

    #[test]
    fn test_parse_rows_keeps_hour_columns_only() {
        let rows = parse_rows(SAMPLE_PAGE).unwrap();
        assert_eq!(rows.len(), 2);

        let praha = &rows[0];
        assert_eq!(praha.station, "Praha Ruzyne");
        assert_eq!(praha.hourly[0], Some(0.5));
        assert_eq!(praha.hourly[1], None);
        // decimal comma and markup inside cells are handled
        assert_eq!(praha.hourly[2], Some(1.2));
        assert_eq!(praha.hourly[23], Some(0.0));

        let brno = &rows[1];
        assert_eq!(brno.station, "Brno - Turany");
        assert_eq!(brno.daily_total(), None);
    }

    #[test]
    fn test_parse_rows_without_header_fails() {
        let html = r#"<div class="tsrz"><table></table></div>"#;
        assert!(parse_rows(html).is_err());
    }

    #[test]
    fn test_bad_cell_value_fails_the_page() {
        let html = r#"
<div class="tsrz"><table>
<tr><th>Stanice</th><th>1</th></tr>
<tr><td>Praha</td><td>n/a</td></tr>
</table></div>
"#;
        assert!(parse_rows(html).is_err());
    }
}

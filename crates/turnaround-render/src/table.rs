//! HTML task table renderer
//!
//! Emits a self-contained fragment: a scoped `<style>` block and a
//! `div.table-wrap` holding the table. Delay-flag columns are not shown;
//! they colour the matching visible column instead.

use std::fmt::Write;
use turnaround_core::{ColumnRole, Palette, RenderError, TableRenderer, WideTable};

use crate::contrast::text_color_for;
use crate::html_escape;

/// Default minimum column width in pixels
pub const DEFAULT_WIDTH: u32 = 140;

/// Minimum width of a column in pixels
pub fn column_width(role: &ColumnRole) -> u32 {
    match role {
        ColumnRole::Aircraft => 160,
        _ => DEFAULT_WIDTH,
    }
}

const TABLE_CSS: &str = r#"<style>
.table-wrap{ width:100%; overflow-x:auto; -webkit-overflow-scrolling:touch; border-radius:12px; box-shadow:0 2px 10px rgba(0,0,0,.06); }
.table-wrap table{ width:100%; table-layout:fixed; border-collapse:separate; border-spacing:0; }
.table-wrap thead th{ position:sticky; top:0; z-index:1; }
.table-wrap th, .table-wrap td{ word-break:break-word; white-space:normal; text-align:center; vertical-align:middle; padding:6px 8px; }
@media (max-width: 768px){ .table-wrap table{ font-size: 12.5px; } }
</style>"#;

/// Resolved colours for one cell
struct CellStyle<'a> {
    background: &'a str,
    foreground: &'static str,
    bold: bool,
}

/// HTML table renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlTableRenderer {
    pub palette: Palette,
    /// Emit the scoped `<style>` block before the table
    pub include_styles: bool,
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            include_styles: true,
        }
    }
}

impl HtmlTableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom palette
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Toggle the scoped style block
    pub fn include_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Row stripe for a zero-based row index
    fn row_background(&self, row: usize) -> &str {
        if row % 2 == 0 {
            &self.palette.row_even
        } else {
            &self.palette.row_odd
        }
    }

    fn cell_style<'a>(&'a self, role: &ColumnRole, delayed: bool, stripe: &'a str) -> CellStyle<'a> {
        let (background, bold) = if delayed {
            (self.palette.delay.as_str(), true)
        } else {
            match role {
                ColumnRole::TimeOfDeparture => (self.palette.departure.as_str(), true),
                ColumnRole::TimeOfArrival => (self.palette.arrival_time.as_str(), true),
                _ => (stripe, false),
            }
        };
        CellStyle {
            background,
            foreground: text_color_for(background),
            bold,
        }
    }

    fn write_table(&self, table: &WideTable, out: &mut String) -> std::fmt::Result {
        // (column index, delay column index) for every shown column
        let visible: Vec<(usize, Option<usize>)> = table
            .visible_columns()
            .map(|(idx, col)| (idx, table.delay_column_for(&col.name)))
            .collect();

        out.push_str("<div class=\"table-wrap\">\n<table>\n<colgroup>");
        for &(idx, _) in &visible {
            write!(
                out,
                "<col style=\"min-width:{}px;\">",
                column_width(&table.columns[idx].role)
            )?;
        }
        out.push_str("</colgroup>\n<thead><tr>");
        for &(idx, _) in &visible {
            write!(
                out,
                "<th style=\"background:{bg}; color:{fg};\">{}</th>",
                html_escape(&table.columns[idx].name),
                bg = self.palette.navy,
                fg = self.palette.navy_text,
            )?;
        }
        out.push_str("</tr></thead>\n<tbody>\n");

        for (row_idx, row) in table.rows.iter().enumerate() {
            let stripe = self.row_background(row_idx);
            out.push_str("<tr>");
            for &(idx, delay_idx) in &visible {
                let delayed = delay_idx
                    .and_then(|d| row.get(d))
                    .is_some_and(|cell| cell.is_flagged());
                let style = self.cell_style(&table.columns[idx].role, delayed, stripe);
                let text = row.get(idx).map(ToString::to_string).unwrap_or_default();
                write!(
                    out,
                    "<td style=\"background:{}; color:{}; font-weight:{};\">{}</td>",
                    style.background,
                    style.foreground,
                    if style.bold { 600 } else { 400 },
                    html_escape(&text)
                )?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n</div>\n");
        Ok(())
    }
}

impl TableRenderer for HtmlTableRenderer {
    type Output = String;

    fn render(&self, table: &WideTable) -> Result<String, RenderError> {
        if table.is_empty() {
            return Err(RenderError::NoData);
        }
        if let Some(bad) = table.rows.iter().position(|r| r.len() != table.columns.len()) {
            return Err(RenderError::InvalidData(format!(
                "row {bad} does not match the {} table columns",
                table.columns.len()
            )));
        }

        let mut out = String::new();
        if self.include_styles {
            out.push_str(TABLE_CSS);
            out.push('\n');
        }
        self.write_table(table, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnaround_core::{Cell, Column, TaskPhase, View};

    fn table() -> WideTable {
        WideTable {
            view: View::All,
            columns: vec![
                Column::aircraft(),
                Column::flight(),
                Column::time_of_arrival(),
                Column::duration("Refueling"),
                Column::time_of_departure(),
                Column::delay("Refueling", None),
            ],
            rows: vec![
                vec![
                    Cell::Text("A1000".into()),
                    Cell::Text("TA101".into()),
                    Cell::Text("07:45".into()),
                    Cell::Text("07:50:00 - 08:02:00".into()),
                    Cell::Text("09:30".into()),
                    Cell::Flag(true),
                ],
                vec![
                    Cell::Text("B2000".into()),
                    Cell::Text("<KL&7>".into()),
                    Cell::Text("08:10".into()),
                    Cell::Text(String::new()),
                    Cell::Text("10:00".into()),
                    Cell::Flag(false),
                ],
            ],
        }
    }

    #[test]
    fn delay_columns_are_hidden() {
        let html = HtmlTableRenderer::new().render(&table()).unwrap();
        assert!(!html.contains("Refueling_delay"));
        assert_eq!(html.matches("<th ").count(), 5);
        assert_eq!(html.matches("<col ").count(), 5);
        assert!(html.contains("<col style=\"min-width:160px;\">"));
    }

    #[test]
    fn delayed_cell_is_red_with_white_text() {
        let html = HtmlTableRenderer::new().render(&table()).unwrap();
        assert!(html.contains(
            "<td style=\"background:#DC2626; color:#ffffff; font-weight:600;\">07:50:00 - 08:02:00</td>"
        ));
    }

    #[test]
    fn schedule_columns_are_tinted() {
        let html = HtmlTableRenderer::new().render(&table()).unwrap();
        assert!(html.contains(
            "<td style=\"background:#DCFCE7; color:#0f172a; font-weight:600;\">09:30</td>"
        ));
        assert!(html.contains(
            "<td style=\"background:#FEE2E2; color:#0f172a; font-weight:600;\">08:10</td>"
        ));
    }

    #[test]
    fn rows_alternate_backgrounds() {
        let html = HtmlTableRenderer::new().render(&table()).unwrap();
        assert!(html.contains(
            "<td style=\"background:#F1F5F9; color:#0f172a; font-weight:400;\">A1000</td>"
        ));
        assert!(html.contains(
            "<td style=\"background:#FFFFFF; color:#0f172a; font-weight:400;\">B2000</td>"
        ));
    }

    #[test]
    fn text_is_escaped() {
        let html = HtmlTableRenderer::new().render(&table()).unwrap();
        assert!(html.contains("&lt;KL&amp;7&gt;"));
        assert!(!html.contains("<KL&7>"));
    }

    #[test]
    fn prefixed_delay_columns_colour_their_task() {
        let table = WideTable {
            view: View::Departure,
            columns: vec![
                Column::aircraft(),
                Column::duration("Cabin cleaning"),
                Column::delay("Cabin cleaning", Some(TaskPhase::Departure)),
            ],
            rows: vec![vec![
                Cell::Text("C3000".into()),
                Cell::Text("10:00:00 - 10:20:00".into()),
                Cell::Flag(true),
            ]],
        };
        let html = HtmlTableRenderer::new().render(&table).unwrap();
        assert!(html.contains("background:#DC2626; color:#ffffff; font-weight:600;\">10:00:00 - 10:20:00"));
    }

    #[test]
    fn custom_palette_drives_text_colour() {
        let palette = Palette {
            row_even: "#111111".into(),
            ..Palette::default()
        };
        let html = HtmlTableRenderer::new().palette(palette).render(&table()).unwrap();
        assert!(html.contains("background:#111111; color:#ffffff; font-weight:400;\">A1000"));
    }

    #[test]
    fn styles_can_be_omitted() {
        let html = HtmlTableRenderer::new()
            .include_styles(false)
            .render(&table())
            .unwrap();
        assert!(html.starts_with("<div class=\"table-wrap\">"));
    }

    #[test]
    fn empty_table_is_no_data() {
        let err = HtmlTableRenderer::new()
            .render(&WideTable::empty(View::All))
            .unwrap_err();
        assert!(matches!(err, RenderError::NoData));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut t = table();
        t.rows[1].pop();
        let err = HtmlTableRenderer::new().render(&t).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));
    }
}

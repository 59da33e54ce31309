use egui::{Layout, TextStyle, Ui};
use egui_extras::{Column, TableBuilder, TableRow};

/// Result grid shown in the central panel.
///
/// Always renderable: a fresh instance shows a single placeholder cell,
/// and every later query outcome replaces the whole grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    /// Header, one entry per column.
    pub columns: Vec<String>,
    /// Cell text in row-major order, already stringified by the engine.
    pub rows: Vec<Vec<String>>,
}

impl Default for ResultTable {
    fn default() -> Self {
        ResultTable {
            columns: vec!["Column".to_string()],
            rows: vec![vec!["No data".to_string()]],
        }
    }
}

impl ResultTable {
    /// Builds the grid for a fetched result set.
    ///
    /// The header always comes from the statement, so a query matching
    /// zero rows keeps its real header over one placeholder row.
    pub fn from_select(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = if rows.is_empty() {
            vec![vec!["No results".to_string()]]
        } else {
            rows
        };

        ResultTable { columns, rows }
    }

    /// Renders the grid as a striped `egui` table.
    ///
    /// Columns start evenly spread over the available width and stay
    /// user-resizable down to a readable minimum.
    pub fn render_table(&self, ui: &mut Ui) {
        // Header rendering closure.
        let analyze_header = |mut table_row: TableRow<'_, '_>| {
            for column_name in &self.columns {
                table_row.col(|ui| {
                    ui.horizontal_centered(|ui| {
                        ui.strong(column_name);
                    });
                });
            }
        };

        // Row rendering closure. Placeholder rows are shorter than the
        // header, missing cells render empty.
        let analyze_rows = |mut table_row: TableRow<'_, '_>| {
            let row_index = table_row.index();

            for column_index in 0..self.columns.len() {
                let value = self
                    .rows
                    .get(row_index)
                    .and_then(|row| row.get(column_index))
                    .map(String::as_str)
                    .unwrap_or("");

                table_row.col(|ui| {
                    // Disable text wrapping so long values clip instead of
                    // blowing up the row height.
                    ui.with_layout(
                        Layout::left_to_right(egui::Align::Center).with_main_wrap(false),
                        |ui| {
                            ui.label(value);
                        },
                    );
                });
            }
        };

        let style = ui.style();
        let text_height = TextStyle::Body.resolve(style).size;
        let col_number = self.columns.len().max(1) as f32;
        let available_space = ui.available_width()
            - col_number * style.spacing.item_spacing.x
            - style.spacing.scroll.bar_width;

        // Initial and minimal column widths, spread over the available space.
        let initial_col_width = available_space / col_number;
        let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;
        let min_col_width = style.spacing.interact_size.x.max(initial_col_width / 4.0);

        let column = Column::initial(initial_col_width)
            .at_least(min_col_width)
            .resizable(true)
            .clip(true);

        TableBuilder::new(ui)
            .striped(true)
            .columns(column, self.columns.len())
            .column(Column::remainder())
            .auto_shrink([false, false])
            .header(header_height, analyze_header)
            .body(|body| {
                body.rows(text_height, self.rows.len(), analyze_rows);
            });
    }
}

#[cfg(test)]
mod tests_results {
    use super::*;

    #[test]
    fn fresh_table_shows_the_no_data_placeholder() {
        let table = ResultTable::default();

        assert_eq!(table.columns, ["Column"]);
        assert_eq!(table.rows, [["No data"]]);
    }

    #[test]
    fn empty_result_set_keeps_its_header() {
        let table = ResultTable::from_select(vec!["id".to_string(), "name".to_string()], Vec::new());

        assert_eq!(table.columns, ["id", "name"]);
        assert_eq!(table.rows, [["No results"]]);
    }

    #[test]
    fn fetched_rows_are_kept_as_is() {
        let table = ResultTable::from_select(
            vec!["id".to_string()],
            vec![vec!["1".to_string()], vec!["2".to_string()]],
        );

        assert_eq!(table.columns, ["id"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], ["2"]);
    }
}

use egui::{PointerButton, Ui};

/// Sidebar listing of the connected database's tables.
///
/// Refilled in place by `Show Tables`; it goes stale when the schema
/// changes behind the application's back until the next refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTree {
    tables: Vec<String>,
    loaded: bool,
}

impl SchemaTree {
    /// Replaces the whole listing with a freshly fetched one.
    pub fn replace(&mut self, tables: Vec<String>) {
        self.tables = tables;
        self.loaded = true;
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Renders the table list.
    ///
    /// Right-clicking a name copies it to the clipboard; left clicks do
    /// nothing, queries are typed in the editor.
    pub fn render_tree(&self, ui: &mut Ui) {
        if !self.loaded {
            ui.label("No tables loaded yet.");
            return;
        }

        if self.tables.is_empty() {
            ui.label("The database contains no tables.");
            return;
        }

        ui.label("Tip: Right-click a table name to copy it to the clipboard.");

        for name in &self.tables {
            let response = ui.selectable_label(false, name);

            if response.clicked_by(PointerButton::Secondary) {
                ui.ctx().copy_text(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests_schema {
    use super::*;

    #[test]
    fn fresh_tree_has_no_tables() {
        let tree = SchemaTree::default();

        assert!(tree.tables().is_empty());
    }

    #[test]
    fn replace_swaps_the_whole_listing() {
        let mut tree = SchemaTree::default();

        tree.replace(vec!["users".to_string(), "orders".to_string()]);
        assert_eq!(tree.tables(), ["users", "orders"]);

        tree.replace(vec!["users".to_string()]);
        assert_eq!(tree.tables(), ["users"]);
    }
}

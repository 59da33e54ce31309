use crate::{
    About, Arguments, DatabaseKind, DbConnection, InfoPopup, MyStyle, Notification, QueryOutput,
    ResultTable, SchemaTree, SqlAdminError, SqlAdminResult, format_sql, rewrite_show_shorthand,
};

use egui::{
    CentralPanel, Context, Grid, OpenUrl, RichText, ScrollArea, SidePanel, Slider, TextEdit,
    TextStyle, TopBottomPanel, Ui, ViewportCommand, menu, style::Visuals, warn_if_debug_build,
};
use egui_extras::syntax_highlighting::{self, CodeTheme};
use std::path::Path;
use tracing::error;

/// Horizontal pointer movement (in points, within one frame) that
/// toggles the sidebar: drag right to show it, left to hide it.
const SIDEBAR_SWIPE_THRESHOLD: f32 = 50.0;

/// Issue tracker opened by the `Report Bug` menu entry.
const BUG_REPORT_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

/// Project page shown by the `Send to a Friend` menu entry.
const HOMEPAGE_URL: &str = env!("CARGO_PKG_HOMEPAGE");

/// The main application struct for SQL Admin.
pub struct SqlAdminApp {
    /// The live database connection. `None` after a failed startup
    /// connect; it is never reopened within a session.
    pub connection: Option<DbConnection>,
    /// Engine selected on the command line, fixed for the session.
    pub engine: DatabaseKind,
    /// Editor content.
    pub query: String,
    /// Grid in the central panel, replaced by every successful `SELECT`.
    pub results: ResultTable,
    /// Sidebar table listing.
    pub schema: SchemaTree,
    /// One-line feedback under the editor; every operation writes here.
    pub status: String,
    /// Sidebar visibility, toggled by horizontal drag gestures.
    pub show_sidebar: bool,
    /// Font size applied to the editor and the status line.
    pub font_size: f32,
    /// Theme flag, kept in sync with the applied visuals.
    pub dark_mode: bool,
    /// Optional popup window (About, Share, Settings).
    pub notification: Option<Box<dyn Notification>>,

    /// Tokio runtime for the sqlx drivers. Every call blocks on it from
    /// the UI thread, so a slow query freezes the interface until done.
    runtime: tokio::runtime::Runtime,
}

impl Default for SqlAdminApp {
    fn default() -> Self {
        Self {
            connection: None,
            engine: DatabaseKind::default(),
            query: String::new(),
            results: ResultTable::default(),
            schema: SchemaTree::default(),
            status: "Results will appear here".to_string(),
            show_sidebar: true,
            font_size: 16.0,
            dark_mode: true,
            notification: None,
            runtime: tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to build Tokio runtime"),
        }
    }
}

impl SqlAdminApp {
    /// Creates a new `SqlAdminApp`, connects to the configured engine
    /// and fills the sidebar.
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Arguments) -> SqlAdminResult<Self> {
        cc.egui_ctx.set_style_init(Visuals::dark()); // Dark theme + custom styles.

        let mut app = Self::default();
        app.connect(args.engine, &args.path);

        // Only fill the sidebar when the connection came up, so a failed
        // connect keeps its status message on screen.
        if app.connection.is_some() {
            app.show_tables();
        }

        Ok(app)
    }

    /// Opens the single connection used for the rest of the session.
    ///
    /// On failure the application keeps running disconnected; later
    /// operations report the shared error path instead of retrying.
    pub fn connect(&mut self, kind: DatabaseKind, sqlite_path: &Path) {
        self.engine = kind;

        match self.runtime.block_on(DbConnection::open(kind, sqlite_path)) {
            Ok(connection) => {
                self.connection = Some(connection);
                self.status = match kind {
                    DatabaseKind::Sqlite => "✅ Connected to SQLite Database.".to_string(),
                    DatabaseKind::Mysql => "✅ Connected to MySQL Database!".to_string(),
                    DatabaseKind::Oracle => "✅ Connected to Oracle Database!".to_string(),
                };
            }
            Err(err) => {
                self.connection = None;
                self.status = format!("❌ Database Connection Failed: {err}");
                error!("Connection to {kind} failed: {err}");
            }
        }
    }

    /// The `Run Query` button callback.
    ///
    /// Empty input warns without a driver call. A `SELECT` (or the
    /// `show * from` shorthand) replaces the results grid; any other
    /// statement leaves the grid alone and reports affected rows.
    pub fn execute_query(&mut self) {
        let query = self.query.trim().to_string();

        if query.is_empty() {
            self.status = "⚠ Please enter an SQL query.".to_string();
            return;
        }

        let Some(connection) = self.connection.as_mut() else {
            self.status = format!("❌ Error: {}", SqlAdminError::NotConnected);
            return;
        };

        let sql = rewrite_show_shorthand(&query);

        match self.runtime.block_on(connection.run_query(&sql)) {
            Ok(QueryOutput::Rows { columns, rows }) => {
                self.results = ResultTable::from_select(columns, rows);
                self.status = "✅ Query executed successfully.".to_string();
            }
            Ok(QueryOutput::Done { rows_affected }) => {
                self.status =
                    format!("✅ Query executed successfully. ({rows_affected} rows affected)");
            }
            Err(err) => {
                self.status = format!("❌ Error: {err}");
                error!("Query failed: {err}");
            }
        }
    }

    /// The `Format Query` button callback: reformats the editor text in
    /// place. Text that is not SQL passes through unchanged.
    pub fn format_query(&mut self) {
        self.query = format_sql(&self.query);
    }

    /// The `Show Tables` button callback, also run once at startup.
    ///
    /// Success replaces the sidebar listing silently; failures share
    /// the query error path and land in the status line.
    pub fn show_tables(&mut self) {
        let Some(connection) = self.connection.as_mut() else {
            self.status = format!("❌ Error: {}", SqlAdminError::NotConnected);
            return;
        };

        match self.runtime.block_on(connection.list_tables()) {
            Ok(tables) => self.schema.replace(tables),
            Err(err) => {
                self.status = format!("❌ Error: {err}");
                error!("Table listing failed: {err}");
            }
        }
    }

    /// Checks if a Notification is active and displays it.
    fn check_notification(&mut self, ctx: &Context) {
        if let Some(notification) = &mut self.notification {
            if !notification.show(ctx) {
                self.notification = None; // Remove closed Notification.
            }
        }
    }

    /// The query editor with SQL syntax highlighting.
    fn render_editor(&mut self, ui: &mut Ui) {
        // Rebuilt each frame so the font-size slider takes effect
        // immediately.
        let theme = if self.dark_mode {
            CodeTheme::dark(self.font_size)
        } else {
            CodeTheme::light(self.font_size)
        };

        let mut layouter = |ui: &egui::Ui, buf: &dyn egui::TextBuffer, wrap_width: f32| {
            let mut layout_job =
                syntax_highlighting::highlight(ui.ctx(), ui.style(), &theme, buf.as_str(), "sql");
            layout_job.wrap.max_width = wrap_width;
            ui.fonts_mut(|f| f.layout_job(layout_job))
        };

        ui.add(
            TextEdit::multiline(&mut self.query)
                .hint_text("Write your SQL Query here")
                .desired_width(f32::INFINITY)
                .desired_rows(6)
                .font(TextStyle::Monospace)
                .layouter(&mut layouter),
        );
    }

    /// The Settings section of the sidebar.
    fn render_settings(&mut self, ui: &mut Ui) {
        Grid::new("settings_grid")
            .num_columns(2)
            .spacing([10.0, 20.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Font Size:");
                ui.add(Slider::new(&mut self.font_size, 12.0..=30.0).step_by(1.0))
                    .on_hover_text("Applies to the query editor and the status line.");
                ui.end_row();

                ui.label("Dark Theme:");
                let response = ui.checkbox(&mut self.dark_mode, "");
                if response.changed() {
                    let visuals = if self.dark_mode {
                        Visuals::dark()
                    } else {
                        Visuals::light()
                    };
                    ui.ctx().set_visuals(visuals);
                }
                ui.end_row();
            });
    }
}

impl eframe::App for SqlAdminApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Check and display any active popup (About, Share, Settings).
        self.check_notification(ctx);

        // Sidebar visibility follows horizontal drag gestures: the total
        // displacement since the press, ignored while a widget (slider,
        // resize handle, text selection) owns the pointer.
        let drag_x = ctx.input(|i| {
            match (i.pointer.press_origin(), i.pointer.latest_pos()) {
                (Some(origin), Some(pos)) if i.pointer.primary_down() => pos.x - origin.x,
                _ => 0.0,
            }
        });
        if !ctx.is_using_pointer() {
            if drag_x > SIDEBAR_SWIPE_THRESHOLD {
                self.show_sidebar = true;
            } else if drag_x < -SIDEBAR_SWIPE_THRESHOLD {
                self.show_sidebar = false;
            }
        }

        // Define the main UI layout.
        //
        //  | toolbar                  ☰ |
        //  -----------------------------
        //  |          | query editor    |
        //  | Tables   | status line     |
        //  | Settings | results table   |

        TopBottomPanel::top("top_panel").show(ctx, |ui| {
            menu::bar(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Run Query").clicked() {
                        self.execute_query();
                    }

                    if ui.button("Format Query").clicked() {
                        self.format_query();
                    }

                    if ui.button("Show Tables").clicked() {
                        self.show_tables();
                    }

                    // Add spacing to align the overflow menu to the right.
                    let delta = ui.available_width() - 30.0;
                    if delta > 0.0 {
                        ui.add_space(delta);
                    }

                    ui.menu_button("☰", |ui| {
                        if ui.button("🐞 Report Bug").clicked() {
                            ui.ctx().open_url(OpenUrl::new_tab(BUG_REPORT_URL));
                            ui.close_menu();
                        }

                        if ui.button("📤 Send to a Friend").clicked() {
                            self.notification = Some(Box::new(InfoPopup::new(
                                "📤 Share App",
                                format!("Share this URL with friends:\n{HOMEPAGE_URL}"),
                            )));
                            ui.close_menu();
                        }

                        if ui.button("ℹ About").clicked() {
                            self.notification = Some(Box::new(About {}));
                            ui.close_menu();
                        }

                        if ui.button("⚙ Settings").clicked() {
                            self.notification = Some(Box::new(InfoPopup::new(
                                "⚙ Settings",
                                "Settings: Font Size, Theme, Database Engine.\n\
                                 Font size and theme live in the sidebar's Settings section;\n\
                                 the database engine is selected on the command line.",
                            )));
                            ui.close_menu();
                        }

                        if ui.button("Quit").clicked() {
                            // Close the application.
                            ui.ctx().send_viewport_cmd(ViewportCommand::Close);
                        }
                    });
                });
            });
        });

        if self.show_sidebar {
            SidePanel::left("side_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    ScrollArea::vertical().show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.strong("📂 Databases & Tables");
                        });
                        ui.separator();

                        self.schema.render_tree(ui);

                        ui.add_space(10.0);
                        ui.collapsing("Settings", |ui| {
                            self.render_settings(ui);
                        });
                    });
                });
        }

        // CentralPanel must be added after all other panels in your egui layout!
        CentralPanel::default().show(ctx, |ui| {
            // Display a warning message if the application is built in debug mode.
            warn_if_debug_build(ui);

            self.render_editor(ui);

            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&self.status).size(self.font_size));
            });
            ui.separator();

            ScrollArea::horizontal()
                .auto_shrink([false, false]) // Prevent the scroll area from shrinking.
                .show(ui, |ui| {
                    ui.style_mut().spacing.scroll.handle_min_length = 32.0;
                    self.results.render_table(ui);
                });
        });
    }
}

/// Run tests with:
/// cargo test -- --show-output tests_app_callbacks
#[cfg(test)]
mod tests_app_callbacks {
    use super::*;
    use tempfile::TempDir;

    /// App wired to a fresh SQLite file with one populated table.
    fn connected_app(dir: &TempDir) -> SqlAdminApp {
        let mut app = SqlAdminApp::default();
        app.connect(DatabaseKind::Sqlite, &dir.path().join("app.db"));
        assert!(app.connection.is_some());

        app.query =
            "CREATE TABLE pets (id INTEGER PRIMARY KEY, name TEXT, kind TEXT);".to_string();
        app.execute_query();

        app.query = "INSERT INTO pets (id, name, kind) VALUES \
                     (1, 'Rex', 'dog'), (2, 'Momo', 'cat'), (3, 'Pip', NULL);"
            .to_string();
        app.execute_query();

        app
    }

    #[test]
    fn startup_connect_reports_success() {
        let dir = TempDir::new().unwrap();
        let mut app = SqlAdminApp::default();

        app.connect(DatabaseKind::Sqlite, &dir.path().join("new.db"));

        assert!(app.connection.is_some());
        assert_eq!(app.engine, DatabaseKind::Sqlite);
        assert_eq!(app.status, "✅ Connected to SQLite Database.");
    }

    #[test]
    fn failed_connect_leaves_the_app_disconnected() {
        let dir = TempDir::new().unwrap();
        let mut app = SqlAdminApp::default();

        // The parent directory does not exist, so the file cannot be created.
        app.connect(DatabaseKind::Sqlite, &dir.path().join("missing").join("db.sqlite"));

        assert!(app.connection.is_none());
        assert!(app.status.starts_with("❌ Database Connection Failed:"));

        // The app keeps running; operations fail one by one instead.
        app.query = "SELECT 1;".to_string();
        app.execute_query();
        assert!(app.status.starts_with("❌ Error:"));
        assert!(app.status.contains("not connected"));

        app.show_tables();
        assert!(app.status.contains("not connected"));
    }

    #[test]
    fn empty_query_warns_without_touching_results() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);
        let before = app.results.clone();

        app.query = "   ".to_string();
        app.execute_query();

        assert_eq!(app.status, "⚠ Please enter an SQL query.");
        assert_eq!(app.results, before);
    }

    #[test]
    fn select_replaces_the_results_grid() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "SELECT name, kind FROM pets ORDER BY id;".to_string();
        app.execute_query();

        assert_eq!(app.status, "✅ Query executed successfully.");
        assert_eq!(app.results.columns, ["name", "kind"]);
        assert_eq!(app.results.rows.len(), 3);
        assert_eq!(app.results.rows[0], ["Rex", "dog"]);
        assert_eq!(app.results.rows[2], ["Pip", "NULL"]);
    }

    #[test]
    fn show_shorthand_runs_like_a_select() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "SHOW * FROM pets".to_string();
        app.execute_query();

        assert_eq!(app.status, "✅ Query executed successfully.");
        assert_eq!(app.results.columns, ["id", "name", "kind"]);
        assert_eq!(app.results.rows.len(), 3);
    }

    #[test]
    fn bare_show_shorthand_surfaces_a_driver_error() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        // Rewritten to `SELECT * FROM ;`, which the driver rejects.
        app.query = "show * from".to_string();
        app.execute_query();

        assert!(app.status.starts_with("❌ Error:"));
        assert!(app.status.contains("syntax error"));

        // The app keeps running; the next query succeeds.
        app.query = "SELECT name FROM pets WHERE id = 1;".to_string();
        app.execute_query();
        assert_eq!(app.results.rows, [["Rex"]]);
    }

    #[test]
    fn zero_row_select_keeps_its_header() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "SELECT id, name FROM pets WHERE id > 99;".to_string();
        app.execute_query();

        assert_eq!(app.results.columns, ["id", "name"]);
        assert_eq!(app.results.rows, [["No results"]]);
    }

    #[test]
    fn non_select_commits_and_keeps_the_results() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "SELECT name FROM pets ORDER BY id;".to_string();
        app.execute_query();
        let before = app.results.clone();

        app.query = "UPDATE pets SET kind = 'fish';".to_string();
        app.execute_query();

        assert_eq!(app.status, "✅ Query executed successfully. (3 rows affected)");
        assert_eq!(app.results, before);

        app.query = "INSERT INTO pets (id, name, kind) VALUES (4, 'Ada', 'fish');".to_string();
        app.execute_query();

        assert_eq!(app.status, "✅ Query executed successfully. (1 rows affected)");
        assert_eq!(app.results, before);

        // The changes are visible to the next query.
        app.query = "SELECT DISTINCT kind FROM pets;".to_string();
        app.execute_query();
        assert_eq!(app.results.rows, [["fish"]]);
    }

    #[test]
    fn driver_errors_keep_the_editor_text() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "SELEC * FROM pets;".to_string();
        app.execute_query();

        assert!(app.status.starts_with("❌ Error:"));
        assert!(app.status.contains("syntax error"));
        assert_eq!(app.query, "SELEC * FROM pets;");
    }

    #[test]
    fn show_tables_fills_the_sidebar() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);
        assert!(app.schema.tables().is_empty());

        app.show_tables();

        assert_eq!(app.schema.tables(), ["pets"]);
    }

    #[test]
    fn formatting_rewrites_the_editor_in_place() {
        let dir = TempDir::new().unwrap();
        let mut app = connected_app(&dir);

        app.query = "select name from pets where id = 1;".to_string();
        app.format_query();

        assert!(app.query.contains("SELECT"));
        assert!(app.query.contains("FROM"));
        assert!(app.query.contains("WHERE"));

        let once = app.query.clone();
        app.format_query();
        assert_eq!(app.query, once);
    }

    /// Lays the highlighted editor out in a headless frame, driving the
    /// font and galley plumbing without a window.
    #[test]
    fn editor_renders_one_headless_frame() {
        let mut app = SqlAdminApp::default();
        app.query = "select id, name from pets where id = 1;".to_string();

        let ctx = Context::default();
        let output = ctx.run(egui::RawInput::default(), |egui_ctx| {
            CentralPanel::default().show(egui_ctx, |ui| {
                app.render_editor(ui);
            });
        });

        assert!(!output.shapes.is_empty());
    }
}

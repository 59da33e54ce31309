//! Custom traits and trait implementations for `egui` types.
//!
//! This module centralizes the application style (`MyStyle`) and the popup
//! windows opened from the menu (`Notification` and its implementors).
//! It interacts primarily with `layout.rs`.

use egui::{
    Align, Color32, Context, Direction,
    FontFamily::Proportional,
    FontId, Frame, Grid, Hyperlink, Layout, RichText, Spacing, Stroke, Style,
    TextStyle::{Body, Button, Heading, Monospace, Small},
    Vec2, Visuals, Window,
    style::ScrollStyle,
};

/// Defines custom text styles for the egui context.
/// Overrides default `egui` font sizes for different logical text styles (Heading, Body, etc.).
/// Used by `MyStyle::set_style_init`.
pub const CUSTOM_TEXT_STYLE: [(egui::TextStyle, egui::FontId); 5] = [
    (Heading, FontId::new(18.0, Proportional)),
    (Body, FontId::new(16.0, Proportional)),
    (Button, FontId::new(16.0, Proportional)),
    (Monospace, FontId::new(15.0, egui::FontFamily::Monospace)),
    (Small, FontId::new(14.0, Proportional)),
];

/// A trait for applying custom styling to the `egui` context (`Context`).
/// Used once at startup by `layout.rs::SqlAdminApp::new`.
pub trait MyStyle {
    /// Applies a pre-defined application style to the `egui` context.
    fn set_style_init(&self, visuals: Visuals);
}

impl MyStyle for Context {
    /// Configures the application's look and feel (theme, spacing, text styles) by modifying `egui::Style`.
    ///
    /// ### Logic
    /// 1. Define custom scrollbar settings (`ScrollStyle`).
    /// 2. Define custom widget spacing (`Spacing`).
    /// 3. Create a full `Style` struct incorporating `Visuals` (theme), `Spacing`, and `CUSTOM_TEXT_STYLE`.
    /// 4. Apply the constructed `Style` to the `egui::Context`.
    fn set_style_init(&self, visuals: Visuals) {
        // 1. Define ScrollStyle.
        let scroll = ScrollStyle {
            handle_min_length: 32.0,
            ..ScrollStyle::default()
        };

        // 2. Define Spacing.
        let spacing = Spacing {
            scroll,
            item_spacing: [8.0, 6.0].into(),
            ..Spacing::default()
        };

        // 3. Create the main Style struct.
        let style = Style {
            visuals,
            spacing,
            text_styles: CUSTOM_TEXT_STYLE.into(),
            ..Style::default()
        };

        // 4. Set the style on the egui Context.
        self.set_style(style);
    }
}

/// Trait for popup windows opened from the menu.
/// Allows `layout.rs` to manage different popup types polymorphically via `Box<dyn Notification>`.
pub trait Notification: Send + Sync + 'static {
    /// Renders the notification window using `egui::Window`.
    /// Called repeatedly by `layout.rs::check_notification` while the notification is active.
    ///
    /// ### Returns
    /// `true` if the window should remain open, `false` if closed.
    fn show(&mut self, ctx: &Context) -> bool;
}

/// The About window, assembled from the Cargo package metadata.
pub struct About {}

impl Notification for About {
    fn show(&mut self, ctx: &Context) -> bool {
        let mut open = true;
        let mut close_clicked = false;

        Window::new("ℹ About")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let version = env!("CARGO_PKG_VERSION");
                let description = env!("CARGO_PKG_DESCRIPTION");
                let repository = env!("CARGO_PKG_REPOSITORY");

                Frame::default()
                    .stroke(Stroke::new(1.0, Color32::GRAY))
                    .outer_margin(2.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        Grid::new("about_grid")
                            .num_columns(1)
                            .spacing([10.0, 6.0])
                            .show(ui, |ui| {
                                ui.with_layout(
                                    Layout::centered_and_justified(Direction::LeftToRight),
                                    |ui| {
                                        ui.label(
                                            RichText::new("SQL Admin")
                                                .font(FontId::proportional(28.0)),
                                        );
                                    },
                                );
                                ui.end_row();

                                ui.with_layout(
                                    Layout::centered_and_justified(Direction::LeftToRight),
                                    |ui| {
                                        ui.label(format!("Version: {version}"));
                                    },
                                );
                                ui.end_row();

                                ui.with_layout(
                                    Layout::centered_and_justified(Direction::LeftToRight),
                                    |ui| {
                                        ui.label(description);
                                    },
                                );
                                ui.end_row();

                                ui.horizontal(|ui| {
                                    ui.label("Source code:");
                                    ui.add(Hyperlink::from_label_and_url("GitHub", repository))
                                        .on_hover_text(repository);
                                });
                                ui.end_row();

                                ui.horizontal(|ui| {
                                    let url = "https://github.com/emilk/egui";
                                    ui.label("Built with");
                                    ui.add(Hyperlink::from_label_and_url("egui", url))
                                        .on_hover_text(url);
                                });
                                ui.end_row();
                            });
                    });

                ui.vertical_centered(|ui| {
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });
            });

        open && !close_clicked
    }
}

/// A plain title-plus-message window with a Close button.
/// Backs the Share and Settings entries of the overflow menu.
pub struct InfoPopup {
    pub title: String,
    pub message: String,
}

impl InfoPopup {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        InfoPopup {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl Notification for InfoPopup {
    /// Renders the popup window.
    ///
    /// ### Logic
    /// 1. Define `open` state (initially `true`).
    /// 2. Create `egui::Window` named after the popup title, bound to `open`.
    /// 3. Layout content area (fixed width, alignment).
    /// 4. Use a `Frame` with a plain border around the message.
    /// 5. Add a centered Close button below the frame.
    /// 6. Return whether the window should stay open.
    fn show(&mut self, ctx: &Context) -> bool {
        let mut open = true; // 1. Window starts open.
        let mut close_clicked = false;

        // 2. Create window.
        Window::new(&self.title)
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                // 3. Layout content.
                let width_max = ui.available_width() * 0.80;
                ui.allocate_ui_with_layout(
                    Vec2::new(width_max, ui.available_height()),
                    Layout::top_down(Align::LEFT),
                    |ui| {
                        // 4. Add framed message.
                        Frame::default()
                            .stroke(Stroke::new(1.0, Color32::GRAY))
                            .outer_margin(2.0)
                            .inner_margin(10.0)
                            .show(ui, |ui| {
                                ui.label(&self.message);
                            });

                        // 5. Close button.
                        ui.vertical_centered(|ui| {
                            if ui.button("Close").clicked() {
                                close_clicked = true;
                            }
                        });
                    },
                );
            });

        open && !close_clicked // 6. Return state.
    }
}

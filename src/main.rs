#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use sql_admin::{Arguments, SqlAdminApp};
use tracing::error;

/*
cargo fmt
cargo test -- --nocapture
cargo test -- --show-output tests_app_callbacks
cargo run -- --help
cargo run -- my-shop.db
cargo run -- --engine mysql
cargo doc --open
cargo b -r && cargo install --path=.
cargo b -r && cargo install --path=. --no-default-features
*/

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level.  eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();

    // Configure the native options for the eframe application.
    let native_options = eframe::NativeOptions {
        centered: true,
        persist_window: true,
        vsync: true,
        ..Default::default()
    };

    // Run the eframe application.
    eframe::run_native(
        "SQL Admin",
        native_options,
        Box::new(move |creation_context| {
            // Create the application; it connects to the configured
            // database during construction.
            match SqlAdminApp::new(creation_context, &args) {
                Ok(app) => Ok(Box::new(app)),
                Err(err) => {
                    error!("Failed to initialize SqlAdminApp: {}", err); //Log
                    panic!("Failed to initialize SqlAdminApp: {err}"); //Panic
                }
            }
        }),
    )
}

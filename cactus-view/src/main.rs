//! Application entry point for the cactus growth viewer.
//!
//! This binary sets up eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod mesh;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Initializes `env_logger` (the core reports degenerate topology and
/// spawn events through `log`), configures [`eframe::NativeOptions`] with
/// default settings, and launches the main window titled `"Cactus"`.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Cactus",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}

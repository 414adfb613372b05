use log::info;
use once_cell::sync::OnceCell;

/// Installs `env_logger` once per process. Safe to call from every entry
/// point; later calls are no-ops.
///
/// The level is controlled by `RUST_LOG`
/// (e.g. `RUST_LOG=neurallab_core=debug`).
pub fn init_logging() {
    static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();
    LOGGER_INITIALIZED.get_or_init(|| {
        match env_logger::builder().is_test(false).try_init() {
            Ok(_) => info!("Neural Lab logger initialized."),
            Err(e) => eprintln!(
                "Failed to initialize logger: {}. Logging might not work as expected.",
                e
            ),
        };
    });
}

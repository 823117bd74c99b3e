//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting PolyDraw");

    if let Err(err) = polydraw_app::App::run(polydraw_app::AppConfig::default()) {
        log::error!("PolyDraw exited with error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}

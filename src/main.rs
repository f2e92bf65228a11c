fn main() -> Result<(), eframe::Error> {
    // Log level comes from RUST_LOG
    env_logger::init();

    wireframer::run_app()
}

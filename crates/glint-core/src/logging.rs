pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter("debug,glint_ui=trace")
        .init();
}

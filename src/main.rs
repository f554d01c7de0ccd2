fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let channels = soundboard_bridge::BridgeChannels::default();
    soundboard_backend::run(channels.backend_rx, channels.backend_tx);
    soundboard_frontend::run(channels.frontend_rx, channels.frontend_tx).inspect_err(|error| {
        log::error!("Frontend exited with an error: {error:#}");
    })
}

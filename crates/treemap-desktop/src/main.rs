use std::process::exit;

use clap::Parser;
use tracing::{metadata::LevelFilter, subscriber::set_global_default};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, Layer};
use treemap_data::HttpSource;

use treemap_desktop::app::App;
use treemap_desktop::config::Args;

fn main() {
    init_logs();

    let args = Args::parse();
    let config = match args.backend_config() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid backend configuration");
            exit(2)
        }
    };
    let source = match HttpSource::new(&config) {
        Ok(source) => source,
        Err(error) => {
            tracing::error!(%error, "failed to create http client");
            exit(2)
        }
    };

    let endpoint = source.endpoint().to_string();
    let style = args.treemap_style();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "failed to start async runtime");
            exit(2)
        }
    };
    let handle = runtime.handle().clone();

    tracing::info!(%endpoint, "starting app");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Accounts treemap")
            .with_inner_size([440.0, 700.0]),
        ..Default::default()
    };

    if let Err(error) = eframe::run_native(
        "treemap",
        native_options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, &handle, source, endpoint, style)))),
    ) {
        tracing::error!(%error, "failed to run the app");
        exit(2)
    }
}

fn init_logs() {
    let log_format = tracing_subscriber::fmt::format()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact();

    let log_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    set_global_default(
        tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(log_format)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(log_level),
        ),
    )
    .expect("failed to set global logs subscriber");
}

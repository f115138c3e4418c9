#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use tracing_subscriber::prelude::*;

/// Default per-target levels. `RUST_LOG` replaces them when set.
const DEFAULT_LOG_FILTER: &str = "guiterm=info,eframe=info,egui=warn,wgpu=warn,winit=warn";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "", "guiterm")
}

fn init_logging() {
    let Some(proj_dirs) = project_dirs() else {
        eprintln!("No home directory found, file logging disabled");
        return;
    };

    let log_dir = proj_dirs.data_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("guiterm.log");

    let file = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(&log_path, std::fs::Permissions::from_mode(0o600))
        {
            eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
        }
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // The writer closure clones the handle per event; a failed clone falls back to stderr.
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(move || -> Box<dyn std::io::Write> {
                match file.try_clone() {
                    Ok(handle) => Box::new(handle),
                    Err(_) => Box::new(std::io::stderr()),
                }
            })
            .with_ansi(false),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    // eframe, egui and wgpu log through the `log` crate. Must come after the subscriber.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    tracing::info!("Logging initialized to: {:?}", log_path);
}

fn setup_panic_handler() {
    // Installed before logging so early crashes still leave a trace on disk
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "guiterm crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        eprintln!("\n{}", crash_msg);

        let Some(proj_dirs) = project_dirs() else {
            return;
        };
        let log_dir = proj_dirs.data_dir().join("logs");
        let _ = std::fs::create_dir_all(&log_dir);
        let crash_log_path = log_dir.join("crash.log");

        if let Ok(mut file) = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&crash_log_path)
        {
            use std::io::Write;
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
            eprintln!("Crash log written to: {:?}", crash_log_path);
        }
    }));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_handler();
    init_logging();

    tracing::info!(
        "guiterm {} starting ({}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_BRANCH"),
        env!("GIT_COMMIT")
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([500.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GUI Terminal",
        native_options,
        Box::new(|cc| Ok(Box::new(guiterm::TerminalApp::new(cc)))),
    )?;

    tracing::info!("guiterm exited");
    Ok(())
}

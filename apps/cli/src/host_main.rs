use leetcode_exporter::host;
use leetcode_exporter::logger::initialize_host;
use client_core::ipc::debug_log::default_log_path;
use std::process::ExitCode;
use tokio::time::Instant;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start the async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let exit = runtime.block_on(async {
        let started = Instant::now();
        // Logging must never reach stdout, and a broken log file must not cost
        // the browser its response.
        if let Some(log_path) = default_log_path() {
            let _ = initialize_host(&log_path);
        }
        host::run(started).await
    });

    // The stdin read may still be parked on a blocking thread after a
    // watchdog reply. The response is already flushed, so do not wait for it.
    runtime.shutdown_background();
    ExitCode::from(exit.code())
}

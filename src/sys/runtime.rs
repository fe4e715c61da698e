use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the socket server and the config watcher on their own thread. Events
/// reach the caller through `tx`; the menu itself never leaves the caller's
/// thread.
pub fn start_background_services(tx: Sender<AppEvent>, config_path: Option<PathBuf>) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            if let Some(path) = config_path {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(path, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

use std::path::PathBuf;

use crate::{Res, config::Config, server, warning};

/// Starts the server. CLI flags override the matching environment settings.
pub async fn serve(
    config: Config,
    addr: Option<String>,
    static_dir: Option<PathBuf>,
    open: bool,
) -> Res<()> {
    let config = apply_overrides(config, addr, static_dir);
    if !config.static_dir.is_dir() {
        warning!(
            "Static directory {} not found, only API routes will answer",
            config.static_dir.display()
        );
    }

    let (listener, state) = server::bind(config).await?;

    if open {
        let login_url = format!("http://{}/login", listener.local_addr()?);
        if webbrowser::open(&login_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                login_url
            )
        }
    }

    server::serve(listener, state).await
}

fn apply_overrides(mut config: Config, addr: Option<String>, static_dir: Option<PathBuf>) -> Config {
    if let Some(addr) = addr {
        config.server_addr = addr;
    }
    if let Some(dir) = static_dir {
        config.static_dir = dir;
    }
    config
}

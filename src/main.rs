use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use log::info;
use simplelog::{ConfigBuilder, WriteLogger};

use vtchat::controller::Controller;
use vtchat::core::config::{self, ChatConfig, Diagnostics, ResolvedConfig};
use vtchat::core::state::ChatState;
use vtchat::net::{CHAT_PORT, UdpTransport, resolve_peer};
use vtchat::tui;

#[derive(Parser)]
#[command(name = "chat", version, about = "Two-party terminal chat over UDP")]
struct Args {
    /// Name shown next to your messages
    username: String,
    /// Host name or IP of the other peer (port 9999 on both sides)
    remote_address: String,
}

fn init_logging(config: &ResolvedConfig) {
    // Log file only: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Config is read before the logger exists; its messages are replayed below
    let mut load_diagnostics = Diagnostics::default();
    let chat_config = match config::load_config(&mut load_diagnostics) {
        Ok(c) => c,
        Err(e) => {
            load_diagnostics.warn(format!("{e}; using defaults"));
            ChatConfig::default()
        }
    };
    let config = config::resolve(&chat_config, &args.username, &args.remote_address);
    init_logging(&config);
    load_diagnostics.replay();
    config.diagnostics.replay();

    info!(
        "vtchat starting up as {:?}, peer {:?}",
        config.username, config.remote_host
    );

    let peer = match resolve_peer(&config.remote_host, CHAT_PORT).await {
        Ok(peer) => peer,
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
    };
    let transport = match UdpTransport::bind_for(&peer, CHAT_PORT).await {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!("Chatting with {} ({})", peer.host, peer.addr);

    let state = ChatState::new(config.username.clone(), peer);
    let controller = Controller::new(state, transport.clone());

    tui::run(controller, transport, &config).await?;

    info!("vtchat shut down cleanly");
    Ok(())
}

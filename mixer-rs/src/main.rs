use anyhow::Result;
use clap::{Parser, Subcommand};
use mixer_rs::audio::AudioPlatform;
use mixer_rs::{AudioService, DeviceType, DeviceUpdate};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Command to execute. Lists all devices when omitted.
    #[clap(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List active audio devices
    List {
        /// Device direction: output, input or all
        #[clap(long = "type", default_value = "all")]
        device_type: DeviceType,
    },

    /// Show a single device
    Get {
        /// Windows endpoint ID
        id: String,
    },

    /// Change the volume and/or mute state of a device
    Set {
        /// Windows endpoint ID
        id: String,

        /// Volume level from 0.0 to 1.0
        #[clap(long)]
        volume: Option<f32>,

        /// Mute state (true or false)
        #[clap(long, action = clap::ArgAction::Set)]
        mute: Option<bool>,
    },
}

fn run<P: AudioPlatform>(
    cmd: Command,
    service: &AudioService<P>,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        Command::List { device_type } => {
            let devices = service.list_devices(device_type)?;
            serde_json::to_writer_pretty(&mut *out, &devices)?;
        }
        Command::Get { id } => {
            let device = service.get_device(&id)?;
            serde_json::to_writer_pretty(&mut *out, &device)?;
        }
        Command::Set { id, volume, mute } => {
            let update = DeviceUpdate { volume, mute };
            update.validate()?;
            let device = service.update_device(&id, &update)?;
            serde_json::to_writer_pretty(&mut *out, &device)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or(Command::List {
        device_type: DeviceType::All,
    });

    let service = mixer_rs::system_service();
    run(cmd, &service, &mut std::io::stdout().lock())
}

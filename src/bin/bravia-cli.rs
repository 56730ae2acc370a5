use clap::{Parser, Subcommand};

use bravia_remote::config::DeviceConfig;
use bravia_remote::ircc::keycode::{self, KEY_CODES};
use bravia_remote::{IrccClient, KeyCode};

#[derive(Parser)]
#[command(name = "bravia-cli")]
#[command(about = "Send IRCC-IP commands straight to a Sony Bravia display", long_about = None)]
struct Cli {
    /// The IP address of the display
    #[arg(long, env = "SONY_BRAVIA_IP")]
    ip: Option<String>,

    /// The configured Pre-Shared-Key (PSK) of the display
    #[arg(long, env = "SONY_BRAVIA_PSK", hide_env_values = true)]
    psk: Option<String>,

    /// Seconds to wait for the display
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Press a key by name (e.g. Home, VolumeUp)
    Press {
        key: String,
        /// Treat KEY as a raw IRCC code instead of a name
        #[arg(long)]
        raw: bool,
    },
    /// List known key names and codes
    Keys,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys => {
            for (name, code) in KEY_CODES {
                println!("{:<12} {}", name, code);
            }
        }
        Commands::Press { key, raw } => {
            let code = if raw {
                KeyCode::new(key)
            } else {
                keycode::lookup(&key)
                    .cloned()
                    .ok_or_else(|| format!("unknown key '{}', see `bravia-cli keys`", key))?
            };

            let config = DeviceConfig {
                address: cli.ip.ok_or("display address not set (--ip or SONY_BRAVIA_IP)")?,
                psk: cli.psk.ok_or("pre-shared key not set (--psk or SONY_BRAVIA_PSK)")?,
                timeout_secs: cli.timeout,
                ..DeviceConfig::default()
            };

            let client = IrccClient::from_config(&config)?;
            if let Err(e) = client.send_key_code(&code).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

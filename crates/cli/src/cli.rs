use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;
use wab::SessionConfig;

use crate::styles::cli_styles;

#[derive(Parser, Debug)]
#[command(name = "wab")]
#[command(about = "WhatsApp Web bulk messenger - deliver a contact list through a real browser")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
    /// Contact file with 'phone' and 'message' columns (.xlsx or .csv)
    #[arg(default_value = "contacts.xlsx", value_name = "FILE")]
    pub contacts: PathBuf,

    /// Browser profile directory that keeps the login across runs
    #[arg(long, default_value = "./wa-profile", value_name = "DIR")]
    pub profile_dir: PathBuf,

    /// Explicit browser binary (discovered automatically when omitted)
    #[arg(long, value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Attach to a running WebDriver server instead of spawning chromedriver
    #[arg(long, value_name = "URL")]
    pub webdriver_url: Option<String>,

    /// Port for the spawned chromedriver
    #[arg(long, default_value_t = 9515, value_name = "PORT")]
    pub driver_port: u16,

    /// Run the browser headless (first-time QR login needs a visible window)
    #[arg(long)]
    pub headless: bool,

    /// Messaging app origin
    #[arg(long, default_value = "https://web.whatsapp.com", value_name = "URL")]
    pub base_url: Url,

    /// Seconds to wait for the app (and each chat box) to appear
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub ready_timeout: u64,

    /// Seconds to pause after each delivered message
    #[arg(long, default_value_t = 3, value_name = "SECS")]
    pub send_delay: u64,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Lowers the CLI flags onto an owned session configuration.
    pub fn session_config(&self, webdriver_url: String) -> SessionConfig {
        let mut config =
            SessionConfig::new(self.profile_dir.clone(), webdriver_url, self.base_url.clone());
        config.binary = self.binary.clone();
        config.headless = self.headless;
        config.wait.ready_timeout = Duration::from_secs(self.ready_timeout);
        config.pacing.after_sent = Duration::from_secs(self.send_delay);
        config
    }
}

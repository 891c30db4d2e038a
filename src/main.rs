use anyhow::Result;
use clap::{App as ClapApp, Arg};
use recall_tui::app::App;
use recall_tui::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("URL")
                .help("Base URL of the backend for this session")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-key")
                .short("k")
                .long("api-key")
                .value_name("KEY")
                .help("API key sent as a bearer token")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("page")
                .short("p")
                .long("page")
                .value_name("FRAGMENT")
                .help("Page to open on: search, collections, upload, sources or entries")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    config.apply_overrides(matches.value_of("url"), matches.value_of("api-key"));
    App::start(config, matches.value_of("page")).await?;
    Ok(())
}

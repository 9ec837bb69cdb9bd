use colored::Colorize;
use foxfunx::config::{magic_cookie_present, Config};
use foxfunx::logging::{init_logging, LogForwarder};
use foxfunx::server::serve;
use foxfunx::Provider;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();

    // Run directly: say so before config or logging can fail or write files.
    if !magic_cookie_present(|key| std::env::var(key).ok()) {
        eprintln!(
            "{}\nThis binary is a plugin. These are not meant to be executed directly.\nPlease execute the program that consumes these plugins, which will\nload any plugins automatically.",
            "foxfunx provider".on_red()
        );
        std::process::exit(1);
    }

    let config = Config::from_env()?;
    init_logging(&config.log_config, config.log_level)?;
    log::info!("#Start main() version={}", config.version);

    let provider = Provider::new(&config.version);
    serve(&provider, &LogForwarder, config.protocol_versions.as_deref()).await?;

    log::info!("#End main()");
    Ok(())
}

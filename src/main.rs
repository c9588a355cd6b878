use dotenv::dotenv;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use travelpilot::config::process_env;
use travelpilot::openai::{ChatBackend, OpenAiClient};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "travelpilot=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let result = travelpilot::cli::run(&mut input, &mut output, process_env, |config| {
        Arc::new(OpenAiClient::new(&config.base_url, &config.api_key)) as Arc<dyn ChatBackend>
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误：{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

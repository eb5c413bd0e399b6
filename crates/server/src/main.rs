use anyhow::Result;
use clap::Parser;
use wearmatch_server::ServeArgs;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = ServeArgs::parse();
    wearmatch_server::serve(args).await
}

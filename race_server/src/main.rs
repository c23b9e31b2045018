#[tokio::main]
async fn main() -> std::io::Result<()> {
    race_server::run_with_config().await
}

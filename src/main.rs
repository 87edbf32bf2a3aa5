#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = learning_api::run().await {
        eprintln!("learning-api fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

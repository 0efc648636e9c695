#[tokio::main]
async fn main() {
    if let Err(e) = aidpoint_lib::run().await {
        tracing::error!("{e}");
        eprintln!("aidpoint: {e}");
        std::process::exit(1);
    }
}

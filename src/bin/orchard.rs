#[tokio::main]
async fn main() {
    if let Err(e) = clinic_orchard::start_orchard_server().await {
        tracing::error!("Orchard server failed: {}", e);
        std::process::exit(1);
    }
}

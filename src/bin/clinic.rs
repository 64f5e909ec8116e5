#[tokio::main]
async fn main() {
    if let Err(e) = clinic_orchard::start_clinic_server().await {
        tracing::error!("Clinic server failed: {}", e);
        std::process::exit(1);
    }
}

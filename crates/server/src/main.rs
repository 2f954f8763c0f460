//! Guidepost server binary.
//!
//! Runs the HTTP server for the guide-sharing site.

#[tokio::main]
async fn main() {
    gp_core::log();
    gp_core::trap();
    gp_server::run().await.expect("server failed");
}

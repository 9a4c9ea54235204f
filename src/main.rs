#[tokio::main]
async fn main() {
    orgfolder::app::startup::startup().await;
}

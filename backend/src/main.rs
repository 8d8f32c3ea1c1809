#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    server::start_server().await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sqlfleet_ui_terminal::run().await
}

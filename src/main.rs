#[tokio::main]
async fn main() -> anyhow::Result<()> {
    blog_search::run().await
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
  witchblades::run().await
}

use anyhow::Result;
use sessiongate::cli::{actions, start};

#[tokio::main]
async fn main() -> Result<()> {
    let (action, globals) = start()?;

    actions::session::handle(action, &globals).await
}

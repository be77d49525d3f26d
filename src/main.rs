use anyhow::Context;

fn main() -> anyhow::Result<()> {
    token_studio::run().context("failed to export token stylesheet")
}

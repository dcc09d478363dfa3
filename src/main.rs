use anyhow::Context;

fn main() -> anyhow::Result<()> {
    floorplan::run().context("floorplan failed")
}

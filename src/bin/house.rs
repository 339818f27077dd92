use scenery_gen::cli;
use scenery_gen::config::AssetKind;

fn main() -> anyhow::Result<()> {
    cli::run(AssetKind::House)
}

use anyhow::Result;

fn main() -> Result<()> {
    template_tidy::run_cli()
}

//! wordhtml CLI - Convert Word documents to semantic HTML

fn main() -> anyhow::Result<()> {
    wordhtml_cli::run_cli()
}

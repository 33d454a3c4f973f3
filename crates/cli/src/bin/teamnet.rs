use anyhow::Result;

fn main() -> Result<()> {
    teamnet_cli::main_entry()
}

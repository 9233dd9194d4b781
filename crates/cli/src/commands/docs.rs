use std::path::Path;
use typenv_env::export_markdown;

pub fn execute(spec: &Path, output: &Path) -> eyre::Result<()> {
    let catalogue = super::declare_all(spec)?;
    export_markdown(&catalogue, output)?;
    println!(
        "Documented {} environment variables in {}",
        catalogue.len(),
        output.display()
    );
    Ok(())
}

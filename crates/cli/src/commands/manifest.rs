use std::path::Path;
use typenv_env::export_config_map;

pub fn execute(
    spec: &Path,
    output: &Path,
    name: &str,
    namespace: &str,
    api_version: &str,
) -> eyre::Result<()> {
    let catalogue = super::declare_all(spec)?;
    export_config_map(&catalogue, output, name, namespace, api_version)?;
    println!(
        "Wrote ConfigMap '{name}' with {} keys to {}",
        catalogue.len(),
        output.display()
    );
    Ok(())
}

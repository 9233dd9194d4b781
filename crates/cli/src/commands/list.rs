use std::path::Path;

pub fn execute(spec: &Path) -> eyre::Result<()> {
    let catalogue = super::declare_all(spec)?;

    if catalogue.is_empty() {
        println!("No environment variables declared");
        return Ok(());
    }

    let width = catalogue
        .entries()
        .iter()
        .map(|entry| entry.key.len())
        .max()
        .unwrap_or_default();

    for entry in catalogue.entries() {
        let required = if entry.is_required { "required" } else { "" };
        let line = format!("{:width$}  {:<5}  {required}", entry.key, entry.env_type.as_str());
        println!("{}", line.trim_end());
    }
    Ok(())
}

use std::path::Path;
use typenv_env::declaration::load_declarations;
use typenv_env::{Environment, MapEnv};

pub fn execute(spec: &Path, env_file: Option<&Path>) -> eyre::Result<()> {
    let declarations = load_declarations(spec)?;
    let env = match env_file {
        Some(path) => Environment::new(MapEnv::from_dotenv_file(path)?),
        None => Environment::from_process(),
    };

    let mut failed = 0usize;
    for declaration in &declarations {
        match declaration.read(&env) {
            Ok(Some(value)) => println!("ok     {} = {value}", declaration.key),
            Ok(None) => println!("ok     {} (unset)", declaration.key),
            Err(e) => {
                failed += 1;
                tracing::debug!(key = %declaration.key, error = %e, "check failed");
                println!("error  {}: {e}", declaration.key);
            }
        }
    }

    if failed > 0 {
        eyre::bail!(
            "{failed} of {} environment variables failed validation",
            declarations.len()
        );
    }
    Ok(())
}

use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

/// Release codename shown by `questlog --version`, read from
/// `[package.metadata.questlog]` so it lives next to the version number.
fn codename(manifest: &toml::Table) -> Option<&str> {
    manifest
        .get("package")?
        .get("metadata")?
        .get("questlog")?
        .get("codename")?
        .as_str()
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("Cargo.toml");
    let manifest: toml::Table = toml::from_str(&fs::read_to_string(&path)?)?;

    let codename = codename(&manifest)
        .ok_or("missing package.metadata.questlog.codename in Cargo.toml")?;

    println!("cargo:rustc-env=CODENAME={}", codename);
    println!("cargo:rerun-if-changed=Cargo.toml");
    Ok(())
}

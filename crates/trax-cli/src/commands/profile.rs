use std::path::Path;
use trax_core::error::TraxError;
use trax_core::profile::builtin;
use trax_core::profile::schema::ConversionProfile;

use super::resolve_profile;

pub fn list() -> Result<(), TraxError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} (v{}){}",
            name, profile.name, profile.version, default_marker
        );
        if let Some(ref desc) = profile.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(file: Option<&Path>) -> Result<(), TraxError> {
    let profile = resolve_profile(file)?;
    print_profile(&profile);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TraxError> {
    let profile = trax_core::profile::load_profile(file)?;
    println!(
        "Profile '{}' (v{}) is valid: {} analyte label(s), {} unit(s), {} client(s)",
        profile.name,
        profile.version,
        profile.tables.analytes.len(),
        profile.tables.units.len(),
        profile.tables.clients.len()
    );
    Ok(())
}

fn print_profile(profile: &ConversionProfile) {
    println!("{} (version {})\n", profile.name, profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("Format:");
    println!("  version  {}", profile.format.wtx_version);
    println!("  lab id   {}", profile.format.lab_id);
    println!("  purpose  {}\n", profile.format.purpose.code());

    let tables = &profile.tables;
    let width = tables
        .analytes
        .keys()
        .chain(tables.units.keys())
        .map(|k| k.len())
        .max()
        .unwrap_or(10);

    println!("Analytes:");
    for (label, def) in &tables.analytes {
        println!(
            "  {:<width$}  {:>5}  {}",
            label,
            def.code,
            def.description,
            width = width
        );
    }
    println!();

    println!("Units:");
    for (label, code) in &tables.units {
        println!("  {:<width$}  {:>5}", label, code, width = width);
    }
    println!();

    println!("Clients:");
    for client in &tables.clients {
        let alias = if client.alias.is_empty() {
            "(no alias)"
        } else {
            client.alias.as_str()
        };
        println!("  {:>5}  {}  <- \"{}\"", client.code, client.name, alias);
    }
    println!();

    let layout = &profile.layout;
    println!("Layout:");
    println!("  table marker         {}", layout.horizontal_marker);
    println!("  ICP marker           {}", layout.vertical_marker);
    println!("  sample block marker  {}", layout.backup_marker);
    println!("  ICP analyte rows     {}", layout.icp_analyte_rows);
    for (marker, len) in &layout.icp_trailer_markers {
        println!("  ICP trailer '{}'  {} token(s)", marker, len);
    }
    println!("  ICP trailer default  {} token(s)", layout.icp_default_trailer);
}

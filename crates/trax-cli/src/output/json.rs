use serde::Serialize;
use trax_core::error::TraxError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TraxError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

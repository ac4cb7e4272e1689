pub mod convert;
pub mod parse;
pub mod profile;

use std::path::Path;
use trax_core::error::TraxError;
use trax_core::profile::builtin;
use trax_core::profile::schema::ConversionProfile;

/// The profile given with `--profile`, or the built-in one.
pub fn resolve_profile(path: Option<&Path>) -> Result<ConversionProfile, TraxError> {
    match path {
        Some(path) => trax_core::profile::load_profile(path),
        None => builtin::default_profile(),
    }
}

//! Config command - prints the resolved settings.

use crate::config::Settings;
use crate::errors::AppResult;

/// Secrets are redacted by the `Debug` impl of [`Settings`].
pub async fn execute(settings: Settings) -> AppResult<()> {
    println!("{:#?}", settings);
    Ok(())
}

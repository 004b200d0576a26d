//! Interactive startup prompts

use tokio::sync::mpsc;

use chit_utils::{ChitError, Result};

use crate::ui::Console;

/// Return `given` if present, otherwise ask the user for `label`
///
/// Blank answers are asked again. Fails if input closes before an
/// answer arrives.
pub async fn value_or_prompt(
    given: Option<String>,
    console: &Console,
    input: &mut mpsc::Receiver<String>,
    label: &str,
) -> Result<String> {
    if let Some(value) = given.filter(|v| !v.trim().is_empty()) {
        return Ok(value.trim().to_string());
    }

    loop {
        console.prompt(label)?;
        match input.recv().await {
            Some(line) if !line.trim().is_empty() => return Ok(line.trim().to_string()),
            Some(_) => continue,
            None => {
                return Err(ChitError::config(format!(
                    "input closed before {} was entered",
                    label.to_lowercase()
                )))
            }
        }
    }
}

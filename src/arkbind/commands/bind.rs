use crate::authority::CommandRunner;
use crate::client::NoidClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArkError, Result};
use crate::model::BindMode;

pub fn run<R: CommandRunner>(
    client: &NoidClient<R>,
    identifier: &str,
    element: &str,
    value: Option<&str>,
    how: BindMode,
) -> Result<CmdResult> {
    let output = client.bind(identifier, element, value, how)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Bound {} on {} ({})",
        element, identifier, how
    )));
    Ok(result.with_output(crate::response::non_empty(output)))
}

pub fn run_many<R: CommandRunner>(
    client: &NoidClient<R>,
    identifier: &str,
    bindings: &[(String, String)],
    how: BindMode,
) -> Result<CmdResult> {
    if bindings.is_empty() {
        return Err(ArkError::InvalidArguments(
            "at least one ELEMENT=VALUE pair is required".to_string(),
        ));
    }

    client.bind_multiple(
        identifier,
        bindings.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        how,
    )?;

    let mut result = CmdResult::default();
    for (element, _) in bindings {
        result.add_message(CmdMessage::info(format!("Bound {}", element)));
    }
    result.add_message(CmdMessage::success(format!(
        "Bound {} elements on {}",
        bindings.len(),
        identifier
    )));
    Ok(result)
}

/// Split `ELEMENT=VALUE` arguments, keeping their order.
pub fn parse_pairs<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<(String, String)>> {
    inputs
        .iter()
        .map(|raw| {
            let raw = raw.as_ref();
            match raw.split_once('=') {
                Some((element, value)) if !element.trim().is_empty() => {
                    Ok((element.trim().to_string(), value.to_string()))
                }
                _ => Err(ArkError::InvalidArguments(format!(
                    "expected ELEMENT=VALUE, got '{}'",
                    raw
                ))),
            }
        })
        .collect()
}

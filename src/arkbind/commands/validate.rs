use crate::authority::CommandRunner;
use crate::client::NoidClient;
use crate::commands::{CmdMessage, CmdResult, Validation};
use crate::error::Result;
use crate::model::normalize_identifier;

pub fn run<R: CommandRunner, I: AsRef<str>>(
    client: &NoidClient<R>,
    identifiers: &[I],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut validations = Vec::with_capacity(identifiers.len());

    for raw in identifiers {
        let identifier = normalize_identifier(raw.as_ref()).to_string();
        let valid = client.validate(&identifier)?;
        if valid {
            result.add_message(CmdMessage::success(format!("{} is valid", identifier)));
        } else {
            result.add_message(CmdMessage::error(format!("{} is not valid", identifier)));
        }
        validations.push(Validation { identifier, valid });
    }

    Ok(result.with_validations(validations))
}

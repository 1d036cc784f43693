use crate::authority::CommandRunner;
use crate::client::NoidClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run<R: CommandRunner>(client: &NoidClient<R>, count: u32) -> Result<CmdResult> {
    let ids = client.mint_many(count)?;

    let mut result = CmdResult::default();
    if ids.is_empty() {
        result.add_message(CmdMessage::error("NOID returned no identifier"));
    } else if ids.len() < count as usize {
        result.add_message(CmdMessage::warning(format!(
            "Requested {} identifiers, NOID returned {}",
            count,
            ids.len()
        )));
    }
    Ok(result.with_minted(ids))
}

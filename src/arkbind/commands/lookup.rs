//! `get` and `fetch`. Both hand NOID's text back untouched; `fetch` is the verbose
//! listing, `get` the terse one.

use crate::authority::CommandRunner;
use crate::client::NoidClient;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStyle {
    Get,
    Fetch,
}

impl LookupStyle {
    fn name(self) -> &'static str {
        match self {
            LookupStyle::Get => "get",
            LookupStyle::Fetch => "fetch",
        }
    }
}

pub fn run<R: CommandRunner, E: AsRef<str>>(
    client: &NoidClient<R>,
    style: LookupStyle,
    identifier: &str,
    elements: &[E],
) -> Result<CmdResult> {
    let elements: Vec<&str> = elements.iter().map(|e| e.as_ref()).collect();
    let output = match style {
        LookupStyle::Get => client.get(identifier, &elements)?,
        LookupStyle::Fetch => client.fetch(identifier, &elements)?,
    };

    let mut result = CmdResult::default();
    if output.is_none() {
        result.add_message(CmdMessage::warning(format!(
            "NOID {} returned nothing for {}",
            style.name(),
            identifier
        )));
    }
    Ok(result.with_output(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::scripted::ScriptedRunner;
    use crate::authority::CommandOutput;
    use crate::config::NoidSettings;

    #[test]
    fn test_fetch_passes_elements() {
        let client = NoidClient::new(
            NoidSettings::default(),
            ScriptedRunner::new().on("fetch", CommandOutput::success("title: Parcels\n")),
        );

        let result = run(&client, LookupStyle::Fetch, "1/x", &["title"]).unwrap();
        assert_eq!(result.output.as_deref(), Some("title: Parcels\n"));
        assert!(result.messages.is_empty());
        let calls = client.runner().calls_to("fetch");
        assert_eq!(&calls[0].args[3..], ["1/x", "title"]);
    }

    #[test]
    fn test_empty_get_warns() {
        let client = NoidClient::new(NoidSettings::default(), ScriptedRunner::new());
        let no_elements: [&str; 0] = [];

        let result = run(&client, LookupStyle::Get, "1/x", &no_elements).unwrap();
        assert_eq!(result.output, None);
        assert!(result.messages[0].content.contains("get"));
    }
}

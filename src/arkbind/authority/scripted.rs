use super::{CommandOutput, CommandRunner, Invocation};
use crate::error::Result;
use std::cell::RefCell;

type Matcher = Box<dyn Fn(&Invocation) -> bool>;

struct Rule {
    matcher: Matcher,
    output: CommandOutput,
    once: bool,
}

/// In-memory runner: records every invocation and answers from a script.
///
/// Rules are consulted newest first. Unmatched invocations succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `subcommand` invocation with `output`.
    pub fn on(self, subcommand: &str, output: CommandOutput) -> Self {
        let sub = subcommand.to_string();
        self.push(
            Box::new(move |inv| inv.subcommand() == Some(sub.as_str())),
            output,
            false,
        )
    }

    /// Answer the next `subcommand` invocation only.
    pub fn on_once(self, subcommand: &str, output: CommandOutput) -> Self {
        let sub = subcommand.to_string();
        self.push(
            Box::new(move |inv| inv.subcommand() == Some(sub.as_str())),
            output,
            true,
        )
    }

    /// Answer `subcommand` invocations whose arguments include `arg`.
    pub fn on_arg(self, subcommand: &str, arg: &str, output: CommandOutput) -> Self {
        let sub = subcommand.to_string();
        let arg = arg.to_string();
        self.push(
            Box::new(move |inv| {
                inv.subcommand() == Some(sub.as_str()) && inv.args.iter().any(|a| a == &arg)
            }),
            output,
            false,
        )
    }

    fn push(self, matcher: Matcher, output: CommandOutput, once: bool) -> Self {
        self.rules.borrow_mut().push(Rule {
            matcher,
            output,
            once,
        });
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, subcommand: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        let mut rules = self.rules.borrow_mut();
        let hit = rules
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rule)| (rule.matcher)(invocation))
            .map(|(pos, rule)| (pos, rule.once, rule.output.clone()));

        match hit {
            Some((pos, once, output)) => {
                if once {
                    rules.remove(pos);
                }
                Ok(output)
            }
            None => Ok(CommandOutput::success("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(sub: &str, rest: &[&str]) -> Invocation {
        let mut args = vec!["-f".to_string(), ".".to_string(), sub.to_string()];
        args.extend(rest.iter().map(|s| s.to_string()));
        Invocation::new("noid", args)
    }

    #[test]
    fn test_newest_rule_wins_and_once_is_consumed() {
        let runner = ScriptedRunner::new()
            .on("mint", CommandOutput::success("id: a"))
            .on_once("mint", CommandOutput::success("id: b"));

        assert_eq!(runner.run(&inv("mint", &["1"])).unwrap().stdout, "id: b");
        assert_eq!(runner.run(&inv("mint", &["1"])).unwrap().stdout, "id: a");
        assert_eq!(runner.calls_to("mint").len(), 2);
    }

    #[test]
    fn test_on_arg_matches_specific_identifier() {
        let runner = ScriptedRunner::new()
            .on("validate", CommandOutput::success("id: ok"))
            .on_arg("validate", "bad/1", CommandOutput::success("iderr: bad/1"));

        assert!(runner
            .run(&inv("validate", &["-", "bad/1"]))
            .unwrap()
            .stdout
            .contains("iderr"));
        assert_eq!(
            runner.run(&inv("validate", &["-", "good/1"])).unwrap().stdout,
            "id: ok"
        );
    }

    #[test]
    fn test_unmatched_defaults_to_empty_success() {
        let runner = ScriptedRunner::new();
        let out = runner.run(&inv("get", &["x"])).unwrap();
        assert!(out.is_success());
        assert!(out.stdout.is_empty());
    }
}

//! Org Service - talks to a connected org through the platform CLI.

use tracing::{info, instrument, warn};

use crate::{application::ports::PlatformCli, error::MetaforgeResult};

/// Printed when an assignment fails; by far the most common cause.
pub const DEPLOY_HINT: &str =
    "Deploy the metadata first (sf project deploy start), then assign again";

/// Result of one permission-set assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentReport {
    pub permission_set: String,
    pub command: String,
    pub success: bool,
    pub output: String,
}

impl AssignmentReport {
    pub fn hint(&self) -> Option<&'static str> {
        (!self.success).then_some(DEPLOY_HINT)
    }
}

pub struct OrgService {
    cli: Box<dyn PlatformCli>,
}

impl OrgService {
    pub fn new(cli: Box<dyn PlatformCli>) -> Self {
        Self { cli }
    }

    /// Assign a permission set to the current user of `target_org` (or the
    /// CLI's default org).
    ///
    /// A zero exit status is not trusted on its own: output mentioning an
    /// error also counts as a failure.
    #[instrument(skip(self))]
    pub fn assign_permission_set(
        &self,
        name: &str,
        target_org: Option<&str>,
    ) -> MetaforgeResult<AssignmentReport> {
        let mut args: Vec<String> = ["org", "assign", "permset", "--name", name]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(org) = target_org {
            args.push("--target-org".into());
            args.push(org.to_string());
        }

        let command = format!("{} {}", self.cli.program(), args.join(" "));
        let output = self.cli.run(&args)?;
        let combined = output.combined();
        let success = output.success && !mentions_error(&combined);

        if success {
            info!(permission_set = name, "Permission set assigned");
        } else {
            warn!(permission_set = name, output = %combined, "Assignment failed");
        }

        Ok(AssignmentReport {
            permission_set: name.to_string(),
            command,
            success,
            output: combined,
        })
    }
}

fn mentions_error(output: &str) -> bool {
    output.to_lowercase().contains("error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CommandOutput, output::MockPlatformCli};
    use crate::application::ApplicationError;

    fn cli_returning(output: CommandOutput) -> MockPlatformCli {
        let mut cli = MockPlatformCli::new();
        cli.expect_program().return_const("sf".to_string());
        cli.expect_run().return_once(move |_| Ok(output));
        cli
    }

    #[test]
    fn builds_assign_command() {
        let mut cli = MockPlatformCli::new();
        cli.expect_program().return_const("sf".to_string());
        cli.expect_run()
            .withf(|args| {
                args.join(" ") == "org assign permset --name Property_Manager --target-org dev"
            })
            .times(1)
            .returning(|_| {
                Ok(CommandOutput {
                    success: true,
                    stdout: "Successfully assigned".into(),
                    stderr: String::new(),
                })
            });

        let report = OrgService::new(Box::new(cli))
            .assign_permission_set("Property_Manager", Some("dev"))
            .unwrap();
        assert!(report.success);
        assert_eq!(
            report.command,
            "sf org assign permset --name Property_Manager --target-org dev"
        );
        assert_eq!(report.hint(), None);
    }

    #[test]
    fn non_zero_exit_fails() {
        let cli = cli_returning(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: "Permission set not found".into(),
        });
        let report = OrgService::new(Box::new(cli))
            .assign_permission_set("Offer_Manager", None)
            .unwrap();
        assert!(!report.success);
        assert_eq!(report.hint(), Some(DEPLOY_HINT));
        assert_eq!(report.command, "sf org assign permset --name Offer_Manager");
    }

    #[test]
    fn error_text_fails_even_on_zero_exit() {
        let cli = cli_returning(CommandOutput {
            success: true,
            stdout: "ERROR running org assign permset".into(),
            stderr: String::new(),
        });
        let report = OrgService::new(Box::new(cli))
            .assign_permission_set("Offer_Manager", None)
            .unwrap();
        assert!(!report.success);
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let mut cli = MockPlatformCli::new();
        cli.expect_program().return_const("sf".to_string());
        cli.expect_run().returning(|_| {
            Err(ApplicationError::ExternalCommand {
                command: "sf".into(),
                reason: "not found".into(),
            }
            .into())
        });
        assert!(
            OrgService::new(Box::new(cli))
                .assign_permission_set("X", None)
                .is_err()
        );
    }
}

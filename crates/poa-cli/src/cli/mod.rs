use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `poa` binary.
#[derive(Debug, Parser)]
#[command(name = "poa", version, about = "POA - annual operational plan client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows for list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{
        ActivityCommands, AuthCommands, CatalogCommands, EvidenceCommands, LineCommands,
        PlanCommands, RecordCommands, UserCommands,
    };
    use super::{Cli, Commands, OutputFormat};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("poa").chain(args.iter().copied()))
            .expect("cli should parse")
    }

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = parse(&["--format", "table", "--limit", "10", "--verbose", "lines", "list"]);
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Lines {
                action: LineCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = parse(&["auth", "status", "--format", "raw", "--quiet"]);
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status { verify: false }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["poa", "--format", "xml", "auth", "status"]).is_err());
    }

    #[test]
    fn shared_record_commands_flatten_into_each_entity() {
        let cli = parse(&["areas", "update", "a1", "--json", r#"{"nombre":"x"}"#]);
        let Commands::Areas {
            action: CatalogCommands::Record(RecordCommands::Update { id, json }),
        } = cli.command
        else {
            panic!("expected areas update");
        };
        assert_eq!(id, "a1");
        assert_eq!(json, r#"{"nombre":"x"}"#);

        let cli = parse(&["lines", "delete", "l1"]);
        assert!(matches!(
            cli.command,
            Commands::Lines {
                action: LineCommands::Record(RecordCommands::Delete { .. })
            }
        ));
    }

    #[test]
    fn activity_commands_nest_under_plans() {
        let cli = parse(&["plans", "activity", "remove", "p1", "a1"]);
        let Commands::Plans {
            action:
                PlanCommands::Activity {
                    action: ActivityCommands::Remove { plan, activity },
                },
        } = cli.command
        else {
            panic!("expected plans activity remove");
        };
        assert_eq!((plan.as_str(), activity.as_str()), ("p1", "a1"));
    }

    #[test]
    fn plans_summary_parses_next_to_record_commands() {
        let cli = parse(&["plans", "summary", "--format", "table"]);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(matches!(
            cli.command,
            Commands::Plans {
                action: PlanCommands::Summary
            }
        ));
        assert!(matches!(
            parse(&["plans", "get", "p1"]).command,
            Commands::Plans {
                action: PlanCommands::Record(RecordCommands::Get { .. })
            }
        ));
    }

    #[test]
    fn evidence_upload_requires_activity_and_plan() {
        assert!(Cli::try_parse_from(["poa", "evidence", "upload", "acta.pdf"]).is_err());
        let cli = parse(&[
            "evidence", "upload", "acta.pdf", "--activity", "a1", "--plan", "p1", "--name", "Acta",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Evidence {
                action: EvidenceCommands::Upload { .. }
            }
        ));
    }

    #[test]
    fn user_role_parses_from_wire_label() {
        let cli = parse(&[
            "users", "create", "ana", "--password", "pw", "--role", "administrador",
        ]);
        let Commands::Users {
            action: UserCommands::Create { role, .. },
        } = cli.command
        else {
            panic!("expected users create");
        };
        assert_eq!(role, poa_core::enums::UserRole::Admin);
    }

    #[test]
    fn password_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "poa",
            "auth",
            "login",
            "ana",
            "--password",
            "pw",
            "--password-stdin",
        ]);
        assert!(parsed.is_err());
    }
}

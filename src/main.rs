use std::io;
use std::io::Write;

use buildinfo::BuildEnv;
use buildinfo::Field;
use buildinfo::Overrides;
use buildinfo::VersionInfo;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// `-V` and `--version` are handled here rather than by clap so that they
/// report the same values as `show`, overrides included.
#[derive(Parser)]
#[command(about, long_about, disable_version_flag = true)]
struct Cli {
    /// Print the short version
    #[arg(short = 'V', action = ArgAction::SetTrue)]
    short_version: bool,

    /// Print the version report
    #[arg(long = "version", action = ArgAction::SetTrue, conflicts_with = "short_version")]
    long_version: bool,

    #[command(flatten)]
    overrides: OverrideArgs,

    #[command(subcommand)]
    commands: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the version report
    Show,
    /// Prints the raw value of a single field
    Field {
        /// The field to print
        name: Field,
    },
}

/// Replaces values compiled into the binary
#[derive(Args)]
struct OverrideArgs {
    #[arg(long, env = "BUILDINFO_OVERRIDE_VERSION", global = true)]
    build_version: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_BUILD_ID", global = true)]
    build_id: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_BUILD_TIME", global = true)]
    build_time: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_CHANGE", global = true)]
    change: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_COMMIT_MSG", global = true)]
    commit_message: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_CURRENT_COMMIT", global = true)]
    current_commit: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_NEW_BUILD_URL", global = true)]
    new_build_url: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_OLD_BUILD_URL", global = true)]
    old_build_url: Option<String>,
    #[arg(long, env = "BUILDINFO_OVERRIDE_TAG", global = true)]
    tag: Option<String>,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Overrides {
            version: args.build_version,
            build_id: args.build_id,
            build_time: args.build_time,
            change: args.change,
            commit_message: args.commit_message,
            current_commit: args.current_commit,
            new_build_url: args.new_build_url,
            old_build_url: args.old_build_url,
            tag: args.tag,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    run(cli, BuildEnv::compiled(), &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

fn run(cli: Cli, compiled: BuildEnv, out: &mut impl Write) -> anyhow::Result<()> {
    let info = compiled.with_overrides(cli.overrides.into()).snapshot();
    tracing::debug!(?info, "effective build info");

    if cli.short_version {
        writeln!(out, "{}", short_version(&info))?;
        return Ok(());
    }
    if cli.long_version {
        write!(out, "{info}")?;
        return Ok(());
    }

    match cli.commands.unwrap_or(Commands::Show) {
        Commands::Show => write!(out, "{info}")?,
        Commands::Field { name } => writeln!(out, "{}", info.get(name))?,
    }

    Ok(())
}

/// `v<version>-<revision>`, or `v<version>` when the revision is unknown.
fn short_version(info: &VersionInfo) -> String {
    if info.revision().is_empty() {
        format!("v{}", info.version())
    } else {
        format!("v{}-{}", info.version(), info.revision())
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn output(args: &[&str], compiled: BuildEnv) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, compiled, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn compiled() -> BuildEnv {
        BuildEnv {
            version: "1.2.3".to_string(),
            current_commit: "abcdef".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn field_names_are_kebab_case() {
        let cli = Cli::try_parse_from(["buildinfo", "field", "new-build-url"]).unwrap();
        assert!(matches!(
            cli.commands,
            Some(Commands::Field {
                name: Field::NewBuildUrl
            })
        ));
    }

    #[test]
    fn override_flags_reach_the_snapshot() {
        let out = output(
            &[
                "buildinfo",
                "show",
                "--build-version",
                "2.0.0",
                "--current-commit",
                "012345",
                "--tag",
                "v2.0.0",
            ],
            compiled(),
        );
        assert_eq!(out, "Version: 2.0.0\nRevision: 012345\nTag: v2.0.0");
    }

    #[test]
    fn show_is_the_default() {
        let out = output(&["buildinfo"], compiled());
        assert_eq!(out, "Version: 1.2.3\nRevision: abcdef\n");
    }

    #[test]
    fn field_prints_raw_value() {
        let out = output(&["buildinfo", "field", "revision"], compiled());
        assert_eq!(out, "abcdef\n");
    }

    #[test]
    fn long_version_matches_show_with_overrides() {
        let args = vec!["buildinfo", "--tag", "x", "--build-id", "7"];
        let shown = output(&[args.clone(), vec!["show"]].concat(), compiled());
        let version = output(&[args, vec!["--version"]].concat(), compiled());

        assert_eq!(version, shown);
        assert_eq!(version, "Version: 1.2.3\nBuild ID: 7\nRevision: abcdef\nTag: x");
    }

    #[test]
    fn short_version_applies_overrides() {
        assert_eq!(output(&["buildinfo", "-V"], compiled()), "v1.2.3-abcdef\n");
        assert_eq!(
            output(&["buildinfo", "--current-commit", "", "-V"], compiled()),
            "v1.2.3\n"
        );
    }

    #[test]
    fn override_env_vars_differ_from_build_keys() {
        let command = Cli::command();
        let envs: Vec<_> = command
            .get_arguments()
            .filter_map(|arg| arg.get_env())
            .map(|env| env.to_string_lossy().into_owned())
            .collect();

        assert_eq!(envs.len(), 9);
        for env in envs {
            assert!(env.starts_with("BUILDINFO_OVERRIDE_"), "{env}");
        }
    }
}

//! Command-line interface for the ghcensus binary.
//!
//! The CLI collects the GitHub users of a city, collects their repositories,
//! and writes the analysis report. Each stage can run on its own against the
//! tables left by the previous one.

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{Args, Parser, Subcommand};
use ghcensus::{
    Error, OctocrabClient, Pacer, Settings, SettingsFile, UserRecord, collect_all_repositories,
    collect_users, generate_report, logins_of, read_logins, top_followers, validate_token,
    verify_token, write_repositories, write_users,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for the city census.
#[derive(Debug, Parser,)]
#[command(name = "ghcensus", version, about = "Census of the GitHub users of a city")]
struct Cli
{
    #[command(subcommand)]
    command: Command,

    /// Path to an optional YAML settings file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf,>,

    /// GitHub personal access token.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String,>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Search the city's users and write the users table.
    Users,
    /// Collect repositories for every login in the users table.
    Repos,
    /// Collect users, then their repositories.
    Scrape,
    /// Analyse both tables and write the report.
    Report,
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Args, Default,)]
struct OverrideArgs
{
    /// City matched against profile locations.
    #[arg(long = "location", value_name = "CITY", global = true)]
    location: Option<String,>,

    /// Location submitted to the search endpoint; repeatable.
    #[arg(long = "search-location", value_name = "LOCATION", global = true)]
    search_locations: Vec<String,>,

    /// Exclusive lower bound on the follower count.
    #[arg(long = "min-followers", value_name = "N", global = true)]
    min_followers: Option<u32,>,

    /// Items requested per page.
    #[arg(long = "page-size", value_name = "N", global = true)]
    page_size: Option<u32,>,

    /// Upper bound on repositories collected per user.
    #[arg(long = "max-repositories", value_name = "N", global = true)]
    max_repositories: Option<usize,>,

    /// Pause between requests in milliseconds.
    #[arg(long = "delay-ms", value_name = "MS", global = true)]
    delay_ms: Option<u64,>,

    /// Users table path.
    #[arg(long = "users", value_name = "PATH", global = true)]
    users_path: Option<PathBuf,>,

    /// Repositories table path.
    #[arg(long = "repositories", value_name = "PATH", global = true)]
    repositories_path: Option<PathBuf,>,

    /// Report path.
    #[arg(long = "report", value_name = "PATH", global = true)]
    report_path: Option<PathBuf,>,
}

impl OverrideArgs
{
    fn into_settings_file(self,) -> SettingsFile
    {
        SettingsFile {
            location:          self.location,
            search_locations:  (!self.search_locations.is_empty()).then_some(self.search_locations,),
            min_followers:     self.min_followers,
            page_size:         self.page_size,
            max_repositories:  self.max_repositories,
            request_delay_ms:  self.delay_ms,
            users_path:        self.users_path,
            repositories_path: self.repositories_path,
            report_path:       self.report_path,
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        report_failure(&mut io::stderr(), &error,);
        process::exit(1,);
    }
}

/// Writes a fatal error as a single line.
fn report_failure<W,>(out: &mut W, error: &Error,)
where
    W: io::Write,
{
    let _ = writeln!(out, "{}", error.to_display_string());
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    let _ = tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).try_init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates settings, credential, table and report errors.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let settings = resolve_settings(cli.config.as_deref(), cli.overrides,)?;
    let token = cli.token.as_deref();

    match cli.command {
        Command::Users => run_users(&settings, token,).await.map(|_| (),),
        Command::Repos => run_repos(&settings, token,).await,
        Command::Scrape => run_scrape(&settings, token,).await,
        Command::Report => run_report(&settings,),
    }
}

fn resolve_settings(config: Option<&Path,>, overrides: OverrideArgs,) -> Result<Settings, Error,>
{
    let file = match config {
        Some(path,) => SettingsFile::load(path,)?,
        None => SettingsFile::default(),
    };
    file.overlay(overrides.into_settings_file(),).resolve()
}

async fn connect(token: Option<&str,>,) -> Result<OctocrabClient, Error,>
{
    let token = validate_token(token,)?;
    let client = OctocrabClient::new(token.expose(),)?;
    verify_token(&client,).await?;
    Ok(client,)
}

async fn run_users(settings: &Settings, token: Option<&str,>,) -> Result<Vec<UserRecord,>, Error,>
{
    let client = connect(token,).await?;
    let pacer = Pacer::new(settings.request_delay,);

    let users = collect_users(&client, settings, &pacer,).await;
    write_users(&settings.users_path, &users,)?;
    println!("Total users: {}", users.len());

    Ok(users,)
}

async fn run_repos(settings: &Settings, token: Option<&str,>,) -> Result<(), Error,>
{
    let logins = read_logins(&settings.users_path,)?;
    info!("Loaded {} logins from {}", logins.len(), settings.users_path.display());

    let client = connect(token,).await?;
    let pacer = Pacer::new(settings.request_delay,);

    let repositories = collect_all_repositories(&client, &logins, settings, &pacer,).await;
    write_repositories(&settings.repositories_path, &repositories,)?;
    println!("Total repositories: {}", repositories.len());

    Ok((),)
}

async fn run_scrape(settings: &Settings, token: Option<&str,>,) -> Result<(), Error,>
{
    let client = connect(token,).await?;
    let pacer = Pacer::new(settings.request_delay,);

    let users = collect_users(&client, settings, &pacer,).await;
    if users.is_empty() {
        println!("No users found.");
        return Ok((),);
    }
    write_users(&settings.users_path, &users,)?;

    let repositories = collect_all_repositories(&client, &logins_of(&users,), settings, &pacer,).await;
    write_repositories(&settings.repositories_path, &repositories,)?;

    print!("{}", scrape_summary(&users, repositories.len(),));
    Ok((),)
}

/// Totals followed by the five most followed users.
fn scrape_summary(users: &[UserRecord], repositories: usize,) -> String
{
    let mut summary =
        format!("Total users: {}\nTotal repositories: {repositories}\n", users.len());
    for login in top_followers(users,) {
        if let Some(user,) = users.iter().find(|user| user.login == login,) {
            summary.push_str(&format!(
                "{}\tfollowers={}\tpublic_repos={}\n",
                user.login, user.followers, user.public_repos
            ),);
        }
    }
    summary
}

fn run_report(settings: &Settings,) -> Result<(), Error,>
{
    let report = generate_report(
        &settings.location,
        &settings.users_path,
        &settings.repositories_path,
        &settings.report_path,
    )?;
    print!("{}", report.render());
    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path, time::Duration};

    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use ghcensus::{UserRecord, write_repositories, write_users};
    use tempfile::tempdir;

    use super::{
        Cli, Command, OverrideArgs, report_failure, resolve_settings, run_report, scrape_summary,
    };

    fn user(login: &str, followers: u64,) -> UserRecord
    {
        UserRecord {
            login:        login.to_owned(),
            name:         None,
            company:      String::new(),
            location:     "Basel".to_owned(),
            email:        None,
            hireable:     String::new(),
            bio:          None,
            public_repos: 1,
            followers,
            following:    0,
            created_at:   Utc.with_ymd_and_hms(2016, 5, 1, 0, 0, 0,).unwrap(),
        }
    }

    #[test]
    fn cli_parses_subcommand_with_global_overrides()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "scrape",
            "--location",
            "Zurich",
            "--search-location",
            "Zurich",
            "--search-location",
            "Zürich",
            "--token",
            "ghp_example",
        ],)
        .expect("failed to parse CLI",);

        assert!(matches!(cli.command, Command::Scrape));
        assert_eq!(cli.token.as_deref(), Some("ghp_example"));
        assert_eq!(cli.overrides.location.as_deref(), Some("Zurich"));
        assert_eq!(cli.overrides.search_locations, vec!["Zurich", "Zürich"]);
    }

    #[test]
    fn cli_requires_a_subcommand()
    {
        assert!(Cli::try_parse_from([env!("CARGO_PKG_NAME")],).is_err());
    }

    #[test]
    fn overrides_take_precedence_over_settings_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config = temp.path().join("settings.yaml",);
        fs::write(&config, "location: Bern\nmin_followers: 50\nrequest_delay_ms: 250\n",)
            .expect("failed to write config",);
        let overrides = OverrideArgs {
            min_followers: Some(5,),
            ..OverrideArgs::default()
        };

        let settings = resolve_settings(Some(config.as_path(),), overrides,).expect("valid settings",);

        assert_eq!(settings.location, "Bern");
        assert_eq!(settings.search_locations, vec!["Bern"]);
        assert_eq!(settings.min_followers, 5);
        assert_eq!(settings.request_delay, Duration::from_millis(250));
    }

    #[test]
    fn invalid_page_size_is_rejected()
    {
        let overrides = OverrideArgs {
            page_size: Some(101,),
            ..OverrideArgs::default()
        };

        let error = resolve_settings(None, overrides,).expect_err("expected validation error",);
        assert!(matches!(error, ghcensus::Error::Validation { .. }));
    }

    #[test]
    fn fatal_error_is_written_once()
    {
        let mut out = Vec::new();

        report_failure(&mut out, &ghcensus::Error::validation("location cannot be empty",),);

        let text = String::from_utf8(out,).expect("utf-8 output",);
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
        assert!(text.contains("location cannot be empty"));
    }

    #[test]
    fn scrape_summary_lists_top_followers()
    {
        let users = vec![user("low", 3,), user("high", 90,), user("mid", 20,)];

        let summary = scrape_summary(&users, 7,);

        let lines: Vec<&str,> = summary.lines().collect();
        assert_eq!(lines[0], "Total users: 3");
        assert_eq!(lines[1], "Total repositories: 7");
        assert!(lines[2].starts_with("high\tfollowers=90"));
        assert!(lines[4].starts_with("low\t"));
    }

    #[test]
    fn report_command_writes_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let overrides = OverrideArgs {
            users_path: Some(temp.path().join("users.csv",),),
            repositories_path: Some(temp.path().join("repositories.csv",),),
            report_path: Some(temp.path().join("analysis.txt",),),
            ..OverrideArgs::default()
        };
        let settings = resolve_settings(None, overrides,).expect("valid settings",);
        write_users(&settings.users_path, &[user("amy", 5,)],).expect("write users",);
        write_repositories(&settings.repositories_path, &[],).expect("write repositories",);

        run_report(&settings,).expect("report failed",);

        let text = fs::read_to_string(Path::new(&settings.report_path,),).expect("read report",);
        assert!(text.starts_with("Basel GitHub Users Analysis\n"));
    }
}

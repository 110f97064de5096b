//! Command-line argument parsing for the Blueprint CLI.

use thiserror::Error;

use crate::api::StudioSort;
use crate::models::{CreatePostInput, CreateStudioInput, User};
use crate::screens::FeedFilter;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Trending items, projects and studios
    Home,
    /// Dashboard content column for one filter
    Dashboard { filter: FeedFilter },
    /// One page of the studios listing
    Studios {
        search: String,
        sort: StudioSort,
        page: u32,
    },
    /// Publish a post
    Post(CreatePostInput),
    /// Create a studio
    Studio(CreateStudioInput),
    /// Store a session issued elsewhere
    Login { token: String, user: User },
    /// Clear the stored session
    Logout,
}

impl CliCommand {
    /// Whether the command sits behind the auth gate.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            CliCommand::Dashboard { .. }
                | CliCommand::Studios { .. }
                | CliCommand::Post(_)
                | CliCommand::Studio(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option {0} needs a value")]
    MissingValue(&'static str),
    #[error("missing required option {0}")]
    MissingRequired(&'static str),
    #[error("invalid value for {flag}: {message}")]
    InvalidValue { flag: &'static str, message: String },
}

pub const USAGE: &str = "\
Usage: blueprint <command> [options]

Commands:
  home                                 Trending items, projects and studios
  dashboard [--filter trending|latest|following]
  studios [--search Q] [--sort popular|newest|oldest] [--page N]
  post --content C [--title T] [--studio ID]
  studio --name N --description D [--category C] [--rules R] [--private]
  login --token T --user JSON
  logout

Options:
  -V, --version                        Show version
  -h, --help                           Show this message";

/// Parse command-line arguments (including the program name) into a
/// command.
///
/// # Examples
///
/// ```
/// use blueprint::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["blueprint".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match command.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "home" => {
            expect_no_options(&mut args)?;
            Ok(CliCommand::Home)
        }
        "dashboard" => parse_dashboard(&mut args),
        "studios" => parse_studios(&mut args),
        "post" => parse_post(&mut args),
        "studio" => parse_studio(&mut args),
        "login" => parse_login(&mut args),
        "logout" => {
            expect_no_options(&mut args)?;
            Ok(CliCommand::Logout)
        }
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &'static str) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue(flag))
}

fn expect_no_options<I: Iterator<Item = String>>(args: &mut I) -> Result<(), ArgsError> {
    match args.next() {
        Some(arg) => Err(ArgsError::UnknownOption(arg)),
        None => Ok(()),
    }
}

fn parse_dashboard<I: Iterator<Item = String>>(args: &mut I) -> Result<CliCommand, ArgsError> {
    let mut filter = FeedFilter::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--filter" | "-f" => {
                filter = value(args, "--filter")?
                    .parse::<FeedFilter>()
                    .map_err(|message| ArgsError::InvalidValue {
                        flag: "--filter",
                        message,
                    })?;
            }
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }
    Ok(CliCommand::Dashboard { filter })
}

fn parse_studios<I: Iterator<Item = String>>(args: &mut I) -> Result<CliCommand, ArgsError> {
    let mut search = String::new();
    let mut sort = StudioSort::default();
    let mut page = 1;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--search" | "-s" => search = value(args, "--search")?,
            "--sort" => {
                sort = value(args, "--sort")?
                    .parse::<StudioSort>()
                    .map_err(|message| ArgsError::InvalidValue {
                        flag: "--sort",
                        message,
                    })?;
            }
            "--page" | "-p" => {
                let raw = value(args, "--page")?;
                page = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .ok_or_else(|| ArgsError::InvalidValue {
                        flag: "--page",
                        message: format!("expected a page number, got '{}'", raw),
                    })?;
            }
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }
    Ok(CliCommand::Studios { search, sort, page })
}

fn parse_post<I: Iterator<Item = String>>(args: &mut I) -> Result<CliCommand, ArgsError> {
    let mut input = CreatePostInput::default();
    let mut content = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--content" | "-c" => content = Some(value(args, "--content")?),
            "--title" | "-t" => input.title = Some(value(args, "--title")?),
            "--studio" => input.studio_id = Some(value(args, "--studio")?),
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }
    input.content = content.ok_or(ArgsError::MissingRequired("--content"))?;
    Ok(CliCommand::Post(input))
}

fn parse_studio<I: Iterator<Item = String>>(args: &mut I) -> Result<CliCommand, ArgsError> {
    let mut input = CreateStudioInput::default();
    let mut name = None;
    let mut description = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--name" | "-n" => name = Some(value(args, "--name")?),
            "--description" | "-d" => description = Some(value(args, "--description")?),
            "--slug" => input.slug = Some(value(args, "--slug")?),
            "--category" => input.category = Some(value(args, "--category")?),
            "--rules" => input.studio_rules = Some(value(args, "--rules")?),
            "--private" => input.is_private = Some(true),
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }
    input.name = name.ok_or(ArgsError::MissingRequired("--name"))?;
    input.description = description.ok_or(ArgsError::MissingRequired("--description"))?;
    Ok(CliCommand::Studio(input))
}

fn parse_login<I: Iterator<Item = String>>(args: &mut I) -> Result<CliCommand, ArgsError> {
    let mut token = None;
    let mut user = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--token" => token = Some(value(args, "--token")?),
            "--user" => {
                let raw = value(args, "--user")?;
                let parsed: User =
                    serde_json::from_str(&raw).map_err(|e| ArgsError::InvalidValue {
                        flag: "--user",
                        message: e.to_string(),
                    })?;
                user = Some(parsed);
            }
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }
    Ok(CliCommand::Login {
        token: token.ok_or(ArgsError::MissingRequired("--token"))?,
        user: user.ok_or(ArgsError::MissingRequired("--user"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut all = vec!["blueprint".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_no_args_shows_help() {
        assert_eq!(parse(&[]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_dashboard_filter() {
        assert_eq!(
            parse(&["dashboard"]),
            Ok(CliCommand::Dashboard {
                filter: FeedFilter::Trending
            })
        );
        assert_eq!(
            parse(&["dashboard", "--filter", "latest"]),
            Ok(CliCommand::Dashboard {
                filter: FeedFilter::Latest
            })
        );
        assert!(matches!(
            parse(&["dashboard", "--filter", "hot"]),
            Err(ArgsError::InvalidValue { flag: "--filter", .. })
        ));
    }

    #[test]
    fn test_parse_studios_options() {
        assert_eq!(
            parse(&["studios", "--search", "timber", "--sort", "newest", "--page", "3"]),
            Ok(CliCommand::Studios {
                search: "timber".to_string(),
                sort: StudioSort::Newest,
                page: 3,
            })
        );
        assert!(parse(&["studios", "--page", "0"]).is_err());
        assert_eq!(
            parse(&["studios", "--page"]),
            Err(ArgsError::MissingValue("--page"))
        );
    }

    #[test]
    fn test_parse_post_requires_content() {
        assert_eq!(
            parse(&["post", "--title", "Hi"]),
            Err(ArgsError::MissingRequired("--content"))
        );
        assert_eq!(
            parse(&["post", "--content", "Hello", "--studio", "s1"]),
            Ok(CliCommand::Post(CreatePostInput {
                content: "Hello".to_string(),
                title: None,
                studio_id: Some("s1".to_string()),
            }))
        );
    }

    #[test]
    fn test_parse_private_studio() {
        let command = parse(&["studio", "--name", "Arch", "--description", "d", "--private"]);
        match command {
            Ok(CliCommand::Studio(input)) => {
                assert_eq!(input.name, "Arch");
                assert_eq!(input.is_private, Some(true));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_login_user_json() {
        let command = parse(&[
            "login",
            "--token",
            "abc123",
            "--user",
            r#"{"id": 1, "username": "ando", "email": "ando@example.com"}"#,
        ])
        .unwrap();
        match command {
            CliCommand::Login { token, user } => {
                assert_eq!(token, "abc123");
                assert_eq!(user.id, "1");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            parse(&["login", "--token", "t", "--user", "{"]),
            Err(ArgsError::InvalidValue { flag: "--user", .. })
        ));
    }

    #[test]
    fn test_parse_unknown_input() {
        assert_eq!(
            parse(&["jobs"]),
            Err(ArgsError::UnknownCommand("jobs".to_string()))
        );
        assert_eq!(
            parse(&["home", "--verbose"]),
            Err(ArgsError::UnknownOption("--verbose".to_string()))
        );
    }

    #[test]
    fn test_protected_commands() {
        assert!(!CliCommand::Home.is_protected());
        assert!(!CliCommand::Logout.is_protected());
        assert!(CliCommand::Dashboard {
            filter: FeedFilter::Latest
        }
        .is_protected());
    }
}

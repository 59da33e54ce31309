use crate::DatabaseKind;

use clap::Parser;
use std::path::PathBuf;

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" sql-admin"#;
const EX2: &str = r#" sql-admin my-shop.db"#;
const EX3: &str = r#" sql-admin --engine mysql"#;
const EX4: &str = r#" sql-admin -e oracle"#;

/// Command-line arguments for the SQL Admin application.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles=get_styles(),
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}\n{EX3}\n{EX4}")
)]
pub struct Arguments {
    /// Database engine to connect to at startup. [Default: sqlite]
    #[arg(
        short = 'e',
        long,
        value_enum,
        default_value = "sqlite",
        help = "Database engine to connect to at startup",
        long_help = "Selects the database engine.\n\
        MySQL and Oracle use the connection parameters compiled into the binary.\n\
        Picking an engine that was excluded at build time reports a status\n\
        message at startup instead of connecting."
    )]
    pub engine: DatabaseKind,

    /// Optional path to the SQLite database file.
    #[arg(
        value_name = "DB_PATH",
        default_value = "database.db",
        required = false,
        help = "Path to the SQLite database file [Optional]",
        long_help = "Path to the SQLite database file.\n\
        Created on first use if it does not exist. Ignored by the other engines."
    )]
    pub path: PathBuf,
}

impl Arguments {
    /// Build `Arguments` struct.
    pub fn build() -> Arguments {
        Arguments::parse()
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_args`
#[cfg(test)]
mod tests_args {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Arguments::parse_from(["sql-admin"]);

        assert_eq!(args.engine, DatabaseKind::Sqlite);
        assert_eq!(args.path, PathBuf::from("database.db"));
    }

    #[test]
    fn test_args_sqlite_path_is_positional() {
        let args = Arguments::parse_from(["sql-admin", "my-shop.db"]);

        assert_eq!(args.engine, DatabaseKind::Sqlite);
        assert_eq!(args.path, PathBuf::from("my-shop.db"));
    }

    #[test]
    fn test_args_engine_long_flag() {
        let args = Arguments::parse_from(["sql-admin", "--engine", "mysql"]);

        assert_eq!(args.engine, DatabaseKind::Mysql);
        // The path keeps its default even when it will not be used.
        assert_eq!(args.path, PathBuf::from("database.db"));
    }

    #[test]
    fn test_args_engine_short_flag_with_path() {
        let args = Arguments::parse_from(["sql-admin", "-e", "sqlite", "other.db"]);

        assert_eq!(args.engine, DatabaseKind::Sqlite);
        assert_eq!(args.path, PathBuf::from("other.db"));
    }

    #[test]
    fn test_args_engine_oracle() {
        let args = Arguments::parse_from(["sql-admin", "-e", "oracle"]);

        assert_eq!(args.engine, DatabaseKind::Oracle);
    }

    #[test]
    fn test_args_unknown_engine_is_rejected() {
        let result = Arguments::try_parse_from(["sql-admin", "--engine", "postgres"]);

        assert!(result.is_err());
    }
}

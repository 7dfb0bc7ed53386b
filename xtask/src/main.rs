// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the Earthen workspace.
//!
//! `cargo test` runs everything against `SQLite` and needs no services.
//! The hosted `MySQL`/`MariaDB` backend is checked only on request:
//!
//! - `cargo xtask test-mariadb` starts a throwaway `MariaDB` container and
//!   runs the ignored `backend_validation_tests` of `earthen-persistence`
//!   against it.
//! - `cargo xtask verify-migrations` applies both migration sets and fails
//!   if the resulting tables and columns differ.
//!
//! Containers are removed when the command finishes, pass or fail.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeMap;
use std::io;
use std::process::Output;
use std::thread::sleep;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::Text;
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting and clippy
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run backend validation tests against a `MariaDB` container
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Check that the `SQLite` and `MySQL` migrations build the same schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test). The `MariaDB` checks need Docker and
/// are left to their own commands.
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_format()?;
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

/// Run lib and doc tests for the workspace's default packages
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])?;
    run_cargo(vec!["test", "--doc", "--all-features"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// A `MariaDB` 11 container that is stopped and removed when dropped.
struct MariaDb {
    name: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: u16,
}

impl MariaDb {
    const READY_ATTEMPTS: u32 = 30;

    /// Starts the container, replacing any leftover one with the same name,
    /// and waits until it accepts queries.
    fn start(
        name: &'static str,
        database: &'static str,
        password: &'static str,
        port: u16,
    ) -> Result<Self> {
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container: Self = Self {
            name,
            database,
            user: "earthen",
            password,
            port,
        };
        container.remove();

        tracing::info!("Starting MariaDB container: {}", container.name);
        cmd!(
            "docker",
            "run",
            "--name",
            container.name,
            "-e",
            format!("MARIADB_DATABASE={}", container.database),
            "-e",
            format!("MARIADB_USER={}", container.user),
            "-e",
            format!("MARIADB_PASSWORD={}", container.password),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{}:3306", container.port),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        container.wait_until_ready()?;
        Ok(container)
    }

    fn wait_until_ready(&self) -> Result<()> {
        tracing::info!("Waiting for MariaDB to be ready...");
        for attempt in 1..=Self::READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {}/{}", attempt, Self::READY_ATTEMPTS);

            let probe = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if probe.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    /// Connection URL without the password, which travels as the auth token.
    fn url(&self) -> String {
        format!(
            "mysql://{}@127.0.0.1:{}/{}",
            self.user, self.port, self.database
        )
    }

    fn url_with_password(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(&self) {
        let _ = cmd!("docker", "stop", self.name)
            .stdout_null()
            .stderr_null()
            .run();
        let _ = cmd!("docker", "rm", self.name)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for MariaDb {
    fn drop(&mut self) {
        tracing::info!("Removing MariaDB container: {}", self.name);
        self.remove();
    }
}

/// Run the ignored backend validation tests against `MariaDB`.
///
/// The tests read `DATABASE_URL` and `DATABASE_AUTH_TOKEN` the same way the
/// server does, and refuse to run unless `EARTHEN_TEST_BACKEND=mariadb`.
/// Requires Docker and a free port 3307.
fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");
    let container: MariaDb =
        MariaDb::start("earthen-test-mariadb", "earthen_test", "test_password", 3307)?;

    tracing::info!("Running MariaDB backend validation tests");
    cmd!(
        "cargo",
        "test",
        "--package",
        "earthen-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.url())
    .env("DATABASE_AUTH_TOKEN", container.password)
    .env("EARTHEN_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// One column as reported by a backend's catalog.
#[derive(Debug, QueryableByName)]
struct CatalogColumn {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    column_type: String,
    #[diesel(sql_type = Text)]
    is_nullable: String,
}

/// Column shape compared across backends.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnShape {
    family: &'static str,
    nullable: bool,
}

type Schema = BTreeMap<String, BTreeMap<String, ColumnShape>>;

const SQLITE_COLUMNS: &str = r#"
    SELECT m.name AS table_name,
           p.name AS column_name,
           p.type AS column_type,
           CASE WHEN p."notnull" = 1 OR p.pk > 0 THEN 'NO' ELSE 'YES' END AS is_nullable
    FROM sqlite_master m
    JOIN pragma_table_info(m.name) p
    WHERE m.type = 'table'
      AND m.name NOT LIKE 'sqlite_%'
      AND m.name != '__diesel_schema_migrations'
"#;

const MYSQL_COLUMNS: &str = r"
    SELECT CAST(TABLE_NAME AS CHAR) AS table_name,
           CAST(COLUMN_NAME AS CHAR) AS column_name,
           CAST(DATA_TYPE AS CHAR) AS column_type,
           CAST(IS_NULLABLE AS CHAR) AS is_nullable
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE()
      AND TABLE_NAME != '__diesel_schema_migrations'
";

/// Collapses backend type names into the families the persistence layer
/// actually distinguishes.
fn type_family(column_type: &str) -> &'static str {
    let lower: String = column_type.to_ascii_lowercase();
    if lower.contains("int") {
        "integer"
    } else if lower.contains("char") || lower.contains("text") || lower.contains("clob") {
        "text"
    } else if lower.contains("real") || lower.contains("double") || lower.contains("float") {
        "real"
    } else if lower.contains("blob") || lower.contains("binary") {
        "blob"
    } else {
        "other"
    }
}

fn to_schema(columns: Vec<CatalogColumn>) -> Schema {
    let mut schema: Schema = Schema::new();
    for column in columns {
        schema.entry(column.table_name).or_default().insert(
            column.column_name,
            ColumnShape {
                family: type_family(&column.column_type),
                nullable: column.is_nullable.eq_ignore_ascii_case("YES"),
            },
        );
    }
    schema
}

/// Lists every difference between the two schemas.
fn schema_differences(sqlite: &Schema, mysql: &Schema) -> Vec<String> {
    let mut differences: Vec<String> = Vec::new();

    for table in sqlite.keys().filter(|t| !mysql.contains_key(*t)) {
        differences.push(format!("table '{table}' exists only in SQLite"));
    }
    for table in mysql.keys().filter(|t| !sqlite.contains_key(*t)) {
        differences.push(format!("table '{table}' exists only in MySQL"));
    }

    for (table, sqlite_columns) in sqlite {
        let Some(mysql_columns) = mysql.get(table) else {
            continue;
        };
        for (column, sqlite_shape) in sqlite_columns {
            match mysql_columns.get(column) {
                None => differences.push(format!("{table}.{column} exists only in SQLite")),
                Some(mysql_shape) if mysql_shape != sqlite_shape => differences.push(format!(
                    "{table}.{column}: SQLite {sqlite_shape:?} vs MySQL {mysql_shape:?}"
                )),
                Some(_) => {}
            }
        }
        for column in mysql_columns.keys().filter(|c| !sqlite_columns.contains_key(*c)) {
            differences.push(format!("{table}.{column} exists only in MySQL"));
        }
    }

    differences
}

/// Apply both migration sets and compare the resulting tables and columns.
///
/// Requires Docker and a free port 3308.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting schema parity verification");
    let container: MariaDb = MariaDb::start(
        "earthen-verify-migrations",
        "earthen_verify",
        "verify_password",
        3308,
    )?;

    tracing::info!("Applying SQLite migrations");
    let mut sqlite_conn: SqliteConnection = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    tracing::info!("Applying MySQL migrations");
    let mut mysql_conn: MysqlConnection =
        MysqlConnection::establish(&container.url_with_password())
            .wrap_err("Failed to connect to MariaDB")?;
    mysql_conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_schema: Schema = to_schema(
        diesel::sql_query(SQLITE_COLUMNS)
            .load::<CatalogColumn>(&mut sqlite_conn)
            .wrap_err("Failed to read SQLite catalog")?,
    );
    let mysql_schema: Schema = to_schema(
        diesel::sql_query(MYSQL_COLUMNS)
            .load::<CatalogColumn>(&mut mysql_conn)
            .wrap_err("Failed to read MySQL catalog")?,
    );

    let differences: Vec<String> = schema_differences(&sqlite_schema, &mysql_schema);
    if differences.is_empty() {
        tracing::info!(
            tables = sqlite_schema.len(),
            "Schema parity verification passed"
        );
        return Ok(());
    }

    for difference in &differences {
        tracing::error!("{difference}");
    }
    Err(eyre!(
        "Schema mismatch: {} difference(s) between SQLite and MySQL migrations",
        differences.len()
    ))
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}

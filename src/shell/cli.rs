use clap::{Parser, Subcommand, ValueEnum};

use crate::screens::form::FormField;
use crate::theme::ColorScheme;

#[derive(Debug, Parser)]
#[command(name = "expease", version, about = "Browse and share company interview experiences")]
pub struct Cli {
    /// Backend base url, overriding config.toml and EXPEASE_API_BASE.
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Colour scheme to start with.
    #[arg(long, global = true, value_enum)]
    pub scheme: Option<SchemeArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every experience, optionally filtered by company, college or year.
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Interactive search: each line typed replaces the query.
    Browse,
    /// Experiences for one company.
    Company { name: String },
    /// A single experience.
    Show { id: String },
    /// Featured companies.
    Companies,
    /// Describe the submit form's fields.
    Fields,
    /// Submit a new experience, e.g. `--set companyName=TCS`.
    Submit {
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(FormField, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(FormField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = key.trim().parse::<FormField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_submit_assignments() {
        let cli = Cli::try_parse_from([
            "expease",
            "submit",
            "--set",
            "companyName=Tata Consultancy",
            "--set",
            "yearOfHiring=2021",
        ])
        .unwrap();
        let Command::Submit { values } = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(
            values,
            vec![
                (FormField::CompanyName, "Tata Consultancy".to_string()),
                (FormField::YearOfHiring, "2021".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Cli::try_parse_from(["expease", "submit", "--set", "salary=1"]).is_err());
        assert!(Cli::try_parse_from(["expease", "submit", "--set", "companyName"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["expease", "list", "-q", "tcs", "--scheme", "dark"]).unwrap();
        assert!(matches!(cli.scheme, Some(SchemeArg::Dark)));
        assert!(matches!(cli.command, Command::List { ref query } if query == "tcs"));
    }
}

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Back-office client for the MedDist catalogue", long_about = None)]
pub struct Cli {
    /// TOML configuration file (default: meddist.toml, optional).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. "http://localhost:3003".
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Sign-in endpoint relative to the API URL, e.g. "auth/login".
    #[arg(long, global = true, value_name = "PATH")]
    pub login_path: Option<String>,

    /// JSON log lines (`--features json-logs`).
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "meddist=debug").
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub resource: Resource,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Resource {
    /// Sign in and print the access token.
    Login(LoginArgs),
    /// Catalogue products.
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    /// Product categories.
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Sales channels.
    Channels {
        #[command(subcommand)]
        command: ChannelCommand,
    },
    /// Stock locations.
    Locations {
        #[command(subcommand)]
        command: LocationCommand,
    },
}

#[derive(Args, Clone)]
pub struct LoginArgs {
    /// Email or CPF.
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    /// Ask the backend for a long-lived session.
    #[arg(long, action = ArgAction::SetTrue)]
    pub remember_me: bool,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("username", &self.username)
            .field("remember_me", &self.remember_me)
            .finish_non_exhaustive()
    }
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only products in this category id.
        #[arg(long, value_name = "ID")]
        category: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    Update {
        id: String,

        #[command(flatten)]
        fields: ProductFields,
    },
}

/// On update, omitted fields keep their stored value.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    /// Price as "1.234,56".
    #[arg(long)]
    pub price: Option<String>,

    /// Category id; replaces the current selection.
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<String>,

    /// Image file to upload; repeatable.
    #[arg(long = "image", value_name = "FILE")]
    pub images: Vec<PathBuf>,

    /// Position of a current image to drop; repeatable.
    #[arg(long = "remove-image", value_name = "INDEX")]
    pub remove_images: Vec<usize>,

    /// Position of the primary image after the edits (default: first).
    #[arg(long, value_name = "INDEX")]
    pub primary: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
    Create {
        #[command(flatten)]
        fields: CategoryFields,
    },
    Update {
        id: String,

        #[command(flatten)]
        fields: CategoryFields,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Parent category id; an empty value clears it.
    #[arg(long, value_name = "ID")]
    pub parent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ChannelCommand {
    List,
    Show {
        id: String,
    },
    Create {
        #[command(flatten)]
        fields: ChannelFields,
    },
    Update {
        id: String,

        #[command(flatten)]
        fields: ChannelFields,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChannelFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LocationCommand {
    List,
    Show {
        id: String,
    },
    Create {
        #[command(flatten)]
        fields: LocationFields,
    },
    Update {
        id: String,

        #[command(flatten)]
        fields: LocationFields,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LocationFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub capacity: Option<i64>,

    #[arg(long)]
    pub cep: Option<String>,

    /// Street name.
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub number: Option<String>,

    #[arg(long)]
    pub complement: Option<String>,

    #[arg(long)]
    pub neighborhood: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Two-letter UF code, e.g. "SP".
    #[arg(long)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, ProductCommand, Resource};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_login() {
        let cli = Cli::try_parse_from([
            "meddist",
            "--login-path",
            "auth/login",
            "login",
            "--username",
            "ana@meddist.com.br",
            "--password",
            "s3nha",
            "--remember-me",
        ])
        .unwrap();
        assert_eq!(cli.login_path.as_deref(), Some("auth/login"));
        let Resource::Login(args) = cli.resource else {
            panic!("expected login");
        };
        assert_eq!(args.username, "ana@meddist.com.br");
        assert!(args.remember_me);
        assert!(!format!("{args:?}").contains("s3nha"));
    }

    #[test]
    fn parses_product_update_edits() {
        let cli = Cli::try_parse_from([
            "meddist",
            "--api-url",
            "http://127.0.0.1:3003",
            "products",
            "update",
            "p1",
            "--price",
            "10,00",
            "--image",
            "a.png",
            "--remove-image",
            "0",
            "--primary",
            "1",
        ])
        .unwrap();
        let Resource::Products {
            command: ProductCommand::Update { id, fields },
        } = cli.resource
        else {
            panic!("expected a product update");
        };
        assert_eq!(id, "p1");
        assert_eq!(fields.price.as_deref(), Some("10,00"));
        assert_eq!(fields.remove_images, [0]);
        assert_eq!(fields.primary, Some(1));
    }
}

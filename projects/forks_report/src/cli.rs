use clap::Parser;

/// Lists the most recently pushed forks of a GitHub repository and the
/// branches each fork carries that the origin repository does not.
#[derive(Parser, Debug)]
#[command(
    name = "forks-report",
    about = "List forks of a GitHub repository and their interesting branches",
    after_help = "Avoid API limits by placing a Personal Access Token in ./.ghtoken with the\n\
                  format <username>:<token>\n\
                  Create one here: https://github.com/settings/tokens"
)]
pub struct Cli {
    /// Owner of the origin repository
    pub username: String,

    /// Name of the origin repository
    pub repo: String,

    /// Maximum number of forks to report, most recently pushed first
    #[arg(default_value_t = 32)]
    pub max_forks: usize,
}

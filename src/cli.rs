//! Command-line interface definitions for chapter_feeds.

use clap::Parser;

/// Command-line arguments.
///
/// The positional pair selects what to fetch: a provider id (conventionally
/// the source site's domain) and the source-specific work identifier.
///
/// # Examples
///
/// ```sh
/// # Print a feed to stdout
/// chapter_feeds urasunday.com 1234
///
/// # Write it to a file instead
/// chapter_feeds storia.takeshobo.co.jp yozakura -o yozakura.xml
///
/// # Sources with their own feeds print a redirect target
/// chapter_feeds web-ace.jp youngace:contents-123
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Provider id, e.g. "urasunday.com"
    #[arg(required_unless_present = "list")]
    pub provider: Option<String>,

    /// Source-specific work identifier (a path segment, work code, or
    /// "<section>:<id>" pair depending on the provider)
    #[arg(required_unless_present = "list")]
    pub work_id: Option<String>,

    /// Write the feed document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// List supported provider ids and exit
    #[arg(long)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&["chapter_feeds", "urasunday.com", "1234"]);

        assert_eq!(cli.provider.as_deref(), Some("urasunday.com"));
        assert_eq!(cli.work_id.as_deref(), Some("1234"));
        assert_eq!(cli.output, None);
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_output_flag() {
        let cli = Cli::parse_from(&[
            "chapter_feeds",
            "storia.takeshobo.co.jp",
            "yozakura",
            "-o",
            "/tmp/feed.xml",
        ]);

        assert_eq!(cli.output.as_deref(), Some("/tmp/feed.xml"));
    }

    #[test]
    fn test_cli_list_needs_no_positionals() {
        let cli = Cli::parse_from(&["chapter_feeds", "--list"]);

        assert!(cli.list);
        assert_eq!(cli.provider, None);
    }

    #[test]
    fn test_cli_rejects_missing_work_id() {
        assert!(Cli::try_parse_from(&["chapter_feeds", "urasunday.com"]).is_err());
    }
}

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ieltsprep", version, about = "IELTS Reading test toolkit")]
pub struct Cli {
    /// Path to a test document (.txt, .json, .yaml)
    pub path: Option<String>,

    /// Validate the document and report problems without storing it
    #[arg(long)]
    pub check: bool,

    /// Save the parsed test into the local store
    #[arg(long)]
    pub save: bool,

    /// Score answers from a YAML file against the test
    #[arg(long, value_name = "path")]
    pub score: Option<String>,

    /// Print an example document (txt or json)
    #[arg(long, value_name = "format")]
    pub example: Option<String>,

    /// List stored tests
    #[arg(long)]
    pub list: bool,

    /// Remove a stored test by id
    #[arg(long, value_name = "id")]
    pub remove: Option<String>,

    /// Write the report or example to a file instead of stdout
    #[arg(long, value_name = "path")]
    pub out: Option<String>,

    /// Directory for the local test store [default: platform data dir]
    #[arg(long, value_name = "dir")]
    pub store_dir: Option<String>,

    /// Reset the question type to tfng at each passage boundary
    #[arg(long)]
    pub reset_type: bool,
}

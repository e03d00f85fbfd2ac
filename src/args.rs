use clap::Parser;

/// This is a raffle program: it spins a wheel of participants and draws winners.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the raffle. All the other options take
    /// precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The file containing the participants (.csv, .txt or .xlsx).
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. Deduced from the extension of the file by default.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (number) Draws among participants numbered from 1 to this number, when no input file
    /// is given.
    #[clap(short = 'n', long, value_parser)]
    pub count: Option<usize>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (number) Stops after this many winners. By default, the raffle goes on until a single
    /// participant is left.
    #[clap(long, value_parser)]
    pub draws: Option<usize>,

    /// (number) The seed of the random generator, to reproduce a raffle.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (milliseconds, default 5000) The duration of a spin. 0 skips the animation.
    #[clap(long, value_parser)]
    pub duration_ms: Option<u64>,

    /// (file path or 'stdout') If specified, the summary of the draws will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of a raffle in JSON format. If
    /// provided, octoraffle will check that the draws match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

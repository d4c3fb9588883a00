//! Filter collection: command-line values, with interactive prompts for the rest.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, ensure};
use boxscout_api::discover::{
    FilterCriteria, GenreFilter, GrossRange, ReleaseType, YearMonth, parse_countries,
};

/// Filter values accepted on the command line. Missing ones are prompted for.
#[derive(Debug, Default, clap::Args)]
pub struct FilterArgs {
    /// Genre name (e.g. "Action"), or "all" for every genre.
    #[arg(long)]
    pub genre: Option<String>,

    /// First release year of the window.
    #[arg(long)]
    pub start_year: Option<u32>,

    /// First release month of the window (1-12).
    #[arg(long)]
    pub start_month: Option<u32>,

    /// Last release year of the window.
    #[arg(long)]
    pub end_year: Option<u32>,

    /// Last release month of the window (1-12).
    #[arg(long)]
    pub end_month: Option<u32>,

    /// Comma-separated production countries (e.g. "US, Canada, India").
    #[arg(long)]
    pub countries: Option<String>,

    /// Release type: theatrical, non-theatrical or both.
    #[arg(long)]
    pub release_type: Option<String>,

    /// Minimum box office revenue in USD ("all" or 0 for no filter).
    #[arg(long)]
    pub min_gross: Option<String>,

    /// Maximum box office revenue in USD ("all" or 0 for no filter).
    #[arg(long)]
    pub max_gross: Option<String>,
}

/// Line-oriented prompter over any reader/writer pair.
struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    /// Writes `prompt` and reads one trimmed line.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt} ").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        ensure!(read > 0, "input ended before answering: {prompt}");
        Ok(String::from(line.trim()))
    }

    fn text(&mut self, given: Option<&String>, prompt: &str) -> Result<String> {
        match given {
            Some(value) => Ok(value.clone()),
            None => self.ask(prompt),
        }
    }

    fn number(&mut self, given: Option<u32>, prompt: &str, what: &str) -> Result<u32> {
        if let Some(value) = given {
            return Ok(value);
        }
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .with_context(|| format!("invalid {what}: '{answer}'"))
    }
}

/// Builds validated criteria from `args`, prompting on `output` and reading
/// `input` for every value not supplied.
///
/// Prompts follow the order genre, start year, start month, end year,
/// end month, countries, release type, minimum and maximum revenue.
///
/// # Errors
///
/// Returns an error on end of input, on unparsable values, or when the
/// values do not form valid criteria.
pub fn gather_criteria(
    args: &FilterArgs,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<FilterCriteria> {
    let mut prompter = Prompter { input, output };

    let genre = prompter.text(
        args.genre.as_ref(),
        "Enter genre (or type 'all' for all genres):",
    )?;

    let start_year = prompter.number(args.start_year, "Enter start year:", "start year")?;
    let start_month = prompter.number(
        args.start_month,
        "Enter start month (1-12):",
        "start month",
    )?;
    let start = YearMonth::new(start_year, start_month).context("invalid start date")?;

    let end_year = prompter.number(args.end_year, "Enter end year:", "end year")?;
    let end_month = prompter.number(args.end_month, "Enter end month (1-12):", "end month")?;
    let end = YearMonth::new(end_year, end_month).context("invalid end date")?;

    let countries = prompter.text(
        args.countries.as_ref(),
        "Enter countries (comma-separated, e.g., US, Canada, India):",
    )?;

    let release_type: ReleaseType = prompter
        .text(
            args.release_type.as_ref(),
            "Choose release type: theatrical, non-theatrical, both:",
        )?
        .parse()?;

    let min = GrossRange::parse_bound(&prompter.text(
        args.min_gross.as_ref(),
        "Enter minimum box office revenue (or type 0 for no filter):",
    )?)?;
    let max = GrossRange::parse_bound(&prompter.text(
        args.max_gross.as_ref(),
        "Enter maximum box office revenue (or type 0 for no filter):",
    )?)?;

    FilterCriteria::new(
        GenreFilter::parse(&genre),
        start,
        end,
        GrossRange { min, max },
        parse_countries(&countries),
        release_type,
    )
}

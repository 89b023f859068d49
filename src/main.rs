//! mailcast - newsletter to speech converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mailcast::dom::parse_html_bytes;
use mailcast::{Config, DocumentInfo, Processor, Template};

#[derive(Parser)]
#[command(name = "mailcast")]
#[command(version, about = "Turn HTML newsletters into SSML chunks and a description", long_about = None)]
#[command(after_help = "EXAMPLES:
    mailcast issue.html --sender news@techcrunch.com     Convert with the sender's template
    mailcast issue.html --template ghost --json          Print the result as JSON
    mailcast issue.html --sections -vv                   Show how each item was classified")]
struct Cli {
    /// Newsletter HTML file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Newsletter title, used for the description heading
    #[arg(long, default_value = "")]
    title: String,

    /// Sender address; picks the template unless --template is given
    #[arg(long, default_value = "")]
    sender: String,

    /// Newsletter owner
    #[arg(long, default_value = "")]
    owner: String,

    /// Issue date
    #[arg(long, default_value = "")]
    date: String,

    /// Template family (generic, ghost, mailgun, substack, techcrunch)
    #[arg(short, long)]
    template: Option<Template>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum characters per <speak> chunk
    #[arg(long)]
    speech_limit: Option<usize>,

    /// Maximum characters of the joined description
    #[arg(long)]
    description_limit: Option<usize>,

    /// Print per-item classification instead of converting
    #[arg(long)]
    sections: bool,

    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> mailcast::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(limit) = cli.speech_limit {
        config.speech_limit = limit;
    }
    if cli.description_limit.is_some() {
        config.description_limit = cli.description_limit;
    }
    Ok(config)
}

fn run(cli: &Cli) -> mailcast::Result<()> {
    let processor = Processor::new(load_config(cli)?)?;
    let info = DocumentInfo {
        title: cli.title.clone(),
        sender: cli.sender.clone(),
        owner: cli.owner.clone(),
        date: cli.date.clone(),
    };
    let template = cli.template.unwrap_or_else(|| processor.template_for(&info));

    let bytes = std::fs::read(&cli.input)?;
    let dom = parse_html_bytes(&bytes);

    if cli.sections {
        let sections = processor.inspect(&dom, &info, template);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&sections)?);
            return Ok(());
        }
        println!("Template: {template}");
        for section in &sections {
            println!(
                "#{:<3} {:<28} <{}>",
                section.index,
                section.rule,
                section.tag.as_deref().unwrap_or("#text")
            );
            for speech in &section.speech {
                println!("      speech: {speech}");
            }
            for (kind, fragment) in &section.description {
                println!("      {kind}: {fragment}");
            }
        }
        return Ok(());
    }

    let parsed = processor.process_dom(&dom, &info, template)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    println!("Template: {template}");
    println!("Chunks: {}", parsed.ssml_chunks.len());
    for (i, chunk) in parsed.ssml_chunks.iter().enumerate() {
        println!("\n--- chunk {} ({} chars) ---", i + 1, chunk.len());
        println!("{chunk}");
    }
    println!("\n--- description ---");
    println!("{}", parsed.combined_description());
    Ok(())
}

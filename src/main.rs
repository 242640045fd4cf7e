mod api;
mod server;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use post_score::config::ScorerConfig;
use post_score::{
    analyze_flow, format_float, format_signed, hook_type, parse_post_time, rank_alternatives,
    score_post, score_thread, voice_match_score, EmojiUsage, MediaType, PostInput, ScoreError,
    ScoreResult, Suggestion, VoiceProfile,
};

#[derive(Parser)]
#[command(name = "post-score", about = "Deterministic post and thread scorer")]
struct Cli {
    /// Config file (defaults to $POST_SCORE_CONFIG or config/post-score.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single post.
    Score(ScoreArgs),
    /// Score an ordered thread.
    Thread(ThreadArgs),
    /// Rank rewrites of a draft by score.
    Rank(RankArgs),
    /// Compare a draft with example posts.
    Voice(VoiceArgs),
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Write a config file with the current defaults.
    InitConfig(InitConfigArgs),
}

/// Context shared by every post: media, link, account, time.
#[derive(Args, Debug, Clone)]
struct PostContextArgs {
    #[arg(long)]
    media: Option<String>,
    #[arg(long)]
    link: bool,
    #[arg(long, conflicts_with = "no_premium")]
    premium: bool,
    #[arg(long, conflicts_with = "premium")]
    no_premium: bool,
    #[arg(long, conflicts_with = "no_verified")]
    verified: bool,
    #[arg(long, conflicts_with = "verified")]
    no_verified: bool,
    /// Local publish time, e.g. 2024-06-04T09:30. Defaults to now.
    #[arg(long)]
    at: Option<String>,
}

impl PostContextArgs {
    fn build(&self, text: String, config: &ScorerConfig) -> Result<PostInput, ScoreError> {
        let media = match self.media.as_deref() {
            Some(media) => media.parse::<MediaType>()?,
            None => config.post.media,
        };
        let mut input = PostInput::new(text)
            .with_media(media)
            .with_link(self.link)
            .premium(resolve_flag(self.premium, self.no_premium, config.account.premium))
            .verified(resolve_flag(self.verified, self.no_verified, config.account.verified));
        if let Some(at) = self.at.as_deref() {
            input = input.at(parse_post_time(at)?);
        }
        Ok(input)
    }
}

/// Explicit `--x` / `--no-x` wins over the configured default.
fn resolve_flag(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    text: Option<String>,
    #[command(flatten)]
    context: PostContextArgs,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct ThreadArgs {
    /// File with posts separated by `---` lines. Reads stdin when neither
    /// --file nor --post is given.
    #[arg(long, conflicts_with = "post")]
    file: Option<PathBuf>,
    /// One post; repeat in thread order.
    #[arg(long)]
    post: Vec<String>,
    #[command(flatten)]
    context: PostContextArgs,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    /// Draft being rewritten.
    #[arg(long)]
    text: String,
    #[arg(long = "candidate", required = true)]
    candidates: Vec<String>,
    #[command(flatten)]
    context: PostContextArgs,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct VoiceArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long = "example")]
    examples: Vec<String>,
    /// never, rarely, often or always. Used only without examples.
    #[arg(long)]
    emoji_usage: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    /// Destination; defaults to the resolved config path.
    #[arg(long)]
    path: Option<PathBuf>,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = ScorerConfig::load(cli.config)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Thread(args) => run_thread(args, &config),
        Command::Rank(args) => run_rank(args, &config),
        Command::Voice(args) => run_voice(args),
        Command::Serve(args) => {
            let mut config = config;
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            server::serve(config).await?;
            Ok(())
        }
        Command::InitConfig(args) => {
            let path = args
                .path
                .or(config_path)
                .context("no config path to write to")?;
            if path.exists() && !args.force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            config.write(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn run_score(args: ScoreArgs, config: &ScorerConfig) -> anyhow::Result<()> {
    let text = read_text(args.text)?;
    let input = args.context.build(text, config)?;
    let result = score_post(&input);
    let hook = hook_type(&input.text);

    if args.json {
        let mut value = serde_json::to_value(&result)?;
        value["hook_type"] = serde_json::to_value(hook)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Score: {}/100 ({})", result.total, result.grade.label());
    println!("Hook: {}", hook.label());
    if args.details {
        println!("Media: {}", input.media.label());
        print_breakdown(&result);
    }
    print_suggestions(&result.suggestions);
    print_warnings(&result.warnings);
    Ok(())
}

fn run_thread(args: ThreadArgs, config: &ScorerConfig) -> anyhow::Result<()> {
    let texts = if !args.post.is_empty() {
        args.post
    } else {
        let raw = match args.file.as_deref() {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => read_stdin()?,
        };
        split_thread(&raw)
    };

    let posts = texts
        .into_iter()
        .map(|text| args.context.build(text, config))
        .collect::<Result<Vec<_>, _>>()?;
    let result = score_thread(&posts);
    let active: Vec<&str> = posts
        .iter()
        .map(|post| post.text.as_str())
        .filter(|text| !text.trim().is_empty())
        .collect();
    let template_flow = analyze_flow(&active);

    if args.json {
        let mut value = serde_json::to_value(&result)?;
        value["template_flow"] = serde_json::Value::from(template_flow);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Thread score: {}/100 ({})",
        format_float(result.total, 1),
        result.grade.label()
    );
    println!(
        "Average {} | flow {} | pacing {} | consistency {}",
        format_float(result.breakdown.average_individual, 1),
        format_float(result.breakdown.flow_coherence, 1),
        format_float(result.breakdown.pacing, 1),
        format_float(result.breakdown.consistency, 1)
    );
    println!("Template flow: {}", format_signed(template_flow));

    if args.details && !result.individual_scores.is_empty() {
        println!("\nPosts:");
        for (index, (score, text)) in result.individual_scores.iter().zip(&active).enumerate() {
            println!(
                "  {}. {:>3} ({}) {}",
                index + 1,
                score.total,
                score.grade.label(),
                preview(text, 60)
            );
        }
    }

    print_suggestions(&result.suggestions);
    print_warnings(&result.warnings);
    Ok(())
}

fn run_rank(args: RankArgs, config: &ScorerConfig) -> anyhow::Result<()> {
    let draft = args.context.build(args.text, config)?;
    let ranked = rank_alternatives(&draft, &args.candidates);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    let original = score_post(&draft);
    println!("Draft: {}/100 ({})", original.total, original.grade.label());
    if ranked.is_empty() {
        println!("No usable candidates.");
        return Ok(());
    }
    for (index, alternative) in ranked.iter().enumerate() {
        println!(
            "{}. {:>3} ({}, {}) {}",
            index + 1,
            alternative.score,
            format_signed(alternative.score - original.total),
            alternative.grade.label(),
            preview(&alternative.text, 70)
        );
    }
    Ok(())
}

fn run_voice(args: VoiceArgs) -> anyhow::Result<()> {
    let text = read_text(args.text)?;
    let profile = args
        .emoji_usage
        .as_deref()
        .map(|value| value.parse::<EmojiUsage>())
        .transpose()?
        .map(|emoji_usage| VoiceProfile { emoji_usage });
    let result = voice_match_score(&text, &args.examples, profile.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Voice match: {}/100", format_float(result.total, 1));
    println!(
        "Similarity {} | emoji {} | length {} | punctuation {}",
        format_float(result.breakdown.similarity, 1),
        format_float(result.breakdown.emoji_match, 1),
        format_float(result.breakdown.length_match, 1),
        format_float(result.breakdown.punctuation_match, 1)
    );
    Ok(())
}

fn print_breakdown(result: &ScoreResult) {
    println!("\nBreakdown:");
    for (factor, value) in result.breakdown.entries() {
        println!("  {:<22}{:>4}", factor.label(), format_signed(value));
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        return;
    }
    println!("\nSuggestions:");
    for suggestion in suggestions {
        println!(
            "- [{}] {} ({})",
            suggestion.priority.label(),
            suggestion.message,
            suggestion.impact
        );
    }
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings:");
    for warning in warnings {
        println!("! {}", warning);
    }
}

fn preview(text: &str, limit: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= limit {
        return line.to_string();
    }
    let cut: String = line.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Split a thread document on lines consisting only of `---`. A separator at the
/// very end does not open another post.
fn split_thread(raw: &str) -> Vec<String> {
    let mut posts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in raw.lines() {
        if line.trim() == "---" {
            posts.push(current.join("\n").trim().to_string());
            current.clear();
        } else {
            current.push(line);
        }
    }
    let last = current.join("\n").trim().to_string();
    if !last.is_empty() || posts.is_empty() {
        posts.push(last);
    }
    posts
}

fn read_text(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let buffer = read_stdin()?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err(ScoreError::MissingText.into());
    }
    Ok(trimmed.to_string())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(ScoreError::from)
        .context("failed reading stdin")?;
    Ok(buffer)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

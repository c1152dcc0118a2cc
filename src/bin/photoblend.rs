//! CLI for Photoblend - edit and compose photos with natural language.

use clap::{Args, Parser, Subcommand, ValueEnum};
use photoblend::{EditSession, EncodedImage, GeminiClient, GeminiModel, Locale};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photoblend")]
#[command(about = "Edit a photo, or merge a second photo into it, via Gemini image models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit the primary image, or compose the secondary image into it
    Edit(EditArgs),

    /// Verify the API key and model are reachable
    Check(CheckArgs),
}

#[derive(Args)]
struct EditArgs {
    /// Primary image: the photo to edit, or the background scene
    #[arg(short, long)]
    primary: Option<PathBuf>,

    /// Secondary image: the person or object to merge into the primary
    #[arg(short, long)]
    secondary: Option<PathBuf>,

    /// What to do with the image(s)
    #[arg(short, long, default_value = "")]
    instruction: String,

    /// Where to save the result; the image's own extension is added when missing
    #[arg(short, long, default_value = "result")]
    output: PathBuf,

    /// Model variant
    #[arg(short, long, value_enum, default_value = "nano-banana")]
    model: ModelArg,

    /// Language for user-facing messages
    #[arg(long, value_enum, default_value = "en")]
    lang: LangArg,
}

#[derive(Args)]
struct CheckArgs {
    /// Model variant
    #[arg(short, long, value_enum, default_value = "nano-banana")]
    model: ModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    NanoBanana,
    NanoBananaPro,
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::NanoBanana => GeminiModel::NanoBanana,
            ModelArg::NanoBananaPro => GeminiModel::NanoBananaPro,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    En,
    Ar,
}

impl From<LangArg> for Locale {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Locale::English,
            LangArg::Ar => Locale::Arabic,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("PHOTOBLEND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Edit(args) => {
            run_edit(args, cli.json).await?;
        }
        Commands::Check(args) => {
            run_check(args, cli.json).await?;
        }
    }

    Ok(())
}

async fn run_edit(args: EditArgs, json_output: bool) -> anyhow::Result<()> {
    let locale = Locale::from(args.lang);
    let client = GeminiClient::builder().model(args.model.into()).build()?;
    let session = Arc::new(EditSession::new(client));

    if let Some(ref path) = args.primary {
        session.set_primary_image(EncodedImage::from_path(path)?);
    }
    if let Some(ref path) = args.secondary {
        session.set_secondary_image(Some(EncodedImage::from_path(path)?));
    }
    session.set_instruction(args.instruction.as_str());

    let start = Instant::now();
    let pending = tokio::spawn({
        let session = session.clone();
        async move { session.submit().await }
    });
    let outcome = if json_output {
        pending.await?
    } else {
        show_progress(&session, pending, locale).await?
    };

    let image = match outcome {
        Ok(image) => image,
        Err(e) => {
            tracing::debug!(error = %e, "edit failed");
            if json_output {
                let result = serde_json::json!({
                    "success": false,
                    "error": e.user_message(locale),
                    "detail": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            anyhow::bail!("{}", e.user_message(locale));
        }
    };

    let output = image.path_with_extension(&args.output);
    let size = image.save(&output)?;

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "output": output.display().to_string(),
            "size_bytes": size,
            "mime_type": image.mime_type(),
            "mode": if args.secondary.is_some() { "compose" } else { "edit" },
            "duration_ms": start.elapsed().as_millis() as u64,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Saved result: {} ({} bytes)",
            output.display(),
            size
        );
        println!("Duration: {}ms", start.elapsed().as_millis());
    }

    Ok(())
}

/// Redraws a "processing... (Ns)" line until the edit task finishes.
async fn show_progress(
    session: &EditSession<GeminiClient>,
    mut pending: tokio::task::JoinHandle<photoblend::Result<EncodedImage>>,
    locale: Locale,
) -> anyhow::Result<photoblend::Result<EncodedImage>> {
    let label = match locale {
        Locale::English => "Processing...",
        Locale::Arabic => "جاري المعالجة...",
    };
    let mut ticker = tokio::time::interval(Duration::from_millis(250));
    let mut stderr = std::io::stderr();

    let outcome = loop {
        tokio::select! {
            joined = &mut pending => break joined?,
            _ = ticker.tick() => {
                if session.state().is_in_flight() {
                    write!(stderr, "\r{label} ({}s)", session.elapsed_secs())?;
                    stderr.flush()?;
                }
            }
        }
    };
    writeln!(stderr)?;
    Ok(outcome)
}

async fn run_check(args: CheckArgs, json_output: bool) -> anyhow::Result<()> {
    let model = GeminiModel::from(args.model);
    let client = GeminiClient::builder().model(model).build()?;
    let result = client.health_check().await;

    if json_output {
        let out = serde_json::json!({
            "model": model.as_str(),
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match &result {
            Ok(()) => println!("✓ {} reachable", model.as_str()),
            Err(e) => println!("✗ {}: {}", model.as_str(), e),
        }
    }

    result?;
    Ok(())
}

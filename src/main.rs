use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use veo_director::api::{build_prompt, EnvKeys};
use veo_director::form::{
    AspectRatio, ImageStyle, Language, VisualStyle, WritingStyle, DEFAULT_DURATION_SECS,
    DEFAULT_THEME,
};
use veo_director::package::Platform;
use veo_director::{
    subtitle, Config, FormParams, GeminiClient, GenerationSession, KeyProvider, KeyRing,
    ProductionPackage, RequestDispatcher,
};

#[derive(Parser, Debug)]
#[command(name = "veo-director")]
#[command(about = "Generate VEO 3 production packages (characters, shot lists, promo copy) with Gemini", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one production package
    Generate {
        /// Story theme (at least 10 characters)
        #[arg(short, long, default_value = DEFAULT_THEME)]
        theme: String,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        keys: KeyArgs,

        /// Where to write the package JSON
        #[arg(short, long, default_value = "production.json")]
        output: PathBuf,

        /// Also write subtitles.srt into this directory
        #[arg(long)]
        srt_dir: Option<PathBuf>,
    },

    /// Generate one package per line of a themes file
    Batch {
        /// Text file with one theme per line
        #[arg(long)]
        themes: PathBuf,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        keys: KeyArgs,

        /// Output directory for package_<n>.json files
        #[arg(short = 'w', long, default_value = "./output")]
        out_dir: PathBuf,
    },

    /// Print the prompt that would be sent, without calling the API
    Prompt {
        #[arg(short, long, default_value = DEFAULT_THEME)]
        theme: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Derive subtitles.srt from a saved package
    Srt {
        /// Package JSON file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Show the JSON of a single clip
    Clip {
        #[arg(short, long)]
        input: PathBuf,

        /// Scene number
        #[arg(long)]
        scene: u32,

        /// Clip number within the scene, starting at 1
        #[arg(long)]
        clip: usize,
    },

    /// List the available styles, languages and aspect ratios
    Styles,
}

#[derive(Args, Debug)]
struct StyleArgs {
    #[arg(long, value_enum, default_value_t = VisualStyle::Cinematic)]
    visual_style: VisualStyle,

    #[arg(long, value_enum, default_value_t = ImageStyle::Photorealistic)]
    image_style: ImageStyle,

    /// Total duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION_SECS)]
    duration: u32,

    #[arg(long, value_enum, default_value_t = WritingStyle::Storytelling)]
    writing_style: WritingStyle,

    /// Subtitle language
    #[arg(short, long, value_enum, default_value_t = Language::Vietnamese)]
    language: Language,

    #[arg(short, long, value_enum, default_value_t = AspectRatio::Landscape)]
    aspect_ratio: AspectRatio,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Gemini API key; repeat to rotate across several keys.
    /// Keys in GEMINI_API_KEYS (comma-separated) are appended.
    #[arg(long = "api-key")]
    api_keys: Vec<String>,
}

impl StyleArgs {
    fn to_params(&self, theme: String) -> FormParams {
        FormParams {
            theme,
            visual_style: self.visual_style,
            image_style: self.image_style,
            duration_secs: self.duration,
            writing_style: self.writing_style,
            language: self.language,
            aspect_ratio: self.aspect_ratio,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate {
            theme,
            style,
            keys,
            output,
            srt_dir,
        } => {
            let params = style.to_params(theme);
            let keys = collect_keys(&keys)?;
            let mut session = new_session()?;

            let package = session.submit(&params, &keys).await?;
            print_summary(package);
            save_package(package, &output).await?;

            if let Some(dir) = srt_dir {
                let path = subtitle::write_srt(package, &dir).await?;
                println!("{} ({})", path.display(), subtitle::SRT_MIME_TYPE);
            }
        }

        Command::Batch {
            themes,
            style,
            keys,
            out_dir,
        } => {
            let content = tokio::fs::read_to_string(&themes)
                .await
                .context(format!("Failed to read themes file: {}", themes.display()))?;
            let keys = collect_keys(&keys)?;
            run_batch(&content, &style, &keys, &out_dir).await?;
        }

        Command::Prompt { theme, style } => {
            let params = style.to_params(theme);
            params.validate()?;
            println!("{}", build_prompt(&params, params.writing_style.description()));
        }

        Command::Srt { input, out_dir } => {
            let package = load_package(&input).await?;
            let path = subtitle::write_srt(&package, &out_dir).await?;
            println!("{} ({})", path.display(), subtitle::SRT_MIME_TYPE);
        }

        Command::Clip { input, scene, clip } => {
            let package = load_package(&input).await?;
            let index = clip
                .checked_sub(1)
                .context("Clip numbers start at 1")?;
            let found = package.clip(scene, index)?;
            println!("Scene {} - Clip {} JSON", scene, clip);
            println!("{}", serde_json::to_string_pretty(found)?);
        }

        Command::Styles => print_styles(),
    }

    Ok(())
}

async fn run_batch(
    content: &str,
    style: &StyleArgs,
    keys: &dyn KeyProvider,
    out_dir: &Path,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .context("Failed to create output directory")?;

    let themes: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    info!("Generating {} packages...", themes.len());

    let mut session = new_session()?;
    let mut failures = 0;

    for (idx, theme) in themes.iter().enumerate() {
        session.wait_for_cooldown().await;
        info!("Theme {}/{}: {}", idx + 1, themes.len(), theme);

        let params = style.to_params(theme.to_string());
        match session.submit(&params, keys).await {
            Ok(package) => {
                let path = out_dir.join(format!("package_{}.json", idx + 1));
                save_package(package, &path).await?;
            }
            Err(e) => {
                warn!("Theme {} failed: {}", idx + 1, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} themes failed", failures, themes.len());
    }
    Ok(())
}

fn new_session() -> anyhow::Result<GenerationSession<GeminiClient>> {
    let config = Config::from_env()?;
    let client = GeminiClient::new(&config)?;
    info!("Using model {}", client.model());
    Ok(GenerationSession::new(
        RequestDispatcher::new(client),
        config.cooldown,
    ))
}

fn collect_keys(args: &KeyArgs) -> anyhow::Result<KeyRing> {
    let mut ring = KeyRing::new();
    for key in &args.api_keys {
        ring.add(key).context("Invalid --api-key")?;
    }
    for key in EnvKeys::default().keys()? {
        ring.add(key.expose())
            .context("Invalid key in GEMINI_API_KEYS")?;
    }
    info!("Loaded {} API key(s)", ring.len());
    Ok(ring)
}

async fn load_package(path: &Path) -> anyhow::Result<ProductionPackage> {
    let text = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read package: {}", path.display()))?;
    Ok(ProductionPackage::from_json(&text)?)
}

async fn save_package(package: &ProductionPackage, path: &Path) -> anyhow::Result<()> {
    tokio::fs::write(path, package.to_json_pretty()?)
        .await
        .context(format!("Failed to write package: {}", path.display()))?;
    info!("Package saved to: {}", path.display());
    Ok(())
}

fn print_summary(package: &ProductionPackage) {
    println!("Characters:");
    for character in &package.character_sheet {
        println!("  {}: {}", character.character_id, character.description);
    }

    println!("Script:");
    for scene in &package.script {
        println!(
            "  Scene {} - {} ({} clips)",
            scene.scene_number,
            scene.scene_title,
            scene.clip_sequence.len()
        );
    }

    println!("Promotion:");
    println!("  Thumbnail: {}", package.promotion.thumbnail_prompt);
    for platform in Platform::ALL {
        let post = package.promotion.post(platform);
        println!("  {}: {} {}", platform, post.title, post.hashtags);
    }
}

fn print_styles() {
    println!("Visual styles:");
    for style in VisualStyle::ALL {
        println!("  {}", style);
    }
    println!("Image styles:");
    for style in ImageStyle::ALL {
        println!("  {}", style);
    }
    println!("Writing styles:");
    for style in WritingStyle::ALL {
        println!("  {} - {}", style, style.description());
    }
    println!("Languages:");
    for language in Language::ALL {
        println!("  {} ({})", language, language.code());
    }
    println!("Aspect ratios:");
    for ratio in AspectRatio::ALL {
        println!("  {}", ratio);
    }
}

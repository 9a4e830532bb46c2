use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand};
use screen_annotate::config::Config;
use screen_annotate::editor::{Editor, EditorSettings};
use screen_annotate::export::file::save_as;
use screen_annotate::input::Script;
use screen_annotate::notification;
use screen_annotate::share::{
    self, DirectoryStore, ImageStore, ShareService, encode_data_url, handle_lookup, handle_upload,
    is_valid_id,
};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCREEN_ANNOTATE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "screen-annotate")]
#[command(version = VERSION, about = "Annotate screenshots with arrows, rectangles and text")]
struct Cli {
    /// Use this config file instead of ~/.config/screen-annotate/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a PNG in the image store and print its id and URL
    Upload {
        /// PNG file to upload
        image: PathBuf,
    },

    /// Load an image, replay an annotation script and export the result
    Edit {
        /// Uploaded image id or path to a PNG file
        source: String,

        /// Annotation script (TOML) to replay
        #[arg(long, short = 's', value_name = "FILE")]
        script: Option<PathBuf>,

        /// Write annotated-<millis>.png (default when --share is not given)
        #[arg(long, action = ArgAction::SetTrue)]
        download: bool,

        /// Store the result and print its share link
        #[arg(long, action = ArgAction::SetTrue)]
        share: bool,

        /// Download directory (overrides the config)
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Show a desktop notification when done
        #[arg(long, action = ArgAction::SetTrue)]
        notify: bool,
    },

    /// Look up an uploaded image and print its URL
    Resolve {
        id: String,
    },

    /// Save a shared annotation as shared-annotation-<id>.png
    OpenShare {
        id: String,

        /// Directory to write to (overrides the config)
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Write the documented example config file
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };

    match cli.command {
        Command::InitConfig => {
            Config::create_default_file(&config_path)?;
            println!("Created {}", config_path.display());
            Ok(())
        }
        Command::Upload { image } => run_upload(&Config::load_from(&config_path)?, &image),
        Command::Edit {
            source,
            script,
            download,
            share,
            output_dir,
            notify,
        } => {
            let config = Config::load_from(&config_path)?;
            let options = EditOptions {
                script,
                download: download || !share,
                share,
                output_dir,
                notify: notify || config.export.notify,
            };
            run_edit(&config, &source, options)
        }
        Command::Resolve { id } => run_resolve(&Config::load_from(&config_path)?, &id),
        Command::OpenShare { id, output_dir } => {
            run_open_share(&Config::load_from(&config_path)?, &id, output_dir)
        }
    }
}

struct EditOptions {
    script: Option<PathBuf>,
    download: bool,
    share: bool,
    output_dir: Option<PathBuf>,
    notify: bool,
}

fn open_store(config: &Config) -> Result<DirectoryStore> {
    let directory = config.store_directory();
    DirectoryStore::open(&directory)
        .with_context(|| format!("Failed to open image store {}", directory.display()))
}

fn run_upload(config: &Config, image: &Path) -> Result<()> {
    let bytes =
        fs::read(image).with_context(|| format!("Failed to read image {}", image.display()))?;
    let store = open_store(config)?;

    let body = serde_json::json!({ "image": encode_data_url(&bytes) }).to_string();
    let response = handle_upload(&store, &body);
    println!("{}", response.body);

    if !response.is_success() {
        bail!("Upload failed with status {}", response.status);
    }
    Ok(())
}

fn run_resolve(config: &Config, id: &str) -> Result<()> {
    let store = open_store(config)?;
    let response = handle_lookup(&store, id);
    println!("{}", response.body);

    if !response.is_success() {
        bail!("Lookup failed with status {}", response.status);
    }
    Ok(())
}

fn load_source(store: &DirectoryStore, source: &str) -> Result<Vec<u8>> {
    let path = Path::new(source);
    if path.is_file() {
        return fs::read(path).with_context(|| format!("Failed to read image {}", path.display()));
    }

    if !is_valid_id(source) {
        bail!("No such file or image id: {source}");
    }
    let found = store
        .find_by_prefix(&format!("{source}.png"))?
        .ok_or_else(|| anyhow!("Image not found: {source}"))?;
    store
        .get(&found.key)?
        .ok_or_else(|| anyhow!("Image not found: {source}"))
}

fn run_edit(config: &Config, source: &str, options: EditOptions) -> Result<()> {
    let store = open_store(config)?;
    let png = load_source(&store, source)?;

    let mut editor = Editor::load(&png, EditorSettings::from_config(config))
        .context("Failed to load image into the editor")?;

    if let Some(script_path) = &options.script {
        Script::load(script_path)?.apply(&mut editor)?;
    }

    let mut messages = Vec::new();

    if options.download {
        let directory = options
            .output_dir
            .clone()
            .unwrap_or_else(|| config.export_directory());
        match editor.download(&directory) {
            Ok(path) => {
                println!("{}", path.display());
                messages.push(format!("Saved to {}", path.display()));
            }
            Err(err) => {
                report_failure(options.notify, "Download failed", &err.to_string());
                return Err(err).context("Failed to download annotated image");
            }
        }
    }

    if options.share {
        let base_url = Url::parse(&config.share.base_url)
            .with_context(|| format!("Invalid share base_url {}", config.share.base_url))?;
        let service = ShareService::new(Box::new(store), base_url);
        match editor.save(&service) {
            Ok(link) => {
                println!("{}", link.url);
                messages.push(format!("Share link: {}", link.url));
            }
            Err(err) => {
                report_failure(options.notify, "Share failed", &err.to_string());
                return Err(err).context("Failed to share annotated image");
            }
        }
    }

    if options.notify {
        notification::notify_blocking("Annotation exported", &messages.join("\n"), None);
    }
    Ok(())
}

fn run_open_share(config: &Config, id: &str, output_dir: Option<PathBuf>) -> Result<()> {
    let base_url = Url::parse(&config.share.base_url)
        .with_context(|| format!("Invalid share base_url {}", config.share.base_url))?;
    let service = ShareService::new(Box::new(open_store(config)?), base_url);

    let Some(png) = service.open_shared(id)? else {
        bail!("Image Not Found");
    };

    let directory = output_dir.unwrap_or_else(|| config.export_directory());
    let path = save_as(&png, &directory, &share::shared_download_name(id))?;
    println!("{}", path.display());
    Ok(())
}

fn report_failure(notify: bool, summary: &str, detail: &str) {
    log::error!("{summary}: {detail}");
    if notify {
        notification::notify_blocking(summary, detail, Some("dialog-error"));
    }
}

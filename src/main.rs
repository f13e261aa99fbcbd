use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::eyre::{bail, eyre};
use flume::Receiver;
use musegen::{
    config::AppConfig,
    event::Event,
    http::ApiService,
    notify::NotificationRegistry,
    store::{GenerationOutcome, GenerationStore, form::Mode},
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[derive(Parser, Debug)]
#[command(name = "musegen", version, about = "Generate a song with the remote music service")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Description)]
    mode: Mode,

    /// Full song description (description mode).
    #[arg(long)]
    text: Option<String>,

    /// Style prompt, e.g. "rave, funk, 140BPM" (lyric modes).
    #[arg(long)]
    prompt: Option<String>,

    /// Lyrics to sing (lyrics mode).
    #[arg(long)]
    lyrics: Option<String>,

    /// What the lyrics should be about (described-lyrics mode).
    #[arg(long)]
    lyrics_description: Option<String>,

    /// No vocals (description mode).
    #[arg(long)]
    instrumental: bool,

    /// Length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,

    #[arg(long)]
    guidance_scale: Option<f64>,

    /// Directory for generated.wav and cover.png.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

impl Cli {
    fn apply(&self, store: &GenerationStore) -> color_eyre::Result<()> {
        store.set_mode(self.mode);

        match self.mode {
            Mode::Description => {
                let Some(text) = &self.text else {
                    bail!("--text is required in description mode");
                };
                store.update_description_form(|form| {
                    form.text = text.clone();
                    form.is_instrumental = self.instrumental;
                    self.tune(&mut form.duration, &mut form.seed, &mut form.guidance_scale);
                });
            }
            Mode::Lyrics => {
                let (Some(prompt), Some(lyrics)) = (&self.prompt, &self.lyrics) else {
                    bail!("--prompt and --lyrics are required in lyrics mode");
                };
                store.update_lyrics_form(|form| {
                    form.prompt = prompt.clone();
                    form.lyrics = lyrics.clone();
                    self.tune(&mut form.duration, &mut form.seed, &mut form.guidance_scale);
                });
            }
            Mode::DescribedLyrics => {
                let (Some(prompt), Some(about)) = (&self.prompt, &self.lyrics_description) else {
                    bail!("--prompt and --lyrics-description are required in described-lyrics mode");
                };
                store.update_described_lyrics_form(|form| {
                    form.prompt = prompt.clone();
                    form.lyrics_description = about.clone();
                    self.tune(&mut form.duration, &mut form.seed, &mut form.guidance_scale);
                });
            }
        }

        Ok(())
    }

    fn tune(&self, duration: &mut f64, seed: &mut i64, guidance_scale: &mut f64) {
        if let Some(value) = self.duration {
            *duration = value;
        }
        if let Some(value) = self.seed {
            *seed = value;
        }
        if let Some(value) = self.guidance_scale {
            *guidance_scale = value;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let (event_tx, event_rx) = flume::unbounded();
    let notifications =
        NotificationRegistry::new(config.notification_duration).with_events(event_tx.clone());
    let api = Arc::new(ApiService::new(&config)?);
    let store = GenerationStore::new(api, notifications).with_events(event_tx);
    cli.apply(&store)?;

    let printer = tokio::spawn(print_notifications(event_rx));
    let outcome = store.generate_music().await;

    // Closing every sender lets the printer drain and stop.
    drop(store);
    printer.await?;

    match outcome {
        GenerationOutcome::Completed(track) => {
            let saved = track.save_to(&cli.out)?;
            println!("Saved {} and {}", saved.audio.display(), saved.cover.display());
            let categories = track.categories();
            if !categories.is_empty() {
                println!("Categories: {}", categories.join(", "));
            }
            Ok(())
        }
        GenerationOutcome::Failed(message) => Err(eyre!(message)),
        GenerationOutcome::Superseded => Err(eyre!("Generation was superseded")),
    }
}

async fn print_notifications(events: Receiver<Event>) {
    while let Ok(event) = events.recv_async().await {
        match event {
            Event::NotificationAdded(notification) => {
                println!("[{}] {}", notification.kind, notification.message);
            }
            other => tracing::trace!(?other, "Event"),
        }
    }
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}

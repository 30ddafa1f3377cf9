use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use almani::config::Config;
use almani::dashboard::HomeSummary;
use almani::dictionary::{self, LevelFilter, NewWordForm};
use almani::logging;
use almani::models::{Level, VocabularyEntry};
use almani::navigation::Route;
use almani::platform::tts::{speak_or_ignore, PlatformSpeaker, GERMAN};
use almani::reference::ReferenceData;
use almani::session::{
    Answer, ConversationPlayback, FlashcardSession, Sender, SessionState, TurnOutcome,
};
use almani::storage::{KeyValueStore, SqliteStore};
use almani::store::LearnerStore;

#[derive(Parser)]
#[command(name = "almani", about = "German vocabulary for Arabic speakers")]
struct Cli {
    /// SQLite database path (overrides ALMANI_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show streak, today's words and progress
    Home,
    /// List or search vocabulary
    Words {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, value_parser = parse_level)]
        level: Option<Level>,
    },
    /// Add a word to the dictionary
    Add {
        #[arg(long)]
        german: String,
        #[arg(long)]
        english: String,
        #[arg(long)]
        arabic: String,
        #[arg(long, default_value = "")]
        example: String,
        #[arg(long, value_parser = parse_level, default_value = "A1")]
        level: Level,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Delete a word by id
    Delete { id: String },
    /// Speak a word by id
    Speak { id: String },
    /// Run a flashcard session over words not yet learned
    Learn,
    /// Replay a scripted conversation
    Conversation {
        #[arg(long, default_value = "c1")]
        id: String,
        /// Play every turn without waiting for input
        #[arg(long)]
        auto: bool,
    },
    /// List grammar lessons
    Grammar,
    /// List thematic packs
    Packs,
    /// Resolve a navigation path
    Route { path: String },
}

fn parse_level(value: &str) -> Result<Level, String> {
    Level::from_str(value).ok_or_else(|| format!("unknown level '{value}', expected A1 or A2"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let _log_guard = logging::init_tracing(&config.log_level);

    let reference = ReferenceData::bundled().context("loading bundled reference data")?;
    let backend = SqliteStore::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    let mut store = LearnerStore::initialize(backend, reference.daily_words());
    let speaker = PlatformSpeaker::new(config.tts.clone());

    tracing::debug!(db = %config.db_path.display(), "almani started");

    match cli.command {
        Command::Home => print_home(&HomeSummary::from_store(&store)),
        Command::Words { query, level } => {
            let filter = level.map(LevelFilter::Only).unwrap_or_default();
            let hits = dictionary::search(store.list_vocabulary(), &query, filter);
            if hits.is_empty() {
                println!("No words found.");
            }
            for entry in hits {
                print_entry(entry, store.is_learned(&entry.id));
            }
        }
        Command::Add {
            german,
            english,
            arabic,
            example,
            level,
            category,
        } => {
            let form = NewWordForm {
                german,
                english,
                arabic,
                example,
                level,
                category,
            };
            let id = dictionary::fresh_id(|id| store.get(id).is_some());
            let entry = form.into_entry(id)?;
            let label = format!("{} ({})", entry.german, entry.id);
            store.add_vocabulary(entry)?;
            println!("Added {label}");
        }
        Command::Delete { id } => {
            if store.delete_vocabulary(&id)? {
                println!("Deleted {id}");
            } else {
                println!("No word with id {id}");
            }
        }
        Command::Speak { id } => match store.get(&id) {
            Some(entry) => speak_or_ignore(&speaker, &entry.german, GERMAN),
            None => bail!("no word with id {id}"),
        },
        Command::Learn => run_learn(&mut store, &speaker, &config).await?,
        Command::Conversation { id, auto } => {
            let Some(conversation) = reference.conversation(&id) else {
                bail!("no conversation with id {id}");
            };
            run_conversation(conversation, &speaker, &config, auto).await?;
        }
        Command::Grammar => {
            for lesson in reference.grammar_lessons() {
                println!("{} - {}", lesson.title, lesson.description);
                for example in &lesson.examples {
                    println!("    {}  |  {}", example.german, example.arabic);
                }
            }
        }
        Command::Packs => {
            for pack in reference.thematic_packs() {
                println!("[{}] {} ({} words)", pack.level, pack.title, pack.words_count);
            }
        }
        Command::Route { path } => {
            let route = Route::resolve(&path);
            println!("{path} -> {:?} ({})", route, route.path());
        }
    }

    Ok(())
}

fn print_home(summary: &HomeSummary) {
    println!("Streak: {}", summary.streak);
    println!(
        "Progress: {}/{} ({}%)",
        summary.learned_count,
        summary.total_words,
        summary.progress_percent()
    );
    println!("Today's words:");
    for entry in &summary.today_words {
        println!("  {}  -  {}", entry.german, entry.arabic);
    }
}

fn print_entry(entry: &VocabularyEntry, learned: bool) {
    let mark = if learned { "✓" } else { " " };
    println!(
        "{mark} [{}] {:<6} {}  |  {}  |  {}  ({})",
        entry.level, entry.id, entry.german, entry.english, entry.arabic, entry.category
    );
}

fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

async fn run_learn<S: KeyValueStore>(
    store: &mut LearnerStore<S>,
    speaker: &PlatformSpeaker,
    config: &Config,
) -> anyhow::Result<()> {
    let mut session = FlashcardSession::from_store(store);

    loop {
        match session.state() {
            SessionState::AllLearned => {
                println!("Alles erledigt! Add new words in the dictionary.");
                return Ok(());
            }
            SessionState::Complete => {
                println!("Tagesziel erreicht! Streak: {}", store.streak());
                return Ok(());
            }
            SessionState::Active => {}
        }

        let Some(card) = session.current().cloned() else {
            return Ok(());
        };
        let (position, total) = session.progress();
        println!();
        println!("[{position}/{total}] {}", card.german);
        if session.is_flipped() {
            println!("    {}  |  {}", card.english, card.arabic);
            if !card.example.is_empty() {
                println!("    \"{}\"", card.example);
            }
        }

        let Some(input) = prompt("(f)lip, (s)peak, (y) known, (n) not yet, (q)uit > ")? else {
            return Ok(());
        };

        match input.as_str() {
            "f" => session.flip(),
            "s" => speak_or_ignore(speaker, &card.german, GERMAN),
            "y" | "n" => {
                let answer = if input == "y" {
                    Answer::Known
                } else {
                    Answer::NotYet
                };
                if session.answer(answer, store)? == SessionState::Active {
                    tokio::time::sleep(config.card_advance_delay).await;
                }
            }
            "q" => return Ok(()),
            _ => {}
        }
    }
}

async fn run_conversation(
    conversation: &almani::models::Conversation,
    speaker: &PlatformSpeaker,
    config: &Config,
    auto: bool,
) -> anyhow::Result<()> {
    let mut playback = ConversationPlayback::new(conversation);
    println!("== {} ==", playback.title());

    let mut shown = 0;
    loop {
        for message in &playback.messages()[shown..] {
            let who = match message.sender {
                Sender::Bot => "Partner",
                Sender::User => "You",
            };
            println!("{who:>8}: {}", message.text);
            println!("          {}", message.translation);
        }
        shown = playback.messages().len();

        if !playback.can_advance() {
            println!("Conversation finished.");
            return Ok(());
        }

        if !auto && prompt("Press Enter to speak, q to quit > ")?.as_deref() != Some("") {
            return Ok(());
        }

        println!("  Listening...");
        if playback.user_turn(config.playback, speaker).await == TurnOutcome::Finished {
            return Ok(());
        }
    }
}

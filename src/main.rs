use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use studypack::{
    chat::{self, ChatSession},
    config::Config,
    extractor,
    llm::Backend,
    notes::{self, Budget, NotesPack},
    pdf,
};

#[derive(Parser)]
#[command(name = "studypack", about = "Turn a web article into study notes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a URL, extract the article and generate study notes
    Notes {
        /// Article URL
        url: String,
        /// Also write the notes as a PDF; defaults to <title>.pdf
        #[arg(long, value_name = "PATH")]
        pdf: Option<Option<PathBuf>>,
    },
    /// Interactive follow-up questions about an article
    Chat {
        /// Article URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let backend = Backend::from_config(&config);
    match &backend {
        Backend::Remote(client) => {
            eprintln!("note: generating with remote model {}", client.model())
        }
        Backend::Local => eprintln!("note: OPENAI_API_KEY not set, using local heuristic mode"),
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Notes { url, pdf } => run_notes(&config, &backend, &url, pdf).await,
        Command::Chat { url } => run_chat(&backend, &url).await,
    }
}

async fn run_notes(
    config: &Config,
    backend: &Backend,
    url: &str,
    pdf_out: Option<Option<PathBuf>>,
) -> Result<()> {
    let doc = extractor::extract_url(url)
        .await
        .context("failed to fetch or extract the URL")?;

    let budget = Budget::from_config(config);
    let pack = notes::generate(backend, budget, &doc.text, &doc.title).await;

    render_notes(&doc.title, &pack);

    if let Some(path) = pdf_out {
        let path = path
            .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", pdf::safe_filename(&doc.title))));
        let bytes = pdf::export(&doc.title, doc.url.as_str(), &pack)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nPDF written to {}", path.display());
    }

    Ok(())
}

async fn run_chat(backend: &Backend, url: &str) -> Result<()> {
    let doc = extractor::extract_url(url)
        .await
        .context("failed to fetch or extract the URL")?;

    println!(
        "Loaded \"{}\" ({} chars). Ask questions; empty line or Ctrl-D quits.",
        if doc.title.is_empty() {
            "untitled"
        } else {
            doc.title.as_str()
        },
        doc.text.chars().count()
    );

    let mut session = ChatSession::new();
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            break;
        }

        let answer = chat::respond(backend, question, &doc.text).await;
        println!("{answer}\n");
        session.push(question, answer);
    }

    if !session.is_empty() {
        println!("--- chat history (most recent first) ---");
        for turn in session.recent(6) {
            println!("Q: {}", turn.q);
            println!("A: {}\n", turn.a);
        }
    }

    Ok(())
}

fn render_notes(title: &str, pack: &NotesPack) {
    let title = if title.is_empty() { "Untitled" } else { title };
    println!("# {title}\n");

    println!("## Summary\n{}\n", pack.summary);

    if !pack.bullets.is_empty() {
        println!("## Key points");
        for bullet in &pack.bullets {
            println!("- {bullet}");
        }
        println!();
    }

    if !pack.concepts.is_empty() {
        println!("## Key concepts");
        for concept in &pack.concepts {
            println!("- {concept}");
        }
        println!();
    }

    if !pack.definitions.is_empty() {
        println!("## Definitions");
        for def in &pack.definitions {
            println!("{}: {}", def.term, def.definition);
        }
        println!();
    }

    if !pack.qas.is_empty() {
        println!("## Q&A");
        for (i, qa) in pack.qas.iter().enumerate() {
            println!("Q{}. {}", i + 1, qa.q);
            println!("A: {}\n", qa.a);
        }
    }

    if !pack.mcqs.is_empty() {
        println!("## MCQs");
        for (i, mcq) in pack.mcqs.iter().enumerate() {
            println!("Q{}. {}", i + 1, mcq.stem);
            for (j, option) in mcq.options.iter().enumerate() {
                println!("  {}. {}", j + 1, option);
            }
            println!("Answer: {}\n", mcq.answer);
        }
    }

    if !pack.flashcards.is_empty() {
        println!("## Flashcards");
        for (i, card) in pack.flashcards.iter().enumerate() {
            println!("Card {}: {}", i + 1, card.front);
            println!("  {}\n", card.back);
        }
    }
}

//! `personas` — maintain user portrait labels from the command line.
//!
//! Reads `personas.toml` (or the path given with `--config`), opens the
//! SQLite store, and runs one command.
//!
//! # Usage
//!
//! ```text
//! personas add --person P1 --label-id 10
//! personas add --person P2 --label-name 夜间活跃
//! personas remove --person P3 --label-id 10
//! personas fuzzy-remove --person P5 --key 活跃
//! personas show --person P1
//! personas label add --label-id 10 --name VIP
//! ```

mod cli;
mod settings;

use anyhow::Context as _;
use clap::Parser;
use cli::{Args, Command, LabelCommand};
use personas_core::{
  Outcome, PersonasManager,
  clock::SystemClock,
  label::NewLabel,
  store::PortraitStore,
};
use personas_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Manager = PersonasManager<SqliteStore, SqliteStore, SystemClock>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let cfg = settings::load(&args.config)?;

  let store_path = settings::expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(?store_path, "store opened");

  let manager: Manager = PersonasManager::new(store.clone(), store.clone(), SystemClock);

  match args.command {
    Command::Add { person, label_id, label_name } => {
      let req = cli::request(&person, label_id, label_name.as_deref());
      let outcome = if label_id.is_some() {
        manager.add_by_label_id(&req).await
      } else {
        manager.add_by_label_name(&req).await
      };
      report(outcome.context("add failed")?);
    }
    Command::Remove { person, label_id } => {
      let req = cli::request(&person, Some(label_id), None);
      report(manager.remove_by_label_id(&req).await.context("remove failed")?);
    }
    Command::FuzzyRemove { person, key } => {
      let req = cli::request(&person, None, Some(&key));
      report(
        manager
          .fuzzy_remove_by_name_key(&req)
          .await
          .context("fuzzy remove failed")?,
      );
    }
    Command::Show { person } => {
      let portraits = store
        .select_by_person(person.clone())
        .await
        .context("failed to read portrait")?;
      match portraits.first() {
        Some(portrait) => {
          for label in portrait.labels() {
            println!("{label}");
          }
        }
        None => println!("no portrait for {person}"),
      }
    }
    Command::Label { command } => run_label(&store, command).await?,
  }

  Ok(())
}

async fn run_label(store: &SqliteStore, command: LabelCommand) -> anyhow::Result<()> {
  match command {
    LabelCommand::Add { label_id, name } => {
      let label = store
        .insert_label(NewLabel { label_id, label_name: name })
        .await
        .context("failed to add label")?;
      println!("added label {} = {}", label.label_id, label.label_name);
    }
    LabelCommand::List => {
      for label in store.list_labels().await.context("failed to list labels")? {
        println!("{}\t{}", label.label_id, label.label_name);
      }
    }
    LabelCommand::Delete { label_id } => {
      let n = store
        .delete_label(label_id)
        .await
        .context("failed to delete label")?;
      println!("deleted {n} catalog entr{}", if n == 1 { "y" } else { "ies" });
    }
  }
  Ok(())
}

fn report(outcome: Outcome) {
  match outcome {
    Outcome::Inserted(p) => {
      println!("created portrait {} for {}: {}", p.id, p.personnel_id, p.personas_ext);
    }
    Outcome::Updated(u) => println!("updated portrait {}: {}", u.id, u.personas_ext),
    Outcome::Skipped(reason) => println!("no change: {reason}"),
  }
}

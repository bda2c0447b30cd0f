//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use personas_core::request::PersonasRequest;

#[derive(Parser, Debug)]
#[command(name = "personas", version, about = "Maintain user portrait labels")]
pub struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "personas.toml")]
  pub config: PathBuf,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
  /// Add a label to a person's portrait, creating the portrait if needed.
  Add {
    #[arg(long)]
    person:     String,
    /// Catalog label to add.
    #[arg(long, conflicts_with = "label_name", required_unless_present = "label_name")]
    label_id:   Option<i64>,
    /// Free-form label to add; not checked against the catalog.
    #[arg(long)]
    label_name: Option<String>,
  },

  /// Remove a catalog label from a person's portrait.
  Remove {
    #[arg(long)]
    person:   String,
    #[arg(long)]
    label_id: i64,
  },

  /// Remove every label containing KEY from a person's portrait.
  FuzzyRemove {
    #[arg(long)]
    person: String,
    #[arg(long)]
    key:    String,
  },

  /// Print a person's current labels.
  Show {
    #[arg(long)]
    person: String,
  },

  /// Inspect or edit the label catalog.
  Label {
    #[command(subcommand)]
    command: LabelCommand,
  },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum LabelCommand {
  /// Add a catalog entry.
  Add {
    #[arg(long)]
    label_id: i64,
    #[arg(long)]
    name:     String,
  },
  /// List live catalog entries.
  List,
  /// Soft-delete every entry with LABEL_ID.
  Delete {
    #[arg(long)]
    label_id: i64,
  },
}

/// Build the manager request for a portrait-editing command.
pub fn request(person: &str, label_id: Option<i64>, label_name: Option<&str>) -> PersonasRequest {
  PersonasRequest {
    personnel_id: Some(person.to_owned()),
    label_id,
    label_name:   label_name.map(str::to_owned),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("personas").chain(argv.iter().copied()))
  }

  #[test]
  fn add_by_id() {
    let args = parse(&["add", "--person", "P1", "--label-id", "10"]).unwrap();
    assert_eq!(
      args.command,
      Command::Add { person: "P1".into(), label_id: Some(10), label_name: None }
    );
    assert_eq!(args.config, PathBuf::from("personas.toml"));
  }

  #[test]
  fn add_by_name() {
    let args = parse(&["add", "--person", "P2", "--label-name", "夜间活跃"]).unwrap();
    assert_eq!(
      args.command,
      Command::Add {
        person:     "P2".into(),
        label_id:   None,
        label_name: Some("夜间活跃".into()),
      }
    );
  }

  #[test]
  fn add_needs_exactly_one_label_selector() {
    assert!(parse(&["add", "--person", "P1"]).is_err());
    assert!(
      parse(&["add", "--person", "P1", "--label-id", "10", "--label-name", "VIP"]).is_err()
    );
  }

  #[test]
  fn fuzzy_remove_and_label_commands() {
    let args = parse(&["fuzzy-remove", "--person", "P5", "--key", "活跃"]).unwrap();
    assert_eq!(args.command, Command::FuzzyRemove { person: "P5".into(), key: "活跃".into() });

    let args = parse(&["-c", "alt.toml", "label", "add", "--label-id", "10", "--name", "VIP"])
      .unwrap();
    assert_eq!(args.config, PathBuf::from("alt.toml"));
    assert_eq!(
      args.command,
      Command::Label { command: LabelCommand::Add { label_id: 10, name: "VIP".into() } }
    );
  }

  #[test]
  fn request_carries_all_fields() {
    let req = request("P1", Some(10), None);
    assert_eq!(req, PersonasRequest::by_label_id("P1", 10));
  }
}

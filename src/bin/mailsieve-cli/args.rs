use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailsieve_lib::{DnsOptions, Heuristics, MarkerSet, ValidationOptions};

#[derive(Parser)]
#[command(name = "mailsieve-cli", version, about = "Tri d'une liste d'adresses e-mail")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// fichier de sortie (défaut: <entrée><millis>.txt, ou stdout avec --stdin)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// format: lines|human|json|ndjson
    #[arg(long, default_value = "lines")]
    pub format: String,

    /// marqueurs "invalid" supplémentaires (un par ligne)
    #[arg(long)]
    pub invalid_markers: Option<PathBuf>,

    /// marqueurs "fake" supplémentaires (un par ligne)
    #[arg(long)]
    pub fake_markers: Option<PathBuf>,

    /// les fichiers de marqueurs remplacent les listes par défaut
    #[arg(long)]
    pub replace_markers: bool,

    /// longueur minimale d'une adresse
    #[arg(long, default_value_t = 5)]
    pub min_length: usize,

    /// timeout DNS (ms, 0 = défaut du resolver)
    #[arg(long = "dns-timeout", default_value_t = 5_000)]
    pub dns_timeout_ms: u64,

    /// tentatives DNS par requête
    #[arg(long = "dns-attempts", default_value_t = 2)]
    pub dns_attempts: usize,

    /// filtre de logs (RUST_LOG est prioritaire)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide chaque ligne d'un fichier
    Check { input: PathBuf },
    /// valide une seule adresse
    Validate { email: String },
    /// affiche les enregistrements MX du domaine d'une adresse
    Mx { email: String },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            min_length: self.min_length,
            dns: DnsOptions {
                timeout_ms: self.dns_timeout_ms,
                attempts: self.dns_attempts,
            },
        }
    }

    pub fn heuristics(&self) -> Result<Heuristics> {
        let mut heuristics = Heuristics::default();
        if let Some(path) = &self.invalid_markers {
            let loaded = MarkerSet::load(path).context("load --invalid-markers")?;
            merge(&mut heuristics.invalid, loaded, self.replace_markers);
        }
        if let Some(path) = &self.fake_markers {
            let loaded = MarkerSet::load(path).context("load --fake-markers")?;
            merge(&mut heuristics.fake, loaded, self.replace_markers);
        }
        Ok(heuristics)
    }
}

fn merge(target: &mut MarkerSet, loaded: MarkerSet, replace: bool) {
    if replace {
        *target = loaded;
    } else {
        target.extend(loaded.iter().map(str::to_string));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        <Cli as Parser>::try_parse_from(std::iter::once("mailsieve-cli").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn merge_extends_defaults() {
        let mut set = MarkerSet::default_fake();
        let before = set.len();
        merge(&mut set, MarkerSet::new(["exemplo", "teste"]), false);
        assert_eq!(set.len(), before + 1);
        assert!(set.contains_marker("exemplo@example.com"));
        assert!(set.contains_marker("teste@example.com"));
    }

    #[test]
    fn merge_replaces_defaults() {
        let mut set = MarkerSet::default_fake();
        merge(&mut set, MarkerSet::new(["exemplo"]), true);
        assert_eq!(set.len(), 1);
        assert!(!set.contains_marker("teste@example.com"));
    }

    #[test]
    fn replace_markers_from_file() {
        let path = std::env::temp_dir().join(format!("mailsieve-fake-{}.txt", std::process::id()));
        std::fs::write(&path, "exemplo\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let replaced = cli(&["--fake-markers", &path_arg, "--replace-markers", "validate", "x@y.z"])
            .heuristics()
            .unwrap();
        let extended = cli(&["--fake-markers", &path_arg, "validate", "x@y.z"])
            .heuristics()
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(replaced.is_fake("exemplo@example.com"));
        assert!(!replaced.is_fake("teste@example.com"));
        assert!(extended.is_fake("teste@example.com"));
        // la liste "invalid" n'est pas touchée
        assert_eq!(replaced.invalid, MarkerSet::default_invalid());
    }

    #[test]
    fn dns_flags_reach_options() {
        let opts = cli(&["--dns-timeout", "750", "--dns-attempts", "4", "--min-length", "8", "--stdin"])
            .validation_options();
        assert_eq!(opts.min_length, 8);
        assert_eq!(opts.dns.timeout_ms, 750);
        assert_eq!(opts.dns.attempts, 4);
    }

    #[test]
    fn missing_marker_file_is_an_error() {
        let err = cli(&["--invalid-markers", "/nonexistent/markers.txt", "--stdin"])
            .heuristics()
            .unwrap_err();
        assert!(err.to_string().contains("--invalid-markers"), "{err}");
    }
}

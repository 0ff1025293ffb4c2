//! Subset the substitution features in a FEA file

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Parser;
use fea_subset::{FeatureFile, GlyphSet, ParseError, SubsetFilter, Tag, WriteOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Keep only the rules of a feature file that apply to some scripts,
/// languages and glyphs.
///
/// usage: INPUT [--scripts latn,DFLT] [--glyphs GLYPH_LIST]
fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    let filter = args.filter()?;
    debug!("subsetting with {filter:?}");

    let text = std::fs::read_to_string(&args.input)?;
    let file = FeatureFile::parse(&text)?;
    let subset = file.subset(&filter);

    let output = match &args.feature {
        Some(name) => subset
            .feature(name)
            .map(|feature| {
                feature.write(WriteOptions {
                    omit_declaration: args.omit_feature_declaration,
                }) + "\n"
            })
            .unwrap_or_else(|| {
                info!("feature '{name}' has nothing left");
                String::new()
            }),
        None if args.omit_feature_declaration => return Err(Error::OmitWithoutFeature),
        None => subset.write(),
    };

    match &args.out_path {
        Some(path) => {
            info!("writing {} bytes to {}", output.len(), path.display());
            std::fs::write(path, output)?;
        }
        None => std::io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("io error: '{0}'")]
    File(#[from] std::io::Error),
    #[error("bad config file: '{0}'")]
    Config(#[from] serde_yaml::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("--omit-feature-declaration requires --feature")]
    OmitWithoutFeature,
}

/// Subset FEA files
#[derive(Serialize, Deserialize, Parser, Debug, Clone, PartialEq)]
#[command(author, version, long_about = None)]
struct Args {
    /// The feature file to subset
    input: PathBuf,

    /// Scripts to keep, comma separated. Use DFLT for rules before any `script`.
    #[arg(long, value_delimiter = ',')]
    scripts: Option<Vec<Tag>>,

    /// Languages to keep, comma separated. Use dflt for rules before any `language`.
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<Tag>>,

    /// Path to a file listing the glyphs to keep, separated by whitespace.
    #[arg(short, long)]
    glyphs: Option<PathBuf>,

    /// A YAML file with `scripts`, `languages` and `glyphs` lists.
    ///
    /// Values given on the command line replace those in the file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only write the named feature
    #[arg(short, long)]
    feature: Option<String>,

    /// Write the contents of the feature without `feature NAME { ... } NAME;`
    #[arg(long)]
    omit_feature_declaration: bool,

    /// Path to write the result. Defaults to stdout.
    #[arg(short, long)]
    out_path: Option<PathBuf>,
}

impl Args {
    fn filter(&self) -> Result<SubsetFilter, Error> {
        let mut filter = match &self.config {
            Some(path) => SubsetFilter::from_yaml(&std::fs::read_to_string(path)?)?,
            None => SubsetFilter::default(),
        };
        if let Some(scripts) = &self.scripts {
            filter.scripts = Some(scripts.iter().cloned().collect());
        }
        if let Some(languages) = &self.languages {
            filter.languages = Some(languages.iter().cloned().collect());
        }
        if let Some(path) = &self.glyphs {
            filter.glyphs = Some(read_glyphs(path)?);
        }
        Ok(filter)
    }
}

fn read_glyphs(path: &Path) -> Result<GlyphSet, Error> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(Into::into)
        .collect())
}

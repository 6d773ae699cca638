use anyhow::Result;
use continual_dl::{config::DatasetConfig, dataset::ContinualDataset};
use itertools::Itertools;
use prettytable::{cell, row, Table};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
/// Inspect continual learning datasets.
enum Args {
    /// Build the dataset from a config file and summarize its samples.
    Info {
        /// configuration file
        config_file: PathBuf,
        /// summarize the evaluation split instead of the training split
        #[structopt(long)]
        test: bool,
    },
    /// Scan a one-subfolder-per-class tree and report per class file counts.
    Scan {
        /// dataset root directory
        folder: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Args::from_args() {
        Args::Info { config_file, test } => info(config_file, !test)?,
        Args::Scan { folder } => scan(folder)?,
    }

    Ok(())
}

fn info(config_file: PathBuf, train: bool) -> Result<()> {
    let config = DatasetConfig::open(&config_file)?;
    let dataset = config.build(train)?;
    let set = dataset.get_data(train)?;

    let mut table = Table::new();
    table.add_row(row!["split", if train { "train" } else { "test" }]);
    table.add_row(row!["samples", set.len()]);
    table.add_row(row!["x shape", format!("{:?}", set.x.shape())]);
    table.add_row(row!["classes", set.y.iter().unique().count()]);
    table.add_row(row!["data type", dataset.data_type().as_ref()]);
    table.add_row(row![
        "task ids",
        if set.t.is_some() { "present" } else { "none" }
    ]);
    table.add_row(row![
        "class order",
        match dataset.class_order() {
            Some(order) => format!("{:?}", order),
            None => "natural".to_owned(),
        }
    ]);
    table.add_row(row![
        "transformations",
        dataset
            .transformations()
            .iter()
            .map(|step| format!("{:?}", step))
            .join(", ")
    ]);
    table.printstd();

    Ok(())
}

fn scan(folder: PathBuf) -> Result<()> {
    let folder = image_folder::ImageFolder::scan(&folder)?;

    let mut table = Table::new();
    table.add_row(row!["class", "label", "files"]);
    folder.classes.iter().enumerate().for_each(|(label, class)| {
        let count = folder
            .samples
            .iter()
            .filter(|sample| sample.class == label)
            .count();
        table.add_row(row![class, label, count]);
    });
    table.printstd();

    Ok(())
}

// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Parser, Subcommand};
use cryostage_cli::{convert, pick, train};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Convert(convert::ConvertArgs),
    Train(train::TrainArgs),
    Pick(pick::PickArgs),
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Convert(convert_args)) => convert::convert(convert_args),
        Some(Commands::Train(train_args)) => train::train(train_args),
        Some(Commands::Pick(pick_args)) => pick::pick(pick_args),
        None => {}
    }
}

//! CLI for nutriscope, the recipe nutrition dashboard.

mod commands;

use clap::{Parser, Subcommand};
use nutriscope_core::NutrientSelection;

#[derive(Parser)]
#[command(name = "nutriscope")]
#[command(about = "nutriscope: recipe nutrition dashboard")]
#[command(version = nutriscope_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP dashboard server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "8050")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Recipe dataset (CSV)
        #[arg(long, env = "NUTRISCOPE_DATA", default_value = "Dv_Final.csv")]
        data: String,
    },

    /// Print preparation counts and the category breakdown
    Summary {
        /// Recipe dataset (CSV)
        #[arg(long, env = "NUTRISCOPE_DATA", default_value = "Dv_Final.csv")]
        data: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the nutrient heat map and statistics panel
    Heatmap {
        /// Nutrient: all, protein, calories, fat, sugar, carbs
        #[arg(long, default_value = "protein")]
        nutrient: NutrientSelection,

        /// Recipe dataset (CSV)
        #[arg(long, env = "NUTRISCOPE_DATA", default_value = "Dv_Final.csv")]
        data: String,

        /// Write the full chart description as JSON to this path
        #[arg(long)]
        output: Option<String>,
    },

    /// Write the prepared table with all derived columns as CSV
    Export {
        /// Recipe dataset (CSV)
        #[arg(long, env = "NUTRISCOPE_DATA", default_value = "Dv_Final.csv")]
        data: String,

        /// Destination CSV path
        #[arg(long)]
        output: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, data } => commands::serve::run(&host, port, &data),
        Commands::Summary { data, json } => commands::summary::run(&data, json),
        Commands::Heatmap {
            nutrient,
            data,
            output,
        } => commands::heatmap::run(&data, nutrient, output.as_deref()),
        Commands::Export { data, output } => commands::export::run(&data, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use nutriscope_core::Nutrient;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_heatmap_parses_selection() {
        let cli = Cli::try_parse_from(["nutriscope", "heatmap", "--nutrient", "fat"]).unwrap();
        match cli.command {
            Commands::Heatmap { nutrient, .. } => {
                assert_eq!(nutrient, NutrientSelection::Single(Nutrient::Fat));
            }
            _ => panic!("expected heatmap"),
        }
    }

    #[test]
    fn test_heatmap_rejects_unknown_nutrient() {
        assert!(Cli::try_parse_from(["nutriscope", "heatmap", "--nutrient", "fiber"]).is_err());
    }

    #[test]
    fn test_export_requires_output() {
        assert!(Cli::try_parse_from(["nutriscope", "export"]).is_err());
    }
}

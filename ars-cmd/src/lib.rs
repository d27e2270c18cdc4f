//! Command implementations for the Airsense CLI.
//!
//! Thin native wrapper over `ars-api` for poking the backend from a
//! terminal: list municipalities, years, stations and pollutants, fetch a
//! reading summary, or dump the pollutant dictionary.

use clap::Subcommand;

pub mod query;

#[derive(Subcommand)]
pub enum Command {
    /// List all municipalities with monitoring coverage
    Municipalities,

    /// List the years with available data for a municipality
    Years {
        /// Municipality id
        #[arg(short, long)]
        municipality: u32,
    },

    /// List stations of a municipality, optionally filtered by year
    Stations {
        /// Municipality id
        #[arg(short, long)]
        municipality: u32,

        /// Only stations operational in this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// List the pollutant exposure options for a station and year
    Pollutants {
        /// Station id
        #[arg(short, long)]
        station: u32,

        /// Year
        #[arg(short, long)]
        year: i32,
    },

    /// Fetch the reading summary for (station, year, exposure)
    Summary {
        /// Station id
        #[arg(short, long)]
        station: u32,

        /// Year
        #[arg(short, long)]
        year: i32,

        /// Exposure id (see `pollutants`)
        #[arg(short, long)]
        exposure: u32,
    },

    /// Dump the pollutant dictionary
    Dictionary,
}

pub async fn run(base_url: &str, command: Command) -> anyhow::Result<()> {
    let client = ars_api::ApiClient::new(base_url);
    match command {
        Command::Municipalities => query::run_municipalities(&client).await,
        Command::Years { municipality } => query::run_years(&client, municipality).await,
        Command::Stations { municipality, year } => {
            query::run_stations(&client, municipality, year).await
        }
        Command::Pollutants { station, year } => {
            query::run_pollutants(&client, station, year).await
        }
        Command::Summary {
            station,
            year,
            exposure,
        } => query::run_summary(&client, station, year, exposure).await,
        Command::Dictionary => query::run_dictionary(&client).await,
    }
}

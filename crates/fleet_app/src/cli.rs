use std::path::PathBuf;

use clap::Parser;
use fleet_core::{FilterField, FilterSet};

/// List fleet vehicles through the paginated list API.
#[derive(Debug, Parser)]
#[command(name = "fleet_app", version)]
pub struct Args {
    /// RON configuration file.
    #[arg(long, default_value = "fleet.ron")]
    pub config: PathBuf,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub plate: Option<String>,

    #[arg(long)]
    pub vin: Option<String>,

    /// Exact seat count.
    #[arg(long)]
    pub seats: Option<String>,

    /// yes/available, no/unavailable or all.
    #[arg(long)]
    pub availability: Option<String>,

    /// Company id; overrides the configured tenant.
    #[arg(long)]
    pub company: Option<String>,

    /// Page size; defaults to the configured page size.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of pages to walk.
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Seconds to wait for each page.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn filters(&self) -> FilterSet {
        [
            (FilterField::Brand, &self.brand),
            (FilterField::Model, &self.model),
            (FilterField::Plate, &self.plate),
            (FilterField::Vin, &self.vin),
            (FilterField::Seats, &self.seats),
            (FilterField::Availability, &self.availability),
            (FilterField::Company, &self.company),
        ]
        .into_iter()
        .fold(FilterSet::new(), |filters, (field, value)| match value {
            Some(value) => filters.with(field, value.as_str()),
            None => filters,
        })
    }
}
